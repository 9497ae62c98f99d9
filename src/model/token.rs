use serde::{Deserialize, Serialize};

/// Static listing data for one token. Loaded once per fetch and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenRecord {
    pub id: String,
    pub name: String,
    pub ticker: String,
    pub icon_url: String,
    pub age: String,
    #[serde(default)]
    pub socials: Socials,
    pub market_cap: MarketCap,
    pub liquidity: f64,
    pub volume: f64,
    pub transactions: Transactions,
    pub token_info: TokenInfo,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Socials {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telegram: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketCap {
    pub value: f64,
    /// Fractional change (1.361 renders as +136.10%).
    pub change_percent: f64,
    #[serde(rename = "sparklineData")]
    pub sparkline: Vec<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transactions {
    pub total: u32,
    pub buys: u32,
    pub sells: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenInfo {
    pub metric_a: f64,
    pub metric_b: f64,
    pub holder_count: u32,
    pub team_allocation: f64,
    pub status: ListingStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListingStatus {
    Paid,
    Unpaid,
}

impl std::fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Paid => write!(f, "Paid"),
            Self::Unpaid => write!(f, "Unpaid"),
        }
    }
}

/// Live market fields for one token, replaced wholesale on every update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicRecord {
    pub market_cap: f64,
    pub liquidity: f64,
    pub volume: f64,
    /// Oldest sample first. Length never changes across updates.
    #[serde(rename = "sparklineData")]
    pub sparkline: Vec<f64>,
}

impl DynamicRecord {
    pub fn from_token(token: &TokenRecord) -> Self {
        Self {
            market_cap: token.market_cap.value,
            liquidity: token.liquidity,
            volume: token.volume,
            sparkline: token.market_cap.sparkline.clone(),
        }
    }

    /// Whether the latest sample sits above the oldest one.
    pub fn is_trending_up(&self) -> bool {
        match self.sparkline.first() {
            Some(first) => self.market_cap > *first,
            None => self.market_cap > 0.0,
        }
    }
}

/// Drop the oldest sample and append `sample`, keeping the window length.
pub fn push_sample(history: &[f64], sample: f64) -> Vec<f64> {
    if history.is_empty() {
        return Vec::new();
    }
    let mut out = Vec::with_capacity(history.len());
    out.extend_from_slice(&history[1..]);
    out.push(sample);
    out
}
