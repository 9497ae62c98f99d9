use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use crate::config::{SourceConfig, SourceKind};
use crate::error::AppError;
use crate::event::AppEvent;
use crate::fixtures;
use crate::model::filter::TokenFilters;
use crate::model::token::TokenRecord;

/// In-process listing source: the fixture collection after a fixed delay.
#[derive(Debug, Clone)]
pub struct MockTokenSource {
    latency: Duration,
}

impl MockTokenSource {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    pub async fn fetch(&self, _filters: TokenFilters) -> Result<Vec<TokenRecord>, AppError> {
        tokio::time::sleep(self.latency).await;
        Ok(fixtures::mock_tokens())
    }
}

/// Listing source backed by the `/api/tokens` endpoint.
#[derive(Debug, Clone)]
pub struct HttpTokenSource {
    http: reqwest::Client,
    base_url: String,
}

impl HttpTokenSource {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, AppError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn fetch(&self, filters: TokenFilters) -> Result<Vec<TokenRecord>, AppError> {
        let url = format!("{}/api/tokens", self.base_url);
        let resp = self
            .http
            .get(&url)
            .query(&filters.query_pairs()[..])
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(AppError::Fetch {
                status: status.as_u16(),
                msg: if body.is_empty() {
                    "network response was not ok".to_string()
                } else {
                    body
                },
            });
        }
        Ok(resp.json().await?)
    }
}

#[derive(Debug, Clone)]
pub enum TokenSource {
    Mock(MockTokenSource),
    Http(HttpTokenSource),
}

impl TokenSource {
    pub fn from_config(cfg: &SourceConfig) -> Result<Self, AppError> {
        Ok(match cfg.kind {
            SourceKind::Mock => Self::Mock(MockTokenSource::new(Duration::from_millis(cfg.latency_ms))),
            SourceKind::Http => Self::Http(HttpTokenSource::new(&cfg.base_url, cfg.timeout())?),
        })
    }

    pub fn describe(&self) -> String {
        match self {
            Self::Mock(_) => "mock".to_string(),
            Self::Http(s) => s.base_url().to_string(),
        }
    }

    /// Always the complete collection; filters are forwarded but never
    /// narrow the result.
    pub async fn fetch(&self, filters: TokenFilters) -> Result<Vec<TokenRecord>, AppError> {
        match self {
            Self::Mock(s) => s.fetch(filters).await,
            Self::Http(s) => s.fetch(filters).await,
        }
    }
}

/// What a view knows about the listing request it issued.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState {
    Loading,
    Loaded(Vec<TokenRecord>),
    Failed(String),
}

impl FetchState {
    pub fn tokens(&self) -> Option<&[TokenRecord]> {
        match self {
            Self::Loaded(tokens) => Some(tokens),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Loading => "LOADING",
            Self::Loaded(t) if t.is_empty() => "EMPTY",
            Self::Loaded(_) => "LIVE",
            Self::Failed(_) => "ERROR",
        }
    }
}

/// Fetch in the background and report the result as an [`AppEvent`].
/// `request_id` lets the receiver drop answers to superseded requests.
pub fn spawn_fetch(
    source: Arc<TokenSource>,
    filters: TokenFilters,
    request_id: u64,
    tx: mpsc::Sender<AppEvent>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        tracing::info!(request_id, tab = filters.tab.slug(), time = filters.time.label(), "Fetching listings");
        let evt = match source.fetch(filters).await {
            Ok(tokens) => {
                tracing::info!(request_id, count = tokens.len(), "Listings loaded");
                AppEvent::TokensLoaded { request_id, tokens }
            }
            Err(e) => {
                tracing::warn!(request_id, error = %e, "Listing fetch failed");
                AppEvent::FetchFailed {
                    request_id,
                    message: e.to_string(),
                }
            }
        };
        let _ = tx.send(evt).await;
    })
}
