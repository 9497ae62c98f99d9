use crate::model::token::{
    ListingStatus, MarketCap, Socials, TokenInfo, TokenRecord, Transactions,
};

/// Number of samples every fixture sparkline carries.
pub const SPARKLINE_LEN: usize = 10;

#[allow(clippy::too_many_arguments)]
fn token(
    id: &str,
    name: &str,
    ticker: &str,
    color: &str,
    age: &str,
    market_cap: (f64, f64, [f64; SPARKLINE_LEN]),
    liquidity: f64,
    volume: f64,
    transactions: (u32, u32, u32),
    info: (f64, f64, u32, f64, ListingStatus),
) -> TokenRecord {
    let initial = name.chars().next().unwrap_or('?').to_ascii_uppercase();
    TokenRecord {
        id: id.to_string(),
        name: name.to_string(),
        ticker: ticker.to_string(),
        icon_url: format!("https://placehold.co/32x32/{}/ffffff?text={}", color, initial),
        age: age.to_string(),
        socials: Socials {
            twitter: Some("#".to_string()),
            telegram: Some("#".to_string()),
            website: Some("#".to_string()),
        },
        market_cap: MarketCap {
            value: market_cap.0,
            change_percent: market_cap.1,
            sparkline: market_cap.2.to_vec(),
        },
        liquidity,
        volume,
        transactions: Transactions {
            total: transactions.0,
            buys: transactions.1,
            sells: transactions.2,
        },
        token_info: TokenInfo {
            metric_a: info.0,
            metric_b: info.1,
            holder_count: info.2,
            team_allocation: info.3,
            status: info.4,
        },
    }
}

/// The listing collection served by both the HTTP API and the in-process
/// mock source.
pub fn mock_tokens() -> Vec<TokenRecord> {
    use ListingStatus::{Paid, Unpaid};
    vec![
        token(
            "pumpbook",
            "Pumpbook",
            "Pumpfun...",
            "7c3aed",
            "3m",
            (13_500.0, 1.361, [10.0, 20.0, 15.0, 30.0, 25.0, 40.0, 50.0, 60.0, 80.0, 136.0]),
            16_600.0,
            32_600.0,
            (476, 299, 177),
            (0.1505, 0.0, 157, 0.0, Unpaid),
        ),
        token(
            "tiberius",
            "Tiberius",
            "Tiberius...",
            "c2410c",
            "38m",
            (23_200.0, -0.428, [100.0, 90.0, 85.0, 80.0, 75.0, 60.0, 55.0, 60.0, 50.0, 42.0]),
            16_300.0,
            20_300.0,
            (347, 176, 171),
            (0.2431, 0.0201, 359, 0.0, Paid),
        ),
        token(
            "crime",
            "CRIME",
            "1 crime can c...",
            "16a34a",
            "18m",
            (15_500.0, 0.321, [20.0, 30.0, 25.0, 40.0, 35.0, 50.0, 45.0, 60.0, 70.0, 80.0]),
            17_800.0,
            41_100.0,
            (75, 47, 28),
            (0.2395, 0.0401, 99, 0.0088, Unpaid),
        ),
        token(
            "squidward",
            "squidward",
            "squidwa...",
            "0ea5e9",
            "30m",
            (17_400.0, -0.187, [60.0, 55.0, 50.0, 45.0, 40.0, 35.0, 30.0, 25.0, 20.0, 18.0]),
            18_700.0,
            73_900.0,
            (118, 57, 61),
            (0.2239, 0.0425, 135, 0.0, Unpaid),
        ),
        token(
            "mrbeast2",
            "MrBeast2.0",
            "2rady...",
            "db2777",
            "25m",
            (13_900.0, 3.324, [5.0, 10.0, 8.0, 15.0, 20.0, 30.0, 50.0, 80.0, 120.0, 332.0]),
            17_000.0,
            33_200.0,
            (34, 22, 12),
            (0.2479, 0.0169, 61, 0.0511, Unpaid),
        ),
        token(
            "cat",
            "Cat",
            "cat...",
            "f97316",
            "1h",
            (25_000.0, 0.55, [40.0, 42.0, 45.0, 43.0, 48.0, 50.0, 52.0, 53.0, 50.0, 55.0]),
            20_000.0,
            50_000.0,
            (230, 120, 110),
            (0.10, 0.01, 200, 0.0, Paid),
        ),
    ]
}
