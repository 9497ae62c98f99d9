use crate::model::token::TokenRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiStatus {
    Listening,
    Stopped,
}

#[derive(Debug, Clone)]
pub enum AppEvent {
    TokensLoaded {
        request_id: u64,
        tokens: Vec<TokenRecord>,
    },
    FetchFailed {
        request_id: u64,
        message: String,
    },
    Api(ApiStatus),
    LogMessage(String),
    Error(String),
}
