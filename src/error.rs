use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("listing fetch failed (status {status}): {msg}")]
    Fetch { status: u16, msg: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid filter: {0}")]
    InvalidFilter(String),
}
