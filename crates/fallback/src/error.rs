use thiserror::Error;

pub type Result<T> = std::result::Result<T, FallbackError>;

#[derive(Error, Debug)]
pub enum FallbackError {
    #[error("API key missing: set ${0}")]
    ApiKeyMissing(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Provider error: {0}")]
    Provider(String),
}
