use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("URL is required")]
    MissingUrl,

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Invalid hostname: {0}")]
    InvalidHost(String),

    #[error("Connection failed: {0}")]
    Unreachable(reqwest::Error),

    #[error("Request timed out: {0}")]
    Timeout(reqwest::Error),

    #[error("HTTP request failed: {0}")]
    HttpError(reqwest::Error),
}

impl From<reqwest::Error> for ScanError {
    /// Sorts a transport failure by reqwest's own error kinds. Timeouts are
    /// checked first so a connect timeout is reported as a timeout.
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ScanError::Timeout(err)
        } else if err.is_connect() {
            ScanError::Unreachable(err)
        } else {
            ScanError::HttpError(err)
        }
    }
}

pub type Result<T> = std::result::Result<T, ScanError>;
