use std::string::FromUtf8Error;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("HTTP status {code} for URL: {url}")]
    HttpStatus { code: u16, url: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Gave up on {url} after {attempts} attempts")]
    AttemptsExhausted { url: String, attempts: u32 },

    #[error("Index document unavailable: {0}")]
    IndexUnavailable(String),

    #[error("Invalid year: must be 2005 or greater for XBRL")]
    InvalidXBRLYear,

    #[error("Invalid month: must be between 1 and 12")]
    InvalidMonth,

    #[error("File error: {0}")]
    FileError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Feed parse error: {0}")]
    FeedParse(String),

    #[error("Tree parse error: {0}")]
    TreeParse(String),

    #[error("Structural mismatch: {0}")]
    StructuralMismatch(String),

    #[error("Key field missing: {0}")]
    KeyFieldMissing(&'static str),

    #[error("Invalid CIK: {0:?}")]
    InvalidCik(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("UTF-8 conversion error: {0}")]
    Utf8Error(#[from] FromUtf8Error),
}

impl From<quick_xml::DeError> for LoaderError {
    fn from(error: quick_xml::DeError) -> Self {
        LoaderError::FeedParse(error.to_string())
    }
}

impl From<quick_xml::Error> for LoaderError {
    fn from(error: quick_xml::Error) -> Self {
        LoaderError::TreeParse(error.to_string())
    }
}

impl From<reqwest::Error> for LoaderError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            LoaderError::Timeout
        } else {
            LoaderError::Network(error.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, LoaderError>;
