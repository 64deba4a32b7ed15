use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FolioError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Failed to read config file at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to write {path}: {source}")]
    ConfigWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("No backend URL found. Set FOLIO_URL or run 'folio init'")]
    MissingUrl,

    #[error("No anon key found. Set FOLIO_ANON_KEY or run 'folio init'")]
    MissingAnonKey,

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Login failed: {0}")]
    LoginFailed(String),

    #[error("{0}")]
    Validation(String),

    #[error("{what} not found: {id}")]
    NotFound { what: String, id: i64 },

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The failure was already shown to the user as a notification.
    #[error("{0}")]
    Reported(String),
}

impl FolioError {
    /// Message suitable for a notification: the backend's own text where there is one.
    pub fn user_message(&self) -> String {
        match self {
            FolioError::ApiError { message, .. } if !message.is_empty() => message.clone(),
            FolioError::Http(e) if e.is_connect() || e.is_timeout() => {
                "Could not reach the backend".to_string()
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FolioError>;
