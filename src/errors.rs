use thiserror::Error;

pub type Result<T> = std::result::Result<T, FolioError>;

#[derive(Error, Debug)]
pub enum FolioError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parsing error")]
    Parse,
    #[error("Invalid GitHub URL: {0}")]
    InvalidSourceUrl(String),
    #[error("README not found for {owner}/{repo}")]
    ReadmeNotFound { owner: String, repo: String },
    #[error("Invalid {field}: {message}")]
    Validation { field: String, message: String },
    #[error("{0}")]
    ReadOnly(String),
    #[error("Storage error: {0} {1}")]
    Storage(String, String),
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FolioError {
    pub fn validation<F, M>(field: F, message: M) -> Self
    where
        F: Into<String>,
        M: Into<String>,
    {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for FolioError {
    fn from(_: serde_json::Error) -> Self {
        Self::Parse
    }
}

impl From<rusqlite::Error> for FolioError {
    fn from(e: rusqlite::Error) -> Self {
        Self::Storage("sqlite".to_owned(), e.to_string())
    }
}
