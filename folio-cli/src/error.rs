use folio::FolioError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    #[error("Project {0} has no GitHub URL")]
    MissingGithubUrl(String),

    #[error("Could not open project store: {0}")]
    StoreOpenError(String),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error(transparent)]
    FolioError(#[from] FolioError),
}
