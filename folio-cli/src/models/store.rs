use std::path::PathBuf;
use std::sync::Arc;

use folio::config::{StoreConfig, DEFAULT_DATABASE, DEFAULT_PROJECTS_FILE};
use folio::{ProjectStore, StoreKind};

use crate::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Backend {
    Memory,
    Sqlite,
    Static,
}

impl From<Backend> for StoreKind {
    fn from(backend: Backend) -> Self {
        match backend {
            Backend::Memory => StoreKind::Memory,
            Backend::Sqlite => StoreKind::Sqlite,
            Backend::Static => StoreKind::Static,
        }
    }
}

/// Flags shared by every command that reads projects.
#[derive(Clone, Debug, clap::Args)]
pub struct StoreArgs {
    #[clap(
        long,
        value_enum,
        env = "FOLIO_STORE",
        default_value = "memory",
        global = true,
        help = "Backend holding the projects"
    )]
    pub store: Backend,
    #[clap(
        long,
        env = "FOLIO_DATABASE",
        default_value = DEFAULT_DATABASE,
        global = true,
        help = "SQLite database file"
    )]
    pub database: PathBuf,
    #[clap(
        long,
        env = "FOLIO_PROJECTS_FILE",
        default_value = DEFAULT_PROJECTS_FILE,
        global = true,
        help = "projects.json read by the static backend"
    )]
    pub projects_file: PathBuf,
    #[clap(
        long,
        env = "FOLIO_NO_SEED",
        action,
        global = true,
        help = "Do not fill an empty SQLite table with the default catalog"
    )]
    pub no_seed: bool,
}

impl StoreArgs {
    pub fn config(&self) -> StoreConfig {
        StoreConfig {
            kind: self.store.into(),
            database: self.database.clone(),
            projects_file: self.projects_file.clone(),
            seed: !self.no_seed,
        }
    }

    pub fn open(&self) -> Result<Arc<dyn ProjectStore>, AppError> {
        log::debug!("Using the {:?} store", self.store);
        self.config()
            .open()
            .map_err(|e| AppError::StoreOpenError(e.to_string()))
    }
}
