use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use url::Url;

use crate::readme::{ReadmeResolver, DEFAULT_TIMEOUT, RAW_CONTENT_HOST};
use crate::seed::default_catalog;
use crate::storage::{
    MemoryStorage, ProjectStore, SqliteStorage, StaticStorage,
};
use crate::{FolioError, Result};

pub const DEFAULT_BIND: &str = "127.0.0.1:5000";
pub const DEFAULT_DATABASE: &str = "folio.sqlite";
pub const DEFAULT_PROJECTS_FILE: &str = "client/public/projects.json";

/// Which backend holds the projects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreKind {
    /// Fixed list in memory, seeded with the default catalog
    #[default]
    Memory,
    /// Relational table in a SQLite database
    Sqlite,
    /// Read-only generated `projects.json`
    Static,
}

impl FromStr for StoreKind {
    type Err = FolioError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "sqlite" => Ok(Self::Sqlite),
            "static" => Ok(Self::Static),
            other => Err(FolioError::validation(
                "store",
                format!("Unknown store '{}'", other),
            )),
        }
    }
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Memory => "memory",
            Self::Sqlite => "sqlite",
            Self::Static => "static",
        })
    }
}

#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub kind: StoreKind,
    pub database: PathBuf,
    pub projects_file: PathBuf,
    /// Fill an empty SQLite table with the default catalog
    pub seed: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            kind: StoreKind::default(),
            database: PathBuf::from(DEFAULT_DATABASE),
            projects_file: PathBuf::from(DEFAULT_PROJECTS_FILE),
            seed: true,
        }
    }
}

impl StoreConfig {
    pub fn open(&self) -> Result<Arc<dyn ProjectStore>> {
        log::info!("Opening {} project store", self.kind);
        let store: Arc<dyn ProjectStore> = match self.kind {
            StoreKind::Memory => {
                Arc::new(MemoryStorage::with_projects(default_catalog()))
            }
            StoreKind::Sqlite => {
                let storage = SqliteStorage::open(&self.database)?;
                if self.seed {
                    storage.seed(&default_catalog())?;
                }
                Arc::new(storage)
            }
            StoreKind::Static => Arc::new(StaticStorage::new(
                "projects.json".to_owned(),
                &self.projects_file,
            )),
        };
        Ok(store)
    }
}

#[derive(Debug, Clone)]
pub struct ReadmeConfig {
    pub raw_host: Url,
    pub timeout: Duration,
}

impl Default for ReadmeConfig {
    fn default() -> Self {
        Self {
            raw_host: Url::parse(RAW_CONTENT_HOST)
                .expect("raw content host is a valid URL"),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ReadmeConfig {
    pub fn resolver(&self) -> Result<ReadmeResolver> {
        ReadmeResolver::new(self.raw_host.clone(), self.timeout)
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind: SocketAddr,
    /// Upper bound for handling one HTTP request
    pub request_timeout: Duration,
    pub store: StoreConfig,
    pub readme: ReadmeConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND
                .parse()
                .expect("default bind address is valid"),
            request_timeout: Duration::from_secs(30),
            store: StoreConfig::default(),
            readme: ReadmeConfig::default(),
        }
    }
}

impl Config {
    pub fn open_store(&self) -> Result<Arc<dyn ProjectStore>> {
        self.store.open()
    }

    pub fn resolver(&self) -> Result<ReadmeResolver> {
        self.readme.resolver()
    }
}
