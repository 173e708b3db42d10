use std::fs;
use std::path::{Path, PathBuf};

use crate::project::{NewProject, Project};
use crate::storage::ProjectStore;
use crate::{FolioError, Result};

const LOG_PREFIX: &str = "[static-storage]";

pub const STATIC_CREATE_REJECTED: &str =
    "Creating projects is not available in static deployment";

/// Read-only view over a generated `projects.json` file.
///
/// The file is read again on every call, so edits show up immediately and
/// a missing or broken file is reported by each call rather than once.
pub struct StaticStorage {
    label: String,
    path: PathBuf,
}

impl StaticStorage {
    /// Create a new static storage with a diagnostic label and file path
    pub fn new(label: String, path: &Path) -> Self {
        Self {
            label,
            path: PathBuf::from(path),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_fs(&self) -> Result<Vec<Project>> {
        let bytes = fs::read(&self.path).map_err(|err| {
            FolioError::Storage(
                self.label.clone(),
                format!("{}: {}", self.path.display(), err),
            )
        })?;
        let projects: Vec<Project> = serde_json::from_slice(&bytes)
            .map_err(|err| {
                FolioError::Storage(self.label.clone(), err.to_string())
            })?;

        log::debug!(
            "{} {} projects have been read from {}",
            LOG_PREFIX,
            projects.len(),
            self.path.display()
        );
        Ok(projects)
    }
}

impl ProjectStore for StaticStorage {
    fn label(&self) -> &str {
        &self.label
    }

    fn projects(&self) -> Result<Vec<Project>> {
        self.read_fs()
    }

    fn create(&self, _new: NewProject) -> Result<Project> {
        log::warn!("{} rejected create on {}", LOG_PREFIX, self.label);
        Err(FolioError::ReadOnly(STATIC_CREATE_REJECTED.to_owned()))
    }
}
