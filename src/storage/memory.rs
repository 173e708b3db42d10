use std::sync::RwLock;

use crate::project::{NewProject, Project};
use crate::storage::{check_new_project, ProjectStore};
use crate::{FolioError, Result};

const LABEL: &str = "memory";

/// Fixed list of projects held in memory, append-only through `create`.
pub struct MemoryStorage {
    projects: RwLock<Vec<Project>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::with_projects(Vec::new())
    }

    pub fn with_projects(projects: Vec<Project>) -> Self {
        Self {
            projects: RwLock::new(projects),
        }
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned<T>(_: T) -> FolioError {
    FolioError::Storage(LABEL.to_owned(), "Lock poisoned".to_owned())
}

impl ProjectStore for MemoryStorage {
    fn label(&self) -> &str {
        LABEL
    }

    fn projects(&self) -> Result<Vec<Project>> {
        Ok(self.projects.read().map_err(poisoned)?.clone())
    }

    fn create(&self, new: NewProject) -> Result<Project> {
        let mut projects = self.projects.write().map_err(poisoned)?;
        check_new_project(&projects, &new)?;

        let id = projects
            .iter()
            .map(|p| p.id)
            .max()
            .unwrap_or(0)
            + 1;
        let project = new.into_project(id);
        projects.push(project.clone());

        log::info!("[{}] created project {} ({})", LABEL, id, project.name);
        Ok(project)
    }
}
