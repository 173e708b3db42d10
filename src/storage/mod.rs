use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use itertools::Itertools;

use crate::project::{NewProject, Project, ProjectId};
use crate::{FolioError, Result};

pub mod file_storage;
pub mod memory;
pub mod sqlite;

pub use file_storage::StaticStorage;
pub use memory::MemoryStorage;
pub use sqlite::SqliteStorage;

/// Category filter value meaning "no filter".
pub const CATEGORY_ALL: &str = "All";

/// Source of project records.
///
/// Lookups that find nothing return `Ok(None)`; an `Err` always means the
/// store itself failed.
pub trait ProjectStore: Send + Sync {
    /// Diagnostic label used in logs and errors.
    fn label(&self) -> &str;

    /// All projects in the store's natural order.
    fn projects(&self) -> Result<Vec<Project>>;

    /// Validate and insert a project, returning it with its assigned id.
    fn create(&self, new: NewProject) -> Result<Project>;

    fn count(&self) -> Result<usize> {
        Ok(self.projects()?.len())
    }

    /// Projects of one category, or all of them when `category` is absent
    /// or [`CATEGORY_ALL`].
    fn list(&self, category: Option<&str>) -> Result<Vec<Project>> {
        let projects = self.projects()?;
        Ok(match category {
            Some(category) if category != CATEGORY_ALL => projects
                .into_iter()
                .filter(|p| p.in_category(category))
                .collect(),
            _ => projects,
        })
    }

    fn get(&self, id: ProjectId) -> Result<Option<Project>> {
        Ok(self
            .projects()?
            .into_iter()
            .find(|p| p.id == id))
    }

    /// First project whose derived slug equals `slug`.
    ///
    /// Slugs are recomputed on every call, so this is a linear scan.
    fn get_by_slug(&self, slug: &str) -> Result<Option<Project>> {
        Ok(self
            .projects()?
            .into_iter()
            .find(|p| p.slug() == slug))
    }
}

/// Distinct categories in first-seen order, headed by [`CATEGORY_ALL`].
pub fn categories(store: &dyn ProjectStore) -> Result<Vec<String>> {
    let projects = store.projects()?;
    Ok(std::iter::once(CATEGORY_ALL.to_owned())
        .chain(
            projects
                .into_iter()
                .map(|p| p.category)
                .filter(|c| c != CATEGORY_ALL)
                .unique(),
        )
        .collect())
}

/// Validate a creation payload against the projects already stored.
///
/// Two projects with the same slug could never both be reached by slug,
/// so a clashing name is rejected.
pub fn check_new_project(
    existing: &[Project],
    new: &NewProject,
) -> Result<()> {
    new.validate()?;
    if let Some(slug) = new.slug() {
        if existing.iter().any(|p| p.slug() == slug) {
            return Err(FolioError::validation(
                "name",
                format!("A project with slug '{}' already exists", slug),
            ));
        }
    }
    Ok(())
}

/// Write every project of `store` to `path` as a pretty-printed JSON array,
/// the file a static deployment serves.
pub fn export_json<P: AsRef<Path>>(
    store: &dyn ProjectStore,
    path: P,
) -> Result<usize> {
    let path = path.as_ref();
    let projects = store.projects()?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &projects)?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    log::info!(
        "{} projects from {} have been written to {}",
        projects.len(),
        store.label(),
        path.display()
    );
    Ok(projects.len())
}
