use folio::{FolioError, Project, ProjectId, ProjectStore};

use crate::models::store::StoreArgs;
use crate::AppError;

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "show", about = "Show one project by id or slug")]
pub struct Show {
    #[clap(help = "Numeric id or slug of the project")]
    project: String,
}

/// Look a project up by id when the reference is a number, by slug
/// otherwise.
pub fn find_project(
    store: &dyn ProjectStore,
    reference: &str,
) -> Result<Project, AppError> {
    let found = match reference.parse::<ProjectId>() {
        Ok(id) => store.get(id)?,
        Err(_) => store.get_by_slug(reference)?,
    };
    found.ok_or_else(|| AppError::ProjectNotFound(reference.to_owned()))
}

impl Show {
    pub fn run(&self, store: &StoreArgs) -> Result<(), AppError> {
        let store = store.open()?;
        let project = find_project(store.as_ref(), &self.project)?;
        let json = serde_json::to_string_pretty(&project)
            .map_err(FolioError::from)?;
        println!("{}", json);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio::seed::default_catalog;
    use folio::storage::MemoryStorage;

    #[test]
    fn numbers_are_ids_and_words_are_slugs() {
        let store = MemoryStorage::with_projects(default_catalog());

        assert_eq!(find_project(&store, "5").unwrap().name, "Moshi");
        assert_eq!(find_project(&store, "okhttp").unwrap().id, 2);
        assert!(matches!(
            find_project(&store, "42"),
            Err(AppError::ProjectNotFound(_))
        ));
    }
}
