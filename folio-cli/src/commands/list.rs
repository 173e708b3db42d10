use folio::{FolioError, Project, ProjectStore};

use crate::models::store::StoreArgs;
use crate::AppError;

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "list", about = "List the projects of the portfolio")]
pub struct List {
    #[clap(long, short, help = "Only show projects of this category")]
    category: Option<String>,
    #[clap(long, action, help = "Print the projects as JSON")]
    json: bool,
}

impl List {
    pub fn run(&self, store: &StoreArgs) -> Result<(), AppError> {
        let projects = store.open()?.list(self.category.as_deref())?;

        if self.json {
            let json = serde_json::to_string_pretty(&projects)
                .map_err(FolioError::from)?;
            println!("{}", json);
            return Ok(());
        }
        if projects.is_empty() {
            println!("There are no projects in this category yet.");
            return Ok(());
        }

        let slugs: Vec<String> = projects.iter().map(Project::slug).collect();
        let longest_slug = slugs.iter().map(String::len).max().unwrap_or(0);
        let longest_category = projects
            .iter()
            .map(|p| p.category.len())
            .max()
            .unwrap_or(0);

        for (project, slug) in projects.iter().zip(&slugs) {
            let featured = if project.is_featured { "*" } else { " " };
            println!(
                "{:>4} {} {:slug_width$} {:category_width$} {:>7}",
                project.id,
                featured,
                slug,
                project.category,
                project.stars,
                slug_width = longest_slug,
                category_width = longest_category,
            );
        }
        Ok(())
    }
}
