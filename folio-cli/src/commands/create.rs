use folio::{NewProject, ProjectStore};

use crate::models::store::{Backend, StoreArgs};
use crate::AppError;

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "create", about = "Add a project to the portfolio")]
pub struct Create {
    #[clap(long, help = "Display name, also the source of the slug")]
    name: String,
    #[clap(long, help = "Short description")]
    description: String,
    #[clap(long, help = "Live site URL")]
    url: Option<String>,
    #[clap(long, help = "Repository URL, https://github.com/<owner>/<repo>")]
    github_url: Option<String>,
    #[clap(long, help = "Category, defaults to General")]
    category: Option<String>,
    #[clap(long, help = "Main programming language")]
    language: Option<String>,
    #[clap(long, allow_negative_numbers = true, help = "GitHub stars")]
    stars: Option<i64>,
    #[clap(long, action, help = "Show the project with a featured badge")]
    featured: bool,
}

impl Create {
    pub fn run(&self, store: &StoreArgs) -> Result<(), AppError> {
        // Projects added to the memory store vanish with the process.
        if store.store == Backend::Memory {
            return Err(AppError::ConfigError(
                "the memory store cannot keep new projects, use --store sqlite"
                    .to_owned(),
            ));
        }
        let store = store.open()?;
        let new = NewProject {
            name: Some(self.name.to_owned()),
            description: Some(self.description.to_owned()),
            url: self.url.to_owned(),
            github_url: self.github_url.to_owned(),
            category: self.category.to_owned(),
            language: self.language.to_owned(),
            stars: self.stars,
            is_featured: Some(self.featured),
        };

        let project = store.create(new)?;
        log::info!("[{}] created project {}", store.label(), project.id);
        println!(
            "Project {} created with id {} at /projects/{}",
            project.name,
            project.id,
            project.slug()
        );
        Ok(())
    }
}
