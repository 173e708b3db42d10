use crate::commands::show::find_project;
use crate::models::readme::ReadmeArgs;
use crate::models::store::StoreArgs;
use crate::AppError;

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "readme", about = "Print the README of a project")]
pub struct Readme {
    #[clap(help = "Numeric id or slug of the project")]
    project: String,
    #[clap(flatten)]
    readme: ReadmeArgs,
}

impl Readme {
    pub async fn run(&self, store: &StoreArgs) -> Result<(), AppError> {
        let resolver = self.readme.config()?.resolver()?;
        let store = store.open()?;
        let project = find_project(store.as_ref(), &self.project)?;
        let github_url = project
            .github_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| AppError::MissingGithubUrl(project.name.clone()))?;

        match resolver.fetch(github_url).await {
            Ok(readme) => {
                println!("{}", readme);
                Ok(())
            }
            Err(e) => {
                println!("Could not load README. View it on GitHub:");
                println!("\t{}", github_url);
                Err(e.into())
            }
        }
    }
}
