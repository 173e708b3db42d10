use std::path::PathBuf;

use folio::config::DEFAULT_PROJECTS_FILE;
use folio::storage::export_json;

use crate::models::store::StoreArgs;
use crate::AppError;

#[derive(Clone, Debug, clap::Args)]
#[clap(
    name = "generate",
    about = "Write projects.json for a static deployment"
)]
pub struct Generate {
    #[clap(
        long,
        short,
        default_value = DEFAULT_PROJECTS_FILE,
        help = "Output file"
    )]
    out: PathBuf,
}

impl Generate {
    pub fn run(&self, store: &StoreArgs) -> Result<(), AppError> {
        let store = store.open()?;
        let written = export_json(store.as_ref(), &self.out)?;
        println!(
            "Generated {} with {} projects",
            self.out.display(),
            written
        );
        Ok(())
    }
}
