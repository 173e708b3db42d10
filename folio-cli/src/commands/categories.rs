use folio::storage::categories;

use crate::models::store::StoreArgs;
use crate::AppError;

#[derive(Clone, Debug, clap::Args)]
#[clap(name = "categories", about = "List the project categories")]
pub struct Categories {}

impl Categories {
    pub fn run(&self, store: &StoreArgs) -> Result<(), AppError> {
        let store = store.open()?;
        for category in categories(store.as_ref())? {
            println!("{}", category);
        }
        Ok(())
    }
}
