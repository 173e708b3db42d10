use crate::commands::Commands;
use crate::models::store::StoreArgs;

use clap::Parser;

#[derive(Parser, Debug)]
#[clap(name = "folio")]
#[clap(about = "Serve and manage a project portfolio", long_about = None)]
pub struct Cli {
    #[clap(flatten)]
    pub store: StoreArgs,

    #[clap(subcommand)]
    pub command: Commands,
}
