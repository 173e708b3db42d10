use clap::Parser;

mod cli;
mod commands;
mod error;
mod models;

pub use error::AppError;

use cli::Cli;
use commands::Commands;

async fn run() -> Result<(), AppError> {
    let args = Cli::parse();
    let store = &args.store;

    match &args.command {
        Commands::Serve(serve) => serve.run(store).await,
        Commands::List(list) => list.run(store),
        Commands::Show(show) => show.run(store),
        Commands::Categories(categories) => categories.run(store),
        Commands::Readme(readme) => readme.run(store).await,
        Commands::Create(create) => create.run(store),
        Commands::Generate(generate) => generate.run(store),
    }
}

#[tokio::main]
async fn main() {
    env_logger::init();

    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}
