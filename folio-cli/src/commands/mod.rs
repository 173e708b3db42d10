use clap::Subcommand;

mod categories;
mod create;
mod generate;
mod list;
mod readme;
mod serve;
mod show;

#[derive(Debug, Subcommand)]
pub enum Commands {
    Serve(serve::Serve),
    List(list::List),
    Show(show::Show),
    Categories(categories::Categories),
    Readme(readme::Readme),
    Create(create::Create),
    Generate(generate::Generate),
}
