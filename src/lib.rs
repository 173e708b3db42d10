#[macro_use]
extern crate lazy_static;

pub mod config;
mod errors;
pub mod project;
pub mod readme;
pub mod seed;
pub mod server;
pub mod storage;

pub use config::{Config, StoreKind};
pub use errors::{FolioError, Result};
pub use project::{slugify, NewProject, Project, ProjectId};
pub use readme::{GithubRepo, ReadmeResolver};
pub use storage::{ProjectStore, CATEGORY_ALL};
