pub mod aggregate;
pub mod changelog;
pub mod commands;
pub mod config;
pub mod error;
pub mod fetch;
pub mod render;
pub mod sources;

pub use changelog::{ChangelogEntry, Section};
pub use config::Config;
pub use error::{Error, Result};
pub use fetch::Fetcher;
pub use sources::{ChangelogSource, Registry};
