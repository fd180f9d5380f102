pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::process::SystemRunner;
pub use config::toml_config::SetupConfig;
pub use crate::core::bootstrap::{BootstrapOptions, Bootstrapper};
pub use crate::core::plan::Selection;
pub use domain::model::Outcome;
pub use utils::error::{Result, SetupError};
