pub mod toml_config;

#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "steam-tools-setup")]
#[command(about = "Install the Python dependencies of Steam Tools Generator")]
pub struct CliConfig {
    /// Path to a TOML configuration file (built-in defaults when omitted)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory containing the application folder and requirements.txt
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Optional dependency groups to install as well, e.g. `--with steam`
    #[arg(long = "with", value_delimiter = ',')]
    pub groups: Vec<String>,

    /// Also install from a requirements file (relative to --root)
    #[arg(long)]
    pub requirements: Option<PathBuf>,

    /// Package manager program to invoke instead of the configured one
    #[arg(long)]
    pub pip: Option<String>,

    /// Start the application after a successful install
    #[arg(long)]
    pub launch: bool,

    /// Show what would be installed without running anything
    #[arg(long)]
    pub dry_run: bool,

    /// Exit without waiting for a keypress
    #[arg(long)]
    pub no_pause: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Requirements file resolved against `--root`.
    pub fn requirements_path(&self) -> Option<PathBuf> {
        self.requirements.as_ref().map(|p| self.root.join(p))
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(pip) = &self.pip {
            validation::validate_non_empty_string("--pip", pip)?;
        }
        for group in &self.groups {
            validation::validate_group_name("--with", group)?;
        }
        if let Some(path) = &self.requirements {
            validation::validate_path("--requirements", &path.to_string_lossy())?;
        }
        Ok(())
    }
}
