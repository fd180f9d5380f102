pub mod bootstrap;
pub mod pause;
pub mod plan;

pub use crate::domain::model::{CommandSpec, InstallPlan, InstallStep, Outcome, ProcessStatus};
pub use crate::domain::ports::ProcessRunner;
pub use crate::utils::error::Result;
