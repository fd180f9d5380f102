use crate::domain::model::{CommandSpec, ProcessStatus};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Runs an external command to completion and reports its exit status.
///
/// A command that cannot be started at all is an error; a command that starts
/// and exits non-zero is an `Ok` status the caller has to inspect.
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    async fn run(&self, command: &CommandSpec) -> Result<ProcessStatus>;
}
