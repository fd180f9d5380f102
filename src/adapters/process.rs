use crate::domain::model::{CommandSpec, ProcessStatus};
use crate::domain::ports::ProcessRunner;
use crate::utils::error::{Result, SetupError};
use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;

/// Runs commands as child processes that share the installer's console.
#[derive(Debug, Clone, Default)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }

    fn build(command: &CommandSpec) -> Command {
        let mut cmd = Command::new(&command.program);
        cmd.args(&command.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        if let Some(dir) = &command.current_dir {
            cmd.current_dir(dir);
        }
        cmd
    }
}

#[async_trait]
impl ProcessRunner for SystemRunner {
    async fn run(&self, command: &CommandSpec) -> Result<ProcessStatus> {
        tracing::debug!("Spawning: {}", command.display());

        let status = Self::build(command)
            .status()
            .await
            .map_err(|source| SetupError::SpawnError {
                program: command.program.clone(),
                source,
            })?;

        tracing::debug!("'{}' exited with {:?}", command.display(), status.code());
        Ok(ProcessStatus::from(status))
    }
}
