use crate::config::toml_config::SetupConfig;
use crate::core::pause;
use crate::core::plan::{self, Selection};
use crate::domain::model::{CommandSpec, InstallPlan, Outcome};
use crate::domain::ports::ProcessRunner;
use crate::utils::error::{Result, SetupError};
use std::io::{BufRead, Write};
use std::path::PathBuf;

const SETUP_COMMAND: &str = "steam-tools-setup";
const REQUIREMENTS_FILE: &str = "requirements.txt";

#[derive(Debug, Clone)]
pub struct BootstrapOptions {
    /// Directory the application folder and requirements file live in.
    pub root: PathBuf,
    pub launch: bool,
    pub dry_run: bool,
    pub pause: bool,
}

impl Default for BootstrapOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            launch: false,
            dry_run: false,
            pause: true,
        }
    }
}

/// Prints the setup banner, runs the package manager, reports the result and
/// waits for the user before returning.
pub struct Bootstrapper<R: ProcessRunner> {
    runner: R,
    config: SetupConfig,
    selection: Selection,
    options: BootstrapOptions,
}

impl<R: ProcessRunner> Bootstrapper<R> {
    pub fn new(runner: R, config: SetupConfig) -> Self {
        Self {
            runner,
            config,
            selection: Selection::default(),
            options: BootstrapOptions::default(),
        }
    }

    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    pub fn with_options(mut self, options: BootstrapOptions) -> Self {
        self.options = options;
        self
    }

    /// Runs the whole setup. Configuration problems are returned as `Err`
    /// before anything is printed; install and launch failures are reported
    /// on `out` and come back as `Outcome::Failed`.
    pub async fn run<I: BufRead, W: Write>(&self, input: &mut I, out: &mut W) -> Result<Outcome> {
        let plan = plan::build_plan(&self.config, &self.selection)?;
        let app = &self.config.app.name;

        tracing::info!("🚀 Starting {} setup", app);
        writeln!(out, "=== {} Setup ===", app)?;
        writeln!(out)?;
        writeln!(out, "Installing dependencies...")?;

        let outcome = if self.options.dry_run {
            self.print_plan(&plan, out)?;
            Outcome::Planned
        } else if let Some(error) = self.install(&plan, out).await? {
            self.print_failure("Dependency installation failed", &error, out)?;
            Outcome::Failed(error)
        } else {
            self.print_success(out)?;
            if !self.options.launch {
                Outcome::Installed
            } else if let Some(error) = self.launch(out).await? {
                self.print_failure("Could not start the application", &error, out)?;
                Outcome::Failed(error)
            } else {
                Outcome::Installed
            }
        };

        if self.options.pause {
            writeln!(out)?;
            pause::wait_for_acknowledgement(input, out)?;
        }

        tracing::info!("Setup finished with exit code {}", outcome.exit_code());
        Ok(outcome)
    }

    /// Runs each step in order and stops at the first failure, which is
    /// returned rather than propagated so the caller can still report it.
    async fn install<W: Write>(&self, plan: &InstallPlan, out: &mut W) -> Result<Option<SetupError>> {
        for step in &plan.steps {
            let command = step.command.display();
            tracing::info!("📦 Installing {}: {}", step.label, command);
            writeln!(out, "> {}", command)?;
            out.flush()?;

            match self.runner.run(&step.command).await {
                Ok(status) if status.success() => {
                    tracing::debug!("'{}' succeeded", command);
                }
                Ok(status) => {
                    tracing::error!("❌ '{}' exited with {:?}", command, status.code);
                    return Ok(Some(SetupError::InstallFailedError {
                        command,
                        code: status.code,
                    }));
                }
                Err(e) => {
                    tracing::error!("❌ Could not run '{}': {}", command, e);
                    return Ok(Some(e));
                }
            }
        }
        Ok(None)
    }

    async fn launch<W: Write>(&self, out: &mut W) -> Result<Option<SetupError>> {
        let command = plan::launch_command(&self.config, &self.options.root);
        let shown = command.display();

        writeln!(out)?;
        writeln!(out, "Launching {}...", self.config.app.name)?;
        out.flush()?;
        tracing::info!("Launching '{}' in {:?}", shown, command.current_dir);

        Ok(match self.runner.run(&command).await {
            Ok(status) if status.success() => None,
            Ok(status) => Some(SetupError::LaunchFailedError {
                command: shown,
                code: status.code,
            }),
            // 啟動失敗不是安裝失敗
            Err(SetupError::SpawnError { source, .. }) => Some(SetupError::LaunchSpawnError {
                command: shown,
                dir: command
                    .current_dir
                    .as_deref()
                    .unwrap_or(self.options.root.as_path())
                    .display()
                    .to_string(),
                source,
            }),
            Err(e) => Some(e),
        })
    }

    fn print_plan<W: Write>(&self, plan: &InstallPlan, out: &mut W) -> Result<()> {
        for step in &plan.steps {
            writeln!(out, "Would run: {}", step.command.display())?;
        }
        if self.options.launch {
            let launch = plan::launch_command(&self.config, &self.options.root);
            writeln!(out, "Would run: {}", launch.display())?;
        }
        Ok(())
    }

    fn print_success<W: Write>(&self, out: &mut W) -> Result<()> {
        let app = &self.config.app;

        writeln!(out)?;
        writeln!(out, "{} is ready to use!", app.name)?;
        writeln!(out)?;
        writeln!(out, "To run the application:")?;
        writeln!(out, "  cd {}", app.directory)?;
        writeln!(out, "  {} {}", app.interpreter, app.entry_point)?;

        let skipped: Vec<&str> = self
            .config
            .group_names()
            .into_iter()
            .filter(|name| !self.selection.groups.iter().any(|g| g == name))
            .collect();

        writeln!(out)?;
        if !skipped.is_empty() {
            writeln!(
                out,
                "Note: optional dependencies are not installed (groups: {}).",
                skipped.join(", ")
            )?;
            writeln!(
                out,
                "  To add them, run: {} --with {}",
                SETUP_COMMAND,
                skipped.join(",")
            )?;
        }

        let installer = &self.config.installer;
        let requirements = CommandSpec::new(&installer.program)
            .args(installer.install_args.iter().cloned())
            .arg(&installer.requirements_flag)
            .arg(REQUIREMENTS_FILE);
        writeln!(
            out,
            "Extra dependencies can also be enabled by uncommenting them in {} and running: {}",
            REQUIREMENTS_FILE,
            requirements.display()
        )?;
        Ok(())
    }

    fn print_failure<W: Write>(&self, headline: &str, error: &SetupError, out: &mut W) -> Result<()> {
        writeln!(out)?;
        writeln!(out, "{}: {}", headline, error.user_friendly_message())?;
        writeln!(out, "Hint: {}", error.recovery_suggestion())?;
        Ok(())
    }
}
