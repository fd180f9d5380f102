use clap::Parser;
use steam_tools_setup::utils::{logger, validation::Validate};
use steam_tools_setup::{
    BootstrapOptions, Bootstrapper, CliConfig, Outcome, Selection, SetupConfig, SetupError,
    SystemRunner,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting steam-tools-setup");
    tracing::debug!("CLI config: {:?}", cli);

    // 載入並驗證配置
    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => exit_with_error(&e),
    };

    let mut selection = Selection::default().with_groups(cli.groups.iter().cloned());
    if let Some(path) = cli.requirements_path() {
        selection = selection.with_requirements(path);
    }

    let options = BootstrapOptions {
        root: cli.root.clone(),
        launch: cli.launch,
        dry_run: cli.dry_run,
        pause: !cli.no_pause,
    };

    let bootstrapper = Bootstrapper::new(SystemRunner::new(), config)
        .with_selection(selection)
        .with_options(options);

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let outcome = match bootstrapper.run(&mut stdin.lock(), &mut stdout.lock()).await {
        Ok(outcome) => outcome,
        Err(e) => exit_with_error(&e),
    };

    match outcome {
        Outcome::Installed | Outcome::Planned => Ok(()),
        Outcome::Failed(e) => {
            tracing::error!(
                "❌ Setup failed: {} (Category: {:?})",
                e,
                e.category()
            );
            std::process::exit(e.exit_code());
        }
    }
}

fn load_config(cli: &CliConfig) -> steam_tools_setup::Result<SetupConfig> {
    cli.validate()?;

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path.display());
            SetupConfig::from_file(path)?
        }
        None => SetupConfig::builtin(),
    };

    let config = config.with_program_override(cli.pip.as_deref());
    config.validate()?;
    Ok(config)
}

fn exit_with_error(e: &SetupError) -> ! {
    tracing::error!("❌ Setup aborted: {}", e);
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}
