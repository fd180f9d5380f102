use std::fs;
use steam_tools_setup::core::plan::build_plan;
use steam_tools_setup::utils::validation::Validate;
use steam_tools_setup::{Selection, SetupConfig};
use tempfile::TempDir;

#[test]
fn test_config_file_drives_install_command() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("setup.toml");

    fs::write(
        &config_path,
        r#"
[installer]
program = "python"
install_args = ["-m", "pip", "install", "--user"]

[packages]
required = ["requests", "Pillow", "customtkinter"]

[optional]
steam = ["steam[client]"]
ai = ["openai", "google-generativeai"]
"#,
    )
    .unwrap();

    let config = SetupConfig::from_file(&config_path).unwrap();
    config.validate().unwrap();

    let selection = Selection::default().with_groups(["ai"]);
    let plan = build_plan(&config, &selection).unwrap();

    assert_eq!(plan.steps.len(), 1);
    assert_eq!(
        plan.steps[0].command.display(),
        "python -m pip install --user requests Pillow customtkinter openai google-generativeai"
    );
}

#[test]
fn test_missing_config_file_is_a_config_error() {
    let temp_dir = TempDir::new().unwrap();
    let err = SetupConfig::from_file(temp_dir.path().join("absent.toml")).unwrap_err();

    assert!(matches!(err, steam_tools_setup::SetupError::ConfigReadError { .. }));
    assert!(err.to_string().contains("absent.toml"));
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn test_invalid_package_in_file_fails_validation() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("setup.toml");
    fs::write(&config_path, "[packages]\nrequired = [\"requests Pillow\"]\n").unwrap();

    let config = SetupConfig::from_file(&config_path).unwrap();
    let err = config.validate().unwrap_err();

    assert_eq!(err.exit_code(), 2);
}
