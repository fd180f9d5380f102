use thiserror::Error;

#[derive(Error, Debug)]
pub enum SetupError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Cannot read configuration file {path}: {source}")]
    ConfigReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parsing error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unknown dependency group '{name}' (available: {available})")]
    UnknownGroupError { name: String, available: String },

    #[error("Failed to start '{program}': {source}")]
    SpawnError {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{command}' exited with {}", describe_code(.code))]
    InstallFailedError { command: String, code: Option<i32> },

    #[error("Failed to start '{command}' in {dir}: {source}")]
    LaunchSpawnError {
        command: String,
        dir: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{command}' exited with {}", describe_code(.code))]
    LaunchFailedError { command: String, code: Option<i32> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Installer,
    Launch,
    Io,
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {}", code),
        None => "no status (terminated by signal)".to_string(),
    }
}

/// 子程序失敗時沿用其退出碼，0 或未知時回退為 1
fn child_exit_code(code: Option<i32>) -> i32 {
    match code {
        Some(code) if code != 0 => code,
        _ => 1,
    }
}

impl SetupError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SetupError::ConfigReadError { .. }
            | SetupError::TomlParseError(_)
            | SetupError::InvalidConfigValueError { .. }
            | SetupError::UnknownGroupError { .. } => ErrorCategory::Configuration,
            SetupError::SpawnError { .. } | SetupError::InstallFailedError { .. } => {
                ErrorCategory::Installer
            }
            SetupError::LaunchSpawnError { .. } | SetupError::LaunchFailedError { .. } => {
                ErrorCategory::Launch
            }
            SetupError::IoError(_) => ErrorCategory::Io,
        }
    }

    /// Process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            SetupError::SpawnError { .. } | SetupError::LaunchSpawnError { .. } => 127,
            SetupError::InstallFailedError { code, .. }
            | SetupError::LaunchFailedError { code, .. } => child_exit_code(*code),
            SetupError::IoError(_) => 74,
            _ => 2,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            SetupError::SpawnError { program, .. } => {
                format!("Could not run '{}'. Is it installed and on PATH?", program)
            }
            SetupError::InstallFailedError { command, code } => format!(
                "The package manager reported an error ({}) while running: {}",
                describe_code(code),
                command
            ),
            SetupError::LaunchSpawnError { command, dir, .. } => format!(
                "Could not run '{}' from {}. Is the interpreter installed and does the directory exist?",
                command, dir
            ),
            SetupError::LaunchFailedError { command, code } => format!(
                "The application stopped with an error ({}): {}",
                describe_code(code),
                command
            ),
            SetupError::UnknownGroupError { name, available } => format!(
                "There is no optional dependency group named '{}'. Available groups: {}",
                name, available
            ),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => {
                "Check the command line flags and the configuration file, then run the installer again"
            }
            ErrorCategory::Installer => match self {
                SetupError::SpawnError { .. } => {
                    "Install Python with pip, or pass the package manager to use with --pip"
                }
                _ => "Check your network connection and permissions, then run the installer again",
            },
            ErrorCategory::Launch => match self {
                SetupError::LaunchSpawnError { .. } => {
                    "Check that the application directory exists and the interpreter is on PATH"
                }
                _ => "Run the application manually from its directory to see the full error output",
            },
            ErrorCategory::Io => "Make sure the console is available and try again",
        }
    }
}

pub type Result<T> = std::result::Result<T, SetupError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_install_failure_keeps_child_exit_code() {
        let err = SetupError::InstallFailedError {
            command: "pip install requests Pillow".to_string(),
            code: Some(3),
        };
        assert_eq!(err.category(), ErrorCategory::Installer);
        assert_eq!(err.exit_code(), 3);
        assert!(err.user_friendly_message().contains("pip install requests Pillow"));
    }

    #[test]
    fn test_missing_or_zero_child_code_maps_to_one() {
        let signalled = SetupError::InstallFailedError {
            command: "pip install".to_string(),
            code: None,
        };
        assert_eq!(signalled.exit_code(), 1);
        assert!(signalled.to_string().contains("terminated by signal"));

        let zero = SetupError::LaunchFailedError {
            command: "python app.py".to_string(),
            code: Some(0),
        };
        assert_eq!(zero.exit_code(), 1);
    }

    #[test]
    fn test_spawn_and_config_exit_codes() {
        let spawn = SetupError::SpawnError {
            program: "pip".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(spawn.exit_code(), 127);
        assert!(spawn.recovery_suggestion().contains("--pip"));

        let launch = SetupError::LaunchSpawnError {
            command: "python steam_tools_generator.py".to_string(),
            dir: "v30".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(launch.category(), ErrorCategory::Launch);
        assert_eq!(launch.exit_code(), 127);
        assert!(launch.user_friendly_message().contains("v30"));
        assert!(!launch.recovery_suggestion().contains("--pip"));

        let config = SetupError::UnknownGroupError {
            name: "gpu".to_string(),
            available: "steam".to_string(),
        };
        assert_eq!(config.category(), ErrorCategory::Configuration);
        assert_eq!(config.exit_code(), 2);
    }
}
