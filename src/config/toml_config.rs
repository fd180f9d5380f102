use crate::utils::error::{Result, SetupError};
use crate::utils::validation::{self, Validate};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Installer configuration. Every table is optional; omitted values fall back
/// to the Steam Tools Generator defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SetupConfig {
    pub app: AppConfig,
    pub installer: InstallerConfig,
    pub packages: PackagesConfig,
    /// Optional dependency groups, installed only when selected with `--with`.
    pub optional: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub name: String,
    pub directory: String,
    pub entry_point: String,
    pub interpreter: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct InstallerConfig {
    pub program: String,
    pub install_args: Vec<String>,
    pub requirements_flag: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PackagesConfig {
    pub required: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: "Steam Tools Generator".to_string(),
            directory: "v30".to_string(),
            entry_point: "steam_tools_generator.py".to_string(),
            interpreter: "python".to_string(),
        }
    }
}

impl Default for InstallerConfig {
    fn default() -> Self {
        Self {
            program: "pip".to_string(),
            install_args: vec!["install".to_string()],
            requirements_flag: "-r".to_string(),
        }
    }
}

impl Default for PackagesConfig {
    fn default() -> Self {
        Self {
            required: vec!["requests".to_string(), "Pillow".to_string()],
        }
    }
}

impl SetupConfig {
    /// 內建預設配置 (含 steam 選用群組)
    pub fn builtin() -> Self {
        let mut config = Self::default();
        config
            .optional
            .insert("steam".to_string(), vec!["steam[client]".to_string()]);
        config
    }

    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content =
            std::fs::read_to_string(&path).map_err(|source| SetupError::ConfigReadError {
                path: path.as_ref().display().to_string(),
                source,
            })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    ///
    /// A file without an `[optional]` table keeps the built-in groups.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let table: toml::Table = toml::from_str(content)?;
        let has_optional = table.contains_key("optional");

        let mut config: SetupConfig = toml::from_str(content)?;
        if !has_optional {
            config.optional = Self::builtin().optional;
        }
        Ok(config)
    }

    pub fn group_names(&self) -> Vec<&str> {
        self.optional.keys().map(String::as_str).collect()
    }

    pub fn group(&self, name: &str) -> Result<&[String]> {
        self.optional
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| SetupError::UnknownGroupError {
                name: name.to_string(),
                available: if self.optional.is_empty() {
                    "none".to_string()
                } else {
                    self.group_names().join(", ")
                },
            })
    }

    /// 命令列覆蓋 package manager
    pub fn with_program_override(mut self, program: Option<&str>) -> Self {
        if let Some(program) = program {
            tracing::debug!("Package manager overridden to: {}", program);
            self.installer.program = program.to_string();
        }
        self
    }
}

impl Validate for SetupConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("app.name", &self.app.name)?;
        validation::validate_path("app.directory", &self.app.directory)?;
        validation::validate_non_empty_string("app.entry_point", &self.app.entry_point)?;
        validation::validate_non_empty_string("app.interpreter", &self.app.interpreter)?;

        validation::validate_non_empty_string("installer.program", &self.installer.program)?;
        validation::validate_non_empty_string(
            "installer.requirements_flag",
            &self.installer.requirements_flag,
        )?;

        validation::validate_non_empty_list("packages.required", &self.packages.required)?;
        for spec in &self.packages.required {
            validation::validate_package_spec("packages.required", spec)?;
        }

        for (name, specs) in &self.optional {
            let field = format!("optional.{}", name);
            validation::validate_group_name("optional", name)?;
            validation::validate_non_empty_list(&field, specs)?;
            for spec in specs {
                validation::validate_package_spec(&field, spec)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_builtin_defaults() {
        let config = SetupConfig::builtin();

        assert_eq!(config.app.name, "Steam Tools Generator");
        assert_eq!(config.app.directory, "v30");
        assert_eq!(config.installer.program, "pip");
        assert_eq!(config.packages.required, vec!["requests", "Pillow"]);
        assert_eq!(config.group("steam").unwrap(), ["steam[client]".to_string()]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let toml_content = r#"
[installer]
program = "python"
install_args = ["-m", "pip", "install"]
"#;

        let config = SetupConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.installer.program, "python");
        assert_eq!(config.installer.install_args, vec!["-m", "pip", "install"]);
        assert_eq!(config.installer.requirements_flag, "-r");
        assert_eq!(config.packages.required, vec!["requests", "Pillow"]);
        assert_eq!(config.group_names(), vec!["steam"]);
    }

    #[test]
    fn test_optional_table_replaces_builtin_groups() {
        let toml_content = r#"
[optional]
ai = ["openai"]
"#;

        let config = SetupConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.group_names(), vec!["ai"]);
        let err = config.group("steam").unwrap_err();
        assert!(matches!(err, SetupError::UnknownGroupError { ref available, .. } if available == "ai"));
    }

    #[test]
    fn test_invalid_toml_is_a_parse_error() {
        let err = SetupConfig::from_toml_str("[packages\nrequired = 1").unwrap_err();
        assert!(matches!(err, SetupError::TomlParseError(_)));
    }

    #[test]
    fn test_config_validation() {
        let empty_required = SetupConfig::from_toml_str("[packages]\nrequired = []").unwrap();
        assert!(empty_required.validate().is_err());

        let bad_group = SetupConfig::from_toml_str("[optional]\nsteam = []").unwrap();
        assert!(bad_group.validate().is_err());

        let flag_package =
            SetupConfig::from_toml_str("[packages]\nrequired = [\"--pre\"]").unwrap();
        assert!(flag_package.validate().is_err());
    }

    #[test]
    fn test_program_override() {
        let config = SetupConfig::builtin().with_program_override(Some("pip3"));
        assert_eq!(config.installer.program, "pip3");

        let config = SetupConfig::builtin().with_program_override(None);
        assert_eq!(config.installer.program, "pip");
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[app]
name = "File Test"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = SetupConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.app.name, "File Test");
        assert_eq!(config.app.entry_point, "steam_tools_generator.py");
    }
}
