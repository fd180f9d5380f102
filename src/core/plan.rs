use crate::config::toml_config::SetupConfig;
use crate::domain::model::{CommandSpec, InstallPlan, InstallStep};
use crate::utils::error::Result;
use std::path::PathBuf;

/// What the user opted into on top of the required packages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub groups: Vec<String>,
    pub requirements: Option<PathBuf>,
}

impl Selection {
    pub fn with_groups<I, S>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.groups.extend(groups.into_iter().map(Into::into));
        self
    }

    pub fn with_requirements(mut self, path: impl Into<PathBuf>) -> Self {
        self.requirements = Some(path.into());
        self
    }
}

/// Builds the ordered package manager invocations.
///
/// Required and selected group packages go into a single install command;
/// a requirements file, when given, becomes a second command.
pub fn build_plan(config: &SetupConfig, selection: &Selection) -> Result<InstallPlan> {
    let mut packages: Vec<&str> = Vec::new();
    for spec in &config.packages.required {
        push_unique(&mut packages, spec);
    }

    let mut label = "required dependencies".to_string();
    for group in &selection.groups {
        let specs = config.group(group)?;
        tracing::debug!("Adding optional group '{}': {:?}", group, specs);
        for spec in specs {
            push_unique(&mut packages, spec);
        }
        label.push_str(&format!(" + {}", group));
    }

    let installer = &config.installer;
    let mut steps = vec![InstallStep {
        label,
        command: CommandSpec::new(&installer.program)
            .args(installer.install_args.iter().cloned())
            .args(packages),
    }];

    if let Some(path) = &selection.requirements {
        steps.push(InstallStep {
            label: format!("requirements from {}", path.display()),
            command: CommandSpec::new(&installer.program)
                .args(installer.install_args.iter().cloned())
                .arg(&installer.requirements_flag)
                .arg(path.to_string_lossy()),
        });
    }

    tracing::debug!("Install plan has {} step(s)", steps.len());
    Ok(InstallPlan { steps })
}

// pip 套件名稱不分大小寫
fn push_unique<'a>(packages: &mut Vec<&'a str>, spec: &'a str) {
    if !packages.iter().any(|p| p.eq_ignore_ascii_case(spec)) {
        packages.push(spec);
    }
}

/// Command that starts the application entry point from its directory.
pub fn launch_command(config: &SetupConfig, root: &std::path::Path) -> CommandSpec {
    CommandSpec::new(&config.app.interpreter)
        .arg(&config.app.entry_point)
        .current_dir(root.join(&config.app.directory))
}
