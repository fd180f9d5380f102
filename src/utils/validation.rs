use crate::utils::error::{Result, SetupError};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SetupError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(SetupError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(SetupError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// A package spec is handed to the package manager as a single argument, so it
/// must not look like a flag or be split by the shell.
pub fn validate_package_spec(field_name: &str, spec: &str) -> Result<()> {
    validate_non_empty_string(field_name, spec)?;

    if spec.starts_with('-') {
        return Err(SetupError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: spec.to_string(),
            reason: "Package names cannot start with '-'".to_string(),
        });
    }

    if spec.chars().any(char::is_whitespace) {
        return Err(SetupError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: spec.to_string(),
            reason: "Package names cannot contain whitespace".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_list<T>(field_name: &str, values: &[T]) -> Result<()> {
    if values.is_empty() {
        return Err(SetupError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: "[]".to_string(),
            reason: "List cannot be empty".to_string(),
        });
    }
    Ok(())
}

pub fn validate_group_name(field_name: &str, name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if !valid {
        return Err(SetupError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: name.to_string(),
            reason: "Group names may only contain letters, digits, '-' and '_'".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_package_spec() {
        assert!(validate_package_spec("packages.required", "requests").is_ok());
        assert!(validate_package_spec("packages.required", "steam[client]").is_ok());
        assert!(validate_package_spec("packages.required", "Pillow>=10").is_ok());
        assert!(validate_package_spec("packages.required", "").is_err());
        assert!(validate_package_spec("packages.required", "--upgrade").is_err());
        assert!(validate_package_spec("packages.required", "requests Pillow").is_err());
    }

    #[test]
    fn test_validate_group_name() {
        assert!(validate_group_name("optional", "steam").is_ok());
        assert!(validate_group_name("optional", "lm_studio-ai").is_ok());
        assert!(validate_group_name("optional", "").is_err());
        assert!(validate_group_name("optional", "steam client").is_err());
    }

    #[test]
    fn test_validate_path_and_list() {
        assert!(validate_path("app.directory", "v30").is_ok());
        assert!(validate_path("app.directory", "").is_err());
        assert!(validate_path("app.directory", "v\0").is_err());
        assert!(validate_non_empty_list::<String>("packages.required", &[]).is_err());
        assert!(validate_non_empty_list("packages.required", &["requests"]).is_ok());
    }
}
