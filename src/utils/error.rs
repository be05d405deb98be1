use thiserror::Error;

#[derive(Error, Debug)]
pub enum SeedError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': '{value}' ({reason})")]
    InvalidCatalogValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Validation,
    Io,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    High,
    Critical,
}

impl SeedError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SeedError::IoError(_) => ErrorCategory::Io,
            SeedError::TomlError(_) | SeedError::JsonError(_) | SeedError::ConfigError { .. } => {
                ErrorCategory::Configuration
            }
            SeedError::InvalidCatalogValueError { .. } => ErrorCategory::Validation,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Io => ErrorSeverity::Critical,
            ErrorCategory::Configuration | ErrorCategory::Validation => ErrorSeverity::High,
        }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            SeedError::IoError(_) => {
                "Check that the catalog path exists and the output location is writable".to_string()
            }
            SeedError::TomlError(_) | SeedError::JsonError(_) => {
                "Fix the syntax of the catalog file; see data/catalog.toml for the expected layout"
                    .to_string()
            }
            SeedError::ConfigError { .. } => {
                "Review the command line flags and the catalog file extension (.toml or .json)"
                    .to_string()
            }
            SeedError::InvalidCatalogValueError { field, .. } => {
                format!("Correct the value of '{}' in the catalog", field)
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            SeedError::IoError(e) => format!("Could not read or write a file: {}", e),
            SeedError::TomlError(e) => format!("The catalog is not valid TOML: {}", e),
            SeedError::JsonError(e) => format!("The catalog is not valid JSON: {}", e),
            SeedError::ConfigError { message } => message.clone(),
            SeedError::InvalidCatalogValueError { field, reason, .. } => {
                format!("The catalog has an invalid '{}': {}", field, reason)
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, SeedError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_exit_with_one() {
        let err = SeedError::InvalidCatalogValueError {
            field: "categories[0].name".to_string(),
            value: "".to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert_eq!(err.exit_code(), 1);
        assert!(err.user_friendly_message().contains("categories[0].name"));
    }

    #[test]
    fn test_io_errors_are_critical() {
        let err = SeedError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert_eq!(err.exit_code(), 3);
    }
}
