use thiserror::Error;

#[derive(Error, Debug)]
pub enum SupplyError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Generation service failed: {message}")]
    GenerationFailed { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Generation,
    Storage,
    Configuration,
    Input,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SupplyError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SupplyError::ApiError(_) => ErrorCategory::Network,
            SupplyError::GenerationFailed { .. } => ErrorCategory::Generation,
            SupplyError::IoError(_) | SupplyError::SerializationError(_) => {
                ErrorCategory::Storage
            }
            SupplyError::ConfigError { .. }
            | SupplyError::ConfigValidationError { .. }
            | SupplyError::InvalidConfigValueError { .. }
            | SupplyError::MissingConfigError { .. } => ErrorCategory::Configuration,
            SupplyError::ValidationError { .. } => ErrorCategory::Input,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 生成服務失敗可以重試
            ErrorCategory::Network | ErrorCategory::Generation => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => {
                "Check the generation service endpoint and your network connection, then try again"
            }
            ErrorCategory::Generation => {
                "The generation service could not produce a list. Please try again in a moment"
            }
            ErrorCategory::Storage => "Make sure the output directory exists and is writable",
            ErrorCategory::Configuration => {
                "Review the configuration file or command-line flags for typos and missing values"
            }
            ErrorCategory::Input => "Check the family details you entered (family size is required)",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            SupplyError::ApiError(_) | SupplyError::GenerationFailed { .. } => {
                "Failed to generate supply list. Please try again.".to_string()
            }
            SupplyError::IoError(e) => format!("Could not save the supply list: {}", e),
            SupplyError::SerializationError(e) => {
                format!("Could not read the generation response: {}", e)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SupplyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_failure_is_retryable() {
        let err = SupplyError::GenerationFailed {
            message: "upstream returned 502".to_string(),
        };

        assert_eq!(err.category(), ErrorCategory::Generation);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert_eq!(
            err.user_friendly_message(),
            "Failed to generate supply list. Please try again."
        );
    }

    #[test]
    fn test_config_errors_are_high_severity() {
        let err = SupplyError::MissingConfigError {
            field: "service.endpoint".to_string(),
        };

        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.user_friendly_message().contains("service.endpoint"));
    }
}
