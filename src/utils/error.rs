use thiserror::Error;

#[derive(Error, Debug)]
pub enum SumError {
    #[error("Cannot sum an empty matrix")]
    EmptyMatrix,

    #[error("Row {index} task failed: {message}")]
    RowTask { index: usize, message: String },

    #[error("No Tokio runtime available: {message}")]
    NoRuntime { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Execution,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SumError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SumError::EmptyMatrix => ErrorCategory::Input,
            SumError::RowTask { .. } | SumError::NoRuntime { .. } => ErrorCategory::Execution,
            SumError::IoError(_)
            | SumError::TomlError(_)
            | SumError::ConfigError { .. }
            | SumError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            SumError::EmptyMatrix => ErrorSeverity::Medium,
            SumError::RowTask { .. } => ErrorSeverity::High,
            SumError::NoRuntime { .. } => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            SumError::EmptyMatrix => "The matrix has no rows, nothing to sum".to_string(),
            SumError::RowTask { index, .. } => format!("Summing row {} did not finish", index),
            SumError::NoRuntime { .. } => "Summation was started outside of an async runtime".to_string(),
            SumError::IoError(e) => format!("Could not read configuration: {}", e),
            SumError::TomlError(_) => "Configuration file is not valid TOML".to_string(),
            SumError::ConfigError { message } => format!("Configuration problem: {}", message),
            SumError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration field '{}' is invalid: {}", field, reason)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Input => "Pass a matrix with at least one row (rows themselves may be empty)",
            ErrorCategory::Execution => "Run the summation inside a Tokio runtime and check the logs for panics",
            ErrorCategory::Configuration => "Check the configuration file path and its [logging]/[runtime] sections",
        }
    }
}

pub type Result<T> = std::result::Result<T, SumError>;
