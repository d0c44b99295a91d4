use thiserror::Error;

#[derive(Error, Debug)]
pub enum FoldError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("API returned status {status}")]
    ApiStatusError { status: u16 },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("TOML config error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Structure parse error: {message}")]
    ParseError { message: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

pub type Result<T> = std::result::Result<T, FoldError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Parse,
    Config,
    Validation,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl FoldError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            FoldError::ApiError(_) | FoldError::ApiStatusError { .. } => ErrorCategory::Network,
            FoldError::ParseError { .. } | FoldError::ProcessingError { .. } => ErrorCategory::Parse,
            FoldError::ConfigError { .. }
            | FoldError::MissingConfigError { .. }
            | FoldError::InvalidConfigValueError { .. }
            | FoldError::TomlError(_) => ErrorCategory::Config,
            FoldError::ValidationError { .. } => ErrorCategory::Validation,
            FoldError::IoError(_)
            | FoldError::SerializationError(_)
            | FoldError::CsvError(_)
            | FoldError::ZipError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 網路錯誤通常重試就能解決
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Parse => ErrorSeverity::High,
            ErrorCategory::Config | ErrorCategory::Validation => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            FoldError::ApiError(_) => {
                "Check network connectivity and try again; the ESMFold service may be busy".to_string()
            }
            FoldError::ApiStatusError { status } if *status >= 500 => {
                "The prediction service is temporarily unavailable; retry later or raise --retry-attempts".to_string()
            }
            FoldError::ApiStatusError { .. } => {
                "The service rejected the request; sequences longer than ~400 residues are often refused".to_string()
            }
            FoldError::ParseError { .. } | FoldError::ProcessingError { .. } => {
                "The returned coordinate text was not a usable PDB file; rerun the prediction".to_string()
            }
            FoldError::ValidationError { .. } => {
                "Provide a sequence containing only amino-acid letter codes".to_string()
            }
            FoldError::MissingConfigError { field } => {
                format!("Provide --{} or set it in the TOML config", field.replace('_', "-"))
            }
            FoldError::ConfigError { .. }
            | FoldError::InvalidConfigValueError { .. }
            | FoldError::TomlError(_) => "Review the CLI flags and config file values".to_string(),
            FoldError::IoError(_) => "Check that the output directory exists and is writable".to_string(),
            FoldError::SerializationError(_) | FoldError::CsvError(_) | FoldError::ZipError(_) => {
                "Report output could not be written; check disk space and permissions".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            FoldError::ApiError(e) => format!("Could not reach the prediction service: {}", e),
            FoldError::ApiStatusError { status } => {
                format!("The prediction service answered with HTTP {}", status)
            }
            FoldError::ValidationError { message } => format!("Invalid sequence: {}", message),
            FoldError::ParseError { message } => {
                format!("The predicted structure could not be read: {}", message)
            }
            other => other.to_string(),
        }
    }
}
