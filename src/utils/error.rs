use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImpactError {
    #[error("Invalid {field}: {value} (valid range: {range})")]
    InvalidArgument {
        field: String,
        value: String,
        range: String,
    },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration parse error: {message}")]
    ConfigParseError { message: String },

    #[error("Invalid configuration value for {field}: {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Data format error: {message}")]
    DataFormatError { message: String },
}

pub type Result<T> = std::result::Result<T, ImpactError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Data,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// Process exit code for a run that failed with this severity. Never 0.
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Low | ErrorSeverity::High => 1,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl ImpactError {
    pub fn invalid_argument(field: &str, value: f64, min: f64, max: f64) -> Self {
        ImpactError::InvalidArgument {
            field: field.to_string(),
            value: value.to_string(),
            range: format!("[{}, {}]", min, max),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ImpactError::InvalidArgument { .. } => ErrorCategory::Input,
            ImpactError::ConfigParseError { .. }
            | ImpactError::InvalidConfigValueError { .. }
            | ImpactError::MissingConfigError { .. } => ErrorCategory::Configuration,
            ImpactError::CsvError(_)
            | ImpactError::SerializationError(_)
            | ImpactError::DataFormatError { .. } => ErrorCategory::Data,
            ImpactError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ImpactError::InvalidArgument { field, value, range } => {
                format!("The {} value {} is outside the valid range {}", field, value, range)
            }
            ImpactError::CsvError(e) => format!("Could not read the site list: {}", e),
            ImpactError::IoError(e) => format!("File access failed: {}", e),
            ImpactError::SerializationError(e) => format!("Could not read or write JSON: {}", e),
            ImpactError::ConfigParseError { message } => {
                format!("The calibration file could not be parsed: {}", message)
            }
            ImpactError::InvalidConfigValueError { field, reason, .. } => {
                format!("Calibration setting '{}' is invalid: {}", field, reason)
            }
            ImpactError::MissingConfigError { field } => {
                format!("Required setting '{}' was not provided", field)
            }
            ImpactError::DataFormatError { message } => format!("Malformed input data: {}", message),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ImpactError::InvalidArgument { .. } => {
                "Check magnitude (0-10), depth (0-700 km) and that distances are non-negative"
            }
            ImpactError::CsvError(_) => {
                "Make sure the CSV has a header row with name,latitude,longitude,population"
            }
            ImpactError::IoError(_) => "Verify the path exists and is readable",
            ImpactError::SerializationError(_) => "Validate the JSON document structure",
            ImpactError::ConfigParseError { .. } => "Make sure the file is valid TOML",
            ImpactError::InvalidConfigValueError { .. } => {
                "Fix the reported calibration value or remove it to use the default"
            }
            ImpactError::MissingConfigError { .. } => "Provide the missing argument or setting",
            ImpactError::DataFormatError { .. } => "Correct the offending record and retry",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_failure_exits_non_zero() {
        for severity in [
            ErrorSeverity::Low,
            ErrorSeverity::Medium,
            ErrorSeverity::High,
            ErrorSeverity::Critical,
        ] {
            assert_ne!(severity.exit_code(), 0, "{:?}", severity);
        }
        assert_eq!(ErrorSeverity::Medium.exit_code(), 2);
        assert_eq!(ErrorSeverity::Critical.exit_code(), 3);
    }

    #[test]
    fn test_invalid_argument_names_value_and_range() {
        let err = ImpactError::invalid_argument("magnitude", 11.0, 0.0, 10.0);
        let text = err.to_string();
        assert!(text.contains("magnitude"));
        assert!(text.contains("11"));
        assert!(text.contains("[0, 10]"));
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
    }

    #[test]
    fn test_io_error_is_critical() {
        let err: ImpactError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert_eq!(err.category(), ErrorCategory::System);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert!(err.user_friendly_message().contains("gone"));
    }
}
