use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlateError {
    #[error("Format error: {message}")]
    FormatError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Workbook error: {0}")]
    WorkbookError(#[from] calamine::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Storage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl PlateError {
    pub fn format(message: impl Into<String>) -> Self {
        PlateError::FormatError {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        PlateError::ConfigError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            PlateError::FormatError { .. }
            | PlateError::CsvError(_)
            | PlateError::WorkbookError(_) => ErrorCategory::Input,
            PlateError::ConfigError { .. }
            | PlateError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            PlateError::IoError(_) => ErrorCategory::Storage,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Medium,
            ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            PlateError::FormatError { .. } => {
                "Check that the layout is an 8x12 grid and each cell holds 'Sample' or 'Sample<newline>Replicate'"
            }
            PlateError::CsvError(_) => "Check that the file is valid comma-separated text",
            PlateError::WorkbookError(_) => {
                "Check that the workbook opens in a spreadsheet program and has at least one sheet"
            }
            PlateError::IoError(_) => {
                "Check that the input and header files exist and the output directory is writable"
            }
            PlateError::ConfigError { .. } | PlateError::InvalidConfigValueError { .. } => {
                "Review the configuration file and command-line options"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PlateError::FormatError { message } => format!("Plate layout is malformed: {}", message),
            PlateError::IoError(e) => format!("Could not access a file: {}", e),
            PlateError::CsvError(e) => format!("Could not read CSV data: {}", e),
            PlateError::WorkbookError(e) => format!("Could not read workbook: {}", e),
            PlateError::ConfigError { message } => format!("Configuration problem: {}", message),
            PlateError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration value for '{}' is invalid: {}", field, reason)
            }
        }
    }
}

impl From<tempfile::PersistError> for PlateError {
    fn from(e: tempfile::PersistError) -> Self {
        PlateError::IoError(e.error)
    }
}

pub type Result<T> = std::result::Result<T, PlateError>;
