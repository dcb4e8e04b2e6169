use thiserror::Error;

#[derive(Error, Debug)]
pub enum PackingError {
    #[error("Not found: {what}")]
    NotFound { what: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    Validation {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("PDF generation failed: {message}")]
    PdfError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    NotFound,
    Validation,
    Storage,
    Configuration,
    Rendering,
}

impl PackingError {
    pub fn not_found(what: impl Into<String>) -> Self {
        PackingError::NotFound { what: what.into() }
    }

    pub fn validation(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        PackingError::Validation {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            PackingError::NotFound { .. } => ErrorCategory::NotFound,
            PackingError::Validation { .. } => ErrorCategory::Validation,
            PackingError::IoError(_) | PackingError::SerializationError(_) => {
                ErrorCategory::Storage
            }
            PackingError::CsvError(_)
            | PackingError::ZipError(_)
            | PackingError::PdfError { .. } => ErrorCategory::Rendering,
            PackingError::ConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    /// Rejected requests leave persisted state untouched and are not failures
    /// of the tool itself.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::NotFound | ErrorCategory::Validation
        )
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PackingError::NotFound { what } => format!("{} does not exist", what),
            PackingError::Validation { field, reason, .. } => {
                format!("Rejected {}: {}", field, reason)
            }
            PackingError::IoError(e) => format!("Could not access the data file: {}", e),
            PackingError::SerializationError(e) => format!("Could not encode data: {}", e),
            PackingError::CsvError(e) => format!("Could not write spreadsheet: {}", e),
            PackingError::ZipError(e) => format!("Could not build export bundle: {}", e),
            PackingError::PdfError { message } => format!("Could not write PDF: {}", message),
            PackingError::ConfigError { message } => format!("Bad configuration: {}", message),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::NotFound => "Run `packing-slip list` to see existing boxes and `show` for item indices",
            ErrorCategory::Validation => "Check the value and try again; nothing was saved",
            ErrorCategory::Storage => "Check that the data file location is writable",
            ErrorCategory::Configuration => "Fix the address configuration file or remove it to use placeholders",
            ErrorCategory::Rendering => "Check that the output directory exists and is writable",
        }
    }
}

pub type Result<T> = std::result::Result<T, PackingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejections_are_recoverable() {
        assert!(PackingError::not_found("Box 'A'").is_rejection());
        assert!(PackingError::validation("quantity", "0", "must be positive").is_rejection());

        let io = PackingError::from(std::io::Error::other("disk"));
        assert!(!io.is_rejection());
        assert_eq!(io.category(), ErrorCategory::Storage);

        let pdf = PackingError::PdfError {
            message: "bad stream".to_string(),
        };
        assert!(!pdf.is_rejection());
        assert_eq!(pdf.category(), ErrorCategory::Rendering);
    }

    #[test]
    fn test_validation_message() {
        let err = PackingError::validation("weight", "abc", "not a number");
        assert_eq!(err.to_string(), "Invalid value 'abc' for weight: not a number");
        assert_eq!(err.user_friendly_message(), "Rejected weight: not a number");
    }
}
