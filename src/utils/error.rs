use crate::domain::model::ServiceError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CcbError {
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid config value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid URI: {0}")]
    InvalidUri(#[from] url::ParseError),

    #[error("API request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("XML error: {0}")]
    XmlError(#[from] quick_xml::Error),

    #[error("Malformed response: {message}")]
    MalformedResponse { message: String },

    #[error("CCB reported {}: {}", plural_errors(errors.len()), summarize(errors))]
    ServiceError { errors: Vec<ServiceError> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Io,
    MalformedResponse,
    Service,
}

impl CcbError {
    pub fn malformed(message: impl Into<String>) -> Self {
        CcbError::MalformedResponse {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        CcbError::ConfigError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            CcbError::ConfigError { .. }
            | CcbError::InvalidConfigValueError { .. }
            | CcbError::InvalidUri(_) => ErrorCategory::Configuration,
            CcbError::HttpError(_) | CcbError::IoError(_) => ErrorCategory::Io,
            CcbError::XmlError(_) | CcbError::MalformedResponse { .. } => {
                ErrorCategory::MalformedResponse
            }
            CcbError::ServiceError { .. } => ErrorCategory::Service,
        }
    }

    /// Only transport failures can succeed on a second attempt.
    pub fn is_retryable(&self) -> bool {
        self.category() == ErrorCategory::Io
    }

    /// The errors reported by CCB, if this is a service error.
    pub fn service_errors(&self) -> Option<&[ServiceError]> {
        match self {
            CcbError::ServiceError { errors } => Some(errors),
            _ => None,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => "Check the [api] section of the config file",
            ErrorCategory::Io => "Check network connectivity and the API credentials, then retry",
            ErrorCategory::MalformedResponse => {
                "The server response could not be read; check that the base URL points at api.php"
            }
            ErrorCategory::Service => {
                "Inspect the reported CCB error codes; the request was rejected by the service"
            }
        }
    }
}

fn plural_errors(count: usize) -> String {
    if count == 1 {
        "1 error".to_string()
    } else {
        format!("{} errors", count)
    }
}

fn summarize(errors: &[ServiceError]) -> String {
    errors
        .iter()
        .map(|e| format!("[{}] {}", e.number.unwrap_or_default(), e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

pub type Result<T> = std::result::Result<T, CcbError>;
