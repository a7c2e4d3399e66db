use crate::domain::model::FetchFailure;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SweepError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Failed to decode catalog response: {0}")]
    DecodeError(#[from] serde_json::Error),

    #[error("Catalog answered {status} ({code}): {details}")]
    UpstreamError {
        status: u16,
        code: String,
        details: String,
    },

    #[error("Page {url} reports more results but carries no continuation link")]
    MissingContinuation { url: String },

    #[error("CSV export error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration field '{field}' is invalid: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field '{field}'")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Upstream,
    Data,
    Output,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SweepError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SweepError::HttpError(_) => ErrorCategory::Network,
            SweepError::UpstreamError { .. } => ErrorCategory::Upstream,
            SweepError::DecodeError(_) | SweepError::MissingContinuation { .. } => {
                ErrorCategory::Data
            }
            SweepError::CsvError(_) | SweepError::IoError(_) => ErrorCategory::Output,
            SweepError::ConfigError { .. }
            | SweepError::ConfigValidationError { .. }
            | SweepError::InvalidConfigValueError { .. }
            | SweepError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 網路與上游錯誤通常是暫時性的
            ErrorCategory::Network | ErrorCategory::Upstream => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Output => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            SweepError::HttpError(_) => "Could not reach the card catalog".to_string(),
            SweepError::UpstreamError { status, details, .. } => {
                format!("The card catalog rejected the request ({}): {}", status, details)
            }
            SweepError::DecodeError(_) | SweepError::MissingContinuation { .. } => {
                "The card catalog returned a response that could not be understood".to_string()
            }
            SweepError::CsvError(_) | SweepError::IoError(_) => {
                format!("Could not write the results: {}", self)
            }
            _ => format!("Invalid configuration: {}", self),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check your network connection and the catalog base URL",
            ErrorCategory::Upstream => "Check the selected set codes and try again later",
            ErrorCategory::Data => "The catalog API may have changed; run with --verbose for details",
            ErrorCategory::Output => "Check that the output path exists and is writable",
            ErrorCategory::Configuration => "Fix the configuration file or command line flags",
        }
    }

    /// Classifies a failed page fetch into the taxonomy carried by `FetchFailed`.
    pub fn to_failure(&self) -> FetchFailure {
        match self {
            SweepError::HttpError(e) if e.is_decode() => FetchFailure::DecodeError(e.to_string()),
            SweepError::HttpError(e) => match e.status() {
                Some(status) => FetchFailure::UpstreamError {
                    status: status.as_u16(),
                    details: e.to_string(),
                },
                None => FetchFailure::NetworkError(e.to_string()),
            },
            SweepError::UpstreamError {
                status, details, ..
            } => FetchFailure::UpstreamError {
                status: *status,
                details: details.clone(),
            },
            SweepError::DecodeError(e) => FetchFailure::DecodeError(e.to_string()),
            SweepError::MissingContinuation { .. } => FetchFailure::DecodeError(self.to_string()),
            other => FetchFailure::NetworkError(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, SweepError>;
