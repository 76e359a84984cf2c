//! Error types for expensebook-core
//!
//! This module provides error handling for the expense model and the report
//! pipeline, including error codes, detailed messages, and suggestions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Report range bounds absent
    MissingRange,
    /// Date not in YYYY-MM-DD form
    InvalidDate,
    /// Range start after range end
    InvalidRange,
    /// Unknown grouping mode
    InvalidGrouping,
    /// Required expense fields absent
    MissingFields,
    /// Text not representable in the PDF font encoding
    EncodingError,
    /// Record not found
    NotFound,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::MissingRange => write!(f, "MISSING_RANGE"),
            ErrorCode::InvalidDate => write!(f, "INVALID_DATE"),
            ErrorCode::InvalidRange => write!(f, "INVALID_RANGE"),
            ErrorCode::InvalidGrouping => write!(f, "INVALID_GROUPING"),
            ErrorCode::MissingFields => write!(f, "MISSING_FIELDS"),
            ErrorCode::EncodingError => write!(f, "ENCODING_ERROR"),
            ErrorCode::NotFound => write!(f, "NOT_FOUND"),
        }
    }
}

/// Detailed error information for logs and API consumers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    /// Suggestions for resolution
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ErrorDetails {
    pub fn new(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            details: None,
            suggestions: vec![],
        }
    }

    pub fn with_detail(mut self, detail: serde_json::Value) -> Self {
        self.details = Some(detail);
        self
    }

    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

impl std::fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref details) = self.details {
            write!(f, "\nDetails: {}", details)?;
        }
        if !self.suggestions.is_empty() {
            write!(f, "\nSuggestions:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n  - {}", suggestion)?;
            }
        }
        Ok(())
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    /// Caller supplied bad input
    Info,
    /// Operation failed on stored data
    Warning,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "info"),
            ErrorSeverity::Warning => write!(f, "warning"),
        }
    }
}

/// Main error type for expensebook-core
///
/// Display strings double as the client-facing messages.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("from and to are required")]
    MissingRange,

    #[error("Invalid date format")]
    InvalidDate { value: String },

    #[error("Invalid date range")]
    InvalidRange { from: String, to: String },

    #[error("Invalid groupBy value")]
    InvalidGrouping { value: String },

    #[error("Missing required fields: amount, currency, categoryId, date")]
    MissingFields { fields: Vec<String> },

    #[error("Cannot encode {character:?} on report line {line} as Latin-1")]
    Encoding { character: char, line: usize },

    #[error("{resource} not found")]
    NotFound { resource: String, id: String },
}

impl CoreError {
    /// Shorthand for a missing expense
    pub fn expense_not_found(id: &str) -> Self {
        CoreError::NotFound {
            resource: "Expense".to_string(),
            id: id.to_string(),
        }
    }

    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::MissingRange => ErrorCode::MissingRange,
            CoreError::InvalidDate { .. } => ErrorCode::InvalidDate,
            CoreError::InvalidRange { .. } => ErrorCode::InvalidRange,
            CoreError::InvalidGrouping { .. } => ErrorCode::InvalidGrouping,
            CoreError::MissingFields { .. } => ErrorCode::MissingFields,
            CoreError::Encoding { .. } => ErrorCode::EncodingError,
            CoreError::NotFound { .. } => ErrorCode::NotFound,
        }
    }

    /// Get the severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CoreError::MissingRange
            | CoreError::InvalidDate { .. }
            | CoreError::InvalidRange { .. }
            | CoreError::InvalidGrouping { .. }
            | CoreError::MissingFields { .. }
            | CoreError::NotFound { .. } => ErrorSeverity::Info,
            CoreError::Encoding { .. } => ErrorSeverity::Warning,
        }
    }

    /// Whether the caller can fix this by changing the request
    pub fn is_client_error(&self) -> bool {
        self.severity() == ErrorSeverity::Info
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> ErrorDetails {
        let mut details = ErrorDetails::new(self.code(), self.to_string());

        match self {
            CoreError::MissingRange => {
                details = details.with_suggestion(
                    "Pass both 'from' and 'to' query parameters.".to_string(),
                );
            }
            CoreError::InvalidDate { value } => {
                details = details.with_detail(serde_json::json!({ "value": value }));
                details = details.with_suggestion("Dates must use the YYYY-MM-DD format.".to_string());
            }
            CoreError::InvalidRange { from, to } => {
                details = details.with_detail(serde_json::json!({ "from": from, "to": to }));
                details = details.with_suggestion("'from' must not be after 'to'.".to_string());
            }
            CoreError::InvalidGrouping { value } => {
                details = details.with_detail(serde_json::json!({ "value": value }));
                details = details.with_suggestion(
                    "Use 'week', 'month', or omit groupBy.".to_string(),
                );
            }
            CoreError::MissingFields { fields } => {
                details = details.with_detail(serde_json::json!({ "missing": fields }));
            }
            CoreError::Encoding { character, line } => {
                details = details.with_detail(serde_json::json!({
                    "character": character.to_string(),
                    "codepoint": format!("U+{:04X}", *character as u32),
                    "line": line,
                }));
                details = details.with_suggestion(
                    "Report text is limited to Latin-1; edit merchant names outside that range."
                        .to_string(),
                );
            }
            CoreError::NotFound { resource, id } => {
                details = details.with_detail(serde_json::json!({ "resource": resource, "id": id }));
            }
        }

        details
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

/// Error context for reporting
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Operation being performed
    pub operation: String,
    /// Additional context data
    pub data: serde_json::Value,
}

impl ErrorContext {
    pub fn new(operation: &str) -> Self {
        Self {
            operation: operation.to_string(),
            data: serde_json::json!({}),
        }
    }

    /// Add context data
    pub fn with_data(mut self, key: &str, value: serde_json::Value) -> Self {
        self.data[key] = value;
        self
    }
}

/// Error logger trait
pub trait ErrorLogger {
    /// Log an error
    fn log_error(&self, error: &CoreError, context: &ErrorContext);
}

/// Default error logger using log crate
#[derive(Default)]
pub struct DefaultErrorLogger;

impl ErrorLogger for DefaultErrorLogger {
    fn log_error(&self, error: &CoreError, context: &ErrorContext) {
        match error.severity() {
            ErrorSeverity::Info => log::debug!(
                target: "expensebook::error",
                "[{}] {} - Operation: {} - Context: {}",
                error.code(),
                error,
                context.operation,
                context.data
            ),
            ErrorSeverity::Warning => log::warn!(
                target: "expensebook::error",
                "[{}] {} - Operation: {} - Context: {}",
                error.code(),
                error.to_details(),
                context.operation,
                context.data
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::InvalidRange.to_string(), "INVALID_RANGE");
        assert_eq!(ErrorCode::EncodingError.to_string(), "ENCODING_ERROR");
    }

    #[test]
    fn test_client_messages() {
        assert_eq!(CoreError::MissingRange.to_string(), "from and to are required");
        assert_eq!(
            CoreError::InvalidDate { value: "x".to_string() }.to_string(),
            "Invalid date format"
        );
        assert_eq!(
            CoreError::InvalidGrouping { value: "year".to_string() }.to_string(),
            "Invalid groupBy value"
        );
        assert_eq!(CoreError::expense_not_found("abc").to_string(), "Expense not found");
    }

    #[test]
    fn test_core_error_severity() {
        assert!(CoreError::MissingRange.is_client_error());
        assert!(!CoreError::Encoding { character: '€', line: 9 }.is_client_error());
        let error = CoreError::expense_not_found("abc");
        assert_eq!(error.severity(), ErrorSeverity::Info);
        assert_eq!(error.code(), ErrorCode::NotFound);
    }

    #[test]
    fn test_encoding_details() {
        let error = CoreError::Encoding { character: '€', line: 9 };
        let details = error.to_details();
        assert_eq!(details.code, ErrorCode::EncodingError);
        assert_eq!(details.details.as_ref().unwrap()["codepoint"], "U+20AC");
        assert!(!details.suggestions.is_empty());
    }

    #[test]
    fn test_error_context() {
        let context = ErrorContext::new("render_report")
            .with_data("from", serde_json::json!("2026-01-01"));
        assert_eq!(context.operation, "render_report");
        assert_eq!(context.data["from"], "2026-01-01");
    }
}
