//! Application error types with rich context

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types organized by layer/domain
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Common/Infrastructure Errors
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    // ─────────────────────────────────────────────────────────────
    // Terminal/TUI Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Terminal error: {message}")]
    Terminal { message: String },

    // ─────────────────────────────────────────────────────────────
    // Backend/Gateway Errors
    // ─────────────────────────────────────────────────────────────
    /// Non-2xx response, transport failure or timeout.
    ///
    /// `status` is `None` when no HTTP response was received at all.
    #[error("{message}{}", status.map(|s| format!(" (HTTP {s})")).unwrap_or_default())]
    RequestFailed {
        status: Option<u16>,
        message: String,
    },

    /// A 2xx response whose body was absent where data was expected.
    #[error("Empty response: {context}")]
    EmptyPayload { context: String },

    #[error("Invalid backend URL: {url}")]
    InvalidUrl { url: String },

    // ─────────────────────────────────────────────────────────────
    // User Input Guards
    // ─────────────────────────────────────────────────────────────
    #[error("{message}")]
    InvalidInput { message: String },

    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

// ─────────────────────────────────────────────────────────────────
// Convenience Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn terminal(message: impl Into<String>) -> Self {
        Self::Terminal {
            message: message.into(),
        }
    }

    pub fn request_failed(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::RequestFailed {
            status,
            message: message.into(),
        }
    }

    pub fn empty_payload(context: impl Into<String>) -> Self {
        Self::EmptyPayload {
            context: context.into(),
        }
    }

    pub fn invalid_url(url: impl Into<String>) -> Self {
        Self::InvalidUrl { url: url.into() }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// HTTP status carried by a failed request, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::RequestFailed { status, .. } => *status,
            _ => None,
        }
    }

    /// Check if this is a recoverable error
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::RequestFailed { .. }
                | Error::EmptyPayload { .. }
                | Error::InvalidInput { .. }
        )
    }

    /// Check if this error should trigger application exit
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::InvalidUrl { .. })
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Context Extensions
// ─────────────────────────────────────────────────────────────────

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", context.into(), err);
            err
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", f(), err);
            err
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_failed_display_includes_status() {
        let err = Error::request_failed(Some(404), "Failed to fetch run detail page for r1");
        assert_eq!(
            err.to_string(),
            "Failed to fetch run detail page for r1 (HTTP 404)"
        );
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn test_request_failed_without_status() {
        let err = Error::request_failed(None, "Failed to fetch runs");
        assert_eq!(err.to_string(), "Failed to fetch runs");
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_fetch_errors_are_recoverable() {
        assert!(Error::request_failed(Some(500), "boom").is_recoverable());
        assert!(Error::empty_payload("three-way view").is_recoverable());
        assert!(Error::invalid_input("select both archives").is_recoverable());
        assert!(!Error::request_failed(Some(500), "boom").is_fatal());
    }

    #[test]
    fn test_error_is_fatal() {
        assert!(Error::invalid_url("not a url").is_fatal());
        assert!(!Error::config("bad toml").is_fatal());
        assert!(!Error::terminal("resize failed").is_fatal());
    }

    #[test]
    fn test_empty_payload_display() {
        let err = Error::empty_payload("three-way view for doc_1 page 1");
        assert!(err.to_string().contains("doc_1"));
    }
}
