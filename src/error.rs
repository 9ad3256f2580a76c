use std::path::PathBuf;
use thiserror::Error;

/// Structured error context for validation and configuration failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Request field or configuration key that caused the error (e.g., "request.temperature")
    pub field_path: Option<String>,
    /// Additional context about the error (e.g., accepted range, actual value)
    pub details: Option<String>,
    /// Source of the error (e.g., "request_validator", "client_builder")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self {
            field_path: None,
            details: None,
            source: None,
        }
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Coarse classification of an [`Error`], stable across variants' payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Request rejected locally before any network call.
    Validation,
    /// Client could not be constructed from the given endpoint/settings.
    Configuration,
    /// Connection, DNS, timeout, or interrupted response stream.
    Transport,
    /// The server answered with a non-success status.
    Server,
    /// Writing the audio to the local destination failed.
    Sink,
    /// A JSON payload from the server could not be decoded.
    Serialization,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Configuration => "configuration",
            Self::Transport => "transport",
            Self::Server => "server",
            Self::Sink => "sink",
            Self::Serialization => "serialization",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unified error type for the speech client.
///
/// Every failure of a synthesis call surfaces as exactly one of these
/// variants; nothing is recovered internally.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Validation error: {message}{}", format_context(.context))]
    Validation {
        message: String,
        context: ErrorContext,
    },

    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    #[error("Network transport error: {0}")]
    Transport(#[from] crate::transport::TransportError),

    #[error("Server error: HTTP {status}: {body}")]
    Server {
        status: u16,
        /// Response body, verbatim (lossy UTF-8).
        body: String,
        /// `detail` field when the body is the server's JSON error shape.
        detail: Option<String>,
    },

    #[error("Sink error{}: {source}", format_path(.path))]
    Sink {
        path: Option<PathBuf>,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

fn format_path(path: &Option<PathBuf>) -> String {
    match path {
        Some(p) => format!(" ({})", p.display()),
        None => String::new(),
    }
}

impl Error {
    /// Create a validation error with structured context
    pub fn validation_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Validation {
            message: msg.into(),
            context,
        }
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::configuration_with_context(msg, ErrorContext::new())
    }

    /// Create a configuration error with structured context
    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    /// Build a server error from a status and raw body.
    ///
    /// FastAPI-style bodies (`{"detail": "..."}`) get their detail extracted;
    /// the body itself is always kept verbatim.
    pub fn server(status: u16, body: &[u8]) -> Self {
        let body = String::from_utf8_lossy(body).into_owned();
        let detail = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| match v.get("detail") {
                Some(serde_json::Value::String(s)) => Some(s.clone()),
                Some(serde_json::Value::Null) | None => None,
                Some(other) => Some(other.to_string()),
            });
        Error::Server {
            status,
            body,
            detail,
        }
    }

    pub fn sink(path: Option<PathBuf>, source: std::io::Error) -> Self {
        Error::Sink { path, source }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Validation { .. } => ErrorKind::Validation,
            Error::Configuration { .. } => ErrorKind::Configuration,
            Error::Transport(_) => ErrorKind::Transport,
            Error::Server { .. } => ErrorKind::Server,
            Error::Sink { .. } => ErrorKind::Sink,
            Error::Serialization(_) => ErrorKind::Serialization,
        }
    }

    /// HTTP status of a server error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether an identical call could plausibly succeed later.
    ///
    /// This is a hint for callers; the client itself never retries.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Transport(_) => true,
            Error::Server { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// Extract error context if available
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::Validation { context, .. } | Error::Configuration { context, .. } => {
                Some(context)
            }
            _ => None,
        }
    }
}
