//! Server endpoint configuration.
//!
//! The endpoint is resolved once, when a [`crate::SpeechClient`] is built, and
//! never changes afterwards. Environment variables are only consulted by
//! [`ServerEndpoint::from_env`]; nothing in the request path reads them.

use crate::{Error, ErrorContext, Result};
use std::env;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_GENERATE_PATH: &str = "/generate";
pub const DEFAULT_VOICES_PATH: &str = "/voices";

/// Where the speech server lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerEndpoint {
    base_url: String,
    generate_path: String,
    voices_path: String,
}

impl ServerEndpoint {
    /// Endpoint with the default `/generate` and `/voices` paths.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: trim_base(base_url.into()),
            generate_path: DEFAULT_GENERATE_PATH.to_string(),
            voices_path: DEFAULT_VOICES_PATH.to_string(),
        }
    }

    /// Read the endpoint from the environment.
    ///
    /// - `CHATTERBOX_URL` (default `http://localhost:8000`)
    /// - `CHATTERBOX_GENERATE_PATH` (default `/generate`)
    /// - `CHATTERBOX_VOICES_PATH` (default `/voices`)
    pub fn from_env() -> Self {
        let base = env::var("CHATTERBOX_URL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let mut endpoint = Self::new(base);
        if let Ok(path) = env::var("CHATTERBOX_GENERATE_PATH") {
            endpoint = endpoint.with_generate_path(path);
        }
        if let Ok(path) = env::var("CHATTERBOX_VOICES_PATH") {
            endpoint = endpoint.with_voices_path(path);
        }
        endpoint
    }

    pub fn with_generate_path(mut self, path: impl Into<String>) -> Self {
        self.generate_path = normalize_path(path.into());
        self
    }

    pub fn with_voices_path(mut self, path: impl Into<String>) -> Self {
        self.voices_path = normalize_path(path.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn generate_path(&self) -> &str {
        &self.generate_path
    }

    pub fn voices_path(&self) -> &str {
        &self.voices_path
    }

    /// Full URL of the synthesis endpoint.
    pub fn generate_url(&self) -> Result<Url> {
        self.join(&self.generate_path, "endpoint.generate_path")
    }

    /// Full URL of the voice listing endpoint.
    pub fn voices_url(&self) -> Result<Url> {
        self.join(&self.voices_path, "endpoint.voices_path")
    }

    /// Check that both URLs resolve and use an HTTP scheme.
    pub fn validate(&self) -> Result<()> {
        self.generate_url()?;
        self.voices_url()?;
        Ok(())
    }

    fn join(&self, path: &str, field: &str) -> Result<Url> {
        let raw = format!("{}{}", self.base_url, path);
        let url = Url::parse(&raw).map_err(|e| {
            Error::configuration_with_context(
                format!("Invalid endpoint URL '{}'", raw),
                ErrorContext::new()
                    .with_field_path(field)
                    .with_details(e.to_string())
                    .with_source("server_endpoint"),
            )
        })?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(Error::configuration_with_context(
                format!("Unsupported URL scheme '{}'", other),
                ErrorContext::new()
                    .with_field_path("endpoint.base_url")
                    .with_details("expected http or https")
                    .with_source("server_endpoint"),
            )),
        }
    }
}

impl Default for ServerEndpoint {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

fn trim_base(base: String) -> String {
    base.trim().trim_end_matches('/').to_string()
}

fn normalize_path(path: String) -> String {
    let path = path.trim();
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}
