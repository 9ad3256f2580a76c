//! HTTP transport for the speech server.

mod http;

pub use http::{HttpTransport, TransportSettings};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl TransportError {
    pub fn is_timeout(&self) -> bool {
        match self {
            TransportError::Http(e) => e.is_timeout(),
        }
    }

    pub fn is_connect(&self) -> bool {
        match self {
            TransportError::Http(e) => e.is_connect(),
        }
    }
}

impl From<reqwest::Error> for crate::Error {
    fn from(e: reqwest::Error) -> Self {
        crate::Error::Transport(TransportError::Http(e))
    }
}
