use crate::config::ServerEndpoint;
use crate::{Error, Result};
use bytes::Bytes;
use reqwest::multipart::Form;
use reqwest::{Proxy, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::env;
use std::fmt::Display;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Knobs for the underlying `reqwest::Client`.
///
/// Unset fields fall back to the environment, then to "no limit":
/// - `CHATTERBOX_HTTP_TIMEOUT_SECS` (whole-request timeout, unset by default)
/// - `CHATTERBOX_PROXY_URL`
#[derive(Debug, Clone, Default)]
pub struct TransportSettings {
    pub timeout: Option<Duration>,
    pub connect_timeout: Option<Duration>,
    pub proxy_url: Option<String>,
    pub user_agent: Option<String>,
}

impl TransportSettings {
    fn resolved_timeout(&self) -> Option<Duration> {
        self.timeout.or_else(|| {
            env::var("CHATTERBOX_HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
        })
    }

    fn resolved_proxy(&self) -> Option<String> {
        self.proxy_url
            .clone()
            .or_else(|| env::var("CHATTERBOX_PROXY_URL").ok())
            .filter(|s| !s.trim().is_empty())
    }
}

/// Thin wrapper over a pooled `reqwest::Client` bound to one server.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: ServerEndpoint,
    generate_url: Url,
    voices_url: Url,
}

impl HttpTransport {
    pub fn new(endpoint: ServerEndpoint, settings: &TransportSettings) -> Result<Self> {
        let generate_url = endpoint.generate_url()?;
        let voices_url = endpoint.voices_url()?;

        let user_agent = settings.user_agent.clone().unwrap_or_else(|| {
            format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
        });
        let mut builder = reqwest::Client::builder().user_agent(user_agent);

        if let Some(timeout) = settings.resolved_timeout() {
            builder = builder.timeout(timeout);
        }
        if let Some(connect_timeout) = settings.connect_timeout {
            builder = builder.connect_timeout(connect_timeout);
        }
        if let Some(proxy_url) = settings.resolved_proxy() {
            let proxy = Proxy::all(&proxy_url).map_err(|e| {
                Error::configuration(format!("Invalid proxy URL '{}': {}", proxy_url, e))
            })?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| Error::configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint,
            generate_url,
            voices_url,
        })
    }

    pub fn endpoint(&self) -> &ServerEndpoint {
        &self.endpoint
    }

    /// POST a multipart form to the synthesis endpoint.
    ///
    /// Only `200 OK` responses are returned; the body is left unread so the
    /// caller can stream it.
    pub async fn post_generate(&self, form: Form) -> Result<Response> {
        debug!(url = %self.generate_url, "POST multipart synthesis request");
        let response = self
            .client
            .post(self.generate_url.clone())
            .multipart(form)
            .send()
            .await?;
        ensure_success(response).await
    }

    /// GET the voice listing and decode it.
    pub async fn get_voices<T: DeserializeOwned>(&self) -> Result<T> {
        debug!(url = %self.voices_url, "GET voice listing");
        let response = self.client.get(self.voices_url.clone()).send().await?;
        let response = ensure_success(response).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// Anything but `200 OK` is a server error; a `204` or other 2xx carries no audio.
async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status == StatusCode::OK {
        return Ok(response);
    }
    let body = response.bytes().await;
    Err(server_error(status.as_u16(), body))
}

fn server_error<E: Display>(status: u16, body: std::result::Result<Bytes, E>) -> Error {
    match body {
        Ok(bytes) => Error::server(status, &bytes),
        Err(e) => Error::Server {
            status,
            body: format!("<error body unreadable: {}>", e),
            detail: None,
        },
    }
}
