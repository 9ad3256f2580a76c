//! Speech synthesis client.

use super::form::build_form;
use super::types::SynthesisRequest;
use super::voices::VoiceCatalog;
use crate::config::ServerEndpoint;
use crate::sink::{copy_stream, PartialFile};
use crate::transport::{HttpTransport, TransportSettings};
use crate::Result;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::io::AsyncWrite;
use tracing::{debug, info};

/// Client for the speech server's `/generate` and `/voices` endpoints.
///
/// Holds no per-call state; clone it freely and issue calls concurrently,
/// one destination per call.
#[derive(Debug, Clone)]
pub struct SpeechClient {
    transport: HttpTransport,
}

impl SpeechClient {
    pub fn builder() -> SpeechClientBuilder {
        SpeechClientBuilder::new()
    }

    /// Client for `endpoint` with default transport settings.
    pub fn new(endpoint: ServerEndpoint) -> Result<Self> {
        SpeechClientBuilder::new().endpoint(endpoint).build()
    }

    pub fn endpoint(&self) -> &ServerEndpoint {
        self.transport.endpoint()
    }

    /// Synthesize `request` into the file at `destination`.
    ///
    /// The audio is streamed into a hidden partial file beside the destination
    /// and renamed into place once the whole body has arrived. On failure,
    /// or if this future is dropped, no file appears at `destination`.
    pub async fn synthesize(
        &self,
        request: &SynthesisRequest,
        destination: impl AsRef<Path>,
    ) -> Result<PathBuf> {
        let started = Instant::now();
        request.validate()?;
        let form = build_form(request).await?;
        let mut partial = PartialFile::create(destination.as_ref()).await?;
        let dest = partial.destination().to_path_buf();

        let response = self.transport.post_generate(form).await?;
        let written = copy_stream(
            response.bytes_stream(),
            partial.file_mut()?,
            Some(dest.as_path()),
        )
        .await?;
        let path = partial.commit().await?;

        info!(
            path = %path.display(),
            bytes = written,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "speech saved"
        );
        Ok(path)
    }

    /// Synthesize `request` into an arbitrary async writer.
    ///
    /// Returns the number of bytes written. Bytes already written before a
    /// failure stay in the writer.
    pub async fn synthesize_to_writer<W>(
        &self,
        request: &SynthesisRequest,
        writer: &mut W,
    ) -> Result<u64>
    where
        W: AsyncWrite + Unpin + ?Sized,
    {
        request.validate()?;
        let form = build_form(request).await?;
        let response = self.transport.post_generate(form).await?;
        let written = copy_stream(response.bytes_stream(), writer, None).await?;
        debug!(bytes = written, "speech streamed to writer");
        Ok(written)
    }

    /// Fetch the server's cloned voices.
    pub async fn list_voices(&self) -> Result<VoiceCatalog> {
        let catalog: VoiceCatalog = self.transport.get_voices().await?;
        debug!(voices = catalog.len(), "fetched voice catalog");
        Ok(catalog)
    }
}

pub struct SpeechClientBuilder {
    endpoint: Option<ServerEndpoint>,
    base_url: Option<String>,
    generate_path: Option<String>,
    voices_path: Option<String>,
    settings: TransportSettings,
}

impl SpeechClientBuilder {
    pub fn new() -> Self {
        Self {
            endpoint: None,
            base_url: None,
            generate_path: None,
            voices_path: None,
            settings: TransportSettings::default(),
        }
    }

    /// Start from a full endpoint. Individual URL/path setters override it.
    pub fn endpoint(mut self, endpoint: ServerEndpoint) -> Self {
        self.endpoint = Some(endpoint);
        self
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn generate_path(mut self, path: impl Into<String>) -> Self {
        self.generate_path = Some(path.into());
        self
    }

    pub fn voices_path(mut self, path: impl Into<String>) -> Self {
        self.voices_path = Some(path.into());
        self
    }

    /// Whole-request timeout, including streaming the audio body.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.settings.timeout = Some(timeout);
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.settings.connect_timeout = Some(timeout);
        self
    }

    pub fn proxy(mut self, url: impl Into<String>) -> Self {
        self.settings.proxy_url = Some(url.into());
        self
    }

    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.settings.user_agent = Some(ua.into());
        self
    }

    /// Build the client. Without a base URL or endpoint, the endpoint is
    /// read from the environment (see [`ServerEndpoint::from_env`]).
    pub fn build(self) -> Result<SpeechClient> {
        let mut endpoint = match (self.endpoint, self.base_url) {
            (Some(ep), Some(base)) => ServerEndpoint::new(base)
                .with_generate_path(ep.generate_path())
                .with_voices_path(ep.voices_path()),
            (None, Some(base)) => ServerEndpoint::new(base),
            (Some(ep), None) => ep,
            (None, None) => ServerEndpoint::from_env(),
        };
        if let Some(path) = self.generate_path {
            endpoint = endpoint.with_generate_path(path);
        }
        if let Some(path) = self.voices_path {
            endpoint = endpoint.with_voices_path(path);
        }
        let transport = HttpTransport::new(endpoint, &self.settings)?;
        debug!(base_url = transport.endpoint().base_url(), "speech client ready");
        Ok(SpeechClient { transport })
    }
}

impl Default for SpeechClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
