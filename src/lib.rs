//! # chatterbox-client
//!
//! Async client for the Chatterbox text-to-speech HTTP API.
//!
//! A [`SynthesisRequest`] is encoded as a multipart form, POSTed to the
//! server's `/generate` endpoint, and the audio response is streamed straight
//! to disk without buffering it in memory. The voice listing at `/voices` is
//! available through [`SpeechClient::list_voices`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chatterbox_client::{Gender, SpeechClient, SynthesisRequest};
//!
//! #[tokio::main]
//! async fn main() -> chatterbox_client::Result<()> {
//!     let client = SpeechClient::builder()
//!         .base_url("http://localhost:8000")
//!         .build()?;
//!
//!     let request = SynthesisRequest::new("Hello world")
//!         .voice("Achird")
//!         .gender(Gender::Man)
//!         .temperature(0.8);
//!
//!     let path = client.synthesize(&request, "output.wav").await?;
//!     println!("saved {}", path.display());
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`tts`] | Client, request types, voice catalog |
//! | [`config`] | Server endpoint configuration |
//! | [`transport`] | HTTP transport over `reqwest` |
//! | [`sink`] | Atomic file destination and stream copy |
//! | [`error`] | Classified error type |

pub mod config;
pub mod sink;
pub mod transport;
pub mod tts;

pub use config::ServerEndpoint;
pub use tts::{
    Gender, SpeechClient, SpeechClientBuilder, SynthesisRequest, Voice, VoiceCatalog,
    VoiceSelection,
};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext, ErrorKind};
