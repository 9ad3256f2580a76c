//! Text-to-speech: multipart synthesis requests streamed to local files.

mod client;
mod form;
mod types;
mod voices;

pub use client::{SpeechClient, SpeechClientBuilder};
pub use types::{Gender, SynthesisRequest, VoiceSelection};
pub use voices::{Voice, VoiceCatalog};
