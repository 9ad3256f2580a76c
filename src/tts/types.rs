//! Synthesis request types.

use crate::{Error, ErrorContext, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Gender bucket the server files cloned voices under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Man,
    Woman,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Man => "Man",
            Self::Woman => "Woman",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "man" | "male" | "m" => Ok(Self::Man),
            "woman" | "female" | "f" | "w" => Ok(Self::Woman),
            other => Err(Error::validation_with_context(
                format!("Unknown gender '{}'", other),
                ErrorContext::new()
                    .with_field_path("request.gender")
                    .with_details("expected Man or Woman"),
            )),
        }
    }
}

/// Which voice the server will use for a request.
#[derive(Debug, Clone, PartialEq)]
pub enum VoiceSelection<'a> {
    /// Neither a preset nor a reference sample; the server picks.
    ServerDefault,
    /// A named cloned voice from `/voices`.
    Preset {
        name: Option<&'a str>,
        gender: Option<Gender>,
    },
    /// Clone the timbre of an uploaded reference sample.
    Clone { audio_prompt: &'a Path },
}

/// One text-to-speech request.
///
/// Optional fields are only sent when set, so the server's own defaults
/// apply to everything left unset.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SynthesisRequest {
    pub text: String,
    pub voice_name: Option<String>,
    pub gender: Option<Gender>,
    pub temperature: Option<f32>,
    pub audio_prompt: Option<PathBuf>,
    pub seed: Option<u32>,
    pub top_p: Option<f32>,
    pub top_k: Option<u32>,
    pub repetition_penalty: Option<f32>,
    pub norm_loudness: Option<bool>,
}

impl SynthesisRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn voice(mut self, name: impl Into<String>) -> Self {
        self.voice_name = Some(name.into());
        self
    }

    pub fn gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Reference audio for voice cloning. Takes precedence over a preset voice.
    pub fn audio_prompt(mut self, path: impl Into<PathBuf>) -> Self {
        self.audio_prompt = Some(path.into());
        self
    }

    /// Random seed; `0` asks the server for a random one.
    pub fn seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn top_p(mut self, top_p: f32) -> Self {
        self.top_p = Some(top_p);
        self
    }

    pub fn top_k(mut self, top_k: u32) -> Self {
        self.top_k = Some(top_k);
        self
    }

    pub fn repetition_penalty(mut self, penalty: f32) -> Self {
        self.repetition_penalty = Some(penalty);
        self
    }

    pub fn norm_loudness(mut self, enable: bool) -> Self {
        self.norm_loudness = Some(enable);
        self
    }

    pub fn voice_selection(&self) -> VoiceSelection<'_> {
        if let Some(path) = &self.audio_prompt {
            return VoiceSelection::Clone { audio_prompt: path };
        }
        if self.voice_name.is_none() && self.gender.is_none() {
            return VoiceSelection::ServerDefault;
        }
        VoiceSelection::Preset {
            name: self.voice_name.as_deref(),
            gender: self.gender,
        }
    }

    /// Check local constraints. Runs before anything touches the network.
    pub fn validate(&self) -> Result<()> {
        if self.text.trim().is_empty() {
            return Err(invalid("request.text", "text must not be empty", None));
        }
        // Preset fields are not sent when cloning, so they are not checked either.
        if let (Some(name), None) = (&self.voice_name, &self.audio_prompt) {
            if name.trim().is_empty() {
                return Err(invalid(
                    "request.voice_name",
                    "voice name must not be blank",
                    None,
                ));
            }
        }
        if let Some(t) = self.temperature {
            if !t.is_finite() || !(0.0..=2.0).contains(&t) {
                return Err(invalid(
                    "request.temperature",
                    "temperature out of range",
                    Some(format!("expected 0.0..=2.0, got {}", t)),
                ));
            }
        }
        if let Some(p) = self.top_p {
            if !p.is_finite() || p <= 0.0 || p > 1.0 {
                return Err(invalid(
                    "request.top_p",
                    "top_p out of range",
                    Some(format!("expected (0.0, 1.0], got {}", p)),
                ));
            }
        }
        if self.top_k == Some(0) {
            return Err(invalid(
                "request.top_k",
                "top_k must be at least 1",
                None,
            ));
        }
        if let Some(r) = self.repetition_penalty {
            if !r.is_finite() || r <= 0.0 {
                return Err(invalid(
                    "request.repetition_penalty",
                    "repetition_penalty must be positive",
                    Some(format!("got {}", r)),
                ));
            }
        }
        if let Some(path) = &self.audio_prompt {
            if path.as_os_str().is_empty() {
                return Err(invalid(
                    "request.audio_prompt",
                    "audio prompt path is empty",
                    None,
                ));
            }
        }
        Ok(())
    }

    /// Text parts of the multipart body, in wire order.
    ///
    /// When an audio prompt is present the preset fields are left out; the
    /// prompt itself is attached separately as a file part.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![("text", self.text.clone())];
        if self.audio_prompt.is_none() {
            if let Some(name) = &self.voice_name {
                fields.push(("voice_name", name.clone()));
            }
            if let Some(gender) = self.gender {
                fields.push(("gender", gender.to_string()));
            }
        }
        if let Some(t) = self.temperature {
            fields.push(("temperature", t.to_string()));
        }
        if let Some(seed) = self.seed {
            fields.push(("seed", seed.to_string()));
        }
        if let Some(p) = self.top_p {
            fields.push(("top_p", p.to_string()));
        }
        if let Some(k) = self.top_k {
            fields.push(("top_k", k.to_string()));
        }
        if let Some(r) = self.repetition_penalty {
            fields.push(("repetition_penalty", r.to_string()));
        }
        if let Some(n) = self.norm_loudness {
            fields.push(("norm_loudness", n.to_string()));
        }
        fields
    }
}

fn invalid(field: &str, message: &str, details: Option<String>) -> Error {
    let mut ctx = ErrorContext::new()
        .with_field_path(field)
        .with_source("request_validator");
    if let Some(details) = details {
        ctx = ctx.with_details(details);
    }
    Error::validation_with_context(message, ctx)
}
