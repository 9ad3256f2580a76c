//! Multipart body assembly.

use super::types::SynthesisRequest;
use crate::{Error, ErrorContext, Result};
use reqwest::multipart::{Form, Part};
use reqwest::Body;
use std::path::Path;
use tokio_util::io::ReaderStream;
use tracing::{debug, warn};

/// Build the multipart body for `request`.
///
/// The audio prompt, if any, is opened here so an unreadable file fails
/// before the request is sent. Its bytes are streamed from disk.
pub(crate) async fn build_form(request: &SynthesisRequest) -> Result<Form> {
    let mut form = Form::new();
    for (name, value) in request.form_fields() {
        form = form.text(name, value);
    }

    if let Some(path) = &request.audio_prompt {
        if request.voice_name.is_some() || request.gender.is_some() {
            warn!(
                audio_prompt = %path.display(),
                "audio prompt given; ignoring preset voice_name/gender"
            );
        }
        form = form.part("audio_prompt", audio_part(path).await?);
    }

    debug!(
        text_len = request.text.len(),
        cloning = request.audio_prompt.is_some(),
        "built synthesis form"
    );
    Ok(form)
}

async fn audio_part(path: &Path) -> Result<Part> {
    let unreadable = |e: std::io::Error| {
        Error::validation_with_context(
            "audio prompt is not readable",
            ErrorContext::new()
                .with_field_path("request.audio_prompt")
                .with_details(format!("{}: {}", path.display(), e))
                .with_source("form_builder"),
        )
    };
    let file = tokio::fs::File::open(path).await.map_err(unreadable)?;
    let meta = file.metadata().await.map_err(unreadable)?;
    if !meta.is_file() {
        return Err(Error::validation_with_context(
            "audio prompt is not a regular file",
            ErrorContext::new()
                .with_field_path("request.audio_prompt")
                .with_details(path.display().to_string())
                .with_source("form_builder"),
        ));
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "audio_prompt.wav".to_string());
    let body = Body::wrap_stream(ReaderStream::new(file));
    Part::stream_with_length(body, meta.len())
        .file_name(file_name)
        .mime_str(audio_mime(path))
        .map_err(|e| Error::configuration(format!("Invalid mime: {}", e)))
}

/// MIME type for a reference clip, from its extension.
pub(crate) fn audio_mime(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "wav" | "wave" => "audio/wav",
        "mp3" => "audio/mpeg",
        "flac" => "audio/flac",
        "ogg" | "oga" => "audio/ogg",
        "opus" => "audio/opus",
        "m4a" | "aac" => "audio/aac",
        _ => "application/octet-stream",
    }
}
