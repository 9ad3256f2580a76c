//! chatterbox: command-line front end for the speech server.
//!
//! Usage:
//!   chatterbox say "Hello world" --voice Achird --gender man -o hello.wav
//!   chatterbox voices [--gender woman]
//!
//! The server URL comes from `--url`, then `CHATTERBOX_URL`, then
//! `http://localhost:8000`. Logging honours `RUST_LOG`.

use anyhow::{Context, Result};
use chatterbox_client::{Error, Gender, SpeechClient, SynthesisRequest};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "chatterbox")]
#[command(version, about = "Text-to-speech client for the Chatterbox API", long_about = None)]
struct Cli {
    /// Server base URL
    #[arg(long, global = true, env = "CHATTERBOX_URL")]
    url: Option<String>,

    /// Whole-request timeout in seconds (no timeout when unset)
    #[arg(long, global = true)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Synthesize text into an audio file
    Say {
        /// Text to speak
        text: String,

        /// Output file
        #[arg(short, long, default_value = "output.wav")]
        output: PathBuf,

        /// Cloned voice name (see `chatterbox voices`)
        #[arg(long)]
        voice: Option<String>,

        /// Voice gender: man or woman
        #[arg(long, value_parser = parse_gender)]
        gender: Option<Gender>,

        /// Sampling temperature, 0.0 to 2.0
        #[arg(long)]
        temperature: Option<f32>,

        /// Reference clip for voice cloning; overrides --voice/--gender
        #[arg(long)]
        audio_prompt: Option<PathBuf>,

        /// Random seed (0 = random)
        #[arg(long)]
        seed: Option<u32>,

        #[arg(long)]
        top_p: Option<f32>,

        #[arg(long)]
        top_k: Option<u32>,

        #[arg(long)]
        repetition_penalty: Option<f32>,

        /// Skip loudness normalization
        #[arg(long)]
        no_norm_loudness: bool,
    },

    /// List the server's cloned voices
    Voices {
        /// Only show one gender
        #[arg(long, value_parser = parse_gender)]
        gender: Option<Gender>,
    },
}

fn parse_gender(s: &str) -> std::result::Result<Gender, String> {
    s.parse::<Gender>().map_err(|e| e.to_string())
}

/// Extra guidance for connection failures, printed before the error chain.
fn transport_hint(err: &Error, client: &SpeechClient) -> Option<String> {
    match err {
        Error::Transport(t) if t.is_connect() => Some(format!(
            "could not connect to {}; is the server running? (set --url or CHATTERBOX_URL)",
            client.endpoint().base_url()
        )),
        Error::Transport(t) if t.is_timeout() => {
            Some("request timed out; try a larger --timeout".to_string())
        }
        _ => None,
    }
}

fn report(err: Error, client: &SpeechClient, what: String) -> anyhow::Error {
    if let Some(hint) = transport_hint(&err, client) {
        eprintln!("hint: {}", hint);
    }
    anyhow::Error::new(err).context(what)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut builder = SpeechClient::builder();
    if let Some(url) = &cli.url {
        builder = builder.base_url(url.clone());
    }
    if let Some(secs) = cli.timeout {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    let client = builder.build().context("invalid client configuration")?;

    match cli.command {
        Commands::Say {
            text,
            output,
            voice,
            gender,
            temperature,
            audio_prompt,
            seed,
            top_p,
            top_k,
            repetition_penalty,
            no_norm_loudness,
        } => {
            let mut request = SynthesisRequest::new(text);
            request.voice_name = voice;
            request.gender = gender;
            request.temperature = temperature;
            request.audio_prompt = audio_prompt;
            request.seed = seed;
            request.top_p = top_p;
            request.top_k = top_k;
            request.repetition_penalty = repetition_penalty;
            if no_norm_loudness {
                request.norm_loudness = Some(false);
            }

            let path = client
                .synthesize(&request, &output)
                .await
                .map_err(|e| {
                    report(e, &client, format!("synthesis into {} failed", output.display()))
                })?;
            println!("{}", path.display());
        }
        Commands::Voices { gender } => {
            let catalog = client
                .list_voices()
                .await
                .map_err(|e| report(e, &client, "failed to list voices".to_string()))?;
            for (name, g) in catalog.iter() {
                if gender.map_or(true, |want| want == g) {
                    println!("{}\t{}", g, name);
                }
            }
        }
    }

    Ok(())
}
