//! Synthesize one sentence with a preset voice and save it as WAV.
//!
//! The server URL is read from CHATTERBOX_URL (default http://localhost:8000).
//!
//! Usage:
//!   CHATTERBOX_URL=http://localhost:8000 cargo run --example synthesize

use chatterbox_client::{Gender, SpeechClient, SynthesisRequest};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let client = SpeechClient::builder().build()?;

    let request = SynthesisRequest::new("Hello friend, this voice was generated by Chatterbox!")
        .voice("Achird")
        .gender(Gender::Man)
        .temperature(0.8);

    match client.synthesize(&request, "output.wav").await {
        Ok(path) => println!("Saved audio to {}", path.display()),
        Err(e) => {
            eprintln!("Synthesis failed ({}): {}", e.kind(), e);
            if let chatterbox_client::Error::Server { detail: Some(detail), .. } = &e {
                eprintln!("Server said: {detail}");
            }
            return Err(e.into());
        }
    }

    Ok(())
}
