//! Print the cloned voices the server offers, grouped by gender.
//!
//! Usage:
//!   CHATTERBOX_URL=http://localhost:8000 cargo run --example list_voices

use chatterbox_client::{Gender, SpeechClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let client = SpeechClient::builder().build()?;
    let catalog = client.list_voices().await?;

    for gender in [Gender::Man, Gender::Woman] {
        println!("{gender}:");
        for name in catalog.by_gender(gender) {
            println!("  {name}");
        }
    }
    println!("\n{} voices total", catalog.len());

    Ok(())
}
