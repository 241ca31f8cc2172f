//! Example: streaming speech recognition.
//!
//! Usage:
//!   NIMBUS_API_KEY=your-key cargo run --example stream -- audio.wav

use nimbus_cognitive::{Client, RecognitionEvent, StreamConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let api_key = std::env::var("NIMBUS_API_KEY")
        .expect("NIMBUS_API_KEY environment variable not set");
    let audio_path = std::env::args()
        .nth(1)
        .expect("usage: stream <audio-file>");

    let client = Client::new(&api_key)?;

    let mut stream = client
        .speech_to_text()
        .open_stream(&StreamConfig {
            interim_results: true,
            ..Default::default()
        })
        .await?;
    println!("Connected");

    let audio = tokio::fs::File::open(&audio_path).await?;
    stream.send_reader(audio).await?;

    while let Some(event) = stream.recv().await {
        match event? {
            RecognitionEvent::Listening => println!("Listening..."),
            RecognitionEvent::Transcription(response) => {
                for result in &response.results {
                    if let Some(alt) = result.alternatives.first() {
                        let marker = if result.is_final { "" } else { "~ " };
                        println!("{}{}", marker, alt.transcript);
                    }
                }
            }
            RecognitionEvent::Disconnected => {
                println!("Disconnected");
                break;
            }
        }
    }

    Ok(())
}
