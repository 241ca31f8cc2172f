//! Example: text translation.
//!
//! Usage:
//!   NIMBUS_API_KEY=your-key cargo run --example translate

use nimbus_cognitive::{Client, TranslateRequest};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let api_key = std::env::var("NIMBUS_API_KEY")
        .expect("NIMBUS_API_KEY environment variable not set");

    let client = Client::new(&api_key)?;

    let response = client
        .translator()
        .translate(&TranslateRequest {
            text: vec!["Hello, world!".to_string()],
            source: Some("en".to_string()),
            target: Some("es".to_string()),
            ..Default::default()
        })
        .await?;

    for translation in &response.translations {
        println!("{}", translation.translation);
    }
    println!(
        "({} words, {} characters)",
        response.word_count, response.character_count
    );

    Ok(())
}
