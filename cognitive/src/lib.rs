//! Nimbus Cognition API SDK for Rust.
//!
//! This crate provides a client for the Nimbus Cognition API suite:
//!
//! - Speech to Text: one-shot and WebSocket streaming recognition
//! - Text to Speech: voice synthesis
//! - Language Analyzer: sentiment, entities, keywords
//! - Language Translator: translation and language identification
//! - Assistant: workspace-based conversation
//! - Visual Recognition: image classification and face detection
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use nimbus_cognitive::{Client, TranslateRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::new("your-api-key")?;
//!
//!     let response = client.translator().translate(&TranslateRequest {
//!         text: vec!["Hello, world!".to_string()],
//!         source: Some("en".to_string()),
//!         target: Some("es".to_string()),
//!         ..Default::default()
//!     }).await?;
//!
//!     println!("{}", response.translations[0].translation);
//!     Ok(())
//! }
//! ```
//!
//! # Streaming recognition
//!
//! The Speech to Text service supports streaming recognition over a
//! persistent WebSocket. Audio is framed in fixed-size binary chunks
//! between JSON start/stop control frames, and results arrive as an async
//! event stream:
//!
//! ```rust,no_run
//! use nimbus_cognitive::{Client, StreamConfig, RecognitionEvent};
//!
//! # async fn example() -> nimbus_cognitive::Result<()> {
//! let client = Client::new("your-api-key")?;
//! let mut stream = client.speech_to_text().open_stream(&StreamConfig::default()).await?;
//!
//! stream.send_reader(tokio::fs::File::open("audio.wav").await?).await?;
//!
//! while let Some(event) = stream.recv().await {
//!     if let RecognitionEvent::Transcription(response) = event? {
//!         println!("{:?}", response.transcript());
//!     }
//! }
//! # Ok(())
//! # }
//! ```

mod assistant;
mod client;
mod error;
pub mod http;
mod language;
mod speech_to_text;
mod stream;
mod text_to_speech;
mod translation;
mod types;
mod vision;

pub use assistant::{
    AssistantService, DialogEntity, Intent, MessageInput, MessageOutput, MessageRequest,
    MessageResponse, Workspace,
};
pub use client::{Client, ClientBuilder, DEFAULT_BASE_URL, DEFAULT_MAX_RETRIES, DEFAULT_WS_URL};
pub use error::{Error, Result, status_code};
pub use language::{
    AnalysisResponse, AnalyzeRequest, DocumentSentiment, EntityMention, Features, Keyword,
    LanguageService,
};
pub use speech_to_text::{
    RecognitionResponse, RecognitionResult, RecognizeRequest, SpeechAlternative, SpeechModel,
    SpeechToTextService,
};
pub use stream::{CHUNK_SIZE, RecognitionEvent, RecognitionStream, StreamConfig};
pub use text_to_speech::{SynthesizeRequest, SynthesizeResponse, TextToSpeechService, Voice};
pub use translation::{
    IdentifiableLanguage, IdentifiedLanguage, TranslateRequest, Translation, TranslationModel,
    TranslationResponse, TranslatorService,
};
pub use types::{AudioFormat, Language, SampleRate};
pub use vision::{
    AgeRange, ClassResult, ClassifierResult, ClassifyRequest, ClassifyResponse,
    DetectFacesRequest, DetectFacesResponse, Face, FaceGender, FaceLocation, VisionService,
};

#[cfg(test)]
mod tests;
