//! Text to Speech service for the Nimbus Cognition API.

use std::sync::Arc;

use bytes::Bytes;
use futures::Stream;
use serde::{Deserialize, Serialize};

use crate::{
    error::Result,
    http::HttpClient,
    types::{AudioFormat, SampleRate},
};

/// Text to Speech service provides voice synthesis functionality.
pub struct TextToSpeechService {
    http: Arc<HttpClient>,
}

impl TextToSpeechService {
    /// Creates a new Text to Speech service.
    pub(crate) fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    /// Synthesizes text to audio.
    ///
    /// The response carries raw audio bytes in the requested format.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use nimbus_cognitive::{Client, SynthesizeRequest, AudioFormat};
    ///
    /// # async fn example() -> nimbus_cognitive::Result<()> {
    /// let client = Client::new("api-key")?;
    /// let response = client.text_to_speech().synthesize(&SynthesizeRequest {
    ///     text: "Hello, world!".to_string(),
    ///     voice: "en-US_Michael".to_string(),
    ///     format: AudioFormat::Wav,
    ///     ..Default::default()
    /// }).await?;
    /// std::fs::write("hello.wav", &response.audio)?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn synthesize(&self, req: &SynthesizeRequest) -> Result<SynthesizeResponse> {
        let accept = req.format.content_type(req.sample_rate);

        let path = if req.voice.is_empty() {
            "/v1/synthesize".to_string()
        } else {
            format!("/v1/synthesize?voice={}", req.voice)
        };

        let body = SynthesizePayload {
            text: req.text.clone(),
        };
        let audio = self
            .http
            .fetch_binary("POST", &path, Some(&body), &accept)
            .await?;

        Ok(SynthesizeResponse {
            audio: audio.to_vec(),
            format: req.format,
        })
    }

    /// Synthesizes text to a stream of audio chunks.
    ///
    /// Chunks arrive as the server renders them, which lets playback start
    /// before synthesis finishes.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use futures::StreamExt;
    /// use nimbus_cognitive::{Client, SynthesizeRequest};
    ///
    /// # async fn example() -> nimbus_cognitive::Result<()> {
    /// let client = Client::new("api-key")?;
    /// let mut stream = client.text_to_speech().synthesize_stream(&SynthesizeRequest {
    ///     text: "Hello, world!".to_string(),
    ///     ..Default::default()
    /// }).await?;
    ///
    /// while let Some(chunk) = stream.next().await {
    ///     let chunk = chunk?;
    ///     // Feed chunk to the audio sink.
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn synthesize_stream(
        &self,
        req: &SynthesizeRequest,
    ) -> Result<impl Stream<Item = Result<Bytes>> + use<>> {
        let accept = req.format.content_type(req.sample_rate);

        let path = if req.voice.is_empty() {
            "/v1/synthesize".to_string()
        } else {
            format!("/v1/synthesize?voice={}", req.voice)
        };

        let body = SynthesizePayload {
            text: req.text.clone(),
        };
        self.http
            .stream_binary("POST", &path, Some(&body), &accept)
            .await
    }

    /// Lists the voices available to the account.
    pub async fn list_voices(&self) -> Result<Vec<Voice>> {
        let response: VoicesResponse = self.http.request::<(), _>("GET", "/v1/voices", None).await?;
        Ok(response.voices)
    }

    /// Retrieves a single voice by name.
    pub async fn get_voice(&self, name: &str) -> Result<Voice> {
        let path = format!("/v1/voices/{}", name);
        self.http.request::<(), _>("GET", &path, None).await
    }
}

// ================== Request Types ==================

/// Speech synthesis request.
#[derive(Debug, Clone, Default)]
pub struct SynthesizeRequest {
    /// Text to synthesize.
    pub text: String,
    /// Voice name, e.g. "en-US_Michael".
    pub voice: String,
    /// Output audio format.
    pub format: AudioFormat,
    /// Output sample rate (raw PCM only).
    pub sample_rate: SampleRate,
}

/// JSON body of the synthesize call.
#[derive(Serialize)]
struct SynthesizePayload {
    text: String,
}

// ================== Response Types ==================

/// Speech synthesis response.
#[derive(Debug, Clone, Default)]
pub struct SynthesizeResponse {
    /// Synthesized audio bytes.
    pub audio: Vec<u8>,
    /// Format of the audio.
    pub format: AudioFormat,
}

/// A voice descriptor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Voice {
    /// Voice name, e.g. "en-US_Michael".
    pub name: String,

    /// Language tag.
    #[serde(default)]
    pub language: String,

    /// Voice gender.
    #[serde(default)]
    pub gender: String,

    /// Human-readable description.
    #[serde(default)]
    pub description: String,

    /// Whether the voice supports custom pronunciation dictionaries.
    #[serde(default)]
    pub customizable: bool,
}

/// Response wrapper for voice listing.
#[derive(Debug, Deserialize)]
struct VoicesResponse {
    #[serde(default)]
    voices: Vec<Voice>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_voice() {
        let json = r#"{
            "name": "en-US_Michael",
            "language": "en-US",
            "gender": "male",
            "description": "Michael: American English male voice.",
            "customizable": true
        }"#;

        let voice: Voice = serde_json::from_str(json).unwrap();
        assert_eq!(voice.name, "en-US_Michael");
        assert!(voice.customizable);
    }
}
