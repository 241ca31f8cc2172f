//! Speech to Text service for the Nimbus Cognition API.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{
    error::Result,
    http::HttpClient,
    stream::{RecognitionStream, StreamConfig},
    types::{AudioFormat, Language, SampleRate},
};

/// Speech to Text service provides speech recognition functionality.
pub struct SpeechToTextService {
    http: Arc<HttpClient>,
}

impl SpeechToTextService {
    /// Creates a new Speech to Text service.
    pub(crate) fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    /// Performs one-shot recognition of a complete audio clip.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use nimbus_cognitive::{Client, RecognizeRequest, AudioFormat};
    ///
    /// # async fn example() -> nimbus_cognitive::Result<()> {
    /// let client = Client::new("api-key")?;
    /// let audio = std::fs::read("audio.wav")?;
    /// let response = client.speech_to_text().recognize(&RecognizeRequest {
    ///     audio,
    ///     format: AudioFormat::Wav,
    ///     ..Default::default()
    /// }).await?;
    /// for result in &response.results {
    ///     println!("{}", result.alternatives[0].transcript);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn recognize(&self, req: &RecognizeRequest) -> Result<RecognitionResponse> {
        let content_type = req.format.content_type(req.sample_rate);

        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(ref model) = req.model {
            query.push(("model", model.clone()));
        }
        if let Some(lang) = req.language {
            query.push(("language", lang.as_str().to_string()));
        }
        if let Some(n) = req.max_alternatives {
            query.push(("max_alternatives", n.to_string()));
        }
        if req.word_timestamps {
            query.push(("timestamps", "true".to_string()));
        }

        self.http
            .request_binary("/v1/recognize", req.audio.clone(), &content_type, &query)
            .await
    }

    /// Lists the recognition models available to the account.
    pub async fn list_models(&self) -> Result<Vec<SpeechModel>> {
        let response: ModelsResponse = self.http.request::<(), _>("GET", "/v1/models", None).await?;
        Ok(response.models)
    }

    /// Retrieves a single recognition model by name.
    pub async fn get_model(&self, name: &str) -> Result<SpeechModel> {
        let path = format!("/v1/models/{}", name);
        self.http.request::<(), _>("GET", &path, None).await
    }

    /// Opens a streaming recognition session over WebSocket.
    ///
    /// See [`RecognitionStream`] for the session protocol.
    pub async fn open_stream(&self, config: &StreamConfig) -> Result<RecognitionStream> {
        RecognitionStream::connect(self.http.clone(), config).await
    }
}

// ================== Request Types ==================

/// One-shot recognition request.
#[derive(Debug, Clone, Default)]
pub struct RecognizeRequest {
    /// Complete audio clip.
    pub audio: Vec<u8>,
    /// Audio format.
    pub format: AudioFormat,
    /// Sample rate.
    pub sample_rate: SampleRate,
    /// Recognition model name.
    pub model: Option<String>,
    /// Language.
    pub language: Option<Language>,
    /// Maximum number of alternatives per result.
    pub max_alternatives: Option<i32>,
    /// Include per-word timestamps.
    pub word_timestamps: bool,
}

// ================== Response Types ==================

/// Recognition response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecognitionResponse {
    /// Recognition results, one per detected utterance.
    #[serde(default)]
    pub results: Vec<RecognitionResult>,

    /// Index of the first result relative to the whole session.
    #[serde(default)]
    pub result_index: i32,
}

impl RecognitionResponse {
    /// Returns the best transcript of the first result, if any.
    pub fn transcript(&self) -> Option<&str> {
        self.results
            .first()
            .and_then(|r| r.alternatives.first())
            .map(|a| a.transcript.as_str())
    }
}

/// A single recognition result.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecognitionResult {
    /// Alternative transcriptions, best first.
    #[serde(default)]
    pub alternatives: Vec<SpeechAlternative>,

    /// Whether this result is final (true) or interim.
    #[serde(rename = "final", default)]
    pub is_final: bool,
}

/// A single transcription alternative.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpeechAlternative {
    /// Transcript text.
    #[serde(default)]
    pub transcript: String,

    /// Confidence score in [0, 1].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,

    /// Per-word timings as (word, start seconds, end seconds).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub timestamps: Vec<(String, f64, f64)>,
}

/// A recognition model descriptor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpeechModel {
    /// Model name, e.g. "en-US_Broadband".
    pub name: String,

    /// Language tag.
    #[serde(default)]
    pub language: String,

    /// Expected sample rate in Hz.
    #[serde(default)]
    pub rate: i32,

    /// Human-readable description.
    #[serde(default)]
    pub description: String,
}

/// Response wrapper for model listing.
#[derive(Debug, Deserialize)]
struct ModelsResponse {
    #[serde(default)]
    models: Vec<SpeechModel>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_recognition_response() {
        let json = r#"{
            "result_index": 0,
            "results": [{
                "final": true,
                "alternatives": [{
                    "transcript": "hello world",
                    "confidence": 0.91,
                    "timestamps": [["hello", 0.0, 0.4], ["world", 0.45, 0.9]]
                }]
            }]
        }"#;

        let response: RecognitionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.transcript(), Some("hello world"));
        assert!(response.results[0].is_final);
        let ts = &response.results[0].alternatives[0].timestamps;
        assert_eq!(ts[1].0, "world");
        assert_eq!(ts[1].1, 0.45);
    }

    #[test]
    fn test_parse_interim_result() {
        let json = r#"{"results": [{"alternatives": [{"transcript": "hel"}]}]}"#;
        let response: RecognitionResponse = serde_json::from_str(json).unwrap();
        assert!(!response.results[0].is_final);
        assert!(response.results[0].alternatives[0].confidence.is_none());
    }
}
