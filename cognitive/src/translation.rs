//! Language Translator service for the Nimbus Cognition API.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{error::Result, http::HttpClient};

/// Language Translator service.
pub struct TranslatorService {
    http: Arc<HttpClient>,
}

impl TranslatorService {
    /// Creates a new Language Translator service.
    pub(crate) fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    /// Translates text.
    ///
    /// Either a model id or a source/target pair selects the translation
    /// model.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use nimbus_cognitive::{Client, TranslateRequest};
    ///
    /// # async fn example() -> nimbus_cognitive::Result<()> {
    /// let client = Client::new("api-key")?;
    /// let response = client.translator().translate(&TranslateRequest {
    ///     text: vec!["Hello".to_string()],
    ///     source: Some("en".to_string()),
    ///     target: Some("es".to_string()),
    ///     ..Default::default()
    /// }).await?;
    /// println!("{}", response.translations[0].translation);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn translate(&self, req: &TranslateRequest) -> Result<TranslationResponse> {
        self.http.request("POST", "/v1/translate", Some(req)).await
    }

    /// Identifies the language of the given text.
    pub async fn identify(&self, text: &str) -> Result<Vec<IdentifiedLanguage>> {
        let body = IdentifyPayload { text };
        let response: IdentifyResponse = self
            .http
            .request("POST", "/v1/identify", Some(&body))
            .await?;
        Ok(response.languages)
    }

    /// Lists the translation models available to the account.
    pub async fn list_models(&self) -> Result<Vec<TranslationModel>> {
        let response: TranslationModelsResponse = self
            .http
            .request::<(), _>("GET", "/v1/translation/models", None)
            .await?;
        Ok(response.models)
    }

    /// Lists the languages the identify operation can detect.
    pub async fn list_identifiable_languages(&self) -> Result<Vec<IdentifiableLanguage>> {
        let response: IdentifiableLanguagesResponse = self
            .http
            .request::<(), _>("GET", "/v1/identifiable_languages", None)
            .await?;
        Ok(response.languages)
    }
}

// ================== Request Types ==================

/// Translation request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TranslateRequest {
    /// Input text segments.
    pub text: Vec<String>,

    /// Translation model id, e.g. "en-es".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_id: Option<String>,

    /// Source language (alternative to model_id).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Target language (alternative to model_id).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

/// JSON body of the identify call.
#[derive(Serialize)]
struct IdentifyPayload<'a> {
    text: &'a str,
}

// ================== Response Types ==================

/// Translation response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TranslationResponse {
    /// Translated segments, in input order.
    #[serde(default)]
    pub translations: Vec<Translation>,

    /// Number of words translated.
    #[serde(default)]
    pub word_count: i32,

    /// Number of characters translated.
    #[serde(default)]
    pub character_count: i32,
}

/// A single translated segment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Translation {
    /// Translated text.
    #[serde(default)]
    pub translation: String,
}

/// A language identified in input text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdentifiedLanguage {
    /// Language code, e.g. "en".
    #[serde(default)]
    pub language: String,

    /// Confidence in [0, 1].
    #[serde(default)]
    pub confidence: f64,
}

/// A language the identify operation supports.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdentifiableLanguage {
    /// Language code, e.g. "en".
    #[serde(default)]
    pub language: String,

    /// Language name, e.g. "English".
    #[serde(default)]
    pub name: String,
}

/// A translation model descriptor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TranslationModel {
    /// Model id, e.g. "en-es".
    #[serde(default)]
    pub model_id: String,

    /// Source language code.
    #[serde(default)]
    pub source: String,

    /// Target language code.
    #[serde(default)]
    pub target: String,

    /// Whether this is a base model or a customization.
    #[serde(default)]
    pub default_model: bool,
}

/// Response wrapper for identify.
#[derive(Debug, Deserialize)]
struct IdentifyResponse {
    #[serde(default)]
    languages: Vec<IdentifiedLanguage>,
}

/// Response wrapper for model listing.
#[derive(Debug, Deserialize)]
struct TranslationModelsResponse {
    #[serde(default)]
    models: Vec<TranslationModel>,
}

/// Response wrapper for identifiable languages.
#[derive(Debug, Deserialize)]
struct IdentifiableLanguagesResponse {
    #[serde(default)]
    languages: Vec<IdentifiableLanguage>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_translation_response() {
        let json = r#"{
            "translations": [{"translation": "Hola"}],
            "word_count": 1,
            "character_count": 5
        }"#;

        let response: TranslationResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.translations[0].translation, "Hola");
        assert_eq!(response.word_count, 1);
    }

    #[test]
    fn test_translate_request_omits_empty_model() {
        let req = TranslateRequest {
            text: vec!["Hello".to_string()],
            source: Some("en".to_string()),
            target: Some("es".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("model_id").is_none());
        assert_eq!(json["source"], "en");
    }
}
