//! Nimbus Cognition API client.

use std::sync::Arc;

use crate::{
    assistant::AssistantService,
    error::{Error, Result},
    http::{AuthConfig, HttpClient},
    language::LanguageService,
    speech_to_text::SpeechToTextService,
    text_to_speech::TextToSpeechService,
    translation::TranslatorService,
    vision::VisionService,
};

/// Default Nimbus Cognition API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.nimbus-ai.com";

/// Default Nimbus Cognition WebSocket URL.
pub const DEFAULT_WS_URL: &str = "wss://api.nimbus-ai.com";

/// Default maximum number of retries.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Nimbus Cognition API client.
///
/// The client provides access to all Nimbus Cognition services.
///
/// # Example
///
/// ```rust,no_run
/// use nimbus_cognitive::Client;
///
/// # fn example() -> nimbus_cognitive::Result<()> {
/// let client = Client::new("your-api-key")?;
///
/// // Use services
/// // let response = client.translator().translate(&request).await?;
/// # Ok(())
/// # }
/// ```
pub struct Client {
    http: Arc<HttpClient>,
    config: ClientConfig,
}

/// Client configuration.
#[derive(Clone)]
struct ClientConfig {
    api_key: String,
    base_url: String,
}

impl Client {
    /// Creates a new Nimbus Cognition API client.
    ///
    /// # Arguments
    ///
    /// * `api_key` - Your Nimbus Cognition API key
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        ClientBuilder::new(api_key).build()
    }

    /// Creates a new client builder for more configuration options.
    pub fn builder(api_key: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(api_key)
    }

    /// Returns the configured API key.
    pub fn api_key(&self) -> &str {
        &self.config.api_key
    }

    /// Returns the configured base URL.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Returns the Speech to Text service.
    pub fn speech_to_text(&self) -> SpeechToTextService {
        SpeechToTextService::new(self.http.clone())
    }

    /// Returns the Text to Speech service.
    pub fn text_to_speech(&self) -> TextToSpeechService {
        TextToSpeechService::new(self.http.clone())
    }

    /// Returns the Language Analyzer service.
    pub fn language(&self) -> LanguageService {
        LanguageService::new(self.http.clone())
    }

    /// Returns the Language Translator service.
    pub fn translator(&self) -> TranslatorService {
        TranslatorService::new(self.http.clone())
    }

    /// Returns the Assistant (conversation) service.
    pub fn assistant(&self) -> AssistantService {
        AssistantService::new(self.http.clone())
    }

    /// Returns the Visual Recognition service.
    pub fn vision(&self) -> VisionService {
        VisionService::new(self.http.clone())
    }

    /// Returns a reference to the internal HTTP client.
    pub fn http(&self) -> &Arc<HttpClient> {
        &self.http
    }
}

/// Builder for creating a Nimbus Cognition API client.
pub struct ClientBuilder {
    api_key: String,
    base_url: String,
    ws_url: String,
    max_retries: u32,
}

impl ClientBuilder {
    /// Creates a new client builder.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            ws_url: DEFAULT_WS_URL.to_string(),
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Sets a custom base URL for the API.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets a custom WebSocket URL.
    pub fn ws_url(mut self, url: impl Into<String>) -> Self {
        self.ws_url = url.into();
        self
    }

    /// Sets the maximum number of retries for transient errors.
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Builds the client.
    pub fn build(self) -> Result<Client> {
        if self.api_key.is_empty() {
            return Err(Error::Config("api_key must be non-empty".to_string()));
        }

        let auth = AuthConfig {
            api_key: self.api_key.clone(),
        };

        let http = HttpClient::new(self.base_url.clone(), self.ws_url, auth, self.max_retries)?;

        Ok(Client {
            http: Arc::new(http),
            config: ClientConfig {
                api_key: self.api_key,
                base_url: self.base_url,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_requires_api_key() {
        assert!(Client::new("").is_err());
        assert!(Client::new("key").is_ok());
    }

    #[test]
    fn test_builder_overrides() {
        let client = Client::builder("key")
            .base_url("https://example.test")
            .max_retries(0)
            .build()
            .unwrap();
        assert_eq!(client.base_url(), "https://example.test");
    }
}
