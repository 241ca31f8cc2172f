//! Language Analyzer (natural language understanding) service.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{error::Result, http::HttpClient};

/// Language Analyzer service provides text analysis functionality.
pub struct LanguageService {
    http: Arc<HttpClient>,
}

impl LanguageService {
    /// Creates a new Language Analyzer service.
    pub(crate) fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    /// Analyzes text for the requested features.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use nimbus_cognitive::{Client, AnalyzeRequest, Features};
    ///
    /// # async fn example() -> nimbus_cognitive::Result<()> {
    /// let client = Client::new("api-key")?;
    /// let response = client.language().analyze(&AnalyzeRequest {
    ///     text: "I love this product, shipped from Berlin.".to_string(),
    ///     features: Features {
    ///         sentiment: true,
    ///         entities: true,
    ///         keywords: true,
    ///     },
    ///     ..Default::default()
    /// }).await?;
    /// if let Some(sentiment) = response.sentiment {
    ///     println!("{} ({})", sentiment.label, sentiment.score);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn analyze(&self, req: &AnalyzeRequest) -> Result<AnalysisResponse> {
        self.http.request("POST", "/v1/analyze", Some(req)).await
    }
}

// ================== Request Types ==================

/// Text analysis request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    /// Text to analyze.
    pub text: String,

    /// Features to compute.
    #[serde(default)]
    pub features: Features,

    /// Language hint; detected from the text when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Analysis feature toggles.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Features {
    /// Document-level sentiment.
    #[serde(default)]
    pub sentiment: bool,
    /// Named entity extraction.
    #[serde(default)]
    pub entities: bool,
    /// Keyword extraction.
    #[serde(default)]
    pub keywords: bool,
}

// ================== Response Types ==================

/// Text analysis response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisResponse {
    /// Language detected or supplied.
    #[serde(default)]
    pub language: String,

    /// Document-level sentiment, when requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<DocumentSentiment>,

    /// Extracted entities, when requested.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entities: Vec<EntityMention>,

    /// Extracted keywords, when requested.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<Keyword>,
}

/// Document-level sentiment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentSentiment {
    /// Sentiment label: positive, negative, or neutral.
    #[serde(default)]
    pub label: String,

    /// Sentiment score in [-1, 1].
    #[serde(default)]
    pub score: f64,
}

/// A named entity mention.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityMention {
    /// Entity type, e.g. "Location".
    #[serde(rename = "type", default)]
    pub entity_type: String,

    /// Entity surface text.
    #[serde(default)]
    pub text: String,

    /// Relevance score in [0, 1].
    #[serde(default)]
    pub relevance: f64,

    /// Occurrence count.
    #[serde(default)]
    pub count: i32,
}

/// An extracted keyword.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Keyword {
    /// Keyword text.
    #[serde(default)]
    pub text: String,

    /// Relevance score in [0, 1].
    #[serde(default)]
    pub relevance: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_analysis_response() {
        let json = r#"{
            "language": "en",
            "sentiment": {"label": "positive", "score": 0.83},
            "entities": [{"type": "Location", "text": "Berlin", "relevance": 0.61, "count": 1}],
            "keywords": [{"text": "product", "relevance": 0.9}]
        }"#;

        let response: AnalysisResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.sentiment.as_ref().unwrap().label, "positive");
        assert_eq!(response.entities[0].entity_type, "Location");
        assert_eq!(response.keywords[0].text, "product");
    }

    #[test]
    fn test_request_serialization() {
        let req = AnalyzeRequest {
            text: "hi".to_string(),
            features: Features {
                sentiment: true,
                ..Default::default()
            },
            language: None,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["features"]["sentiment"], true);
        assert!(json.get("language").is_none());
    }
}
