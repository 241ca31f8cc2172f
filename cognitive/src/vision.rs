//! Visual Recognition service for the Nimbus Cognition API.

use std::sync::Arc;

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use serde::{Deserialize, Serialize};

use crate::{error::Result, http::HttpClient};

/// Visual Recognition service provides image classification functionality.
pub struct VisionService {
    http: Arc<HttpClient>,
}

impl VisionService {
    /// Creates a new Visual Recognition service.
    pub(crate) fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    /// Classifies an image against the default or named classifiers.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use nimbus_cognitive::{Client, ClassifyRequest};
    ///
    /// # async fn example() -> nimbus_cognitive::Result<()> {
    /// let client = Client::new("api-key")?;
    /// let image = std::fs::read("fruit.jpg")?;
    /// let response = client.vision().classify(&ClassifyRequest {
    ///     image: Some(image),
    ///     ..Default::default()
    /// }).await?;
    /// for class in &response.classifiers[0].classes {
    ///     println!("{} {:.2}", class.class, class.score);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn classify(&self, req: &ClassifyRequest) -> Result<ClassifyResponse> {
        let payload = self.build_payload(req)?;
        self.http.request("POST", "/v1/classify", Some(&payload)).await
    }

    /// Detects faces in an image.
    pub async fn detect_faces(&self, req: &DetectFacesRequest) -> Result<DetectFacesResponse> {
        let payload = ImagePayload {
            image: req.image.as_deref().map(|b| BASE64.encode(b)),
            url: req.url.clone(),
            classifier_ids: Vec::new(),
            threshold: None,
        };
        self.http
            .request("POST", "/v1/detect_faces", Some(&payload))
            .await
    }

    /// Builds the classify payload, embedding image bytes as base64.
    fn build_payload(&self, req: &ClassifyRequest) -> Result<ImagePayload> {
        Ok(ImagePayload {
            image: req.image.as_deref().map(|b| BASE64.encode(b)),
            url: req.url.clone(),
            classifier_ids: req.classifier_ids.clone(),
            threshold: req.threshold,
        })
    }
}

// ================== Request Types ==================

/// Image classification request.
#[derive(Debug, Clone, Default)]
pub struct ClassifyRequest {
    /// Image bytes (alternative to url).
    pub image: Option<Vec<u8>>,
    /// Image URL (alternative to bytes).
    pub url: Option<String>,
    /// Classifier ids to run; empty runs the default classifier.
    pub classifier_ids: Vec<String>,
    /// Minimum score to report.
    pub threshold: Option<f64>,
}

/// Face detection request.
#[derive(Debug, Clone, Default)]
pub struct DetectFacesRequest {
    /// Image bytes (alternative to url).
    pub image: Option<Vec<u8>>,
    /// Image URL (alternative to bytes).
    pub url: Option<String>,
}

/// JSON body for the image endpoints.
#[derive(Debug, Serialize)]
struct ImagePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    classifier_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    threshold: Option<f64>,
}

// ================== Response Types ==================

/// Image classification response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassifyResponse {
    /// Results per classifier.
    #[serde(default)]
    pub classifiers: Vec<ClassifierResult>,
}

/// Results of one classifier.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassifierResult {
    /// Classifier id.
    #[serde(default)]
    pub classifier_id: String,

    /// Classifier name.
    #[serde(default)]
    pub name: String,

    /// Detected classes, best first.
    #[serde(default)]
    pub classes: Vec<ClassResult>,
}

/// A detected class.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassResult {
    /// Class label.
    #[serde(default)]
    pub class: String,

    /// Score in [0, 1].
    #[serde(default)]
    pub score: f64,

    /// Knowledge-graph hierarchy of the label, when available.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub type_hierarchy: String,
}

/// Face detection response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DetectFacesResponse {
    /// Detected faces.
    #[serde(default)]
    pub faces: Vec<Face>,
}

/// A detected face.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Face {
    /// Bounding box of the face.
    #[serde(default)]
    pub face_location: FaceLocation,

    /// Estimated age range.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<AgeRange>,

    /// Estimated gender.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<FaceGender>,
}

/// Bounding box of a detected face.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FaceLocation {
    #[serde(default)]
    pub left: i32,
    #[serde(default)]
    pub top: i32,
    #[serde(default)]
    pub width: i32,
    #[serde(default)]
    pub height: i32,
}

/// Estimated age range of a face.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgeRange {
    #[serde(default)]
    pub min: i32,
    #[serde(default)]
    pub max: i32,
    #[serde(default)]
    pub score: f64,
}

/// Estimated gender of a face.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FaceGender {
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_classify_response() {
        let json = r#"{
            "classifiers": [{
                "classifier_id": "default",
                "name": "default",
                "classes": [
                    {"class": "banana", "score": 0.93, "type_hierarchy": "/fruit/banana"},
                    {"class": "fruit", "score": 0.79}
                ]
            }]
        }"#;

        let response: ClassifyResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.classifiers[0].classes[0].class, "banana");
        assert_eq!(response.classifiers[0].classes[1].type_hierarchy, "");
    }

    #[test]
    fn test_payload_embeds_base64_image() {
        let payload = ImagePayload {
            image: Some(BASE64.encode(b"fake image")),
            url: None,
            classifier_ids: Vec::new(),
            threshold: None,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["image"], BASE64.encode(b"fake image"));
        assert!(json.get("classifier_ids").is_none());
    }
}
