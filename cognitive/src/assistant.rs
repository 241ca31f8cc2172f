//! Assistant (conversation) service for the Nimbus Cognition API.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{error::Result, http::HttpClient};

/// Assistant service provides dialog functionality against a workspace.
pub struct AssistantService {
    http: Arc<HttpClient>,
}

impl AssistantService {
    /// Creates a new Assistant service.
    pub(crate) fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    /// Sends a message turn to a workspace.
    ///
    /// The opaque `context` from the previous response must be passed back
    /// to continue a conversation.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use nimbus_cognitive::{Client, MessageRequest, MessageInput};
    ///
    /// # async fn example() -> nimbus_cognitive::Result<()> {
    /// let client = Client::new("api-key")?;
    /// let response = client.assistant().message("workspace-id", &MessageRequest {
    ///     input: MessageInput { text: "turn the lights on".to_string() },
    ///     ..Default::default()
    /// }).await?;
    /// for line in &response.output.text {
    ///     println!("{}", line);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn message(
        &self,
        workspace_id: &str,
        req: &MessageRequest,
    ) -> Result<MessageResponse> {
        let path = format!("/v1/workspaces/{}/message", workspace_id);
        self.http.request("POST", &path, Some(req)).await
    }

    /// Lists the workspaces available to the account.
    pub async fn list_workspaces(&self) -> Result<Vec<Workspace>> {
        let response: WorkspacesResponse = self
            .http
            .request::<(), _>("GET", "/v1/workspaces", None)
            .await?;
        Ok(response.workspaces)
    }

    /// Retrieves a single workspace by id.
    pub async fn get_workspace(&self, workspace_id: &str) -> Result<Workspace> {
        let path = format!("/v1/workspaces/{}", workspace_id);
        self.http.request::<(), _>("GET", &path, None).await
    }
}

// ================== Request Types ==================

/// Message turn request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageRequest {
    /// User input for this turn.
    pub input: MessageInput,

    /// Opaque dialog state from the previous response.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,

    /// Return all intent candidates instead of the top one.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub alternate_intents: bool,
}

/// User input of a message turn.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageInput {
    /// Input text.
    #[serde(default)]
    pub text: String,
}

// ================== Response Types ==================

/// Message turn response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Recognized intents, best first.
    #[serde(default)]
    pub intents: Vec<Intent>,

    /// Recognized entities.
    #[serde(default)]
    pub entities: Vec<DialogEntity>,

    /// Dialog output for this turn.
    #[serde(default)]
    pub output: MessageOutput,

    /// Opaque dialog state to pass into the next turn.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
}

/// A recognized intent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Intent {
    /// Intent name.
    #[serde(default)]
    pub intent: String,

    /// Confidence in [0, 1].
    #[serde(default)]
    pub confidence: f64,
}

/// A recognized dialog entity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DialogEntity {
    /// Entity name.
    #[serde(default)]
    pub entity: String,

    /// Matched value.
    #[serde(default)]
    pub value: String,

    /// Character span of the match in the input text.
    #[serde(default)]
    pub location: Vec<i32>,
}

/// Dialog output of a message turn.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageOutput {
    /// Response lines to show the user.
    #[serde(default)]
    pub text: Vec<String>,

    /// Dialog nodes visited while producing the response.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nodes_visited: Vec<String>,
}

/// A workspace descriptor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Workspace {
    /// Workspace id.
    #[serde(default)]
    pub workspace_id: String,

    /// Workspace name.
    #[serde(default)]
    pub name: String,

    /// Language of the workspace.
    #[serde(default)]
    pub language: String,

    /// Human-readable description.
    #[serde(default)]
    pub description: String,
}

/// Response wrapper for workspace listing.
#[derive(Debug, Deserialize)]
struct WorkspacesResponse {
    #[serde(default)]
    workspaces: Vec<Workspace>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_message_response() {
        let json = r#"{
            "intents": [{"intent": "turn_on", "confidence": 0.98}],
            "entities": [{"entity": "appliance", "value": "lights", "location": [9, 15]}],
            "output": {"text": ["Turning on the lights."]},
            "context": {"conversation_id": "abc", "turn": 2}
        }"#;

        let response: MessageResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.intents[0].intent, "turn_on");
        assert_eq!(response.entities[0].location, vec![9, 15]);
        assert_eq!(response.output.text[0], "Turning on the lights.");

        // Context round-trips opaquely into the next request.
        let next = MessageRequest {
            input: MessageInput {
                text: "thanks".to_string(),
            },
            context: response.context.clone(),
            ..Default::default()
        };
        let json = serde_json::to_value(&next).unwrap();
        assert_eq!(json["context"]["turn"], 2);
    }

    #[test]
    fn test_alternate_intents_omitted_when_false() {
        let req = MessageRequest::default();
        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("alternate_intents").is_none());
    }
}
