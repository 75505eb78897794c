//! Types for the Generative Language API.
//!
//! These mirror the `generateContent` JSON format, which uses camelCase
//! field names throughout.

use serde::{Deserialize, Serialize};

use nexus_core::chat::ChatMessage;

/// MIME type that switches the model into structured JSON output.
pub const JSON_MIME_TYPE: &str = "application/json";

/// A piece of message content. Only text parts are used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Part {
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }
}

/// One conversation turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    /// `"user"` or `"model"`; omitted for system instructions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Some("user".to_string()),
            parts: vec![Part::text(text)],
        }
    }

    /// Role-less content, as used for `systemInstruction`.
    #[must_use]
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: None,
            parts: vec![Part::text(text)],
        }
    }
}

impl From<&ChatMessage> for Content {
    fn from(message: &ChatMessage) -> Self {
        Self {
            role: Some(message.role.as_str().to_string()),
            parts: vec![Part::text(message.text.clone())],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
}

/// Request body for `models/{model}:generateContent`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    /// A single user prompt.
    #[must_use]
    pub fn prompt(text: impl Into<String>) -> Self {
        Self {
            contents: vec![Content::user(text)],
            system_instruction: None,
            generation_config: None,
        }
    }

    /// A multi-turn conversation under a system instruction.
    #[must_use]
    pub fn conversation(transcript: &[ChatMessage], system: impl Into<String>) -> Self {
        Self {
            contents: transcript.iter().map(Content::from).collect(),
            system_instruction: Some(Content::system(system)),
            generation_config: None,
        }
    }

    /// Ask for a JSON response body.
    #[must_use]
    pub fn json_response(mut self) -> Self {
        self.generation_config = Some(GenerationConfig {
            response_mime_type: Some(JSON_MIME_TYPE.to_string()),
        });
        self
    }
}

/// Response from `generateContent`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub usage_metadata: Option<UsageMetadata>,
}

impl GenerateContentResponse {
    /// Why the first candidate stopped, e.g. `STOP` or `SAFETY`.
    #[must_use]
    pub fn finish_reason(&self) -> Option<&str> {
        self.candidates
            .first()
            .and_then(|c| c.finish_reason.as_deref())
    }

    /// Concatenated text parts of the first candidate. Empty when the model
    /// returned no text.
    #[must_use]
    pub fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<Content>,
    pub finish_reason: Option<String>,
}

/// Token usage information.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    pub prompt_token_count: Option<u32>,
    pub candidates_token_count: Option<u32>,
    pub total_token_count: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use nexus_core::chat::Conversation;
    use nexus_core::types::ChatRole;

    #[test]
    fn test_prompt_request_shape() {
        let request = GenerateContentRequest::prompt("find chairs").json_response();
        let json = serde_json::to_value(&request).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({
                "contents": [{"role": "user", "parts": [{"text": "find chairs"}]}],
                "generationConfig": {"responseMimeType": "application/json"}
            })
        );
    }

    #[test]
    fn test_conversation_request_shape() {
        let mut conversation = Conversation::new();
        let transcript = conversation.push_user("hello").expect("send");
        let request = GenerateContentRequest::conversation(&transcript, "be nice");
        let json = serde_json::to_value(&request).expect("serialize");

        assert_eq!(json["systemInstruction"], serde_json::json!({"parts": [{"text": "be nice"}]}));
        assert_eq!(json["contents"][0]["role"], "model");
        assert_eq!(json["contents"][1]["role"], "user");
        assert_eq!(json["contents"][1]["parts"][0]["text"], "hello");
        assert!(json.get("generationConfig").is_none());
    }

    #[test]
    fn test_content_from_chat_message() {
        let message = ChatMessage::new(ChatRole::User, "bulk pricing?");
        let content = Content::from(&message);
        assert_eq!(content.role.as_deref(), Some("user"));
        assert_eq!(content.parts, vec![Part::text("bulk pricing?")]);
    }

    #[test]
    fn test_response_text_concatenates_parts() {
        let json = r#"{
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "[\"1\", "}, {"text": "\"4\"]"}]},
                "finishReason": "STOP"
            }],
            "usageMetadata": {"promptTokenCount": 120, "candidatesTokenCount": 8, "totalTokenCount": 128}
        }"#;
        let response: GenerateContentResponse = serde_json::from_str(json).expect("deserialize");
        assert_eq!(response.text(), r#"["1", "4"]"#);
        assert_eq!(response.finish_reason(), Some("STOP"));
        assert_eq!(
            response.usage_metadata.and_then(|u| u.total_token_count),
            Some(128)
        );
    }

    #[test]
    fn test_response_without_candidates_is_empty() {
        let response: GenerateContentResponse =
            serde_json::from_str(r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#)
                .expect("deserialize");
        assert_eq!(response.text(), "");
        assert_eq!(response.finish_reason(), None);
    }
}
