use crate::config::ExtractionConfig;
use serde::Serialize;

const EXTRACTION_INSTRUCTIONS: &str = r#"Extract the following information from the input text and return it in JSON format:
{
  "customer_name": "",
  "company_name": "",
  "company_address": "",
  "products": [
    {
      "part_name": "",
      "part_id": "",
      "quantity": ""
    }
  ],
  "competitor_name": "",
  "discount_mentioned": false
}

Guidelines:
- Create a new product object in the products array for each product/part mentioned
- Fill in all fields that can be found in the text
- Leave fields empty ("") if information is not present
- For quantity, include units if specified
- Set discount_mentioned to true if any discount is mentioned in the text
- Ensure exact matches for part IDs
- Part ID contains only numbers
- If there is a space in part ID or Part name, remove all the space.
- Return only the JSON object, no additional text like json"#;

/// System prompt describing the JSON shape the extraction model must return.
pub fn extraction_instructions() -> &'static str {
    EXTRACTION_INSTRUCTIONS
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

/// Chat-completion request body for one analysis, serialized as-is onto the wire.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionRequest {
    #[serde(skip)]
    pub deployment: String,
    #[serde(skip)]
    pub api_version: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
    pub frequency_penalty: f32,
    pub presence_penalty: f32,
    pub top_p: f32,
}

impl ExtractionRequest {
    pub fn new(text: &str, config: &ExtractionConfig) -> Self {
        Self {
            deployment: config.deployment.clone(),
            api_version: config.api_version.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: EXTRACTION_INSTRUCTIONS.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: text.to_string(),
                },
            ],
            max_tokens: 800,
            temperature: 0.3,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
            top_p: 0.95,
        }
    }

    /// Path of the chat-completions call relative to the service endpoint.
    pub fn path(&self) -> String {
        format!(
            "/openai/deployments/{}/chat/completions?api-version={}",
            self.deployment, self.api_version
        )
    }

    pub fn user_text(&self) -> &str {
        self.messages
            .iter()
            .find(|message| message.role == "user")
            .map(|message| message.content.as_str())
            .unwrap_or_default()
    }
}

/// Outbound hook to the language model that turns free text into product JSON.
pub trait MentionExtractor: Send + Sync {
    /// Returns the model's raw answer text.
    fn extract(&self, request: &ExtractionRequest) -> Result<String, ExtractionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("extraction service unavailable: {0}")]
    Transport(String),
    #[error("extraction service returned no choices")]
    EmptyResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ExtractionConfig {
        ExtractionConfig {
            deployment: "gpt-4o-mini-s".to_string(),
            api_version: "2024-02-01".to_string(),
        }
    }

    #[test]
    fn request_carries_instructions_and_user_text() {
        let request = ExtractionRequest::new("Need 3 of part 100", &config());

        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, "system");
        assert!(request.messages[0].content.contains("\"part_id\""));
        assert_eq!(request.user_text(), "Need 3 of part 100");
        assert_eq!(
            request.path(),
            "/openai/deployments/gpt-4o-mini-s/chat/completions?api-version=2024-02-01"
        );
    }

    #[test]
    fn request_body_omits_routing_fields() {
        let request = ExtractionRequest::new("hello", &config());
        let body = serde_json::to_value(&request).expect("serializes");

        assert!(body.get("deployment").is_none());
        assert_eq!(body["max_tokens"], 800);
        assert_eq!(body["messages"][1]["content"], "hello");
    }
}
