//! Chat completion wire types.

use super::ChatMessage;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<ChoiceResponse>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceResponse {
    pub message: ChoiceMessage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatCompletionResponse {
    /// Trimmed text of the first choice.
    pub fn first_text(&self) -> Option<String> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .map(|t| t.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_shape() {
        let req = ChatCompletionRequest {
            model: "m",
            messages: vec![ChatMessage::system("s"), ChatMessage::user("u")],
            temperature: 0.5,
            max_tokens: 10,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["model"], "m");
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["max_tokens"], 10);
    }

    #[test]
    fn test_first_text() {
        let resp: ChatCompletionResponse = serde_json::from_str(
            r#"{"id":"x","choices":[{"message":{"role":"assistant","content":"  hi  "}}]}"#,
        )
        .unwrap();
        assert_eq!(resp.first_text().as_deref(), Some("hi"));

        let empty: ChatCompletionResponse = serde_json::from_str("{}").unwrap();
        assert!(empty.first_text().is_none());
    }
}
