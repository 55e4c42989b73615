//! Chat assistant — OpenRouter chat completions about coins and charts.
//!
//! The assistant never surfaces a transport error to the chat window: when the
//! completion request fails, or the model stops mid-thought, [`Assistant::ask`]
//! answers from a small keyword table instead.
//!
//! [`Assistant::ask`]: client::Assistant::ask

#[cfg(feature = "http")]
pub mod client;
pub mod fallback;
pub mod prompt;
pub mod wire;

use crate::error::AssistantError;
use crate::network;
use serde::{Deserialize, Serialize};

pub use fallback::fallback_response;
pub use prompt::{ChartSummary, SeriesSample};

/// Required prefix of an OpenRouter API key.
pub const API_KEY_PREFIX: &str = "sk-or-v1-";

pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 2000;

/// Who wrote a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Chat completion settings.
#[derive(Debug, Clone)]
pub struct AssistantConfig {
    pub api_url: String,
    pub api_key: String,
    pub model: String,
    /// Sent as `HTTP-Referer`.
    pub site_url: String,
    /// Sent as `X-Title` and named in the system prompt.
    pub site_name: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl AssistantConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_url: network::DEFAULT_CHAT_URL.to_string(),
            api_key: api_key.into(),
            model: network::DEFAULT_CHAT_MODEL.to_string(),
            site_url: network::DEFAULT_SITE_URL.to_string(),
            site_name: network::DEFAULT_SITE_NAME.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    /// Read `CRYPTOSAGE_AI_API_KEY`, plus the optional `CRYPTOSAGE_SITE_URL`
    /// and `CRYPTOSAGE_SITE_NAME`.
    pub fn from_env() -> Result<Self, AssistantError> {
        let key = std::env::var("CRYPTOSAGE_AI_API_KEY")
            .map_err(|_| AssistantError::MissingApiKey)?;
        let mut config = Self::new(key);
        if let Ok(url) = std::env::var("CRYPTOSAGE_SITE_URL") {
            config.site_url = url;
        }
        if let Ok(name) = std::env::var("CRYPTOSAGE_SITE_NAME") {
            config.site_name = name;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn validate(&self) -> Result<(), AssistantError> {
        let key = self.api_key.trim();
        if key.is_empty() {
            return Err(AssistantError::MissingApiKey);
        }
        if !key.starts_with(API_KEY_PREFIX) {
            return Err(AssistantError::InvalidApiKey(API_KEY_PREFIX));
        }
        Ok(())
    }

    /// The key with everything but the last four characters masked, for logs.
    pub fn masked_key(&self) -> String {
        let chars: Vec<char> = self.api_key.chars().collect();
        if chars.len() <= 4 {
            return "***".to_string();
        }
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("***{}", tail)
    }

    pub(crate) fn system_prompt(&self) -> String {
        format!(
            "You are a helpful AI assistant for {}, a cryptocurrency platform. \
             Provide accurate, informative, and concise responses about cryptocurrencies, trading, and related topics. \
             Always maintain a professional and educational tone. \
             IMPORTANT: Always provide complete responses. Never cut off mid-sentence or leave responses incomplete. \
             If you're providing a list or steps, make sure to complete all items in the list. \
             When analyzing charts, be specific about patterns, support/resistance levels, and provide actionable insights.",
            self.site_name
        )
    }
}

/// Whether a reply looks like the model stopped mid-thought.
pub fn is_incomplete_reply(text: &str) -> bool {
    let text = text.trim_end();
    ["...", "---", ":", ","].iter().any(|end| text.ends_with(end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key() {
        assert!(AssistantConfig::new("sk-or-v1-abc").validate().is_ok());
        assert!(matches!(
            AssistantConfig::new("  ").validate(),
            Err(AssistantError::MissingApiKey)
        ));
        assert!(matches!(
            AssistantConfig::new("sk-live-abc").validate(),
            Err(AssistantError::InvalidApiKey(_))
        ));
    }

    #[test]
    fn test_masked_key() {
        assert_eq!(AssistantConfig::new("sk-or-v1-abcd1234").masked_key(), "***1234");
        assert_eq!(AssistantConfig::new("ab").masked_key(), "***");
    }

    #[test]
    fn test_defaults() {
        let config = AssistantConfig::new("sk-or-v1-x");
        assert_eq!(config.model, "deepseek/deepseek-r1:free");
        assert_eq!(config.max_tokens, 2000);
        assert!(config.system_prompt().contains("CryptoSage"));
    }

    #[test]
    fn test_incomplete_reply_detection() {
        assert!(is_incomplete_reply("The key levels are:"));
        assert!(is_incomplete_reply("First, second,"));
        assert!(is_incomplete_reply("And then..."));
        assert!(is_incomplete_reply("Summary\n---\n"));
        assert!(!is_incomplete_reply("Bitcoin is up 3% today."));
    }

    #[test]
    fn test_role_serde() {
        let json = serde_json::to_string(&ChatMessage::user("hi")).unwrap();
        assert_eq!(json, r#"{"role":"user","content":"hi"}"#);
    }
}
