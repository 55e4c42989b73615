//! Assistant sub-client — chat replies and chart analysis.

use super::fallback::{analysis_unavailable, fallback_response};
use super::prompt::{analysis_prompt, ChartSummary};
use super::wire::{ChatCompletionRequest, ChatCompletionResponse};
use super::{is_incomplete_reply, AssistantConfig, ChatMessage};
use crate::client::CryptoClient;
use crate::error::AssistantError;
use crate::http::RetryPolicy;

/// Sub-client for the chat assistant.
///
/// Requires an [`AssistantConfig`] on the client; without one every call
/// answers from the fallback table.
pub struct Assistant<'a> {
    pub(crate) client: &'a CryptoClient,
}

impl<'a> Assistant<'a> {
    /// Reply to `message` given the prior conversation.
    ///
    /// Never fails: transport errors and truncated replies fall back to a
    /// keyword-matched canned answer.
    pub async fn ask(&self, message: &str, history: &[ChatMessage]) -> String {
        match self.complete(message, history).await {
            Ok(reply) if is_incomplete_reply(&reply) => {
                tracing::warn!("Assistant reply looks truncated, using fallback");
                fallback_response(message).to_string()
            }
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!(error = %e, "Assistant request failed, using fallback");
                fallback_response(message).to_string()
            }
        }
    }

    /// Ask the model to analyze a chart for `coin` over `timeframe`.
    pub async fn analyze_chart(
        &self,
        summary: &ChartSummary,
        coin: &str,
        timeframe: &str,
    ) -> String {
        let prompt = analysis_prompt(summary, coin, timeframe);
        match self.complete(&prompt, &[]).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!(coin, error = %e, "Chart analysis failed");
                analysis_unavailable(coin)
            }
        }
    }

    /// One completion round-trip, without any fallback.
    pub async fn complete(
        &self,
        message: &str,
        history: &[ChatMessage],
    ) -> Result<String, AssistantError> {
        let config = self.config()?;
        config.validate()?;

        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(ChatMessage::system(config.system_prompt()));
        messages.extend(history.iter().cloned());
        messages.push(ChatMessage::user(message));

        let body = ChatCompletionRequest {
            model: &config.model,
            messages,
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        };
        let headers = [
            ("Authorization", format!("Bearer {}", config.api_key)),
            ("HTTP-Referer", config.site_url.clone()),
            ("X-Title", config.site_name.clone()),
        ];

        tracing::debug!(
            model = %config.model,
            key = %config.masked_key(),
            turns = history.len(),
            "Sending chat completion"
        );
        let resp: ChatCompletionResponse = self
            .client
            .http
            .post(&config.api_url, &body, &headers, RetryPolicy::None)
            .await?;

        resp.first_text().ok_or(AssistantError::EmptyCompletion)
    }

    fn config(&self) -> Result<&AssistantConfig, AssistantError> {
        self.client
            .assistant_config
            .as_ref()
            .ok_or(AssistantError::MissingApiKey)
    }
}
