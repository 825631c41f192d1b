//! Groq-compatible chat-completions client with tool calling.

use crate::error::AgentError;
use crate::message::{ChatMessage, ToolCall};
use opsdeck_tools::ToolDefinition;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Default API base (OpenAI-compatible).
pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Default reasoning model.
pub const DEFAULT_MODEL: &str = "meta-llama/llama-4-scout-17b-16e-instruct";

const DEFAULT_MAX_TOKENS: u32 = 1024;
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Configuration for the chat client.
#[derive(Clone)]
pub struct AgentConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    /// Hard deadline for one completion request; a hung upstream cannot
    /// pin a session past this.
    pub timeout: Duration,
}

impl AgentConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl fmt::Debug for AgentConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgentConfig")
            .field("api_key", &mask_api_key(&self.api_key))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Masks an API key for safe display.
fn mask_api_key(key: &str) -> String {
    if key.len() <= 8 {
        return "****".to_string();
    }
    format!("{}...{}", &key[..4], &key[key.len() - 4..])
}

/// Strips key material and upstream noise from API error text before it
/// reaches logs.
fn sanitize_api_error(error: &str) -> String {
    let lower = error.to_lowercase();
    if lower.contains("api key") || lower.contains("unauthorized") || lower.contains("authentication")
    {
        return "API authentication error; check the configured API key.".to_string();
    }
    if lower.contains("rate limit") || lower.contains("quota") {
        return "API rate limit exceeded; retry later.".to_string();
    }
    if error.len() < 200 && !error.contains("gsk_") {
        return error.to_string();
    }
    "Upstream API error.".to_string()
}

/// What one completion round produced: a plain reply, tool calls, or both.
#[derive(Debug, Clone)]
pub struct ChatOutcome {
    pub content: Option<String>,
    pub tool_calls: Vec<ToolCall>,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<RequestTool<'a>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_choice: Option<&'a str>,
}

#[derive(Serialize)]
struct RequestTool<'a> {
    #[serde(rename = "type")]
    tool_type: &'a str,
    function: &'a ToolDefinition,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
    tool_calls: Option<Vec<ToolCall>>,
}

/// The chat-completions client.
pub struct ChatClient {
    client: reqwest::Client,
    config: AgentConfig,
}

impl fmt::Debug for ChatClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatClient").field("config", &self.config).finish()
    }
}

impl ChatClient {
    pub fn new(config: AgentConfig) -> Result<Self, AgentError> {
        if config.api_key.is_empty() {
            return Err(AgentError::NotConfigured("API key is empty".to_string()));
        }
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AgentError::Http(e.to_string()))?;
        Ok(Self { client, config })
    }

    /// Asks the model for the next step given the conversation so far.
    pub async fn complete(
        &self,
        messages: &[ChatMessage],
        tools: &[ToolDefinition],
    ) -> Result<ChatOutcome, AgentError> {
        let request = ChatRequest {
            model: &self.config.model,
            messages,
            max_tokens: self.config.max_tokens,
            tools: if tools.is_empty() {
                None
            } else {
                Some(
                    tools
                        .iter()
                        .map(|t| RequestTool { tool_type: "function", function: t })
                        .collect(),
                )
            },
            tool_choice: if tools.is_empty() { None } else { Some("auto") },
        };

        tracing::debug!(
            model = %self.config.model,
            messages = messages.len(),
            tools = tools.len(),
            "requesting chat completion"
        );

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.base_url))
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AgentError::Http(sanitize_api_error(&e.to_string())))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AgentError::Api(format!(
                "{}: {}",
                status,
                sanitize_api_error(&body)
            )));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| AgentError::InvalidResponse(e.to_string()))?;

        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AgentError::InvalidResponse("no choices in response".to_string()))?;

        Ok(ChatOutcome {
            content: choice.message.content,
            tool_calls: choice.message.tool_calls.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_debug_masks_api_key() {
        let config = AgentConfig::new("gsk_1234567890abcdefghij");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("1234567890abcdef"));
        assert!(debug.contains("gsk_"), "prefix survives masking: {}", debug);
    }

    #[test]
    fn empty_api_key_is_rejected() {
        let err = ChatClient::new(AgentConfig::new("")).expect_err("must fail");
        assert!(matches!(err, AgentError::NotConfigured(_)));
    }

    #[test]
    fn sanitize_strips_auth_details() {
        let sanitized = sanitize_api_error("Invalid API key: gsk_secret123");
        assert!(!sanitized.contains("gsk_"));
    }

    #[test]
    fn request_serializes_tools_with_function_wrapper() {
        let definition = ToolDefinition {
            name: "navigate_to_page".to_string(),
            description: "Navigates.".to_string(),
            parameters: serde_json::json!({"type": "object"}),
        };
        let messages = [ChatMessage::user("go to crm")];
        let request = ChatRequest {
            model: "test-model",
            messages: &messages,
            max_tokens: 64,
            tools: Some(vec![RequestTool { tool_type: "function", function: &definition }]),
            tool_choice: Some("auto"),
        };

        let json = serde_json::to_value(&request).expect("serialize");
        assert_eq!(json["tools"][0]["type"], "function");
        assert_eq!(json["tools"][0]["function"]["name"], "navigate_to_page");
        assert_eq!(json["tool_choice"], "auto");
    }

    #[test]
    fn response_parses_tool_calls() {
        let raw = r#"{
            "choices": [{
                "message": {
                    "content": null,
                    "tool_calls": [{
                        "id": "call_1",
                        "type": "function",
                        "function": {"name": "search_customers", "arguments": "{\"query\": \"acme\"}"}
                    }]
                }
            }]
        }"#;
        let parsed: ChatResponse = serde_json::from_str(raw).expect("parse");
        let message = &parsed.choices[0].message;
        assert!(message.content.is_none());
        let calls = message.tool_calls.as_ref().expect("tool calls present");
        assert_eq!(calls[0].function.name, "search_customers");
    }
}
