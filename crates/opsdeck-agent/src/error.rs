use thiserror::Error;

/// Errors from the chat-completions client and the agent loop.
#[derive(Debug, Error)]
pub enum AgentError {
    /// Required configuration (API key) is absent.
    #[error("agent not configured: {0}")]
    NotConfigured(String),

    /// The HTTP request could not be built or sent.
    #[error("chat request failed: {0}")]
    Http(String),

    /// The API answered with a non-success status.
    #[error("chat API error: {0}")]
    Api(String),

    /// The API answered 200 but the body did not match the expected shape.
    #[error("invalid chat response: {0}")]
    InvalidResponse(String),
}
