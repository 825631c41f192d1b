use thiserror::Error;

/// Errors from mapping a model tool call onto an executable command.
///
/// Both variants mean the command never ran — parse failures have no side
/// effects. The agent loop converts them into failure strings returned as
/// the tool result so the conversation continues.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The model named a tool outside the catalog.
    #[error("unknown tool: {0}")]
    UnknownTool(String),

    /// The tool exists but its arguments did not match the schema
    /// (missing required field, wrong type, invalid enum value).
    #[error("invalid arguments for {tool}: {reason}")]
    InvalidArguments { tool: String, reason: String },
}
