//! The conversational co-pilot agent.
//!
//! A reactive tool-using loop over a Groq-compatible chat-completions API:
//! given the running per-session history plus a new user transcript, the
//! agent repeatedly asks the model for either a final reply or tool calls,
//! executes the calls through the tool layer, and feeds the results back —
//! until the model answers in plain language.
//!
//! Conversation memory is keyed by session id: created when a voice
//! session connects, dropped when it disconnects. A single tool failure is
//! converted into an apology string returned *as the tool result*; the
//! loop never aborts mid-conversation because of one bad call.

mod agent;
mod client;
mod error;
mod message;
mod session;

pub use agent::{CopilotAgent, TurnReply, SYSTEM_PROMPT};
pub use client::{AgentConfig, ChatClient, ChatOutcome};
pub use error::AgentError;
pub use message::{ChatMessage, ChatRole, ToolCall, ToolCallFunction};
pub use session::ConversationStore;
