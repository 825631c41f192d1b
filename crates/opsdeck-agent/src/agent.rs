//! The tool-using agent loop.

use crate::client::ChatClient;
use crate::error::AgentError;
use crate::message::ChatMessage;
use crate::session::ConversationStore;
use opsdeck_tools::{tool_catalog, ToolCommand, ToolDefinition, ToolExecutor};

/// Upper bound on model round-trips within one turn. A conversation that
/// keeps requesting tools past this gets a fixed reply instead of looping.
const MAX_TOOL_ROUNDS: usize = 8;

/// Reply used when the model answers with neither text nor tool calls.
const EMPTY_REPLY_FALLBACK: &str = "How can I help you?";

/// Reply used when the tool-round budget runs out.
const ROUNDS_EXHAUSTED_REPLY: &str =
    "Sorry, I got stuck on that request. Could you rephrase it?";

/// Operating rules for the co-pilot. The confirmation contract for
/// destructive operations lives here, at the conversation level — the tool
/// layer executes mechanically.
pub const SYSTEM_PROMPT: &str = "\
You are the Opsdeck voice co-pilot. You help users run their ERP system by \
translating spoken commands into tool calls.

Rules:
1. Act only on explicit commands. For greetings or small talk, answer \
'How can I help you?' and call no tools.
2. Navigate first: before any operation, call navigate_to_page for the \
relevant module (customers: crm, products: inventory, orders: orders, \
employees: hr, invoices: finance).
3. Collect data conversationally. Ask for required fields one at a time and \
mirror each answer into the form with fill_form_field. Ask about optional \
fields before saving.
4. Search before update or delete. Users give names, tools need ids: call \
the matching search tool first. One match: state it and ask for \
confirmation. Several matches: list them and ask which one. No match: say \
so and ask the user to spell the name.
5. Confirm before writing. Every create, update and delete needs an \
explicit yes from the user first; for deletes ask 'Are you sure you want \
to delete ...?'.
6. Speak for synthesis: short sentences, no formatting, no code. If the \
transcript is garbled or not English, ask the user to repeat themselves.";

/// The outcome of one voice turn.
#[derive(Debug, Clone)]
pub struct TurnReply {
    /// Natural-language reply to synthesize.
    pub text: String,
    /// True when a `navigate` UI instruction was actually emitted during
    /// this turn. Drives the deferred navigation signal.
    pub navigated: bool,
}

/// The LLM-backed co-pilot: chat client + tool executor + per-session
/// memory.
pub struct CopilotAgent {
    client: ChatClient,
    executor: ToolExecutor,
    conversations: ConversationStore,
    catalog: Vec<ToolDefinition>,
}

impl CopilotAgent {
    pub fn new(client: ChatClient, executor: ToolExecutor) -> Self {
        Self {
            client,
            executor,
            conversations: ConversationStore::new(),
            catalog: tool_catalog(),
        }
    }

    /// Creates conversation memory for a new realtime session.
    pub fn begin_session(&self, session_id: &str) {
        self.conversations.create(session_id, SYSTEM_PROMPT);
        tracing::info!(session_id = %session_id, "conversation session started");
    }

    /// Drops a session's conversation memory.
    pub fn end_session(&self, session_id: &str) {
        self.conversations.remove(session_id);
        tracing::info!(session_id = %session_id, "conversation session ended");
    }

    pub fn has_session(&self, session_id: &str) -> bool {
        self.conversations.contains(session_id)
    }

    /// Number of live conversation sessions.
    pub fn session_count(&self) -> usize {
        self.conversations.session_count()
    }

    /// Runs one turn: transcript in, reply plus navigation effect out.
    ///
    /// Tool parse failures and tool-level errors are folded into the
    /// conversation as result strings; only a failure of the completion
    /// call itself surfaces as an error (the caller speaks an apology).
    pub async fn run_turn(
        &self,
        session_id: &str,
        transcript: &str,
    ) -> Result<TurnReply, AgentError> {
        let mut messages = self
            .conversations
            .snapshot(session_id)
            .unwrap_or_else(|| vec![ChatMessage::system(SYSTEM_PROMPT)]);
        messages.push(ChatMessage::user(transcript));

        let mut navigated = false;

        for round in 0..MAX_TOOL_ROUNDS {
            let outcome = self.client.complete(&messages, &self.catalog).await?;

            if outcome.tool_calls.is_empty() {
                let text = outcome
                    .content
                    .filter(|c| !c.trim().is_empty())
                    .unwrap_or_else(|| EMPTY_REPLY_FALLBACK.to_string());
                messages.push(ChatMessage::assistant(text.clone()));
                self.conversations.replace(session_id, messages);
                return Ok(TurnReply { text, navigated });
            }

            tracing::debug!(
                session_id = %session_id,
                round,
                calls = outcome.tool_calls.len(),
                "model requested tool calls"
            );

            messages.push(ChatMessage::assistant_tool_calls(
                outcome.content.unwrap_or_default(),
                outcome.tool_calls.clone(),
            ));

            for call in outcome.tool_calls {
                let result = match ToolCommand::parse(&call.function.name, &call.function.arguments)
                {
                    Ok(command) => {
                        let output = self.executor.execute(command);
                        navigated |= output.navigated;
                        output.message
                    }
                    Err(e) => {
                        tracing::warn!(
                            session_id = %session_id,
                            tool = %call.function.name,
                            "rejected tool call: {}",
                            e
                        );
                        format!("Sorry, that action could not be run: {}", e)
                    }
                };
                messages.push(ChatMessage::tool_response(call.id, result));
            }
        }

        tracing::warn!(session_id = %session_id, "tool-round budget exhausted");
        messages.push(ChatMessage::assistant(ROUNDS_EXHAUSTED_REPLY));
        self.conversations.replace(session_id, messages);
        Ok(TurnReply {
            text: ROUNDS_EXHAUSTED_REPLY.to_string(),
            navigated,
        })
    }
}
