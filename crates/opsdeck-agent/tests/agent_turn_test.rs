//! Agent-loop behavior against a mock chat-completions upstream.
//!
//! The mock speaks just enough of the OpenAI-compatible protocol to drive
//! the loop: a user message that mentions inventory triggers a
//! navigate_to_page tool call, a history that already contains a tool
//! result gets a final reply, anything else gets plain text.

use axum::{http::StatusCode, response::Json, routing::post, Router};
use opsdeck_agent::{AgentConfig, ChatClient, CopilotAgent};
use opsdeck_store::EntityStore;
use opsdeck_tools::ToolExecutor;
use opsdeck_types::{TargetApp, UiInstruction};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::broadcast;

async fn mock_completions(Json(body): Json<Value>) -> Result<Json<Value>, StatusCode> {
    let messages = body["messages"].as_array().ok_or(StatusCode::BAD_REQUEST)?;

    let last_user = messages
        .iter()
        .rev()
        .find(|m| m["role"] == "user")
        .and_then(|m| m["content"].as_str())
        .unwrap_or("");

    if last_user.contains("explode") {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }

    let has_tool_result = messages.iter().any(|m| m["role"] == "tool");

    let message = if has_tool_result {
        json!({
            "content": "Okay, I have navigated to the inventory page.",
            "tool_calls": null
        })
    } else if last_user.contains("inventory") {
        json!({
            "content": null,
            "tool_calls": [{
                "id": "call_nav_1",
                "type": "function",
                "function": {
                    "name": "navigate_to_page",
                    "arguments": "{\"target_app\": \"inventory\"}"
                }
            }]
        })
    } else {
        json!({ "content": "How can I help you?", "tool_calls": null })
    };

    Ok(Json(json!({ "choices": [{ "message": message }] })))
}

struct Harness {
    agent: CopilotAgent,
    ui_rx: broadcast::Receiver<UiInstruction>,
}

async fn harness() -> Harness {
    let app = Router::new().route("/chat/completions", post(mock_completions));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind mock upstream");
    let addr: SocketAddr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock upstream failed");
    });

    let mut config = AgentConfig::new("test-key");
    config.base_url = format!("http://{}", addr);
    let client = ChatClient::new(config).expect("client builds");

    let (data_tx, _data_rx) = broadcast::channel(64);
    let (ui_tx, ui_rx) = broadcast::channel(64);
    let store = Arc::new(EntityStore::new(data_tx));
    let executor = ToolExecutor::new(store, ui_tx);

    Harness {
        agent: CopilotAgent::new(client, executor),
        ui_rx,
    }
}

#[tokio::test]
async fn plain_turn_returns_reply_without_navigation() {
    let mut h = harness().await;
    h.agent.begin_session("s1");

    let reply = h
        .agent
        .run_turn("s1", "hello there")
        .await
        .expect("turn should succeed");

    assert_eq!(reply.text, "How can I help you?");
    assert!(!reply.navigated);
    assert!(
        matches!(h.ui_rx.try_recv(), Err(broadcast::error::TryRecvError::Empty)),
        "no UI instruction for a conversational turn"
    );
}

#[tokio::test]
async fn tool_turn_executes_navigation_and_reports_the_effect() {
    let mut h = harness().await;
    h.agent.begin_session("s1");

    let reply = h
        .agent
        .run_turn("s1", "navigate to inventory")
        .await
        .expect("turn should succeed");

    assert!(reply.navigated, "the emitted navigate must be reported");
    assert_eq!(reply.text, "Okay, I have navigated to the inventory page.");

    let instruction = h.ui_rx.recv().await.expect("navigate instruction expected");
    assert!(matches!(
        instruction,
        UiInstruction::Navigate { target_app: TargetApp::Inventory, .. }
    ));
}

#[tokio::test]
async fn memory_persists_across_turns_and_dies_with_the_session() {
    let h = harness().await;
    h.agent.begin_session("s1");
    assert!(h.agent.has_session("s1"));

    h.agent.run_turn("s1", "hello").await.expect("first turn");
    h.agent.run_turn("s1", "hello again").await.expect("second turn");

    h.agent.end_session("s1");
    assert!(!h.agent.has_session("s1"));
}

#[tokio::test]
async fn turn_without_session_still_answers_but_persists_nothing() {
    let h = harness().await;

    let reply = h
        .agent
        .run_turn("ghost", "hello")
        .await
        .expect("turn should succeed");
    assert_eq!(reply.text, "How can I help you?");
    assert!(!h.agent.has_session("ghost"));
}

#[tokio::test]
async fn upstream_failure_surfaces_as_agent_error() {
    let h = harness().await;
    h.agent.begin_session("s1");

    let err = h
        .agent
        .run_turn("s1", "explode please")
        .await
        .expect_err("500 from upstream must fail the turn");
    assert!(matches!(err, opsdeck_agent::AgentError::Api(_)));
}
