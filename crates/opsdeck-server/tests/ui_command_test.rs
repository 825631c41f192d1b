//! UI-command endpoint validation and broadcast, plus client bootstrap.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use opsdeck_agent::{AgentConfig, ChatClient, CopilotAgent};
use opsdeck_server::{app, AppState};
use opsdeck_store::EntityStore;
use opsdeck_tools::ToolExecutor;
use opsdeck_types::UiInstruction;
use opsdeck_voice::{AudioConverter, SpeechConfig, SttClient, TtsClient, VoicePipeline};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::broadcast;
use tower::ServiceExt;

fn test_state() -> (AppState, broadcast::Receiver<UiInstruction>) {
    let (data_tx, _) = broadcast::channel(256);
    let (ui_tx, ui_rx) = broadcast::channel(256);
    let store = Arc::new(EntityStore::new(data_tx.clone()));

    let chat = ChatClient::new(AgentConfig::new("test-key")).expect("chat client builds");
    let executor = ToolExecutor::new(store.clone(), ui_tx.clone());
    let agent = Arc::new(CopilotAgent::new(chat, executor));

    let converter = AudioConverter::new("ffmpeg-unused", "ffprobe-unused");
    let speech = SpeechConfig::new("test-key");
    let stt = SttClient::new(speech.clone()).expect("stt client builds");
    let tts = Arc::new(TtsClient::new(speech).expect("tts client builds"));
    let pipeline = Arc::new(VoicePipeline::new(converter.clone(), stt, agent.clone()));

    let state = AppState {
        store,
        data_tx,
        ui_tx,
        agent,
        pipeline,
        tts,
        converter,
        frontend_origin: "http://localhost:5000".to_string(),
        voice_public_url: "ws://voice.example/voice".to_string(),
    };
    (state, ui_rx)
}

fn post_json(uri: &str, payload: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .expect("request")
}

#[tokio::test]
async fn valid_instruction_is_broadcast_to_ui_clients() {
    let (state, mut ui_rx) = test_state();
    let app = app(state);

    let response = app
        .oneshot(post_json(
            "/api/ui_command",
            json!({
                "action": "fill_field",
                "target_app": "crm",
                "field_id": "crm-name",
                "value": "Acme"
            }),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let instruction = ui_rx.recv().await.expect("instruction broadcast");
    assert_eq!(
        instruction,
        UiInstruction::FillField {
            target_app: "crm".to_string(),
            field_id: "crm-name".to_string(),
            value: "Acme".to_string(),
        }
    );
}

#[tokio::test]
async fn payload_without_action_is_rejected() {
    let (state, mut ui_rx) = test_state();
    let app = app(state);

    let response = app
        .clone()
        .oneshot(post_json("/api/ui_command", json!({"target_app": "crm"})))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(matches!(
        ui_rx.try_recv(),
        Err(broadcast::error::TryRecvError::Empty)
    ));
}

#[tokio::test]
async fn unknown_action_is_rejected() {
    let (state, mut ui_rx) = test_state();
    let app = app(state);

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/ui_command",
            json!({"action": "reboot_warehouse"}),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(matches!(
        ui_rx.try_recv(),
        Err(broadcast::error::TryRecvError::Empty)
    ));
}

#[tokio::test]
async fn instruction_without_subscribers_is_still_accepted() {
    let (state, ui_rx) = test_state();
    drop(ui_rx);
    let app = app(state);

    let response = app
        .oneshot(post_json(
            "/api/ui_command",
            json!({"action": "clear_form_fields", "form_id": "hr_employee_form"}),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn config_endpoint_hands_out_voice_address() {
    let (state, _ui_rx) = test_state();
    let app = app(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/config")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let json: Value = serde_json::from_slice(&bytes).expect("json");
    assert_eq!(json["voice_ws_url"], "ws://voice.example/voice");
}
