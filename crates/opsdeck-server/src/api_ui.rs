//! UI-command endpoint and client bootstrap config.

use crate::AppState;
use axum::{extract::Extension, http::StatusCode, response::Json};
use opsdeck_types::UiInstruction;
use serde_json::{json, Value};
use std::sync::Arc;

/// GET /api/config. Bootstrap info for the front-end, most importantly
/// the voice channel address to connect to.
pub async fn config_handler(Extension(state): Extension<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "voice_ws_url": state.voice_public_url,
    }))
}

/// POST /api/ui_command. Validates an `action`-tagged instruction and
/// broadcasts it to connected UI clients.
///
/// A payload without an `action` key, or with an action outside the
/// recognized set, is a `400`: the command set is closed on the producer
/// side; only consumers tolerate unknown actions.
pub async fn ui_command_handler(
    Extension(state): Extension<Arc<AppState>>,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    if payload.get("action").and_then(Value::as_str).is_none() {
        return Err(StatusCode::BAD_REQUEST);
    }

    let instruction: UiInstruction = serde_json::from_value(payload.clone()).map_err(|e| {
        tracing::warn!("rejected ui_command payload: {}", e);
        StatusCode::BAD_REQUEST
    })?;

    tracing::info!(action = instruction.action(), "broadcasting ui instruction");
    if state.ui_tx.send(instruction).is_err() {
        // No subscribers yet; the instruction had nobody to steer.
        tracing::debug!("ui instruction had no subscribers");
    }

    Ok(Json(json!({
        "message": "UI instruction sent",
        "instruction": payload,
    })))
}
