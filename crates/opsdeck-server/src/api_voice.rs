//! The realtime voice session handler.
//!
//! One WebSocket per active user. Client→server frames are compressed
//! utterance bytes; server→client frames are encoded reply audio, plus the
//! plain-text control token [`NAVIGATION_SIGNAL`] once playback of a
//! navigating reply has had time to finish. No other frames are defined.
//!
//! Per connection the handler walks `Connecting → Active → (loop:
//! AwaitingAudio → Processing → SendingAudio → [SendingNavSignal]) →
//! Closed`. Stages are strictly sequential within a session: the next
//! utterance is not read until the current turn's audio (and optional
//! navigation signal) has been fully sent. Sessions are independent of
//! each other; the store and the per-session conversation map are the only
//! shared state.

use crate::AppState;
use axum::{
    extract::{
        ws::{CloseFrame, Message, WebSocket},
        Extension, WebSocketUpgrade,
    },
    http::{header, HeaderMap},
    response::IntoResponse,
};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// Control token telling the client it may now execute the deferred page
/// navigation. Sent only after the spoken reply has had time to play out,
/// so the page (and its audio element) is not torn down mid-sentence.
pub const NAVIGATION_SIGNAL: &str = "NAVIGATE_NOW";

/// Safety margin added to the measured playback duration before the
/// navigation signal is sent.
const NAVIGATION_SAFETY_MARGIN: Duration = Duration::from_millis(500);

/// WebSocket close code for a policy violation (RFC 6455).
const CLOSE_POLICY_VIOLATION: u16 = 1008;

/// Returns whether the connection's declared origin is allowed: the
/// configured front-end origin, or local loopback. This origin check is
/// the only admission control on the voice channel.
fn origin_allowed(origin: Option<&str>, frontend_origin: &str) -> bool {
    match origin {
        Some(origin) => {
            origin.contains(frontend_origin)
                || origin.contains("localhost")
                || origin.contains("127.0.0.1")
        }
        None => false,
    }
}

/// WebSocket handler: `GET /voice`.
pub async fn voice_ws_handler(
    Extension(state): Extension<Arc<AppState>>,
    headers: HeaderMap,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    let origin = headers
        .get(header::ORIGIN)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    tracing::info!(origin = origin.as_deref().unwrap_or("<none>"), "incoming voice connection");

    let allowed = origin_allowed(origin.as_deref(), &state.frontend_origin);
    ws.on_upgrade(move |socket| handle_voice_socket(socket, state, origin, allowed))
}

/// Drives one voice session to completion. All exit paths converge here:
/// the conversation memory is dropped and the transport released exactly
/// once.
async fn handle_voice_socket(
    mut socket: WebSocket,
    state: Arc<AppState>,
    origin: Option<String>,
    allowed: bool,
) {
    if !allowed {
        tracing::warn!(
            origin = origin.as_deref().unwrap_or("<none>"),
            "rejecting voice connection from unauthorized origin"
        );
        let _ = socket
            .send(Message::Close(Some(CloseFrame {
                code: CLOSE_POLICY_VIOLATION,
                reason: "origin not allowed".into(),
            })))
            .await;
        return;
    }

    let session_id = Uuid::new_v4().to_string();
    state.agent.begin_session(&session_id);
    tracing::info!(session_id = %session_id, "voice session active");

    loop {
        // AwaitingAudio: a binary frame carries the utterance. Text, ping
        // and pong frames are ignored; close or a receive error ends the
        // session.
        let utterance = match socket.recv().await {
            Some(Ok(Message::Binary(bytes))) => bytes,
            Some(Ok(Message::Close(_))) | None => {
                tracing::info!(session_id = %session_id, "client disconnected");
                break;
            }
            Some(Ok(_)) => continue,
            Some(Err(e)) => {
                tracing::info!(session_id = %session_id, "receive error, closing session: {}", e);
                break;
            }
        };
        tracing::info!(session_id = %session_id, bytes = utterance.len(), "received audio data");

        // Processing: decode → transcribe → agent. Infallible; failures
        // come back as a speakable apology.
        let reply = state.pipeline.process_turn(&session_id, &utterance).await;

        // SendingAudio: synthesize, measure playback, send one binary
        // frame. If synthesis itself fails there is nothing to play this
        // turn; the session stays up.
        let audio = match state.tts.synthesize(&reply.text).await {
            Ok(audio) => audio,
            Err(e) => {
                tracing::error!(session_id = %session_id, "speech synthesis failed: {}", e);
                continue;
            }
        };
        let playback = state.converter.measure_duration_or_estimate(&audio).await;
        tracing::info!(
            session_id = %session_id,
            bytes = audio.len(),
            playback_secs = playback.as_secs_f64(),
            "sending audio response"
        );
        if socket.send(Message::Binary(audio.into())).await.is_err() {
            tracing::info!(session_id = %session_id, "send failed, closing session");
            break;
        }

        // SendingNavSignal: only when this turn actually emitted a
        // navigate instruction. The sleep lets the client finish playing
        // the reply before the page (and its audio element) goes away.
        if reply.navigate {
            tokio::time::sleep(playback + NAVIGATION_SAFETY_MARGIN).await;
            if socket.send(Message::Text(NAVIGATION_SIGNAL.into())).await.is_err() {
                tracing::info!(session_id = %session_id, "navigation signal send failed");
                break;
            }
            tracing::info!(session_id = %session_id, "navigation signal sent");
        }
    }

    state.agent.end_session(&session_id);
    tracing::info!(session_id = %session_id, "voice session closed");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_check_accepts_frontend_and_loopback() {
        let frontend = "http://erp.example.com";
        assert!(origin_allowed(Some("http://erp.example.com"), frontend));
        assert!(origin_allowed(Some("http://localhost:5000"), frontend));
        assert!(origin_allowed(Some("http://127.0.0.1:5000"), frontend));
    }

    #[test]
    fn origin_check_rejects_others() {
        let frontend = "http://erp.example.com";
        assert!(!origin_allowed(Some("http://evil.example.net"), frontend));
        assert!(!origin_allowed(None, frontend));
    }
}
