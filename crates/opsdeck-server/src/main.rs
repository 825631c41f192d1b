//! Opsdeck server binary — ERP data service plus voice co-pilot backend.
//!
//! Starts an axum HTTP server with structured logging, the seeded
//! in-memory dataset, the voice pipeline, and graceful shutdown on
//! SIGTERM/SIGINT.

use opsdeck_agent::{ChatClient, CopilotAgent};
use opsdeck_server::{app, config, AppState, BROADCAST_CAPACITY};
use opsdeck_store::EntityStore;
use opsdeck_tools::ToolExecutor;
use opsdeck_voice::{AudioConverter, SttClient, TtsClient, VoicePipeline};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tracing_subscriber::EnvFilter;

fn resolve_config_path() -> (Option<String>, &'static str) {
    if let Some(path) = std::env::args()
        .nth(1)
        .filter(|value| !value.trim().is_empty())
    {
        return (Some(path), "cli-arg");
    }

    if let Ok(path) = std::env::var("OPSDECK_CONFIG_PATH") {
        if !path.trim().is_empty() {
            return (Some(path), "env-var");
        }
    }

    (None, "default")
}

#[tokio::main]
async fn main() {
    let (resolved_config_path, config_source) = resolve_config_path();
    let selected_config_path = resolved_config_path.as_deref().or(Some("config.toml"));

    // Load configuration
    let config = config::load_config(selected_config_path)
        .expect("failed to load configuration — the server cannot start without valid config");

    // Initialize tracing
    let filter =
        EnvFilter::try_new(&config.logging.level).unwrap_or_else(|_| EnvFilter::new("info"));

    if config.logging.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    tracing::info!(
        source = config_source,
        path = selected_config_path.unwrap_or("<none>"),
        "resolved startup configuration path"
    );

    // Broadcast channels: data changes (store → UI) and UI instructions
    // (tools → UI).
    let (data_tx, _) = broadcast::channel(BROADCAST_CAPACITY);
    let (ui_tx, _) = broadcast::channel(BROADCAST_CAPACITY);

    // Seeded in-memory dataset
    let store = Arc::new(EntityStore::new(data_tx.clone()));
    store.seed_sample_data();

    // Voice pipeline components
    let converter = AudioConverter::new(&config.audio.ffmpeg_binary, &config.audio.ffprobe_binary);
    let speech_config = config.speech.to_speech_config();
    let stt = SttClient::new(speech_config.clone())
        .expect("failed to build STT client — check [speech] config");
    let tts = Arc::new(
        TtsClient::new(speech_config).expect("failed to build TTS client — check [speech] config"),
    );

    let chat = ChatClient::new(config.agent.to_agent_config())
        .expect("failed to build chat client — set GROQ_API_KEY or [agent].api_key");
    let executor = ToolExecutor::new(store.clone(), ui_tx.clone());
    let agent = Arc::new(CopilotAgent::new(chat, executor));
    let pipeline = Arc::new(VoicePipeline::new(converter.clone(), stt, agent.clone()));

    let state = AppState {
        store,
        data_tx,
        ui_tx,
        agent,
        pipeline,
        tts,
        converter,
        frontend_origin: config.frontend.origin.clone(),
        voice_public_url: config.voice.public_ws_url.clone(),
    };

    // Build application
    let app = app(state);
    let addr = SocketAddr::new(config.server.host, config.server.port);

    tracing::info!(
        %addr,
        frontend_origin = %config.frontend.origin,
        "starting opsdeck server"
    );

    let listener = TcpListener::bind(addr)
        .await
        .expect("failed to bind to address — is another process using this port?");

    // Serve with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");

    tracing::info!("opsdeck server shut down");
}

/// Waits for a SIGINT (Ctrl+C) or SIGTERM signal for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => { tracing::info!("received SIGINT, initiating graceful shutdown"); }
        () = terminate => { tracing::info!("received SIGTERM, initiating graceful shutdown"); }
    }
}
