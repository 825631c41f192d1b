//! Opsdeck server library logic.

pub mod api_entities;
pub mod api_events;
pub mod api_ui;
pub mod api_voice;
pub mod config;

use axum::http::HeaderValue;
use axum::{
    routing::{get, post},
    Extension, Json, Router,
};
use opsdeck_agent::CopilotAgent;
use opsdeck_store::EntityStore;
use opsdeck_types::{DataEvent, UiInstruction};
use opsdeck_voice::{AudioConverter, TtsClient, VoicePipeline};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::broadcast;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Capacity of the data-change and UI-instruction broadcast channels. A
/// subscriber that lags past this many events starts dropping them.
pub const BROADCAST_CAPACITY: usize = 256;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The in-memory ERP dataset.
    pub store: Arc<EntityStore>,
    /// Broadcast channel for data-change events (also held by the store).
    pub data_tx: broadcast::Sender<DataEvent>,
    /// Broadcast channel for UI instructions (also held by the tool layer).
    pub ui_tx: broadcast::Sender<UiInstruction>,
    /// The conversational co-pilot (per-session memory inside).
    pub agent: Arc<CopilotAgent>,
    /// The per-turn audio pipeline.
    pub pipeline: Arc<VoicePipeline>,
    /// Text-to-speech client for the session handler.
    pub tts: Arc<TtsClient>,
    /// ffmpeg/ffprobe wrapper (duration measurement).
    pub converter: AudioConverter,
    /// The single allowed front-end origin (loopback is always allowed).
    pub frontend_origin: String,
    /// Voice WebSocket address handed to clients.
    pub voice_public_url: String,
}

/// Health check handler.
///
/// Returns `200 OK` with server status and version. Used by process
/// supervision and CI to verify the server is running.
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Builds the application router with all routes.
pub fn app(state: AppState) -> Router {
    let cors = match state.frontend_origin.parse::<HeaderValue>() {
        Ok(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(Any)
            .allow_headers(Any),
        Err(_) => {
            tracing::warn!(
                origin = %state.frontend_origin,
                "frontend origin is not a valid header value; CORS falls back to permissive"
            );
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        }
    };

    Router::new()
        .route("/health", get(health))
        .route("/api/config", get(api_ui::config_handler))
        .route("/api/dashboard", get(api_entities::dashboard_handler))
        .route(
            "/api/customers",
            get(api_entities::list_customers_handler).post(api_entities::create_customer_handler),
        )
        .route(
            "/api/customers/{id}",
            axum::routing::put(api_entities::update_customer_handler)
                .delete(api_entities::delete_customer_handler),
        )
        .route(
            "/api/products",
            get(api_entities::list_products_handler).post(api_entities::create_product_handler),
        )
        .route(
            "/api/products/{id}",
            axum::routing::put(api_entities::update_product_handler)
                .delete(api_entities::delete_product_handler),
        )
        .route(
            "/api/employees",
            get(api_entities::list_employees_handler).post(api_entities::create_employee_handler),
        )
        .route(
            "/api/employees/{id}",
            axum::routing::put(api_entities::update_employee_handler)
                .delete(api_entities::delete_employee_handler),
        )
        .route(
            "/api/orders",
            get(api_entities::list_orders_handler).post(api_entities::create_order_handler),
        )
        .route(
            "/api/orders/{id}",
            axum::routing::put(api_entities::update_order_handler)
                .delete(api_entities::delete_order_handler),
        )
        .route(
            "/api/invoices",
            get(api_entities::list_invoices_handler).post(api_entities::create_invoice_handler),
        )
        .route(
            "/api/invoices/{id}",
            axum::routing::put(api_entities::update_invoice_handler)
                .delete(api_entities::delete_invoice_handler),
        )
        .route("/api/ui_command", post(api_ui::ui_command_handler))
        .route("/events/stream", get(api_events::event_stream_handler))
        .route("/voice", get(api_voice::voice_ws_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(Extension(Arc::new(state)))
}
