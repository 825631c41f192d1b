//! SSE fan-out of data-change events and UI instructions.

use crate::AppState;
use axum::{
    extract::Extension,
    response::sse::{Event, KeepAlive, Sse},
};
use futures_util::Stream;
use std::{convert::Infallible, sync::Arc};
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

/// Handler for `GET /events/stream`.
///
/// Streams both event families to UI clients as named SSE events:
/// `data_update` (store mutations) and `ui_instruction` (navigate /
/// fill-field / clear-form commands).
pub async fn event_stream_handler(
    Extension(state): Extension<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let data_stream = BroadcastStream::new(state.data_tx.subscribe()).filter_map(|result| {
        match result {
            Ok(event) => match serde_json::to_string(&event) {
                Ok(data) => Some(Ok(Event::default().event("data_update").data(data))),
                Err(e) => {
                    tracing::error!("failed to serialize data event: {}", e);
                    None
                }
            },
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "data SSE stream lagged; events were dropped for this subscriber"
                );
                None
            }
        }
    });

    let ui_stream = BroadcastStream::new(state.ui_tx.subscribe()).filter_map(|result| {
        match result {
            Ok(instruction) => match serde_json::to_string(&instruction) {
                Ok(data) => Some(Ok(Event::default().event("ui_instruction").data(data))),
                Err(e) => {
                    tracing::error!("failed to serialize ui instruction: {}", e);
                    None
                }
            },
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "ui SSE stream lagged; instructions were dropped for this subscriber"
                );
                None
            }
        }
    });

    Sse::new(data_stream.merge(ui_stream)).keep_alive(KeepAlive::default())
}
