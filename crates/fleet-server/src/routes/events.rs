use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use std::convert::Infallible;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt as _;

use crate::state::AppState;

/// GET /api/events: SSE stream that emits `update` after every store mutation.
/// The event data is the store revision the change produced.
pub async fn sse_events(State(app): State<AppState>) -> impl axum::response::IntoResponse {
    let rx = app.event_tx.subscribe();
    // Lagged receivers skip the missed revisions; the next one still arrives.
    let stream = BroadcastStream::new(rx).filter_map(|msg| {
        msg.ok().map(|revision| {
            Ok::<Event, Infallible>(Event::default().event("update").data(revision.to_string()))
        })
    });
    Sse::new(stream).keep_alive(KeepAlive::default())
}
