use std::convert::Infallible;

use axum::response::sse::{Event, KeepAlive, Sse};
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::{Stream, StreamExt};

use crate::shared::changes;

/// GET /api/changes
///
/// Server-sent change feed. Each event names the table and operation;
/// clients re-fetch through their normal read path on receipt. A lagged
/// subscriber just misses events and catches up on the next one.
pub async fn change_feed() -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = changes::subscribe();

    let stream = BroadcastStream::new(rx).filter_map(|msg| match msg {
        Ok(event) => Event::default()
            .event("change")
            .json_data(&event)
            .ok()
            .map(Ok),
        Err(_) => None, // lagged
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
