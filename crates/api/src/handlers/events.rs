use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use std::{convert::Infallible, sync::Arc, time::Duration};
use tokio_stream::{
    wrappers::{errors::BroadcastStreamRecvError, BroadcastStream},
    Stream, StreamExt,
};

use crate::ApiState;

/// Server-Sent Events stream of `data_changed` events. A client that falls
/// behind receives a `lagged` event and should re-query everything.
pub async fn stream_events(
    State(state): State<Arc<ApiState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    tracing::debug!("Change stream subscriber connected");

    let stream = BroadcastStream::new(state.notifier.subscribe()).filter_map(|received| match received {
        Ok(change) => Event::default().event("data_changed").json_data(change).ok().map(Ok),
        Err(BroadcastStreamRecvError::Lagged(skipped)) => Some(Ok(Event::default()
            .event("lagged")
            .data(skipped.to_string()))),
    });

    Sse::new(stream).keep_alive(KeepAlive::new().interval(Duration::from_secs(25)))
}
