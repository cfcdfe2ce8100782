//! Server-Sent Events support

use super::types::ViewUpdate;
use crate::presenter::render_transcript;
use crate::state_machine::ChatView;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::Stream;
use std::convert::Infallible;
use std::time::Duration;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;
use tokio_stream::StreamExt;

/// Stream every published view, starting with the current one
pub fn sse_stream(
    view_rx: watch::Receiver<ChatView>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    // WatchStream yields the current value first, then each change
    let views = WatchStream::new(view_rx).map(|view| Ok(view_event(&view)));

    Sse::new(views).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("ping"),
    )
}

fn view_event(view: &ChatView) -> Event {
    let update = ViewUpdate {
        html: render_transcript(view),
        accepting_input: view.accepting_input,
        pending: view.is_pending(),
    };

    Event::default()
        .event("view")
        .json_data(update)
        .unwrap_or_else(|e| {
            tracing::error!(error = %e, "Failed to serialize view update");
            Event::default().event("view").data("{}")
        })
}
