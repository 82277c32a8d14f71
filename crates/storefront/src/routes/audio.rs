//! Audio preview coordination routes.
//!
//! Product cards post play/pause lifecycle events here and listen on one
//! shared SSE stream. The browser owns the actual `<audio>` elements; the
//! server-side handle registered with the coordinator is inert, and the
//! `started` SSE event is what makes non-owning cards pause their element
//! and reset their glyph.

use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::{
        IntoResponse, Response,
        sse::{Event, KeepAlive, Sse},
    },
};
use futures::stream::Stream;
use tracing::instrument;

use resonant_harmony_core::ProductId;

use crate::services::{AudioHandle, PlaybackEvent};
use crate::state::AppState;

/// Server-side stand-in for a browser `<audio>` element.
///
/// Rewind/play/pause are executed client-side in response to the SSE events
/// and the returned button fragments, so the methods here have nothing to
/// drive.
struct BrowserHandle;

impl AudioHandle for BrowserHandle {
    fn play(&self) {}
    fn pause(&self) {}
    fn rewind(&self) {}
}

/// Audio play/pause button fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/audio_button.html")]
pub struct AudioButtonTemplate {
    pub product_id: ProductId,
    pub playing: bool,
}

/// SSE stream of playback events.
///
/// Every mounted card subscribes once; a `started` event carrying another
/// card's product id tells it to pause its own element and clear its glyph.
#[instrument(skip(state))]
pub async fn events(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let mut rx = state.playback().subscribe();
    tracing::debug!("New SSE client connected to playback events");

    let stream = async_stream::stream! {
        // Initial connected status so the client can verify the stream.
        yield Ok(Event::default().event("connected").data("ok"));

        loop {
            match rx.recv().await {
                Ok(PlaybackEvent::Started(id)) => {
                    yield Ok(Event::default().event("started").data(id.to_string()));
                }
                Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                    // A lagged widget only needs the latest state; keep going.
                    tracing::debug!(skipped, "SSE subscriber lagged behind playback events");
                }
                Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
            }
        }
    };

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("heartbeat"),
    )
}

/// Start playback for a product (HTMX). Pauses whichever sample was playing.
#[instrument(skip(state))]
pub async fn play(State(state): State<AppState>, Path(id): Path<ProductId>) -> Response {
    state.playback().play(id, Arc::new(BrowserHandle));
    AudioButtonTemplate {
        product_id: id,
        playing: true,
    }
    .into_response()
}

/// Pause playback for a product (HTMX). Owner-only; anything else is a no-op.
#[instrument(skip(state))]
pub async fn pause(State(state): State<AppState>, Path(id): Path<ProductId>) -> Response {
    state.playback().pause(id);
    AudioButtonTemplate {
        product_id: id,
        playing: false,
    }
    .into_response()
}

/// A sample reached its natural end; clear the owner registration.
#[instrument(skip(state))]
pub async fn ended(State(state): State<AppState>, Path(id): Path<ProductId>) -> Response {
    state.playback().ended(id);
    AudioButtonTemplate {
        product_id: id,
        playing: false,
    }
    .into_response()
}

/// A card unmounted while owning playback; pause and clear so the owner
/// reference cannot go stale.
#[instrument(skip(state))]
pub async fn release(State(state): State<AppState>, Path(id): Path<ProductId>) -> Response {
    state.playback().release(id);
    AudioButtonTemplate {
        product_id: id,
        playing: false,
    }
    .into_response()
}
