//! Audio playback coordination across product-card widgets.
//!
//! At most one audio sample plays at any instant, storewide. The coordinator
//! is an explicitly owned service held by `AppState` and injected into the
//! audio routes - there is no module-level global to go stale.
//!
//! # Protocol
//!
//! - `play(id, handle)` pauses whichever handle currently owns playback,
//!   rewinds and starts the new one, registers it as current, and broadcasts
//!   [`PlaybackEvent::Started`]. Widgets receiving `Started` for a different
//!   id than their own clear their local "playing" glyph without touching
//!   the owning handle.
//! - `pause(id)` is owner-only: it pauses the handle and clears the
//!   registration. Nothing is broadcast - no other widget has state to
//!   update.
//! - `ended(id)` clears the registration when a sample finishes naturally,
//!   again without broadcasting.
//! - `release(id)` covers a widget unmounting while it owns playback: the
//!   handle is paused and the registration cleared, so the next `play`
//!   never trips over a detached sample.

use std::sync::{Arc, Mutex};

use tokio::sync::broadcast;

use resonant_harmony_core::ProductId;

/// Control surface of one widget's audio element.
///
/// The storefront's implementation forwards these as SSE directives to the
/// browser `<audio>` element; tests use recording handles.
pub trait AudioHandle: Send + Sync {
    /// Begin playback from the current position.
    fn play(&self);
    /// Pause playback, keeping the position.
    fn pause(&self);
    /// Seek back to the start of the sample.
    fn rewind(&self);
}

/// Broadcast event observed by every mounted product card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackEvent {
    /// Playback started for the given product; non-owners self-clear.
    Started(ProductId),
}

/// The currently playing sample and its owning product.
struct Active {
    id: ProductId,
    handle: Arc<dyn AudioHandle>,
}

/// Enforces single-playback-at-a-time semantics across audio-preview
/// widgets.
///
/// Internally a `Mutex<Option<Active>>` plus a `tokio::sync::broadcast`
/// channel; cheap to clone and share.
#[derive(Clone)]
pub struct PlaybackCoordinator {
    current: Arc<Mutex<Option<Active>>>,
    events: broadcast::Sender<PlaybackEvent>,
}

impl PlaybackCoordinator {
    /// Create a coordinator with the given broadcast capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (events, _) = broadcast::channel(capacity);
        Self {
            current: Arc::new(Mutex::new(None)),
            events,
        }
    }

    /// Subscribe to playback events.
    ///
    /// Each mounted widget holds a receiver for the lifetime of its SSE
    /// connection; events emitted before subscription are not received.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<PlaybackEvent> {
        self.events.subscribe()
    }

    /// Start playback for `id`, displacing whichever sample currently owns
    /// it.
    ///
    /// The new handle is rewound before playing, so replaying the same
    /// product restarts its sample from the top.
    pub fn play(&self, id: ProductId, handle: Arc<dyn AudioHandle>) {
        {
            let mut current = self.lock_current();
            if let Some(previous) = current.take() {
                previous.handle.pause();
            }
            handle.rewind();
            handle.play();
            *current = Some(Active {
                id,
                handle: Arc::clone(&handle),
            });
        }

        // Non-owners observe Started(id) and clear their local glyphs.
        // Ignore send errors: no mounted widgets means nobody to notify.
        let _ = self.events.send(PlaybackEvent::Started(id));
    }

    /// Pause playback for `id`. No-op unless `id` owns the current sample.
    pub fn pause(&self, id: ProductId) {
        let mut current = self.lock_current();
        if let Some(active) = current.as_ref()
            && active.id == id
        {
            active.handle.pause();
            *current = None;
        }
    }

    /// A sample finished playing naturally; clear the owner registration.
    ///
    /// No broadcast: the owning widget already observed the end of its own
    /// sample, and no other widget has state to update.
    pub fn ended(&self, id: ProductId) {
        let mut current = self.lock_current();
        if current.as_ref().is_some_and(|active| active.id == id) {
            *current = None;
        }
    }

    /// A widget is unmounting. If it owns playback, pause its handle and
    /// clear the registration so the owner reference cannot go stale.
    pub fn release(&self, id: ProductId) {
        let mut current = self.lock_current();
        if let Some(active) = current.as_ref()
            && active.id == id
        {
            active.handle.pause();
            *current = None;
        }
    }

    /// The product currently owning playback, if any.
    #[must_use]
    pub fn current(&self) -> Option<ProductId> {
        self.lock_current().as_ref().map(|active| active.id)
    }

    /// True when `id` owns the current sample.
    #[must_use]
    pub fn is_playing(&self, id: ProductId) -> bool {
        self.current() == Some(id)
    }

    fn lock_current(&self) -> std::sync::MutexGuard<'_, Option<Active>> {
        // A poisoned mutex only happens if a holder panicked; the registration
        // itself is still coherent, so keep serving.
        self.current
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl Default for PlaybackCoordinator {
    fn default() -> Self {
        Self::new(64)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use super::*;

    /// Recording handle: tracks whether it is playing and counts calls.
    #[derive(Default)]
    struct RecordingHandle {
        playing: AtomicBool,
        pauses: AtomicUsize,
        rewinds: AtomicUsize,
    }

    impl RecordingHandle {
        fn is_playing(&self) -> bool {
            self.playing.load(Ordering::SeqCst)
        }

        fn pauses(&self) -> usize {
            self.pauses.load(Ordering::SeqCst)
        }
    }

    impl AudioHandle for RecordingHandle {
        fn play(&self) {
            self.playing.store(true, Ordering::SeqCst);
        }

        fn pause(&self) {
            self.playing.store(false, Ordering::SeqCst);
            self.pauses.fetch_add(1, Ordering::SeqCst);
        }

        fn rewind(&self) {
            self.rewinds.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn setup() -> (PlaybackCoordinator, Arc<RecordingHandle>, Arc<RecordingHandle>) {
        (
            PlaybackCoordinator::new(8),
            Arc::new(RecordingHandle::default()),
            Arc::new(RecordingHandle::default()),
        )
    }

    #[test]
    fn test_play_b_while_a_playing_leaves_exactly_one_playing() {
        let (coordinator, handle_a, handle_b) = setup();
        let (a, b) = (ProductId::generate(), ProductId::generate());

        coordinator.play(a, handle_a.clone());
        assert!(handle_a.is_playing());

        coordinator.play(b, handle_b.clone());

        assert!(!handle_a.is_playing(), "previous owner must be paused");
        assert!(handle_b.is_playing());
        assert_eq!(coordinator.current(), Some(b));
        assert_eq!(handle_a.pauses(), 1);
    }

    #[test]
    fn test_started_event_tells_non_owners_to_clear_their_glyph() {
        let (coordinator, handle_a, handle_b) = setup();
        let (a, b) = (ProductId::generate(), ProductId::generate());

        let mut rx = coordinator.subscribe();

        coordinator.play(a, handle_a);
        coordinator.play(b, handle_b);

        assert_eq!(rx.try_recv(), Ok(PlaybackEvent::Started(a)));
        // Widget A holds a local "playing" flag; on Started(b) it flips the
        // flag off because b != a.
        let PlaybackEvent::Started(started) = rx.try_recv().expect("second event");
        let mut widget_a_playing = true;
        if started != a {
            widget_a_playing = false;
        }
        assert!(!widget_a_playing);
    }

    #[test]
    fn test_replay_same_product_rewinds_to_start() {
        let (coordinator, handle_a, _) = setup();
        let a = ProductId::generate();

        coordinator.play(a, handle_a.clone());
        coordinator.play(a, handle_a.clone());

        assert_eq!(handle_a.rewinds.load(Ordering::SeqCst), 2);
        assert!(handle_a.is_playing());
        assert_eq!(coordinator.current(), Some(a));
    }

    #[test]
    fn test_pause_by_owner_clears_registration() {
        let (coordinator, handle_a, _) = setup();
        let a = ProductId::generate();

        coordinator.play(a, handle_a.clone());
        coordinator.pause(a);

        assert!(!handle_a.is_playing());
        assert_eq!(coordinator.current(), None);
    }

    #[test]
    fn test_pause_by_non_owner_is_noop() {
        let (coordinator, handle_a, _) = setup();
        let (a, b) = (ProductId::generate(), ProductId::generate());

        coordinator.play(a, handle_a.clone());
        coordinator.pause(b);

        assert!(handle_a.is_playing());
        assert_eq!(coordinator.current(), Some(a));
    }

    #[test]
    fn test_natural_end_clears_without_broadcast() {
        let (coordinator, handle_a, _) = setup();
        let a = ProductId::generate();

        coordinator.play(a, handle_a);
        let mut rx = coordinator.subscribe();

        coordinator.ended(a);

        assert_eq!(coordinator.current(), None);
        assert!(rx.try_recv().is_err(), "ended must not broadcast");
    }

    #[test]
    fn test_release_while_owning_pauses_and_clears() {
        let (coordinator, handle_a, handle_b) = setup();
        let (a, b) = (ProductId::generate(), ProductId::generate());

        coordinator.play(a, handle_a.clone());
        coordinator.release(a);

        assert!(!handle_a.is_playing(), "unmount must pause the owned handle");
        assert_eq!(coordinator.current(), None);

        // A stale owner would force the next play to pause a dead handle;
        // after release, play(b) touches only b.
        coordinator.play(b, handle_b.clone());
        assert_eq!(handle_a.pauses(), 1);
        assert!(handle_b.is_playing());
    }

    #[test]
    fn test_release_by_non_owner_leaves_playback_alone() {
        let (coordinator, handle_a, _) = setup();
        let (a, b) = (ProductId::generate(), ProductId::generate());

        coordinator.play(a, handle_a.clone());
        coordinator.release(b);

        assert!(handle_a.is_playing());
        assert_eq!(coordinator.current(), Some(a));
    }
}
