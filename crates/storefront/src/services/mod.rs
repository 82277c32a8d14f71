//! Storefront services.

pub mod playback;

pub use playback::{AudioHandle, PlaybackCoordinator, PlaybackEvent};
