//! Media backend: a worker thread that owns the audio output and speaks
//! the media command/event protocol from [`crate::player`].
//!
//! The thread plays the role of the platform media element: it executes
//! bind/play/pause/seek/volume commands fire-and-forget and reports
//! lifecycle events (load started, can play, duration, position, ended,
//! failures) stamped with the binding token they belong to.

mod handle;
mod sink;
mod source;
mod thread;

pub use handle::Media;
