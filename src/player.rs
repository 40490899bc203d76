//! Playback controller: the session state machine that owns the "now
//! playing" track and translates transport intents into media commands.
//!
//! The session never touches the audio device itself; it sends
//! [`MediaCmd`]s to the media thread and reacts to the token-stamped
//! [`MediaEvent`]s coming back.

mod session;
mod types;

pub use session::PlayerSession;
pub use types::{MediaCmd, MediaEvent, MediaEventKind, SessionEvent, Transport};

#[cfg(test)]
mod tests;
