//! Application module: exposes the shell model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and holds the browse list,
//! search input, admin screens and the mirrored "now playing" reference.

mod model;

pub use model::*;

#[cfg(test)]
mod tests;
