//! Song catalog: remote search provider with a built-in offline fallback.
//!
//! The catalog never surfaces upstream failures; any fetch problem is
//! answered from the deterministic sample list instead.

mod api;
mod fallback;
mod model;
mod worker;

pub use api::CatalogClient;
pub use fallback::{sample_audio_url, sample_catalog};
pub use model::{PLACEHOLDER_IMAGE, SearchResult, Track};
pub use worker::{CatalogUpdate, CatalogWorker};

#[cfg(test)]
mod tests;
