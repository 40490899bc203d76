use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use tracing::debug;

use super::api::CatalogClient;
use super::fallback;
use super::model::Track;

/// A finished catalog lookup, delivered back to the UI thread.
#[derive(Debug, Clone)]
pub struct CatalogUpdate {
    pub tracks: Vec<Track>,
    pub total: usize,
    /// True when the provider could not be reached and the result came
    /// from the built-in sample list.
    pub offline: bool,
}

/// Handle to the background fetch thread.
///
/// Searches run off the UI thread; results are drained with
/// `try_update` from the event loop. The thread exits when the handle
/// is dropped.
pub struct CatalogWorker {
    tx: Sender<String>,
    rx: Receiver<CatalogUpdate>,
}

impl CatalogWorker {
    pub fn spawn(client: CatalogClient) -> Self {
        let (tx, query_rx) = mpsc::channel::<String>();
        let (update_tx, rx) = mpsc::channel::<CatalogUpdate>();

        thread::spawn(move || {
            while let Ok(query) = query_rx.recv() {
                let update = match client.try_search(&query) {
                    Ok(result) => CatalogUpdate {
                        tracks: result.tracks,
                        total: result.total,
                        offline: false,
                    },
                    Err(e) => {
                        debug!(error = %e, query, "catalog fetch failed, serving fallback");
                        let result = fallback::search(&query);
                        CatalogUpdate {
                            tracks: result.tracks,
                            total: result.total,
                            offline: true,
                        }
                    }
                };

                if update_tx.send(update).is_err() {
                    break;
                }
            }
        });

        Self { tx, rx }
    }

    /// Queue a search; an empty query requests the trending list.
    pub fn request(&self, query: impl Into<String>) {
        let _ = self.tx.send(query.into());
    }

    pub fn try_update(&self) -> Option<CatalogUpdate> {
        self.rx.try_recv().ok()
    }
}
