use std::sync::Mutex;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::JoinHandle;

use crate::player::{MediaCmd, MediaEvent};

use super::thread::spawn_media_thread;

/// Handle to the media thread.
///
/// Started when the player opens and shut down when it closes; commands
/// go in through a cloned sender (the session holds one), events are
/// drained by the runtime with `try_event`.
pub struct Media {
    tx: Sender<MediaCmd>,
    events: Receiver<MediaEvent>,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl Media {
    pub fn start() -> Self {
        let (tx, cmd_rx) = mpsc::channel::<MediaCmd>();
        let (event_tx, events) = mpsc::channel::<MediaEvent>();
        let join = spawn_media_thread(cmd_rx, event_tx);

        Self {
            tx,
            events,
            join: Mutex::new(Some(join)),
        }
    }

    pub fn sender(&self) -> Sender<MediaCmd> {
        self.tx.clone()
    }

    pub fn try_event(&self) -> Option<MediaEvent> {
        self.events.try_recv().ok()
    }

    /// Stop the thread and wait for it to exit.
    pub fn shutdown(&self) {
        let _ = self.tx.send(MediaCmd::Shutdown);
        if let Ok(mut join) = self.join.lock() {
            if let Some(handle) = join.take() {
                let _ = handle.join();
            }
        }
    }
}
