use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use rodio::{OutputStreamBuilder, Sink};
use tracing::debug;

use crate::player::{MediaCmd, MediaEvent, MediaEventKind};

use super::sink::create_sink_at;
use super::source;

pub(super) fn spawn_media_thread(
    rx: Receiver<MediaCmd>,
    events: Sender<MediaEvent>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let stream = OutputStreamBuilder::open_default_stream().expect("ERR: No audio output device");
        // rodio logs to stderr when OutputStream is dropped. That's useful in debugging,
        // but noisy for a TUI app.
        let mut stream = stream;
        stream.log_on_drop(false);

        // Token of the active binding; every event is stamped with it.
        let mut token: u64 = 0;
        // Decoded bytes are retained so seeks can rebuild the decoder.
        let mut bytes: Option<Vec<u8>> = None;
        let mut sink: Option<Sink> = None;
        let mut volume: f32 = 1.0;
        let mut duration: Option<Duration> = None;

        // Playhead bookkeeping: start time of the current play stretch
        // plus the time accumulated before it (pauses, seeks).
        let mut playing = false;
        let mut started_at: Option<Instant> = None;
        let mut accumulated = Duration::ZERO;
        let mut ended = false;

        let emit = |token: u64, kind: MediaEventKind| {
            let _ = events.send(MediaEvent { token, kind });
        };

        loop {
            match rx.recv_timeout(Duration::from_millis(200)) {
                Ok(cmd) => match cmd {
                    MediaCmd::Bind {
                        source: locator,
                        volume: bind_volume,
                        token: bind_token,
                    } => {
                        // A new bind supersedes whatever was playing.
                        if let Some(s) = sink.take() {
                            s.stop();
                        }
                        bytes = None;
                        duration = None;
                        playing = false;
                        started_at = None;
                        accumulated = Duration::ZERO;
                        ended = false;
                        token = bind_token;
                        volume = bind_volume;

                        emit(token, MediaEventKind::LoadStarted);
                        debug!(token, "binding media source");

                        match source::resolve(&locator) {
                            Ok(data) => {
                                match create_sink_at(&stream, data.clone(), Duration::ZERO, volume)
                                {
                                    Ok((new_sink, total)) => {
                                        bytes = Some(data);
                                        duration = total;
                                        sink = Some(new_sink);
                                        if let Some(d) = total {
                                            emit(token, MediaEventKind::DurationChanged(d));
                                        }
                                        emit(token, MediaEventKind::CanPlay);
                                    }
                                    Err(e) => {
                                        emit(token, MediaEventKind::LoadFailed(e.to_string()))
                                    }
                                }
                            }
                            Err(e) => emit(token, MediaEventKind::LoadFailed(e.to_string())),
                        }
                    }

                    MediaCmd::Play => match sink.as_ref() {
                        Some(s) => {
                            s.play();
                            playing = true;
                            // A drained sink plays nothing; clearing the
                            // latch lets the tick report Ended again
                            // instead of leaving a phantom Playing.
                            ended = false;
                            started_at = Some(Instant::now());
                            emit(token, MediaEventKind::PlayStarted);
                        }
                        // Models the platform refusing a play request.
                        None => emit(
                            token,
                            MediaEventKind::PlayRejected("no media source bound".to_string()),
                        ),
                    },

                    MediaCmd::Pause => {
                        if let Some(s) = sink.as_ref() {
                            s.pause();
                        }
                        if let Some(st) = started_at.take() {
                            accumulated += st.elapsed();
                        }
                        playing = false;
                    }

                    MediaCmd::SeekTo(target) => {
                        // Scrubbing: rebuild the sink and skip into the bytes.
                        let Some(data) = bytes.as_ref() else {
                            continue;
                        };
                        let target = duration.map_or(target, |d| target.min(d));

                        if let Some(s) = sink.take() {
                            s.stop();
                        }
                        match create_sink_at(&stream, data.clone(), target, volume) {
                            Ok((new_sink, _)) => {
                                if playing {
                                    new_sink.play();
                                    started_at = Some(Instant::now());
                                } else {
                                    started_at = None;
                                }
                                accumulated = target;
                                ended = false;
                                sink = Some(new_sink);
                                emit(token, MediaEventKind::Position(target));
                            }
                            Err(e) => emit(token, MediaEventKind::LoadFailed(e.to_string())),
                        }
                    }

                    MediaCmd::SetVolume(v) => {
                        volume = v;
                        if let Some(s) = sink.as_ref() {
                            s.set_volume(v);
                        }
                    }

                    MediaCmd::Unbind => {
                        if let Some(s) = sink.take() {
                            s.stop();
                        }
                        bytes = None;
                        duration = None;
                        playing = false;
                        started_at = None;
                        accumulated = Duration::ZERO;
                        ended = false;
                    }

                    MediaCmd::Shutdown => {
                        if let Some(s) = sink.take() {
                            s.stop();
                        }
                        break;
                    }
                },

                Err(RecvTimeoutError::Timeout) => {
                    // Periodic tick: report the playhead and detect the
                    // end of the current source.
                    let Some(s) = sink.as_ref() else {
                        continue;
                    };

                    if playing && s.empty() && !ended {
                        ended = true;
                        playing = false;
                        started_at = None;
                        if let Some(d) = duration {
                            accumulated = d;
                        }
                        emit(token, MediaEventKind::Ended);
                    } else if playing {
                        let elapsed =
                            accumulated + started_at.map_or(Duration::ZERO, |st| st.elapsed());
                        let elapsed = duration.map_or(elapsed, |d| elapsed.min(d));
                        emit(token, MediaEventKind::Position(elapsed));
                    }
                }

                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}
