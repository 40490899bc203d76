//! Creation of `rodio` sinks from in-memory audio bytes.

use std::io::Cursor;
use std::time::Duration;

use rodio::{Decoder, OutputStream, Sink, Source};

use crate::error::MediaError;

/// Decode `bytes` and prepare a paused `Sink` starting at `start_at`.
///
/// Returns the sink together with the decoder-reported total duration
/// (not every container knows it). `skip_duration` is the seeking
/// primitive; `Duration::ZERO` is fine for a fresh bind.
pub(super) fn create_sink_at(
    handle: &OutputStream,
    bytes: Vec<u8>,
    start_at: Duration,
    volume: f32,
) -> Result<(Sink, Option<Duration>), MediaError> {
    let decoder =
        Decoder::new(Cursor::new(bytes)).map_err(|e| MediaError::Decode(e.to_string()))?;
    let total = decoder.total_duration();
    let source = decoder.skip_duration(start_at);

    let sink = Sink::connect_new(handle.mixer());
    sink.set_volume(volume);
    sink.append(source);
    sink.pause();

    Ok((sink, total))
}
