//! Source-node construction: decode a track (file or blob) into a fresh
//! paused `Sink`, wrapped in the analyser tap. Sinks are single-use; every
//! load builds a new one and discards the old.

use std::fs::File;
use std::io::{BufReader, Cursor};
use std::sync::Arc;
use std::time::Duration;

use rodio::{Decoder, OutputStream, Sink, Source};

use crate::analyser::{SampleRing, Tap};
use crate::error::PlayerError;
use crate::library::{Track, TrackSource};
use crate::media::BlobStore;

/// Create a paused `Sink` for `track` starting at `start_at`, feeding the
/// analyser ring through a tap.
pub(super) fn create_sink_at(
    stream: &OutputStream,
    track: &Track,
    blobs: &BlobStore,
    ring: &Arc<SampleRing>,
    start_at: Duration,
    volume: f32,
) -> Result<Sink, PlayerError> {
    let sink = Sink::connect_new(stream.mixer());
    sink.set_volume(volume);
    sink.pause();

    match &track.source {
        TrackSource::Path(path) => {
            let file = File::open(path)
                .map_err(|e| PlayerError::load(&track.display, e.to_string()))?;
            let source = Decoder::new(BufReader::new(file))
                .map_err(|e| PlayerError::load(&track.display, e.to_string()))?
                // `skip_duration` is the seeking primitive; Duration::ZERO is fine.
                .skip_duration(start_at);
            sink.append(Tap::new(source, ring.clone()));
        }
        TrackSource::Blob(url) => {
            let bytes = blobs
                .get(url)
                .ok_or_else(|| PlayerError::load(&track.display, "blob was revoked"))?;
            let source = Decoder::new(Cursor::new(bytes))
                .map_err(|e| PlayerError::load(&track.display, e.to_string()))?
                .skip_duration(start_at);
            sink.append(Tap::new(source, ring.clone()));
        }
    }

    Ok(sink)
}
