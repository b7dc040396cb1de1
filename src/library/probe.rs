use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use lofty::prelude::*;
use lofty::probe::Probe;

use crate::error::PlayerError;
use crate::media::BlobStore;

use super::model::{Track, TrackSource};
use super::scan::track_from_path;

/// Conventional stems tried, in order, when looking for a bundled default
/// track inside the probe directory.
pub const PROBE_STEMS: [&str; 6] = ["default", "demo", "background", "music", "track", "song"];

/// Build the ordered candidate list `<dir>/<stem>.<ext>` for every probe stem
/// and configured extension.
pub fn candidate_paths(dir: &Path, extensions: &[String]) -> Vec<PathBuf> {
    let mut candidates = Vec::with_capacity(PROBE_STEMS.len() * extensions.len());
    for stem in PROBE_STEMS {
        for ext in extensions {
            let ext = ext.trim().trim_start_matches('.');
            if ext.is_empty() {
                continue;
            }
            candidates.push(dir.join(format!("{stem}.{ext}")));
        }
    }
    candidates
}

/// Try each candidate in order, waiting at most `patience` per candidate for
/// its metadata, and return a track for the first that loads. Candidates are
/// probed strictly one at a time so the choice is deterministic and no
/// requests are issued for assets past the first hit.
pub fn probe_default_tracks(candidates: &[PathBuf], patience: Duration) -> Option<Track> {
    for path in candidates {
        let probe_path = path.clone();
        let result = run_with_patience(patience, move || read_path_duration(&probe_path));

        if let Ok(duration) = result {
            let mut track = track_from_path(path);
            track.duration = Some(duration);
            return Some(track);
        }
    }
    None
}

/// Read the duration of a track's audio, waiting at most `patience`.
pub fn read_track_duration(
    source: &TrackSource,
    blobs: &BlobStore,
    patience: Duration,
) -> Result<Duration, PlayerError> {
    match source {
        TrackSource::Path(path) => {
            let path = path.clone();
            run_with_patience(patience, move || read_path_duration(&path))
        }
        TrackSource::Blob(url) => {
            let name = url.to_string();
            let bytes = blobs
                .get(url)
                .ok_or_else(|| PlayerError::load(&name, "blob was revoked"))?;
            run_with_patience(patience, move || read_blob_duration(&name, bytes))
        }
    }
}

/// Run a metadata read on a worker thread, bounding the wait. A read that
/// outlives its patience is abandoned; its late result is simply dropped with
/// the channel.
fn run_with_patience<F>(patience: Duration, read: F) -> Result<Duration, PlayerError>
where
    F: FnOnce() -> Result<Duration, PlayerError> + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let _ = tx.send(read());
    });

    match rx.recv_timeout(patience) {
        Ok(result) => result,
        Err(_) => Err(PlayerError::load(
            "metadata",
            format!("no response within {} ms", patience.as_millis()),
        )),
    }
}

fn read_path_duration(path: &Path) -> Result<Duration, PlayerError> {
    let name = path.display().to_string();
    let tagged = lofty::read_from_path(path)
        .map_err(|e| PlayerError::load(&name, e.to_string()))?;
    Ok(tagged.properties().duration())
}

fn read_blob_duration(name: &str, bytes: std::sync::Arc<[u8]>) -> Result<Duration, PlayerError> {
    let tagged = Probe::new(Cursor::new(bytes))
        .guess_file_type()
        .map_err(|e| PlayerError::load(name, e.to_string()))?
        .read()
        .map_err(|e| PlayerError::load(name, e.to_string()))?;
    Ok(tagged.properties().duration())
}
