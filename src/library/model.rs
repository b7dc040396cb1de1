use std::path::PathBuf;
use std::time::Duration;

use crate::media::BlobUrl;

/// Artist used when a file name or tag carries none.
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// Where a track's audio lives.
#[derive(Clone, Debug)]
pub enum TrackSource {
    /// A file on disk (scanned or probed default asset).
    Path(PathBuf),
    /// Bytes parked in the blob store (imported this session).
    Blob(BlobUrl),
}

/// Lifecycle class of a track.
///
/// `Local` tracks own a blob URL that must be revoked when the track is
/// removed or the engine is destroyed; `Default` tracks own nothing extra.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TrackOrigin {
    Default,
    Local,
}

#[derive(Clone, Debug)]
pub struct Track {
    pub title: String,
    pub artist: String,
    pub source: TrackSource,
    /// Populated once metadata has been read.
    pub duration: Option<Duration>,
    pub display: String,
}

impl Track {
    pub fn new_default(title: String, artist: String, path: PathBuf) -> Self {
        let display = make_display(&title, &artist);
        Self {
            title,
            artist,
            source: TrackSource::Path(path),
            duration: None,
            display,
        }
    }

    pub fn new_local(title: String, artist: String, url: BlobUrl) -> Self {
        let display = make_display(&title, &artist);
        Self {
            title,
            artist,
            source: TrackSource::Blob(url),
            duration: None,
            display,
        }
    }

    pub fn origin(&self) -> TrackOrigin {
        match self.source {
            TrackSource::Path(_) => TrackOrigin::Default,
            TrackSource::Blob(_) => TrackOrigin::Local,
        }
    }
}

pub(crate) fn make_display(title: &str, artist: &str) -> String {
    let artist = artist.trim();
    if artist.is_empty() {
        title.trim().to_string()
    } else {
        format!("{} - {}", artist, title.trim())
    }
}
