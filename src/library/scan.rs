use std::path::Path;

use lofty::prelude::*;
use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::model::{Track, UNKNOWN_ARTIST, make_display};

fn is_audio_file(path: &Path, extensions: &[String]) -> bool {
    let exts: Vec<String> = extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

/// Build a `Default`-origin track from a file on disk, preferring tag
/// metadata and falling back to the file name split.
pub(crate) fn track_from_path(path: &Path) -> Track {
    let (stem_artist, stem_title) = super::import::split_artist_title(
        path.file_name().and_then(|s| s.to_str()).unwrap_or("UNKNOWN"),
    );

    let mut title = stem_title;
    let mut artist = stem_artist;
    let mut duration = None;

    if let Ok(tagged) = lofty::read_from_path(path) {
        duration = Some(tagged.properties().duration());

        if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
            if let Some(v) = tag.title() {
                if !v.trim().is_empty() {
                    title = v.trim().to_string();
                }
            }
            if let Some(v) = tag.artist() {
                if !v.trim().is_empty() {
                    artist = v.trim().to_string();
                }
            }
        }
    }

    if artist.trim().is_empty() {
        artist = UNKNOWN_ARTIST.to_string();
    }

    let mut track = Track::new_default(title, artist, path.to_path_buf());
    track.duration = duration;
    track.display = make_display(&track.title, &track.artist);
    track
}

/// Scan a directory for audio files and return them as `Default` tracks,
/// sorted case-insensitively by display string.
pub fn scan(dir: &Path, settings: &LibrarySettings) -> Vec<Track> {
    let mut tracks: Vec<Track> = Vec::new();

    let mut walker = WalkDir::new(dir).follow_links(settings.follow_links);
    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    for entry in walker.into_iter().filter_map(Result::ok) {
        let path = entry.path();
        if path.is_file() && is_audio_file(path, &settings.extensions) {
            tracks.push(track_from_path(path));
        }
    }

    tracks.sort_by(|a, b| a.display.to_lowercase().cmp(&b.display.to_lowercase()));
    tracks
}
