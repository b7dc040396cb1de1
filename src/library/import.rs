use std::path::Path;

use crate::media::BlobStore;

use super::model::{Track, UNKNOWN_ARTIST};

/// A user-supplied file: name plus raw bytes, nothing touched on disk.
#[derive(Clone, Debug)]
pub struct LocalFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Check an imported file name against the configured audio extensions.
pub fn is_audio_name(name: &str, extensions: &[String]) -> bool {
    let exts: Vec<String> = extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    Path::new(name)
        .extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

/// Derive `(artist, title)` from a file name.
///
/// The stem is split on the first `" - "`: left becomes the artist, right the
/// title. Without the separator the whole stem is the title and the artist
/// falls back to [`UNKNOWN_ARTIST`].
pub fn split_artist_title(name: &str) -> (String, String) {
    let stem = Path::new(name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(name);

    match stem.split_once(" - ") {
        Some((artist, title)) if !artist.trim().is_empty() && !title.trim().is_empty() => {
            (artist.trim().to_string(), title.trim().to_string())
        }
        _ => (UNKNOWN_ARTIST.to_string(), stem.trim().to_string()),
    }
}

/// Turn imported files into `Local` tracks, registering each one's bytes in
/// the blob store. Non-audio files are skipped silently; the skip count is
/// returned so the caller can mention it in the status line.
pub fn import_files(
    files: Vec<LocalFile>,
    extensions: &[String],
    store: &BlobStore,
) -> (Vec<Track>, usize) {
    let mut tracks = Vec::new();
    let mut skipped = 0usize;

    for file in files {
        if !is_audio_name(&file.name, extensions) {
            skipped += 1;
            continue;
        }

        let (artist, title) = split_artist_title(&file.name);
        let url = store.create(file.bytes);
        tracks.push(Track::new_local(title, artist, url));
    }

    (tracks, skipped)
}
