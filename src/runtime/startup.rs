use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::{LibrarySettings, Settings};
use crate::error::PlayerError;
use crate::library::{LocalFile, Track, candidate_paths, is_audio_name, probe_default_tracks, scan};

/// Turn command-line arguments into an initial playlist: directories are
/// scanned for audio files, plain files are read into memory for blob-backed
/// import. Unreadable arguments are reported and skipped.
pub fn collect_initial_tracks(
    args: impl Iterator<Item = String>,
    library: &LibrarySettings,
) -> (Vec<Track>, Vec<LocalFile>) {
    let mut tracks = Vec::new();
    let mut files = Vec::new();

    for arg in args {
        let path = PathBuf::from(&arg);
        if path.is_dir() {
            tracks.extend(scan(&path, library));
        } else if path.is_file() {
            let name = path
                .file_name()
                .and_then(|s| s.to_str())
                .unwrap_or(&arg)
                .to_string();
            if !is_audio_name(&name, &library.extensions) {
                eprintln!("resono: {}", PlayerError::UnsupportedFile(name));
                continue;
            }
            match fs::read(&path) {
                Ok(bytes) => files.push(LocalFile { name, bytes }),
                Err(e) => eprintln!("resono: cannot read {arg}: {e}"),
            }
        } else {
            eprintln!("resono: no such file or directory: {arg}");
        }
    }

    (tracks, files)
}

/// Probe the configured directory for a bundled default track.
pub fn probe_fallback(settings: &Settings) -> Option<Track> {
    let candidates = candidate_paths(
        Path::new(&settings.library.probe_dir),
        &settings.library.extensions,
    );
    probe_default_tracks(
        &candidates,
        Duration::from_millis(settings.audio.load_patience_ms),
    )
}
