use std::fs;
use std::time::Duration;

use tempfile::tempdir;

use super::*;
use crate::config::LibrarySettings;
use crate::media::BlobStore;

/// Render a tiny but valid mono 16-bit PCM WAV file.
fn minimal_wav(num_samples: u32) -> Vec<u8> {
    let data_len = num_samples * 2;
    let mut out = Vec::with_capacity(44 + data_len as usize);
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + data_len).to_le_bytes());
    out.extend_from_slice(b"WAVE");
    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes()); // PCM
    out.extend_from_slice(&1u16.to_le_bytes()); // mono
    out.extend_from_slice(&8000u32.to_le_bytes());
    out.extend_from_slice(&16000u32.to_le_bytes());
    out.extend_from_slice(&2u16.to_le_bytes());
    out.extend_from_slice(&16u16.to_le_bytes());
    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_len.to_le_bytes());
    out.extend(std::iter::repeat(0u8).take(data_len as usize));
    out
}

fn exts() -> Vec<String> {
    vec!["mp3".into(), "flac".into(), "wav".into(), "ogg".into()]
}

#[test]
fn split_artist_title_on_first_separator() {
    assert_eq!(
        split_artist_title("Artist X - Cool Song.mp3"),
        ("Artist X".to_string(), "Cool Song".to_string())
    );
    // Only the first " - " splits; the rest stays in the title.
    assert_eq!(
        split_artist_title("A - B - C.mp3"),
        ("A".to_string(), "B - C".to_string())
    );
}

#[test]
fn split_artist_title_falls_back_to_unknown_artist() {
    assert_eq!(
        split_artist_title("track07.wav"),
        (UNKNOWN_ARTIST.to_string(), "track07".to_string())
    );
    // A dash without surrounding spaces is not a separator.
    assert_eq!(
        split_artist_title("self-titled.ogg"),
        (UNKNOWN_ARTIST.to_string(), "self-titled".to_string())
    );
}

#[test]
fn is_audio_name_matches_extensions_case_insensitive() {
    assert!(is_audio_name("a.mp3", &exts()));
    assert!(is_audio_name("a.MP3", &exts()));
    assert!(is_audio_name("a.wav", &exts()));
    assert!(!is_audio_name("a.txt", &exts()));
    assert!(!is_audio_name("a", &exts()));
}

#[test]
fn import_files_registers_audio_and_skips_the_rest() {
    let store = BlobStore::new();
    let files = vec![
        LocalFile {
            name: "Artist X - Cool Song.mp3".into(),
            bytes: vec![1, 2, 3],
        },
        LocalFile {
            name: "notes.txt".into(),
            bytes: vec![4],
        },
        LocalFile {
            name: "track07.wav".into(),
            bytes: vec![5, 6],
        },
    ];

    let (tracks, skipped) = import_files(files, &exts(), &store);

    assert_eq!(tracks.len(), 2);
    assert_eq!(skipped, 1);
    assert_eq!(store.len(), 2);

    assert_eq!(tracks[0].artist, "Artist X");
    assert_eq!(tracks[0].title, "Cool Song");
    assert_eq!(tracks[0].display, "Artist X - Cool Song");
    assert_eq!(tracks[0].origin(), TrackOrigin::Local);

    assert_eq!(tracks[1].artist, UNKNOWN_ARTIST);
    assert_eq!(tracks[1].title, "track07");
}

#[test]
fn candidate_paths_are_ordered_stem_major() {
    let dir = std::path::Path::new("audio");
    let paths = candidate_paths(dir, &["mp3".into(), "wav".into()]);

    assert_eq!(paths[0], dir.join("default.mp3"));
    assert_eq!(paths[1], dir.join("default.wav"));
    assert_eq!(paths[2], dir.join("demo.mp3"));
    assert_eq!(paths.len(), PROBE_STEMS.len() * 2);
}

#[test]
fn probe_picks_the_first_candidate_that_loads() {
    let dir = tempdir().unwrap();
    let candidates = candidate_paths(dir.path(), &["wav".into()]);

    // Only the third candidate resolves.
    fs::write(&candidates[2], minimal_wav(8000)).unwrap();

    let track = probe_default_tracks(&candidates, Duration::from_secs(3))
        .expect("third candidate should resolve");

    assert!(matches!(
        &track.source,
        TrackSource::Path(p) if p == &candidates[2]
    ));
    assert_eq!(track.origin(), TrackOrigin::Default);
    assert_eq!(track.duration, Some(Duration::from_secs(1)));
}

#[test]
fn probe_returns_none_when_nothing_resolves() {
    let dir = tempdir().unwrap();
    let candidates = candidate_paths(dir.path(), &["wav".into()]);
    assert!(probe_default_tracks(&candidates, Duration::from_millis(500)).is_none());
}

#[test]
fn read_track_duration_reads_blob_audio() {
    let store = BlobStore::new();
    let url = store.create(minimal_wav(16000));
    let source = TrackSource::Blob(url.clone());

    let d = read_track_duration(&source, &store, Duration::from_secs(3)).unwrap();
    assert_eq!(d, Duration::from_secs(2));

    store.revoke(&url);
    assert!(read_track_duration(&source, &store, Duration::from_secs(3)).is_err());
}

#[test]
fn scan_filters_non_audio_and_sorts_by_display() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("b.wav"), minimal_wav(100)).unwrap();
    fs::write(dir.path().join("A.wav"), minimal_wav(100)).unwrap();
    fs::write(dir.path().join("c.txt"), b"ignore me").unwrap();

    let tracks = scan(dir.path(), &LibrarySettings::default());
    assert_eq!(tracks.len(), 2);
    assert_eq!(tracks[0].title, "A");
    assert_eq!(tracks[1].title, "b");
}

#[test]
fn scan_falls_back_to_filename_when_tags_are_unreadable() {
    let dir = tempdir().unwrap();
    // Not a decodable file, but the name still carries artist/title.
    fs::write(dir.path().join("Some Band - Anthem.mp3"), b"garbage").unwrap();

    let tracks = scan(dir.path(), &LibrarySettings::default());
    assert_eq!(tracks.len(), 1);
    assert_eq!(tracks[0].artist, "Some Band");
    assert_eq!(tracks[0].title, "Anthem");
    assert_eq!(tracks[0].duration, None);
}

#[test]
fn scan_respects_recursive_false() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("root.wav"), minimal_wav(100)).unwrap();
    let sub = dir.path().join("sub");
    fs::create_dir_all(&sub).unwrap();
    fs::write(sub.join("child.wav"), minimal_wav(100)).unwrap();

    let settings = LibrarySettings {
        recursive: false,
        ..LibrarySettings::default()
    };
    let tracks = scan(dir.path(), &settings);
    assert_eq!(tracks.len(), 1);
    assert_eq!(tracks[0].title, "root");
}
