//! Engine-facing small types: commands, playback state, and the shared
//! snapshot the UI and MPRIS read.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::analyser::Analyser;
use crate::library::{LocalFile, Track, TrackOrigin};

/// Transport state of the engine.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Idle,
    Loading,
    Playing,
    Paused,
    Error,
}

/// Commands accepted by the engine worker.
#[derive(Debug)]
pub enum EngineCmd {
    /// Start or resume playback. With nothing loaded and a non-empty
    /// playlist, loads the track at the cursor first.
    Play,
    /// Pause playback if currently playing.
    Pause,
    /// Pause when playing, otherwise behave like `Play`.
    TogglePause,
    /// Stop playback and discard the current source node.
    Stop,
    /// Stop the current track and play the given playlist index.
    PlayIndex(usize),
    /// Advance the cursor circularly and play.
    Next,
    /// Retreat the cursor circularly and play.
    Prev,
    /// Randomly permute the playlist, keeping the current track's identity
    /// at the cursor. Playback is not interrupted.
    Shuffle,
    /// Set the master volume, clamped to [0, 1].
    SetVolume(f32),
    /// Seek to a fraction of the current track's duration. No-op while the
    /// duration is unknown.
    SeekTo(f32),
    /// Import user-supplied files as `Local` tracks.
    AddFiles(Vec<LocalFile>),
    /// Append already-built tracks to the playlist.
    AddTracks(Vec<Track>),
    /// Remove a track, revoking its blob URL if it owns one.
    RemoveTrack(usize),
    /// Tear down: stop playback, revoke every Local URL, close the stream.
    Quit,
}

/// One playlist row as shown to the display sink.
#[derive(Clone, Debug)]
pub struct TrackRow {
    pub title: String,
    pub artist: String,
    pub display: String,
    pub origin: TrackOrigin,
    pub duration: Option<Duration>,
}

/// Runtime playback information shared with the UI and MPRIS.
#[derive(Clone, Debug, Default)]
pub struct EngineSnapshot {
    pub state: PlaybackState,
    /// Cursor position, `None` while the playlist is empty.
    pub current: Option<usize>,
    pub elapsed: Duration,
    pub duration: Option<Duration>,
    pub volume: f32,
    /// Human-readable status ("Failed to load ...", "No audio files found").
    pub status: Option<String>,
    pub rows: Vec<TrackRow>,
}

impl EngineSnapshot {
    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn current_row(&self) -> Option<&TrackRow> {
        self.current.and_then(|i| self.rows.get(i))
    }
}

pub type SnapshotHandle = Arc<Mutex<EngineSnapshot>>;
pub type AnalyserHandle = Arc<Mutex<Analyser>>;
