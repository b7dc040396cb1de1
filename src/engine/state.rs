//! Pure playlist/transport state machine, free of any audio device concerns
//! so every transition rule is unit-testable. The worker thread drives it
//! and mirrors its decisions onto the actual sink.

use std::time::Duration;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::error::PlayerError;
use crate::library::Track;

use super::types::{PlaybackState, TrackRow};

/// Outcome of completing a load attempt.
#[derive(Debug)]
pub enum LoadOutcome {
    /// The metadata belongs to the current load; duration recorded.
    Committed,
    /// A newer load superseded this one; the result was discarded.
    Stale,
    /// The current load failed; the engine is in the `Error` state.
    Failed(PlayerError),
}

/// Playlist, cursor, transport state, master volume, and the load-generation
/// counter that shields the engine from stale load results.
///
/// Invariant: `0 <= current < tracks.len()` whenever the playlist is
/// non-empty; transport requests against an empty playlist are no-ops.
pub struct PlayerCore {
    tracks: Vec<Track>,
    current: usize,
    state: PlaybackState,
    volume: f32,
    generation: u64,
}

impl PlayerCore {
    pub fn with_tracks(tracks: Vec<Track>, volume: f32) -> Self {
        Self {
            tracks,
            current: 0,
            state: PlaybackState::Idle,
            volume: volume.clamp(0.0, 1.0),
            generation: 0,
        }
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Cursor position, `None` while the playlist is empty.
    pub fn current_index(&self) -> Option<usize> {
        (!self.tracks.is_empty()).then_some(self.current)
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.current_index().map(|i| &self.tracks[i])
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Clamp and store the master volume; the caller applies the returned
    /// value to the sink so both layers always agree.
    pub fn set_volume(&mut self, level: f32) -> f32 {
        self.volume = if level.is_finite() {
            level.clamp(0.0, 1.0)
        } else {
            self.volume
        };
        self.volume
    }

    pub fn add_tracks(&mut self, tracks: Vec<Track>) {
        self.tracks.extend(tracks);
        if self.current >= self.tracks.len() {
            self.current = 0;
        }
    }

    /// Remove a track, returning it so the caller can release any blob URL
    /// it owns.
    ///
    /// Cursor rules: a removal before the cursor shifts it back by one;
    /// removing the current track stops playback (`Idle`) and leaves the
    /// cursor on the next track, wrapping to 0 past the end; emptying the
    /// playlist resets the cursor entirely.
    pub fn remove_track(&mut self, index: usize) -> Result<RemovedTrack, PlayerError> {
        if index >= self.tracks.len() {
            return Err(PlayerError::Index {
                index,
                len: self.tracks.len(),
            });
        }

        let track = self.tracks.remove(index);
        let was_current = index == self.current;

        if self.tracks.is_empty() {
            self.current = 0;
            self.state = PlaybackState::Idle;
        } else if index < self.current {
            self.current -= 1;
        } else if was_current {
            if self.current >= self.tracks.len() {
                self.current = 0;
            }
            self.state = PlaybackState::Idle;
        }

        Ok(RemovedTrack { track, was_current })
    }

    /// Move the cursor forward circularly. `None` on an empty playlist.
    pub fn advance(&mut self) -> Option<usize> {
        if self.tracks.is_empty() {
            return None;
        }
        self.current = (self.current + 1) % self.tracks.len();
        Some(self.current)
    }

    /// Move the cursor backward circularly. `None` on an empty playlist.
    pub fn retreat(&mut self) -> Option<usize> {
        if self.tracks.is_empty() {
            return None;
        }
        self.current = (self.current + self.tracks.len() - 1) % self.tracks.len();
        Some(self.current)
    }

    /// Uniformly permute the playlist while relocating the cursor to the
    /// current track's new position, so playback continues undisturbed.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if self.tracks.len() < 2 {
            return;
        }
        let current = self.current;
        let mut indexed: Vec<(usize, Track)> = self.tracks.drain(..).enumerate().collect();
        indexed.shuffle(rng);

        if let Some(pos) = indexed.iter().position(|(orig, _)| *orig == current) {
            self.current = pos;
        }
        self.tracks = indexed.into_iter().map(|(_, t)| t).collect();
    }

    /// Start a load of the track at `index`: bounds-check, move the cursor,
    /// enter `Loading`, and hand out a generation tag. Any load finished
    /// under an older tag is discarded.
    pub fn begin_load(&mut self, index: usize) -> Result<u64, PlayerError> {
        if index >= self.tracks.len() {
            return Err(PlayerError::Index {
                index,
                len: self.tracks.len(),
            });
        }
        self.current = index;
        self.state = PlaybackState::Loading;
        self.generation += 1;
        Ok(self.generation)
    }

    /// Complete a load attempt started by [`begin_load`](Self::begin_load).
    pub fn finish_load(
        &mut self,
        generation: u64,
        result: Result<Duration, PlayerError>,
    ) -> LoadOutcome {
        if generation != self.generation {
            return LoadOutcome::Stale;
        }
        match result {
            Ok(duration) => {
                self.tracks[self.current].duration = Some(duration);
                LoadOutcome::Committed
            }
            Err(e) => {
                self.state = PlaybackState::Error;
                LoadOutcome::Failed(e)
            }
        }
    }

    pub fn mark_playing(&mut self) {
        self.state = PlaybackState::Playing;
    }

    pub fn mark_paused(&mut self) {
        self.state = PlaybackState::Paused;
    }

    pub fn mark_stopped(&mut self) {
        self.state = PlaybackState::Idle;
    }

    pub fn mark_error(&mut self) {
        self.state = PlaybackState::Error;
    }

    pub fn rows(&self) -> Vec<TrackRow> {
        self.tracks
            .iter()
            .map(|t| TrackRow {
                title: t.title.clone(),
                artist: t.artist.clone(),
                display: t.display.clone(),
                origin: t.origin(),
                duration: t.duration,
            })
            .collect()
    }
}

/// A track taken out of the playlist, with whether it was the one playing.
#[derive(Debug)]
pub struct RemovedTrack {
    pub track: Track,
    pub was_current: bool,
}
