//! The engine worker thread: owns the output stream, the current sink, and
//! the [`PlayerCore`], executes commands, and auto-advances when a track
//! runs out. All failures end up as status text, never as a panic or an
//! unwound error.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;

use rodio::{OutputStream, OutputStreamBuilder, Sink};

use crate::analyser::SampleRing;
use crate::error::PlayerError;
use crate::library::{Track, TrackSource, import_files, read_track_duration};
use crate::media::BlobStore;

use super::sink::create_sink_at;
use super::state::{LoadOutcome, PlayerCore};
use super::types::{EngineCmd, PlaybackState, SnapshotHandle};

/// Everything the worker needs at spawn time.
pub(super) struct WorkerSeed {
    pub tracks: Vec<Track>,
    pub rx: Receiver<EngineCmd>,
    pub snapshot: SnapshotHandle,
    pub blobs: BlobStore,
    pub ring: Arc<SampleRing>,
    pub volume: f32,
    pub load_patience: Duration,
    pub progress_tick: Duration,
    pub extensions: Vec<String>,
}

pub(super) fn spawn_engine_thread(seed: WorkerSeed) -> JoinHandle<()> {
    thread::spawn(move || Worker::new(seed).run())
}

struct Worker {
    core: PlayerCore,
    rx: Receiver<EngineCmd>,
    snapshot: SnapshotHandle,
    blobs: BlobStore,
    ring: Arc<SampleRing>,
    /// Opened lazily on the first play attempt so a missing output device
    /// only surfaces when playback is actually requested, and a later
    /// attempt can retry.
    stream: Option<OutputStream>,
    sink: Option<Sink>,
    status: Option<String>,
    load_patience: Duration,
    extensions: Vec<String>,
    ticker_stop: Arc<AtomicBool>,
}

impl Worker {
    fn new(seed: WorkerSeed) -> Self {
        let ticker_stop = Arc::new(AtomicBool::new(false));
        spawn_progress_ticker(seed.snapshot.clone(), seed.progress_tick, ticker_stop.clone());

        Self {
            core: PlayerCore::with_tracks(seed.tracks, seed.volume),
            rx: seed.rx,
            snapshot: seed.snapshot,
            blobs: seed.blobs,
            ring: seed.ring,
            stream: None,
            sink: None,
            status: None,
            load_patience: seed.load_patience,
            extensions: seed.extensions,
            ticker_stop,
        }
    }

    fn run(mut self) {
        if self.core.is_empty() {
            self.status = Some("No audio files found".to_string());
        }
        self.publish();

        loop {
            match self.rx.recv_timeout(Duration::from_millis(200)) {
                Ok(EngineCmd::Quit) => break,
                Ok(cmd) => self.handle(cmd),
                Err(RecvTimeoutError::Timeout) => self.auto_advance(),
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }

        self.teardown();
    }

    fn handle(&mut self, cmd: EngineCmd) {
        match cmd {
            EngineCmd::Play => self.play(),
            EngineCmd::Pause => {
                if self.core.state() == PlaybackState::Playing {
                    self.pause();
                }
            }
            EngineCmd::TogglePause => match self.core.state() {
                PlaybackState::Playing => self.pause(),
                PlaybackState::Paused => self.play(),
                _ => self.play(),
            },
            EngineCmd::Stop => self.stop(),
            EngineCmd::PlayIndex(i) => self.do_play(i),
            EngineCmd::Next => {
                if let Some(i) = self.core.advance() {
                    self.do_play(i);
                }
            }
            EngineCmd::Prev => {
                if let Some(i) = self.core.retreat() {
                    self.do_play(i);
                }
            }
            EngineCmd::Shuffle => {
                self.core.shuffle(&mut rand::rng());
                self.publish();
            }
            EngineCmd::SetVolume(level) => {
                // Clamp once in the core, then mirror the same value onto the
                // sink so both layers always agree.
                let v = self.core.set_volume(level);
                if let Some(s) = &self.sink {
                    s.set_volume(v);
                }
                self.publish();
            }
            EngineCmd::SeekTo(fraction) => self.seek_to(fraction),
            EngineCmd::AddFiles(files) => {
                let (tracks, skipped) = import_files(files, &self.extensions, &self.blobs);
                if skipped > 0 {
                    self.status = Some(format!("Skipped {skipped} non-audio file(s)"));
                }
                self.core.add_tracks(tracks);
                self.publish();
            }
            EngineCmd::AddTracks(tracks) => {
                self.core.add_tracks(tracks);
                self.publish();
            }
            EngineCmd::RemoveTrack(i) => self.remove_track(i),
            EngineCmd::Quit => unreachable!("handled by the main loop"),
        }
    }

    /// Load and play the track at `index`, tearing down the previous source
    /// node first. Failures leave the playlist and cursor intact.
    fn do_play(&mut self, index: usize) {
        let generation = match self.core.begin_load(index) {
            Ok(g) => g,
            Err(e) => {
                self.status = Some(e.to_string());
                self.publish();
                return;
            }
        };
        self.status = None;
        self.publish();

        if let Some(s) = self.sink.take() {
            s.stop();
        }
        self.ring.clear();

        let track = self
            .core
            .current_track()
            .expect("begin_load validated the index")
            .clone();

        let metadata = read_track_duration(&track.source, &self.blobs, self.load_patience);
        match self.core.finish_load(generation, metadata) {
            LoadOutcome::Stale => return,
            LoadOutcome::Failed(e) => {
                self.status = Some(e.to_string());
                self.publish();
                return;
            }
            LoadOutcome::Committed => {}
        }

        self.start_sink(&track, Duration::ZERO);
    }

    /// Build and start a sink for `track` at `start_at`.
    fn start_sink(&mut self, track: &Track, start_at: Duration) {
        if let Err(e) = self.ensure_stream() {
            self.core.mark_error();
            self.status = Some(e.to_string());
            self.publish();
            return;
        }
        let stream = self.stream.as_ref().expect("stream opened above");

        match create_sink_at(
            stream,
            track,
            &self.blobs,
            &self.ring,
            start_at,
            self.core.volume(),
        ) {
            Ok(sink) => {
                sink.play();
                self.sink = Some(sink);
                self.core.mark_playing();
                self.set_elapsed(start_at);
                self.publish();
            }
            Err(e) => {
                self.core.mark_error();
                self.status = Some(e.to_string());
                self.publish();
            }
        }
    }

    /// Open the output stream if it is not already open. Safe to call
    /// redundantly, like resuming an already-running audio context.
    fn ensure_stream(&mut self) -> Result<(), PlayerError> {
        if self.stream.is_some() {
            return Ok(());
        }
        let mut stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| PlayerError::Playback(e.to_string()))?;
        // rodio logs to stderr when OutputStream is dropped. That's useful in
        // debugging, but noisy for a TUI app.
        stream.log_on_drop(false);
        self.stream = Some(stream);
        Ok(())
    }

    fn play(&mut self) {
        match self.core.state() {
            PlaybackState::Paused => {
                if let Some(s) = &self.sink {
                    s.play();
                    self.core.mark_playing();
                    self.publish();
                } else if let Some(i) = self.core.current_index() {
                    self.do_play(i);
                }
            }
            PlaybackState::Playing | PlaybackState::Loading => {}
            PlaybackState::Idle | PlaybackState::Error => {
                if let Some(i) = self.core.current_index() {
                    self.do_play(i);
                }
            }
        }
    }

    fn pause(&mut self) {
        if let Some(s) = &self.sink {
            s.pause();
        }
        self.core.mark_paused();
        self.publish();
    }

    fn stop(&mut self) {
        if let Some(s) = self.sink.take() {
            s.stop();
        }
        self.ring.clear();
        self.core.mark_stopped();
        self.set_elapsed(Duration::ZERO);
        self.publish();
    }

    /// Seek by rebuilding the sink at the target offset; a no-op while the
    /// current track's duration is unknown.
    fn seek_to(&mut self, fraction: f32) {
        let Some(track) = self.core.current_track().cloned() else {
            return;
        };
        let Some(duration) = track.duration.filter(|d| !d.is_zero()) else {
            return;
        };
        if self.sink.is_none() {
            return;
        }

        let target = duration.mul_f32(fraction.clamp(0.0, 1.0).min(0.999));
        let was_paused = self.core.state() == PlaybackState::Paused;

        if let Some(s) = self.sink.take() {
            s.stop();
        }
        self.ring.clear();

        if let Err(e) = self.ensure_stream() {
            self.core.mark_error();
            self.status = Some(e.to_string());
            self.publish();
            return;
        }
        let stream = self.stream.as_ref().expect("stream opened above");

        match create_sink_at(
            stream,
            &track,
            &self.blobs,
            &self.ring,
            target,
            self.core.volume(),
        ) {
            Ok(sink) => {
                if !was_paused {
                    sink.play();
                    self.core.mark_playing();
                }
                self.sink = Some(sink);
                self.set_elapsed(target);
                self.publish();
            }
            Err(e) => {
                self.core.mark_error();
                self.status = Some(e.to_string());
                self.publish();
            }
        }
    }

    fn remove_track(&mut self, index: usize) {
        match self.core.remove_track(index) {
            Ok(removed) => {
                if removed.was_current {
                    if let Some(s) = self.sink.take() {
                        s.stop();
                    }
                    self.ring.clear();
                    self.set_elapsed(Duration::ZERO);
                }
                if let TrackSource::Blob(url) = &removed.track.source {
                    self.blobs.revoke(url);
                }
                self.publish();
            }
            Err(e) => {
                self.status = Some(e.to_string());
                self.publish();
            }
        }
    }

    /// Circular auto-advance once the current sink has drained.
    fn auto_advance(&mut self) {
        let drained = self.core.state() == PlaybackState::Playing
            && self.sink.as_ref().map(|s| s.empty()).unwrap_or(false);

        if drained {
            if let Some(i) = self.core.advance() {
                self.do_play(i);
            }
        }
    }

    fn teardown(&mut self) {
        if let Some(s) = self.sink.take() {
            s.stop();
        }
        // Every registered blob belongs to a Local track at this point, so
        // dropping the whole registry is the same as revoking one by one.
        self.blobs.clear();
        self.core.mark_stopped();
        self.set_elapsed(Duration::ZERO);
        self.publish();
        self.ticker_stop.store(true, Ordering::Release);
        // Dropping `stream` here closes the audio context.
        self.stream = None;
    }

    fn publish(&self) {
        if let Ok(mut snap) = self.snapshot.lock() {
            snap.state = self.core.state();
            snap.current = self.core.current_index();
            snap.duration = self.core.current_track().and_then(|t| t.duration);
            snap.volume = self.core.volume();
            snap.status = self.status.clone();
            snap.rows = self.core.rows();
        }
    }

    fn set_elapsed(&self, elapsed: Duration) {
        if let Ok(mut snap) = self.snapshot.lock() {
            snap.elapsed = elapsed;
        }
    }
}

/// 1 Hz progress reporting: bumps the shared elapsed clock while playing.
/// Stops when the worker tears down so no callback outlives the engine.
fn spawn_progress_ticker(snapshot: SnapshotHandle, tick: Duration, stop: Arc<AtomicBool>) {
    thread::spawn(move || {
        loop {
            thread::sleep(tick);
            if stop.load(Ordering::Acquire) {
                break;
            }
            if let Ok(mut snap) = snapshot.lock() {
                if snap.state == PlaybackState::Playing {
                    snap.elapsed += tick;
                }
            }
        }
    });
}

impl Drop for Worker {
    fn drop(&mut self) {
        self.ticker_stop.store(true, Ordering::Release);
    }
}
