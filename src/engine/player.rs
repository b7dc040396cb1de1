use std::sync::mpsc::{Sender, channel};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use crate::analyser::{Analyser, FFT_SIZE, SampleRing};
use crate::config::{AudioSettings, LibrarySettings};
use crate::library::{LocalFile, Track};
use crate::media::BlobStore;

use super::thread::{WorkerSeed, spawn_engine_thread};
use super::types::{AnalyserHandle, EngineCmd, EngineSnapshot, SnapshotHandle};

/// Public handle to the audio engine.
///
/// Construction spawns the worker thread; commands go through [`send`]
/// (fire-and-forget), observation through the snapshot and analyser handles.
/// [`shutdown`] is idempotent and also runs on drop.
///
/// [`send`]: Self::send
/// [`shutdown`]: Self::shutdown
pub struct AudioPlayerEngine {
    tx: Sender<EngineCmd>,
    snapshot: SnapshotHandle,
    blobs: BlobStore,
    analyser: AnalyserHandle,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl AudioPlayerEngine {
    pub fn new(tracks: Vec<Track>, audio: &AudioSettings, library: &LibrarySettings) -> Self {
        let (tx, rx) = channel();
        let snapshot: SnapshotHandle = Arc::new(Mutex::new(EngineSnapshot::default()));
        let blobs = BlobStore::new();
        // Twice the FFT window so a fresh analysis never races the write head.
        let ring = Arc::new(SampleRing::new(FFT_SIZE * 2));
        let analyser = Arc::new(Mutex::new(Analyser::new(ring.clone())));

        let handle = spawn_engine_thread(WorkerSeed {
            tracks,
            rx,
            snapshot: snapshot.clone(),
            blobs: blobs.clone(),
            ring,
            volume: audio.volume,
            load_patience: Duration::from_millis(audio.load_patience_ms),
            progress_tick: Duration::from_millis(audio.progress_tick_ms),
            extensions: library.extensions.clone(),
        });

        Self {
            tx,
            snapshot,
            blobs,
            analyser,
            join: Mutex::new(Some(handle)),
        }
    }

    /// Queue a command for the worker. Errors (worker already gone) are
    /// ignored; the snapshot simply stops changing.
    pub fn send(&self, cmd: EngineCmd) {
        let _ = self.tx.send(cmd);
    }

    pub fn snapshot_handle(&self) -> SnapshotHandle {
        self.snapshot.clone()
    }

    pub fn analyser_handle(&self) -> AnalyserHandle {
        self.analyser.clone()
    }

    pub fn blob_store(&self) -> BlobStore {
        self.blobs.clone()
    }

    /// Hand user-supplied files to the worker for import.
    pub fn add_local_files(&self, files: Vec<LocalFile>) {
        self.send(EngineCmd::AddFiles(files));
    }

    /// Stop playback, revoke imported blob URLs, and join the worker.
    pub fn shutdown(&self) {
        let handle = self.join.lock().ok().and_then(|mut j| j.take());
        if let Some(handle) = handle {
            let _ = self.tx.send(EngineCmd::Quit);
            let _ = handle.join();
        }
    }
}

impl Drop for AudioPlayerEngine {
    fn drop(&mut self) {
        self.shutdown();
    }
}
