use std::sync::Arc;
use std::time::Duration;

use rodio::source::SeekError;
use rodio::{ChannelCount, SampleRate, Source};

use super::ring::SampleRing;

/// How many samples the tap buffers locally before flushing to the ring.
const FLUSH_EVERY: usize = 256;

/// Pass-through source that mirrors every sample into a [`SampleRing`].
///
/// The audio itself is untouched; the ring only ever sees a copy. A small
/// local buffer keeps lock traffic off the per-sample hot path.
pub struct Tap<S> {
    inner: S,
    ring: Arc<SampleRing>,
    pending: Vec<f32>,
}

impl<S> Tap<S> {
    pub fn new(inner: S, ring: Arc<SampleRing>) -> Self {
        Self {
            inner,
            ring,
            pending: Vec::with_capacity(FLUSH_EVERY),
        }
    }

    fn flush(&mut self) {
        if !self.pending.is_empty() {
            self.ring.push_slice(&self.pending);
            self.pending.clear();
        }
    }
}

impl<S> Iterator for Tap<S>
where
    S: Source,
{
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        match self.inner.next() {
            Some(sample) => {
                self.pending.push(sample);
                if self.pending.len() >= FLUSH_EVERY {
                    self.flush();
                }
                Some(sample)
            }
            None => {
                self.flush();
                None
            }
        }
    }
}

impl<S> Source for Tap<S>
where
    S: Source,
{
    fn current_span_len(&self) -> Option<usize> {
        self.inner.current_span_len()
    }

    fn channels(&self) -> ChannelCount {
        self.inner.channels()
    }

    fn sample_rate(&self) -> SampleRate {
        self.inner.sample_rate()
    }

    fn total_duration(&self) -> Option<Duration> {
        self.inner.total_duration()
    }

    fn try_seek(&mut self, pos: Duration) -> Result<(), SeekError> {
        self.inner.try_seek(pos)
    }
}

impl<S> Drop for Tap<S> {
    fn drop(&mut self) {
        if !self.pending.is_empty() {
            self.ring.push_slice(&self.pending);
        }
    }
}
