use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Fixed-capacity overwrite ring holding the most recent audio samples.
///
/// The producer is the playback tap, the consumer the analyser; neither side
/// ever blocks on the other beyond a short buffer copy. Capacity is rounded
/// up to a power of two so positions wrap with a mask.
pub struct SampleRing {
    buf: Mutex<Vec<f32>>,
    /// Total samples ever written; the write position is `written & mask`.
    written: AtomicUsize,
    capacity: usize,
    mask: usize,
}

impl SampleRing {
    pub fn new(requested_capacity: usize) -> Self {
        let capacity = requested_capacity.max(2).next_power_of_two();
        Self {
            buf: Mutex::new(vec![0.0; capacity]),
            written: AtomicUsize::new(0),
            capacity,
            mask: capacity - 1,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append samples, overwriting the oldest data when full.
    pub fn push_slice(&self, samples: &[f32]) {
        if samples.is_empty() {
            return;
        }
        // Only the tail fits; anything older would be overwritten anyway.
        let samples = if samples.len() > self.capacity {
            &samples[samples.len() - self.capacity..]
        } else {
            samples
        };

        let mut buf = self.buf.lock().expect("sample ring poisoned");
        let written = self.written.load(Ordering::Acquire);
        let start = written & self.mask;

        let first = (self.capacity - start).min(samples.len());
        buf[start..start + first].copy_from_slice(&samples[..first]);
        if first < samples.len() {
            buf[..samples.len() - first].copy_from_slice(&samples[first..]);
        }
        drop(buf);

        self.written
            .store(written + samples.len(), Ordering::Release);
    }

    /// Copy the most recent `out.len()` samples into `out`, oldest first.
    /// Returns `false` when fewer samples than requested have been written.
    pub fn latest(&self, out: &mut [f32]) -> bool {
        let n = out.len();
        if n == 0 || n > self.capacity {
            return false;
        }
        let written = self.written.load(Ordering::Acquire);
        if written < n {
            return false;
        }

        let buf = self.buf.lock().expect("sample ring poisoned");
        let end = written & self.mask;
        let start = (end + self.capacity - n) & self.mask;

        if start < end || end == 0 {
            let end = if end == 0 { self.capacity } else { end };
            out.copy_from_slice(&buf[start..end]);
        } else {
            let first = self.capacity - start;
            out[..first].copy_from_slice(&buf[start..]);
            out[first..].copy_from_slice(&buf[..end]);
        }
        true
    }

    /// Forget everything written so far (used when the source node changes).
    pub fn clear(&self) {
        self.written.store(0, Ordering::Release);
    }
}
