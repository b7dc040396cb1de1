use std::f32::consts::PI;
use std::sync::Arc;

use realfft::num_complex::Complex32;
use realfft::{RealFftPlanner, RealToComplex};

use super::ring::SampleRing;

/// FFT window length. The analyser exposes `FFT_SIZE / 2` frequency bins,
/// mirroring the half-spectrum a browser analyser node reports.
pub const FFT_SIZE: usize = 1024;

/// Byte scaling range in decibels; magnitudes at or below `MIN_DB` map to 0,
/// at or above `MAX_DB` map to 255.
const MIN_DB: f32 = -100.0;
const MAX_DB: f32 = -30.0;

/// Frequency-domain view over the most recent samples in the ring.
///
/// Long-lived (engine lifetime) and read-only with respect to the audio:
/// it never mutates the ring beyond consuming a snapshot.
pub struct Analyser {
    ring: Arc<SampleRing>,
    fft: Arc<dyn RealToComplex<f32>>,
    window: Vec<f32>,
    input: Vec<f32>,
    windowed: Vec<f32>,
    spectrum: Vec<Complex32>,
}

impl Analyser {
    pub fn new(ring: Arc<SampleRing>) -> Self {
        let fft = RealFftPlanner::<f32>::new().plan_fft_forward(FFT_SIZE);
        let spectrum = fft.make_output_vec();

        // Hann window keeps bin leakage from swamping the energy estimate.
        let window = (0..FFT_SIZE)
            .map(|i| 0.5 * (1.0 - (2.0 * PI * i as f32 / FFT_SIZE as f32).cos()))
            .collect();

        Self {
            ring,
            fft,
            window,
            input: vec![0.0; FFT_SIZE],
            windowed: vec![0.0; FFT_SIZE],
            spectrum,
        }
    }

    pub fn bin_count(&self) -> usize {
        FFT_SIZE / 2
    }

    /// Fill `out` with byte-scaled magnitudes for each frequency bin.
    ///
    /// `out` is resized only when its length does not match the bin count, so
    /// a caller reusing the same buffer allocates once. Returns `false` when
    /// no usable snapshot exists yet (not enough samples, or an FFT failure);
    /// the caller should treat that frame as silent.
    pub fn frequency_data(&mut self, out: &mut Vec<u8>) -> bool {
        if out.len() != self.bin_count() {
            out.resize(self.bin_count(), 0);
        }

        if !self.ring.latest(&mut self.input) {
            out.fill(0);
            return false;
        }

        for (dst, (sample, w)) in self
            .windowed
            .iter_mut()
            .zip(self.input.iter().zip(self.window.iter()))
        {
            *dst = sample * w;
        }

        if self
            .fft
            .process(&mut self.windowed, &mut self.spectrum)
            .is_err()
        {
            out.fill(0);
            return false;
        }

        let scale = 2.0 / FFT_SIZE as f32;
        for (byte, bin) in out.iter_mut().zip(self.spectrum.iter()) {
            let magnitude = bin.norm() * scale;
            let db = 20.0 * magnitude.max(1e-10).log10();
            let normalized = ((db - MIN_DB) / (MAX_DB - MIN_DB)).clamp(0.0, 1.0);
            *byte = (normalized * 255.0) as u8;
        }
        true
    }
}
