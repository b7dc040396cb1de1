use std::f32::consts::PI;
use std::sync::Arc;

use super::*;

#[test]
fn ring_rounds_capacity_up_to_power_of_two() {
    let ring = SampleRing::new(1000);
    assert_eq!(ring.capacity(), 1024);
}

#[test]
fn ring_latest_returns_false_until_enough_samples() {
    let ring = SampleRing::new(16);
    ring.push_slice(&[1.0, 2.0, 3.0]);

    let mut out = [0.0f32; 4];
    assert!(!ring.latest(&mut out));

    ring.push_slice(&[4.0]);
    assert!(ring.latest(&mut out));
    assert_eq!(out, [1.0, 2.0, 3.0, 4.0]);
}

#[test]
fn ring_keeps_only_the_most_recent_window() {
    let ring = SampleRing::new(8);
    for chunk in (0..32).collect::<Vec<i32>>().chunks(5) {
        let samples: Vec<f32> = chunk.iter().map(|&v| v as f32).collect();
        ring.push_slice(&samples);
    }

    let mut out = [0.0f32; 8];
    assert!(ring.latest(&mut out));
    assert_eq!(out, [24.0, 25.0, 26.0, 27.0, 28.0, 29.0, 30.0, 31.0]);
}

#[test]
fn ring_clear_discards_history() {
    let ring = SampleRing::new(8);
    ring.push_slice(&[1.0; 8]);
    ring.clear();

    let mut out = [0.0f32; 1];
    assert!(!ring.latest(&mut out));
}

#[test]
fn ring_oversized_push_keeps_the_tail() {
    let ring = SampleRing::new(4);
    let samples: Vec<f32> = (0..10).map(|v| v as f32).collect();
    ring.push_slice(&samples);

    let mut out = [0.0f32; 4];
    assert!(ring.latest(&mut out));
    assert_eq!(out, [6.0, 7.0, 8.0, 9.0]);
}

#[test]
fn analyser_reports_unusable_without_samples() {
    let ring = Arc::new(SampleRing::new(FFT_SIZE));
    let mut analyser = Analyser::new(ring);

    let mut bins = Vec::new();
    assert!(!analyser.frequency_data(&mut bins));
    assert_eq!(bins.len(), analyser.bin_count());
    assert!(bins.iter().all(|&b| b == 0));
}

#[test]
fn analyser_concentrates_energy_near_the_tone_bin() {
    let ring = Arc::new(SampleRing::new(FFT_SIZE));

    // Pure tone landing exactly on bin 64.
    let tone: Vec<f32> = (0..FFT_SIZE)
        .map(|i| (2.0 * PI * 64.0 * i as f32 / FFT_SIZE as f32).sin())
        .collect();
    ring.push_slice(&tone);

    let mut analyser = Analyser::new(ring);
    let mut bins = Vec::new();
    assert!(analyser.frequency_data(&mut bins));

    let loudest = bins
        .iter()
        .enumerate()
        .max_by_key(|&(_, &v)| v)
        .map(|(i, _)| i)
        .unwrap();
    assert!(
        (63..=65).contains(&loudest),
        "expected peak near bin 64, got {loudest}"
    );
    assert!(bins[loudest] > bins[10]);
}

#[test]
fn analyser_reuses_the_output_buffer() {
    let ring = Arc::new(SampleRing::new(FFT_SIZE));
    ring.push_slice(&vec![0.1; FFT_SIZE]);

    let mut analyser = Analyser::new(ring);
    let mut bins = vec![0u8; analyser.bin_count()];
    let ptr = bins.as_ptr();

    assert!(analyser.frequency_data(&mut bins));
    assert_eq!(bins.as_ptr(), ptr);
    assert_eq!(bins.len(), analyser.bin_count());
}
