use std::time::{Duration, Instant};

use super::params::{self, BASE_HUE_STEP};
use super::reactive::{VisualFrame, Visualizer};
use super::theme::{ThemeMode, ThemePreset};

const POLL: Duration = Duration::from_millis(350);

fn visualizer() -> Visualizer {
    Visualizer::new(ThemeMode::Dark, POLL, 0.85, true)
}

fn silent(_bins: &mut Vec<u8>) -> bool {
    false
}

fn loud(bins: &mut Vec<u8>) -> bool {
    bins.resize(512, 0);
    bins.fill(200);
    true
}

#[test]
fn activates_on_the_first_poll_when_playing() {
    let mut v = visualizer();
    let frame = v.tick(Instant::now(), true, loud);
    assert!(frame.active);
    assert!(v.is_active());
}

#[test]
fn poll_verdict_holds_between_poll_ticks() {
    let mut v = visualizer();
    let t0 = Instant::now();
    v.tick(t0, true, loud);

    // Playback stopped, but the next poll is not due yet.
    let frame = v.tick(t0 + Duration::from_millis(100), false, silent);
    assert!(frame.active);

    // One poll interval later the verdict flips.
    let frame = v.tick(t0 + POLL, false, silent);
    assert!(!frame.active);
}

#[test]
fn deactivation_returns_opacity_to_idle_baseline() {
    let mut v = visualizer();
    let t0 = Instant::now();
    for i in 0..10 {
        v.tick(t0 + Duration::from_millis(i * 16), true, loud);
    }

    let frame = v.tick(t0 + POLL, false, silent);
    let idle = ThemePreset::dark().idle_opacity;
    assert!((frame.opacity - idle).abs() < 1e-6);
}

#[test]
fn failed_bin_reads_count_as_zero_energy() {
    let mut v = visualizer();
    let t0 = Instant::now();
    let first = v.tick(t0, true, silent);
    let idle = ThemePreset::dark().idle_opacity;
    // EMA of zeros stays at zero, so opacity sits on the baseline.
    assert!((first.opacity - idle).abs() < 1e-6);
    assert!(first.active);
}

#[test]
fn energy_drives_opacity_above_the_baseline() {
    let mut v = visualizer();
    let t0 = Instant::now();
    let mut frame = v.tick(t0, true, loud);
    for i in 1..30 {
        frame = v.tick(t0 + Duration::from_millis(i * 16), true, loud);
    }
    assert!(frame.opacity > ThemePreset::dark().idle_opacity + 0.2);
    assert!(frame.opacity <= ThemePreset::dark().idle_opacity + ThemePreset::dark().max_boost);
}

#[test]
fn set_theme_applies_without_waiting_for_a_poll() {
    let mut v = visualizer();
    let t0 = Instant::now();
    v.tick(t0, false, silent);

    v.set_theme(ThemeMode::Light);
    let frame = v.tick(t0 + Duration::from_millis(1), false, silent);
    assert!((frame.opacity - ThemePreset::light().idle_opacity).abs() < 1e-6);
    assert_eq!(v.theme(), ThemeMode::Light);
}

#[test]
fn disabled_visualizer_never_activates() {
    let mut v = Visualizer::new(ThemeMode::Dark, POLL, 0.85, false);
    let frame = v.tick(Instant::now(), true, loud);
    assert!(!frame.active);
}

#[test]
fn mean_energy_is_normalized() {
    assert_eq!(params::mean_energy(&[]), 0.0);
    assert_eq!(params::mean_energy(&[0, 0, 0]), 0.0);
    assert!((params::mean_energy(&[255, 255]) - 1.0).abs() < 1e-6);
    assert!((params::mean_energy(&[0, 255]) - 0.5).abs() < 1e-6);
}

#[test]
fn smoothing_is_a_convex_blend() {
    let s = params::smooth(0.0, 1.0, 0.85);
    assert!((s - 0.15).abs() < 1e-6);
    let s = params::smooth(1.0, 1.0, 0.85);
    assert!((s - 1.0).abs() < 1e-6);
}

#[test]
fn hue_wraps_modulo_360() {
    let h = params::advance_hue(359.9, 1.0);
    assert!((0.0..360.0).contains(&h));

    let mut h = 0.0;
    for _ in 0..10_000 {
        h = params::advance_hue_idle(h);
        assert!((0.0..360.0).contains(&h));
    }
}

#[test]
fn hue_advance_scales_with_energy() {
    let still = params::advance_hue(100.0, 0.0);
    let moving = params::advance_hue(100.0, 1.0);
    assert!((still - (100.0 + BASE_HUE_STEP)).abs() < 1e-4);
    assert!(moving > still);
}

#[test]
fn sweep_phase_cycles() {
    assert!((params::sweep_phase(0.0)).abs() < 1e-6);
    assert!((params::sweep_phase(4.0) - 0.5).abs() < 1e-6);
    assert!(params::sweep_phase(8.0).abs() < 1e-6);
    assert!(params::sweep_phase(12.3) < 1.0);
}

#[test]
fn sweep_phase_shifts_the_backdrop_color() {
    let frame = |sweep: f32| VisualFrame {
        active: false,
        hue: 210.0,
        opacity: 0.5,
        saturation: 0.8,
        sweep,
        lightness: 0.35,
    };

    // A quarter cycle drifts the hue, so the rendered color changes.
    assert_ne!(frame(0.0).rgb(), frame(0.25).rgb());
    // A full cycle lands back on the starting color.
    assert_eq!(frame(0.0).rgb(), frame(1.0).rgb());
}

#[test]
fn hsl_primaries_round_trip() {
    assert_eq!(params::hsl_to_rgb(0.0, 1.0, 0.5), (255, 0, 0));
    assert_eq!(params::hsl_to_rgb(120.0, 1.0, 0.5), (0, 255, 0));
    assert_eq!(params::hsl_to_rgb(240.0, 1.0, 0.5), (0, 0, 255));
    assert_eq!(params::hsl_to_rgb(0.0, 0.0, 1.0), (255, 255, 255));
    assert_eq!(params::hsl_to_rgb(0.0, 0.0, 0.0), (0, 0, 0));
}
