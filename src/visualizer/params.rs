//! The per-frame math, kept as free functions so every curve is testable
//! without a clock or an analyser.

use super::theme::ThemePreset;

/// Hue advance per frame with no audio energy, in degrees.
pub const BASE_HUE_STEP: f32 = 0.6;
/// Additional hue advance per frame at full energy, in degrees.
pub const ENERGY_HUE_GAIN: f32 = 4.0;
/// Idle-sweep hue advance per frame, in degrees.
pub const IDLE_HUE_STEP: f32 = 0.25;
/// Background sweep period in seconds.
pub const SWEEP_PERIOD_SECS: f32 = 8.0;
/// How far the sweep drifts the backdrop hue in either direction, degrees.
pub const SWEEP_HUE_SPAN: f32 = 24.0;

/// Mean bin magnitude normalized to [0, 1].
pub fn mean_energy(bins: &[u8]) -> f32 {
    if bins.is_empty() {
        return 0.0;
    }
    let sum: u32 = bins.iter().map(|&b| b as u32).sum();
    sum as f32 / (bins.len() as f32 * 255.0)
}

/// Exponential moving average; `smoothing` is the weight of the old value.
pub fn smooth(previous: f32, energy: f32, smoothing: f32) -> f32 {
    previous * smoothing + energy * (1.0 - smoothing)
}

/// Advance the hue by the base step plus an energy-proportional step,
/// wrapping modulo 360.
pub fn advance_hue(hue: f32, energy: f32) -> f32 {
    (hue + BASE_HUE_STEP + energy * ENERGY_HUE_GAIN).rem_euclid(360.0)
}

pub fn advance_hue_idle(hue: f32) -> f32 {
    (hue + IDLE_HUE_STEP).rem_euclid(360.0)
}

/// Backdrop opacity for the smoothed energy under a theme preset.
pub fn opacity(preset: &ThemePreset, smoothed: f32) -> f32 {
    preset.idle_opacity + smoothed.clamp(0.0, 1.0) * preset.max_boost
}

/// Color saturation for the smoothed energy; never fully gray, never neon.
pub fn saturation(smoothed: f32) -> f32 {
    0.45 + smoothed.clamp(0.0, 1.0) * 0.45
}

/// Wall-clock sweep phase in [0, 1), one cycle per [`SWEEP_PERIOD_SECS`].
pub fn sweep_phase(elapsed_secs: f32) -> f32 {
    (elapsed_secs / SWEEP_PERIOD_SECS).fract()
}

/// HSL to RGB, `h` in degrees, `s`/`l` in [0, 1].
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> (u8, u8, u8) {
    let h = h.rem_euclid(360.0);
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);

    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0).rem_euclid(2.0) - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = match h as u32 {
        0..=59 => (c, x, 0.0),
        60..=119 => (x, c, 0.0),
        120..=179 => (0.0, c, x),
        180..=239 => (0.0, x, c),
        240..=299 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    (
        ((r + m) * 255.0).round() as u8,
        ((g + m) * 255.0).round() as u8,
        ((b + m) * 255.0).round() as u8,
    )
}
