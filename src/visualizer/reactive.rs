use std::time::{Duration, Instant};

use super::params;
use super::theme::{ThemeMode, ThemePreset};

/// Rendering parameters for one frame of the backdrop.
#[derive(Copy, Clone, Debug)]
pub struct VisualFrame {
    /// Whether the reactive loop is running (audio playing and readable).
    pub active: bool,
    /// Hue angle in degrees.
    pub hue: f32,
    /// Backdrop opacity in [0, 1].
    pub opacity: f32,
    /// Color saturation in [0, 1].
    pub saturation: f32,
    /// Wall-clock sweep phase in [0, 1).
    pub sweep: f32,
    /// Lightness from the active theme preset.
    pub lightness: f32,
}

impl VisualFrame {
    /// The backdrop color for this frame. The wall-clock sweep drifts the
    /// hue back and forth through one full cycle per sweep period, so the
    /// backdrop keeps moving even at constant audio energy.
    pub fn rgb(&self) -> (u8, u8, u8) {
        let drift = (self.sweep * std::f32::consts::TAU).sin() * params::SWEEP_HUE_SPAN;
        params::hsl_to_rgb(
            self.hue + drift,
            self.saturation * self.opacity.clamp(0.0, 1.0).sqrt(),
            self.lightness,
        )
    }
}

/// The audio-reactive backdrop driver.
///
/// Every 350 ms (configurable) it re-evaluates whether the engine is playing
/// and flips between the reactive loop and the idle sweep. Per frame it reads
/// frequency bins through a caller-supplied closure; a failed read counts as
/// zero energy and never surfaces as an error.
pub struct Visualizer {
    enabled: bool,
    active: bool,
    mode: ThemeMode,
    preset: ThemePreset,
    hue: f32,
    smoothed: f32,
    smoothing: f32,
    bins: Vec<u8>,
    poll_interval: Duration,
    last_poll: Option<Instant>,
    epoch: Instant,
}

impl Visualizer {
    pub fn new(mode: ThemeMode, poll_interval: Duration, smoothing: f32, enabled: bool) -> Self {
        Self {
            enabled,
            active: false,
            mode,
            preset: mode.preset(),
            hue: 210.0,
            smoothed: 0.0,
            smoothing: smoothing.clamp(0.0, 0.999),
            bins: Vec::new(),
            poll_interval,
            last_poll: None,
            epoch: Instant::now(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn theme(&self) -> ThemeMode {
        self.mode
    }

    /// Switch themes; the new preset applies from the next frame, without
    /// waiting for a poll tick.
    pub fn set_theme(&mut self, mode: ThemeMode) {
        self.mode = mode;
        self.preset = mode.preset();
    }

    /// Produce the next frame.
    ///
    /// `read_bins` fills the reusable bin buffer from the analyser and
    /// returns whether the snapshot was usable; it is only called while the
    /// reactive loop is active.
    pub fn tick(
        &mut self,
        now: Instant,
        playing: bool,
        read_bins: impl FnOnce(&mut Vec<u8>) -> bool,
    ) -> VisualFrame {
        self.poll(now, playing);

        if self.active {
            let energy = if read_bins(&mut self.bins) {
                params::mean_energy(&self.bins)
            } else {
                0.0
            };
            self.smoothed = params::smooth(self.smoothed, energy, self.smoothing);
            self.hue = params::advance_hue(self.hue, energy);
        } else {
            self.hue = params::advance_hue_idle(self.hue);
        }

        VisualFrame {
            active: self.active,
            hue: self.hue,
            opacity: params::opacity(&self.preset, self.smoothed),
            saturation: params::saturation(self.smoothed),
            sweep: params::sweep_phase(now.duration_since(self.epoch).as_secs_f32()),
            lightness: self.preset.lightness,
        }
    }

    /// Start/stop verdict, re-evaluated at most once per poll interval.
    fn poll(&mut self, now: Instant, playing: bool) {
        let due = self
            .last_poll
            .is_none_or(|last| now.duration_since(last) >= self.poll_interval);
        if !due {
            return;
        }
        self.last_poll = Some(now);

        let should_run = self.enabled && playing;
        if should_run && !self.active {
            self.active = true;
        } else if !should_run && self.active {
            self.active = false;
            // Back to the idle baseline immediately, not via decay.
            self.smoothed = 0.0;
        }
    }
}
