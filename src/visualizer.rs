//! Audio-reactive backdrop: polls the engine's playing state, reads frequency
//! bins from the analyser, and turns them into hue/opacity/saturation
//! parameters for the UI. Falls back to a slow idle sweep when nothing is
//! playing so the backdrop always has ambient motion.

mod params;
mod reactive;
mod theme;

pub use params::*;
pub use reactive::*;
pub use theme::*;

#[cfg(test)]
mod tests;
