//! The engine's analyser stage: a pass-through [`Tap`] copies decoded samples
//! into a shared [`SampleRing`] without altering the audio, and the
//! [`Analyser`] turns the most recent window into byte-scaled frequency bins
//! for the visualizer.

mod ring;
mod spectrum;
mod tap;

pub use ring::*;
pub use spectrum::*;
pub use tap::*;

#[cfg(test)]
mod tests;
