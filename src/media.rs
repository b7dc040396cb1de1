//! In-process blob registry for imported audio files.
//!
//! Imported files never touch the filesystem again: their bytes are parked in
//! a [`BlobStore`] under a generated `blob:` URL that the owning track holds
//! until it is removed or the engine is torn down.

mod store;

pub use store::*;

#[cfg(test)]
mod tests;
