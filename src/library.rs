//! Track model and the three ways tracks enter the playlist: scanning a
//! music directory, probing for a bundled default asset, and importing
//! user-supplied files into the blob store.

mod import;
mod model;
mod probe;
mod scan;

pub use import::*;
pub use model::*;
pub use probe::*;
pub use scan::*;

#[cfg(test)]
mod tests;
