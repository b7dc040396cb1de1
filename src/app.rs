//! UI-side application model: cursor selection over the playlist and a few
//! display flags. Playlist contents live in the engine; the UI only tracks
//! where the selection cursor sits.

mod model;

pub use model::*;
