//! The audio player engine: a public handle ([`AudioPlayerEngine`]) in front
//! of a dedicated worker thread that owns the output stream, the current
//! sink, and the playlist state machine. The UI and MPRIS observe it through
//! a shared snapshot and drive it through commands.

mod player;
mod sink;
mod state;
mod thread;
mod types;

pub use player::*;
pub use state::*;
pub use types::*;
