/// Error taxonomy for the player core.
///
/// None of these are fatal: the engine handles all of them internally and
/// surfaces the message through the status line, leaving the playlist and
/// cursor intact so the next user action can proceed.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PlayerError {
    /// Track metadata was unreachable or the format could not be decoded.
    #[error("failed to load {name}: {reason}")]
    Load { name: String, reason: String },

    /// The output device rejected or could not start playback.
    #[error("playback failed: {0}")]
    Playback(String),

    /// An operation referenced a playlist index that does not exist.
    #[error("track index {index} out of range (playlist has {len})")]
    Index { index: usize, len: usize },

    /// An imported file is not an audio type. Skipped, never fatal.
    #[error("unsupported file type: {0}")]
    UnsupportedFile(String),
}

impl PlayerError {
    pub fn load(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Load {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
