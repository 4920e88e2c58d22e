use thiserror::Error;

/// Errors surfaced by the player core.
///
/// Unknown ids passed to selection or reordering are not errors; those fall
/// back silently. These variants cover the cases that must fail fast.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlayerError {
    #[error("track library is empty")]
    EmptyLibrary,

    #[error("invalid timestamp on line {index}: {value:?}")]
    InvalidTimestamp { index: usize, value: String },

    #[error("playlist name must not be empty")]
    EmptyPlaylistName,

    #[error("playlist not found: {0}")]
    PlaylistNotFound(String),

    #[error("track not found: {0}")]
    TrackNotFound(String),

    #[error("invalid config: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, PlayerError>;
