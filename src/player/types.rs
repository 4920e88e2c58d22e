use serde::{Deserialize, Serialize};

use crate::app::lyrics::LyricLine;

/// Whether the playback clock is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ClockState {
    #[default]
    Stopped,
    Playing,
}

impl ClockState {
    pub fn from_playing(playing: bool) -> Self {
        if playing {
            Self::Playing
        } else {
            Self::Stopped
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub album: String,
    /// Length in whole seconds, always positive.
    pub duration: u32,
    pub album_art: String,
    #[serde(default)]
    pub lyrics: Vec<LyricLine>,
}

impl Track {
    pub fn new(id: &str, title: &str, artist: &str, album: &str, duration: u32, album_art: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            artist: artist.to_string(),
            album: album.to_string(),
            duration,
            album_art: album_art.to_string(),
            lyrics: Vec::new(),
        }
    }

    pub fn with_lyrics(mut self, lyrics: Vec<LyricLine>) -> Self {
        self.lyrics = lyrics;
        self
    }

    pub fn has_lyrics(&self) -> bool {
        !self.lyrics.is_empty()
    }
}
