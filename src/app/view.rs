//! Frontend-local state: cursor, grab marker, popups, toast and the lyrics
//! scroll anchor. None of this is player state; it never reaches the store.

use std::time::{Duration, Instant};

use super::keys::KeyConfig;
use super::lyrics::{ActiveLineTracker, LyricsDraft};
use super::state::AppState;
use crate::ui::theme::Theme;

const TOAST_TTL: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub deadline: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorField {
    #[default]
    Time,
    Text,
}

impl EditorField {
    pub fn toggle(self) -> Self {
        match self {
            Self::Time => Self::Text,
            Self::Text => Self::Time,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LyricsEditor {
    pub track_id: String,
    pub draft: LyricsDraft,
    pub selected: usize,
    pub field: EditorField,
    /// Text being typed into the selected field, if a field is open.
    pub buffer: Option<String>,
    pub error: Option<String>,
}

impl LyricsEditor {
    pub fn new(track_id: &str, draft: LyricsDraft) -> Self {
        Self {
            track_id: track_id.to_string(),
            draft,
            selected: 0,
            field: EditorField::Time,
            buffer: None,
            error: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlaylistInput {
    Create,
    Rename(String),
}

#[derive(Debug, Clone, Default)]
pub struct PlaylistManager {
    pub cursor: usize,
    pub input: Option<(PlaylistInput, String)>,
    pub confirm_delete: Option<String>,
}

#[derive(Debug, Clone)]
pub enum Popup {
    LyricsEditor(LyricsEditor),
    Playlists(PlaylistManager),
}

pub struct ViewState {
    pub theme: Theme,
    pub keys: KeyConfig,
    pub is_running: bool,
    pub queue_cursor: usize,
    /// Queue entry picked up for reordering.
    pub grabbed: Option<String>,
    pub popup: Option<Popup>,
    pub toast: Option<Toast>,
    /// Line the lyrics view is centered on.
    pub lyrics_anchor: Option<usize>,
    tracker: ActiveLineTracker,
    last_track_id: Option<String>,
}

impl ViewState {
    pub fn new(keys: KeyConfig) -> Self {
        Self {
            theme: Theme::default(),
            keys,
            is_running: true,
            queue_cursor: 0,
            grabbed: None,
            popup: None,
            toast: None,
            lyrics_anchor: None,
            tracker: ActiveLineTracker::new(),
            last_track_id: None,
        }
    }

    pub fn show_toast(&mut self, message: &str) {
        self.toast = Some(Toast {
            message: message.to_string(),
            deadline: Instant::now() + TOAST_TTL,
        });
    }

    /// Drop an expired toast.
    pub fn on_tick(&mut self, now: Instant) {
        if self.toast.as_ref().is_some_and(|t| now >= t.deadline) {
            self.toast = None;
        }
    }

    /// Follow the state after a dispatch. Returns `true` when the lyrics
    /// anchor moved, which happens once per active-line change.
    pub fn sync(&mut self, state: &AppState) -> bool {
        self.queue_cursor = self.queue_cursor.min(state.queue.len().saturating_sub(1));

        let track_id = &state.player.current_track_id;
        if self.last_track_id.as_ref() != Some(track_id) {
            self.last_track_id = Some(track_id.clone());
            self.tracker.reset();
        }

        match self.tracker.observe(state.active_lyric()) {
            Some(index) => {
                self.lyrics_anchor = index;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::{reduce, Intent};
    use crate::player::demo::demo_tracks;

    #[test]
    fn anchor_moves_once_per_line_change() {
        let mut view = ViewState::new(KeyConfig::default());
        let mut state = AppState::new(demo_tracks()).unwrap();
        state.player.playing = true;

        let mut moves = 0;
        for _ in 0..20 {
            state = reduce(&state, Intent::Tick).unwrap().state;
            if view.sync(&state) {
                moves += 1;
            }
        }
        // t = 1..=20 covers lines at 0, 8 and 16
        assert_eq!(moves, 3);
        assert_eq!(view.lyrics_anchor, Some(2));
    }

    #[test]
    fn track_change_resets_anchor() {
        let mut view = ViewState::new(KeyConfig::default());
        let state = AppState::new(demo_tracks()).unwrap();
        assert!(view.sync(&state));
        assert_eq!(view.lyrics_anchor, Some(0));

        // track 2 starts its lyrics at 4s
        let state = reduce(&state, Intent::Next).unwrap().state;
        assert!(view.sync(&state));
        assert_eq!(view.lyrics_anchor, None);
    }

    #[test]
    fn toast_expires() {
        let mut view = ViewState::new(KeyConfig::default());
        view.show_toast("saved");
        view.on_tick(Instant::now());
        assert!(view.toast.is_some());
        view.on_tick(Instant::now() + Duration::from_secs(3));
        assert!(view.toast.is_none());
    }
}
