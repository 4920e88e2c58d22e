//! Player state and the reducer that applies user intents to it.
//!
//! `reduce` is pure: it takes the current `AppState` by reference and
//! returns the next one. The [`Store`](super::store::Store) owns the live
//! copy and tells subscribers about changes.

use serde::Serialize;
use tracing::debug;

use super::lyrics::{active_line, prepare_lyrics, LyricLine};
use super::playlists::PlaylistBook;
use super::queue::move_in_place;
use crate::error::{PlayerError, Result};
use crate::player::clock::{PlaybackClock, Tick};
use crate::player::selection;
use crate::player::{ClockState, Track};

pub const DEFAULT_VOLUME: u8 = 70;
pub const MAX_VOLUME: u8 = 100;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerState {
    pub current_track_id: String,
    pub playing: bool,
    /// Seconds into the current track.
    pub current_time: u32,
    pub volume: u8,
    pub muted: bool,
    pub shuffle: bool,
    pub repeat: bool,
    pub lyrics_visible: bool,
    pub lyrics_editing: bool,
}

impl PlayerState {
    pub fn new(current_track_id: &str) -> Self {
        Self {
            current_track_id: current_track_id.to_string(),
            playing: false,
            current_time: 0,
            volume: DEFAULT_VOLUME,
            muted: false,
            shuffle: false,
            repeat: false,
            lyrics_visible: true,
            lyrics_editing: false,
        }
    }

    /// Volume actually applied to output; muting leaves `volume` untouched.
    pub fn effective_volume(&self) -> u8 {
        if self.muted {
            0
        } else {
            self.volume
        }
    }

    pub fn clock_state(&self) -> ClockState {
        ClockState::from_playing(self.playing)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub library: Vec<Track>,
    /// Track ids in display order. Selection walks this order.
    pub queue: Vec<String>,
    pub playlists: PlaylistBook,
    pub current_playlist: Option<String>,
    pub player: PlayerState,
}

impl AppState {
    pub fn new(library: Vec<Track>) -> Result<Self> {
        let first = library.first().ok_or(PlayerError::EmptyLibrary)?;
        Ok(Self {
            queue: library.iter().map(|t| t.id.clone()).collect(),
            player: PlayerState::new(&first.id),
            playlists: PlaylistBook::new(),
            current_playlist: None,
            library,
        })
    }

    pub fn with_volume(mut self, volume: u8) -> Self {
        self.player.volume = volume.min(MAX_VOLUME);
        self
    }

    /// Start on `id`, or the first track when it is unknown.
    pub fn with_current_track(mut self, id: &str) -> Self {
        if let Ok(track) = selection::resolve(&self.library, id) {
            self.player.current_track_id = track.id.clone();
        }
        self
    }

    pub fn with_lyrics_visible(mut self, visible: bool) -> Self {
        self.player.lyrics_visible = visible;
        self
    }

    /// Queue ids resolved to tracks. Ids missing from the library are skipped.
    pub fn queue_tracks(&self) -> Vec<Track> {
        self.queue
            .iter()
            .filter_map(|id| self.library.iter().find(|t| &t.id == id))
            .cloned()
            .collect()
    }

    /// The current track, falling back to the first library track.
    pub fn current_track(&self) -> Result<&Track> {
        selection::resolve(&self.library, &self.player.current_track_id)
    }

    pub fn active_lyric(&self) -> Option<usize> {
        let track = self.current_track().ok()?;
        active_line(&track.lyrics, self.player.current_time as f64)
    }

    fn track_mut(&mut self, id: &str) -> Result<&mut Track> {
        self.library
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| PlayerError::TrackNotFound(id.to_string()))
    }
}

/// Everything the frontend can ask the core to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    PlayPause,
    Next,
    Previous,
    Seek(u32),
    SetVolume(u8),
    ToggleMute,
    ToggleShuffle,
    ToggleRepeat,
    ToggleLyrics,
    SetLyricsEditing(bool),
    SelectTrack(String),
    MoveQueueItem { active: String, over: String },
    SaveLyrics { track_id: String, lines: Vec<LyricLine> },
    CreatePlaylist(String),
    RenamePlaylist { id: String, name: String },
    DeletePlaylist(String),
    SelectPlaylist(String),
    AddToPlaylist { id: String, track_id: String },
    /// Takes effect on the queue the next time the playlist is loaded.
    RemoveFromPlaylist { id: String, track_id: String },
    Tick,
}

/// Acknowledgement of a completed edit, surfaced as a transient toast.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Notice {
    LyricsSaved { track_id: String },
    PlaylistCreated { id: String, name: String },
    PlaylistRenamed { id: String, name: String },
    PlaylistDeleted { id: String },
    PlaylistLoaded { id: String, tracks: usize },
    PlaylistEmpty { id: String },
    TrackAdded { playlist: String, track_id: String },
    TrackRemoved { playlist: String, track_id: String },
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Notice::LyricsSaved { .. } => write!(f, "Lyrics saved"),
            Notice::PlaylistCreated { name, .. } => write!(f, "Created playlist: {name}"),
            Notice::PlaylistRenamed { name, .. } => write!(f, "Renamed to: {name}"),
            Notice::PlaylistDeleted { .. } => write!(f, "Playlist deleted"),
            Notice::PlaylistLoaded { tracks, .. } => write!(f, "Loaded {tracks} tracks"),
            Notice::PlaylistEmpty { .. } => write!(f, "Playlist has no playable tracks"),
            Notice::TrackAdded { .. } => write!(f, "Added to playlist"),
            Notice::TrackRemoved { .. } => write!(f, "Removed from playlist"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: AppState,
    pub notice: Option<Notice>,
}

impl Transition {
    fn quiet(state: AppState) -> Self {
        Self { state, notice: None }
    }

    fn with_notice(state: AppState, notice: Notice) -> Self {
        Self {
            state,
            notice: Some(notice),
        }
    }
}

/// Apply `intent` to `state`, producing the next state.
pub fn reduce(state: &AppState, intent: Intent) -> Result<Transition> {
    debug!(?intent, "reduce");
    let mut next = state.clone();
    let player = &mut next.player;

    match intent {
        Intent::PlayPause => player.playing = !player.playing,
        Intent::Next => {
            let queue = state.queue_tracks();
            player.current_track_id = selection::next(&queue, &player.current_track_id)?.id.clone();
            player.current_time = 0;
        }
        Intent::Previous => {
            let queue = state.queue_tracks();
            player.current_track_id =
                selection::previous(&queue, &player.current_track_id, player.current_time)?.id.clone();
            player.current_time = 0;
        }
        Intent::Seek(target) => {
            let duration = state.current_track()?.duration;
            player.current_time = PlaybackClock::seek(target, duration);
        }
        Intent::SetVolume(volume) => {
            player.volume = volume.min(MAX_VOLUME);
            player.muted = false;
        }
        Intent::ToggleMute => player.muted = !player.muted,
        Intent::ToggleShuffle => player.shuffle = !player.shuffle,
        Intent::ToggleRepeat => player.repeat = !player.repeat,
        Intent::ToggleLyrics => player.lyrics_visible = !player.lyrics_visible,
        Intent::SetLyricsEditing(editing) => player.lyrics_editing = editing,
        Intent::SelectTrack(id) => {
            let queue = state.queue_tracks();
            player.current_track_id = selection::select(&queue, &id)?.id.clone();
            player.current_time = 0;
            player.playing = true;
        }
        Intent::MoveQueueItem { active, over } => {
            move_in_place(&mut next.queue, &active, &over);
        }
        Intent::SaveLyrics { track_id, lines } => {
            let lines = prepare_lyrics(lines)?;
            player.lyrics_editing = false;
            next.track_mut(&track_id)?.lyrics = lines;
            return Ok(Transition::with_notice(next, Notice::LyricsSaved { track_id }));
        }
        Intent::CreatePlaylist(name) => {
            let created = next.playlists.create(&name, Vec::new())?;
            let notice = Notice::PlaylistCreated {
                id: created.id.clone(),
                name: created.name.clone(),
            };
            return Ok(Transition::with_notice(next, notice));
        }
        Intent::RenamePlaylist { id, name } => {
            next.playlists.rename(&id, &name)?;
            let name = next.playlists.get(&id).map(|p| p.name.clone()).unwrap_or(name);
            return Ok(Transition::with_notice(next, Notice::PlaylistRenamed { id, name }));
        }
        Intent::DeletePlaylist(id) => {
            next.playlists.delete(&id)?;
            if next.current_playlist.as_deref() == Some(id.as_str()) {
                next.current_playlist = None;
            }
            return Ok(Transition::with_notice(next, Notice::PlaylistDeleted { id }));
        }
        Intent::SelectPlaylist(id) => {
            let playlist = next
                .playlists
                .get(&id)
                .ok_or_else(|| PlayerError::PlaylistNotFound(id.clone()))?;
            // Queue ids must be unique: selection and reordering address entries by id.
            let mut queue: Vec<String> = Vec::with_capacity(playlist.track_ids.len());
            for tid in &playlist.track_ids {
                if !queue.contains(tid) && next.library.iter().any(|t| &t.id == tid) {
                    queue.push(tid.clone());
                }
            }
            let Some(first) = queue.first().cloned() else {
                return Ok(Transition::with_notice(next, Notice::PlaylistEmpty { id }));
            };
            if !queue.contains(&next.player.current_track_id) {
                next.player.current_track_id = first;
                next.player.current_time = 0;
            }
            let tracks = queue.len();
            next.queue = queue;
            next.current_playlist = Some(id.clone());
            return Ok(Transition::with_notice(next, Notice::PlaylistLoaded { id, tracks }));
        }
        Intent::AddToPlaylist { id, track_id } => {
            next.playlists.add_track(&id, &track_id)?;
            return Ok(Transition::with_notice(
                next,
                Notice::TrackAdded {
                    playlist: id,
                    track_id,
                },
            ));
        }
        Intent::RemoveFromPlaylist { id, track_id } => {
            next.playlists.remove_track(&id, &track_id)?;
            return Ok(Transition::with_notice(
                next,
                Notice::TrackRemoved {
                    playlist: id,
                    track_id,
                },
            ));
        }
        Intent::Tick => {
            if !player.playing {
                return Ok(Transition::quiet(next));
            }
            let duration = state.current_track()?.duration;
            match PlaybackClock::tick(player.current_time, duration) {
                Tick::Advanced(time) => player.current_time = time,
                Tick::Rollover => {
                    let queue = state.queue_tracks();
                    player.current_track_id =
                        selection::next(&queue, &player.current_track_id)?.id.clone();
                    player.current_time = 0;
                }
            }
        }
    }

    Ok(Transition::quiet(next))
}

/// Render-ready view of the state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub track: Track,
    pub current_time: u32,
    pub playing: bool,
    pub clock: ClockState,
    pub volume: u8,
    pub effective_volume: u8,
    pub muted: bool,
    pub shuffle: bool,
    pub repeat: bool,
    pub lyrics_visible: bool,
    pub lyrics_editing: bool,
    pub active_lyric: Option<usize>,
    pub queue: Vec<Track>,
    pub current_playlist: Option<String>,
}

impl Snapshot {
    pub fn from_state(state: &AppState) -> Result<Self> {
        let player = &state.player;
        Ok(Self {
            track: state.current_track()?.clone(),
            current_time: player.current_time,
            playing: player.playing,
            clock: player.clock_state(),
            volume: player.volume,
            effective_volume: player.effective_volume(),
            muted: player.muted,
            shuffle: player.shuffle,
            repeat: player.repeat,
            lyrics_visible: player.lyrics_visible,
            lyrics_editing: player.lyrics_editing,
            active_lyric: state.active_lyric(),
            queue: state.queue_tracks(),
            current_playlist: state.current_playlist.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::demo::demo_tracks;

    fn demo() -> AppState {
        AppState::new(demo_tracks()).unwrap()
    }

    fn apply(state: &AppState, intent: Intent) -> AppState {
        reduce(state, intent).unwrap().state
    }

    #[test]
    fn empty_library_is_rejected() {
        assert_eq!(AppState::new(Vec::new()).unwrap_err(), PlayerError::EmptyLibrary);
    }

    #[test]
    fn starting_track_falls_back_to_first() {
        assert_eq!(demo().with_current_track("4").player.current_track_id, "4");
        assert_eq!(demo().with_current_track("x").player.current_track_id, "1");
    }

    #[test]
    fn initial_state_matches_defaults() {
        let s = demo();
        assert_eq!(s.player.current_track_id, "1");
        assert!(!s.player.playing);
        assert_eq!(s.player.volume, 70);
        assert_eq!(s.queue, vec!["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn next_and_previous_preserve_play_flag() {
        let s = apply(&demo(), Intent::PlayPause);
        let s = apply(&s, Intent::Next);
        assert!(s.player.playing);
        assert_eq!(s.player.current_track_id, "2");

        let s = apply(&apply(&s, Intent::PlayPause), Intent::Previous);
        assert!(!s.player.playing);
        assert_eq!(s.player.current_track_id, "1");
    }

    #[test]
    fn previous_restarts_after_threshold() {
        let mut s = demo();
        s.player.current_track_id = "3".into();
        s.player.current_time = 5;
        let restarted = apply(&s, Intent::Previous);
        assert_eq!(restarted.player.current_track_id, "3");
        assert_eq!(restarted.player.current_time, 0);

        s.player.current_time = 1;
        let back = apply(&s, Intent::Previous);
        assert_eq!(back.player.current_track_id, "2");
        assert_eq!(back.player.current_time, 0);
    }

    #[test]
    fn select_starts_playback_and_falls_back() {
        let mut s = demo();
        s.player.current_time = 40;
        let s = apply(&s, Intent::SelectTrack("4".into()));
        assert_eq!(s.player.current_track_id, "4");
        assert_eq!(s.player.current_time, 0);
        assert!(s.player.playing);

        let s = apply(&apply(&s, Intent::PlayPause), Intent::SelectTrack("nope".into()));
        assert_eq!(s.player.current_track_id, "1");
        assert!(s.player.playing);
    }

    #[test]
    fn ticks_are_ignored_while_stopped() {
        let s = apply(&demo(), Intent::Tick);
        assert_eq!(s.player.current_time, 0);
    }

    #[test]
    fn tick_rolls_over_into_next_track() {
        let mut s = apply(&demo(), Intent::PlayPause);
        s.player.current_time = 244;
        let s = apply(&s, Intent::Tick);
        assert_eq!(s.player.current_time, 245);
        assert_eq!(s.player.current_track_id, "1");
        let s = apply(&s, Intent::Tick);
        assert_eq!(s.player.current_time, 0);
        assert_eq!(s.player.current_track_id, "2");
        assert!(s.player.playing);
    }

    #[test]
    fn seek_keeps_state_and_clamps_to_duration() {
        let s = apply(&demo(), Intent::Seek(245));
        assert_eq!(s.player.current_time, 245);
        assert!(!s.player.playing);
        let s = apply(&s, Intent::Seek(10_000));
        assert_eq!(s.player.current_time, 245);
    }

    #[test]
    fn volume_and_mute() {
        let s = apply(&demo(), Intent::ToggleMute);
        assert_eq!(s.player.effective_volume(), 0);
        assert_eq!(s.player.volume, 70);

        let s = apply(&s, Intent::SetVolume(150));
        assert!(!s.player.muted);
        assert_eq!(s.player.volume, 100);
        assert_eq!(s.player.effective_volume(), 100);
    }

    #[test]
    fn flags_toggle_independently() {
        let s = apply(&apply(&demo(), Intent::ToggleShuffle), Intent::ToggleRepeat);
        assert!(s.player.shuffle && s.player.repeat);
        assert!(!s.player.playing && !s.player.muted);
        let s = apply(&s, Intent::ToggleLyrics);
        assert!(!s.player.lyrics_visible);
    }

    #[test]
    fn queue_reorder_changes_next_order_only() {
        let s = apply(
            &demo(),
            Intent::MoveQueueItem {
                active: "4".into(),
                over: "2".into(),
            },
        );
        assert_eq!(s.queue, vec!["1", "4", "2", "3", "5"]);
        assert_eq!(s.player.current_track_id, "1");
        let s = apply(&s, Intent::Next);
        assert_eq!(s.player.current_track_id, "4");
    }

    #[test]
    fn save_lyrics_sorts_and_notifies() {
        let s = apply(&demo(), Intent::SetLyricsEditing(true));
        let t = reduce(
            &s,
            Intent::SaveLyrics {
                track_id: "3".into(),
                lines: vec![LyricLine::new(5.0, "later"), LyricLine::new(0.0, "first")],
            },
        )
        .unwrap();
        let track = t.state.library.iter().find(|t| t.id == "3").unwrap();
        assert_eq!(track.lyrics[0].time, 0.0);
        assert_eq!(track.lyrics[1].time, 5.0);
        assert!(!t.state.player.lyrics_editing);
        assert_eq!(t.notice, Some(Notice::LyricsSaved { track_id: "3".into() }));
        // the original state is untouched
        assert!(s.library[2].lyrics.is_empty());
    }

    #[test]
    fn save_lyrics_rejects_bad_timestamps() {
        let err = reduce(
            &demo(),
            Intent::SaveLyrics {
                track_id: "1".into(),
                lines: vec![LyricLine::new(-1.0, "")],
            },
        )
        .unwrap_err();
        assert!(matches!(err, PlayerError::InvalidTimestamp { index: 0, .. }));
    }

    #[test]
    fn playlist_lifecycle() {
        let t = reduce(&demo(), Intent::CreatePlaylist(" Late ".into())).unwrap();
        assert_eq!(
            t.notice,
            Some(Notice::PlaylistCreated {
                id: "pl-1".into(),
                name: "Late".into()
            })
        );
        let s = apply(
            &t.state,
            Intent::AddToPlaylist {
                id: "pl-1".into(),
                track_id: "5".into(),
            },
        );
        let s = apply(
            &s,
            Intent::AddToPlaylist {
                id: "pl-1".into(),
                track_id: "ghost".into(),
            },
        );
        let s = apply(
            &s,
            Intent::AddToPlaylist {
                id: "pl-1".into(),
                track_id: "2".into(),
            },
        );

        let loaded = reduce(&s, Intent::SelectPlaylist("pl-1".into())).unwrap();
        assert_eq!(loaded.state.queue, vec!["5", "2"]);
        assert_eq!(loaded.state.current_playlist.as_deref(), Some("pl-1"));

        let s = apply(
            &loaded.state,
            Intent::RenamePlaylist {
                id: "pl-1".into(),
                name: "Later".into(),
            },
        );
        assert_eq!(s.playlists.get("pl-1").unwrap().name, "Later");

        let s = apply(&s, Intent::DeletePlaylist("pl-1".into()));
        assert!(s.playlists.is_empty());
        assert_eq!(s.current_playlist, None);
        assert_eq!(s.queue, vec!["5", "2"]);
    }

    #[test]
    fn empty_playlist_leaves_queue_alone() {
        let s = apply(&demo(), Intent::CreatePlaylist("empty".into()));
        let t = reduce(&s, Intent::SelectPlaylist("pl-1".into())).unwrap();
        assert_eq!(t.state.queue, s.queue);
        assert_eq!(t.notice, Some(Notice::PlaylistEmpty { id: "pl-1".into() }));
    }

    #[test]
    fn snapshot_reports_active_lyric_and_effective_volume() {
        let mut s = demo();
        s.player.current_time = 17;
        s.player.muted = true;
        let snap = Snapshot::from_state(&s).unwrap();
        assert_eq!(snap.track.id, "1");
        assert_eq!(snap.active_lyric, Some(2));
        assert_eq!(snap.effective_volume, 0);
        assert_eq!(snap.queue.len(), 5);
        assert_eq!(snap.clock, ClockState::Stopped);

        s.player.playing = true;
        assert_eq!(Snapshot::from_state(&s).unwrap().clock, ClockState::Playing);
    }

    fn playlist_of(ids: &[&str]) -> AppState {
        let mut s = apply(&demo(), Intent::CreatePlaylist("mix".into()));
        for id in ids {
            s = apply(
                &s,
                Intent::AddToPlaylist {
                    id: "pl-1".into(),
                    track_id: id.to_string(),
                },
            );
        }
        s
    }

    #[test]
    fn loading_playlist_moves_off_a_track_it_lacks() {
        let s = apply(&playlist_of(&["5", "2", "3"]), Intent::SelectPlaylist("pl-1".into()));
        assert_eq!(s.queue, vec!["5", "2", "3"]);
        assert_eq!(s.player.current_track_id, "5");
        assert_eq!(s.player.current_time, 0);

        let s = apply(&s, Intent::Next);
        assert_eq!(s.player.current_track_id, "2");
    }

    #[test]
    fn loading_playlist_keeps_a_track_it_contains() {
        let mut s = playlist_of(&["4", "1"]);
        s.player.current_time = 30;
        let s = apply(&s, Intent::SelectPlaylist("pl-1".into()));
        assert_eq!(s.player.current_track_id, "1");
        assert_eq!(s.player.current_time, 30);
    }

    #[test]
    fn rollover_after_loading_starts_from_playlist_head() {
        let mut s = apply(&playlist_of(&["3", "4"]), Intent::SelectPlaylist("pl-1".into()));
        s.player.playing = true;
        s.player.current_time = s.current_track().unwrap().duration;
        let s = apply(&s, Intent::Tick);
        assert_eq!(s.player.current_track_id, "4");
    }

    #[test]
    fn duplicate_playlist_entries_load_once() {
        let s = apply(&playlist_of(&["2", "4", "2", "5"]), Intent::SelectPlaylist("pl-1".into()));
        assert_eq!(s.queue, vec!["2", "4", "5"]);

        let mut s = apply(&s, Intent::SelectTrack("2".into()));
        let mut walk = Vec::new();
        for _ in 0..3 {
            s = apply(&s, Intent::Next);
            walk.push(s.player.current_track_id.clone());
        }
        assert_eq!(walk, vec!["4", "5", "2"]);
    }

    #[test]
    fn remove_from_playlist_applies_on_next_load() {
        let s = apply(&playlist_of(&["2", "4", "2"]), Intent::SelectPlaylist("pl-1".into()));
        let t = reduce(
            &s,
            Intent::RemoveFromPlaylist {
                id: "pl-1".into(),
                track_id: "2".into(),
            },
        )
        .unwrap();
        assert!(matches!(t.notice, Some(Notice::TrackRemoved { .. })));
        assert_eq!(t.state.playlists.get("pl-1").unwrap().track_ids, vec!["4"]);
        assert_eq!(t.state.queue, vec!["2", "4"]);

        let s = apply(&t.state, Intent::SelectPlaylist("pl-1".into()));
        assert_eq!(s.queue, vec!["4"]);
        assert_eq!(s.player.current_track_id, "4");
    }
}
