//! Key events to intents.
//!
//! View-only changes (cursor, popups, grab marker) are applied to the
//! `ViewState` directly; anything touching player state is returned as an
//! `Intent` for the store.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::lyrics::{format_timestamp, LyricsDraft};
use super::state::{AppState, Intent, MAX_VOLUME};
use super::view::{EditorField, LyricsEditor, PlaylistInput, PlaylistManager, Popup, ViewState};
use crate::error::Result;

const SEEK_STEP_SECS: u32 = 5;
const VOLUME_STEP: u8 = 5;

pub fn handle_key(view: &mut ViewState, state: &AppState, key: KeyEvent) -> Vec<Intent> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        view.is_running = false;
        return Vec::new();
    }

    match view.popup.take() {
        Some(Popup::LyricsEditor(mut editor)) => {
            let (keep, intents) = handle_editor_key(view, &mut editor, key);
            if keep {
                view.popup = Some(Popup::LyricsEditor(editor));
            }
            intents
        }
        Some(Popup::Playlists(mut manager)) => {
            let (keep, intents) = handle_playlists_key(view, &mut manager, state, key);
            if keep {
                view.popup = Some(Popup::Playlists(manager));
            }
            intents
        }
        None => handle_main_key(view, state, key),
    }
}

fn handle_main_key(view: &mut ViewState, state: &AppState, key: KeyEvent) -> Vec<Intent> {
    let keys = view.keys.clone();
    let player = &state.player;
    let under_cursor = state.queue.get(view.queue_cursor).cloned();

    if keys.matches(key, &keys.quit) {
        view.is_running = false;
    } else if keys.matches(key, &keys.play_pause) {
        return vec![Intent::PlayPause];
    } else if keys.matches(key, &keys.next_track) {
        return vec![Intent::Next];
    } else if keys.matches(key, &keys.prev_track) {
        return vec![Intent::Previous];
    } else if keys.matches(key, &keys.seek_forward) {
        return vec![Intent::Seek(player.current_time.saturating_add(SEEK_STEP_SECS))];
    } else if keys.matches(key, &keys.seek_backward) {
        return vec![Intent::Seek(player.current_time.saturating_sub(SEEK_STEP_SECS))];
    } else if keys.matches(key, &keys.volume_up) {
        return vec![Intent::SetVolume(player.volume.saturating_add(VOLUME_STEP).min(MAX_VOLUME))];
    } else if keys.matches(key, &keys.volume_down) {
        return vec![Intent::SetVolume(player.volume.saturating_sub(VOLUME_STEP))];
    } else if keys.matches(key, &keys.mute) {
        return vec![Intent::ToggleMute];
    } else if keys.matches(key, &keys.shuffle) {
        return vec![Intent::ToggleShuffle];
    } else if keys.matches(key, &keys.repeat) {
        return vec![Intent::ToggleRepeat];
    } else if keys.matches(key, &keys.toggle_lyrics) {
        return vec![Intent::ToggleLyrics];
    } else if keys.matches(key, &keys.nav_up) || keys.matches(key, &keys.nav_up_alt) {
        view.queue_cursor = view.queue_cursor.saturating_sub(1);
    } else if keys.matches(key, &keys.nav_down) || keys.matches(key, &keys.nav_down_alt) {
        if view.queue_cursor + 1 < state.queue.len() {
            view.queue_cursor += 1;
        }
    } else if keys.matches(key, &keys.grab) {
        match (view.grabbed.take(), under_cursor) {
            (Some(active), Some(over)) => return vec![Intent::MoveQueueItem { active, over }],
            (None, Some(id)) => view.grabbed = Some(id),
            _ => {}
        }
    } else if keys.matches(key, &keys.select) {
        match (view.grabbed.take(), under_cursor) {
            (Some(active), Some(over)) => return vec![Intent::MoveQueueItem { active, over }],
            (None, Some(id)) => return vec![Intent::SelectTrack(id)],
            _ => {}
        }
    } else if keys.matches(key, &keys.back) {
        view.grabbed = None;
    } else if keys.matches(key, &keys.add_to_playlist) {
        match (&state.current_playlist, under_cursor) {
            (Some(id), Some(track_id)) => {
                return vec![Intent::AddToPlaylist {
                    id: id.clone(),
                    track_id,
                }]
            }
            (None, _) => view.show_toast("Load a playlist first"),
            _ => {}
        }
    } else if keys.matches(key, &keys.remove_from_playlist) {
        match (&state.current_playlist, under_cursor) {
            (Some(id), Some(track_id)) => {
                return vec![Intent::RemoveFromPlaylist {
                    id: id.clone(),
                    track_id,
                }]
            }
            (None, _) => view.show_toast("Load a playlist first"),
            _ => {}
        }
    } else if keys.matches(key, &keys.edit_lyrics) {
        if let Ok(track) = state.current_track() {
            let draft = LyricsDraft::new(track.lyrics.clone());
            view.popup = Some(Popup::LyricsEditor(LyricsEditor::new(&track.id, draft)));
            return vec![Intent::SetLyricsEditing(true)];
        }
    } else if keys.matches(key, &keys.playlists) {
        view.popup = Some(Popup::Playlists(PlaylistManager::default()));
    }
    Vec::new()
}

/// Returns whether the editor stays open, plus intents to dispatch.
fn handle_editor_key(view: &ViewState, editor: &mut LyricsEditor, key: KeyEvent) -> (bool, Vec<Intent>) {
    let keys = &view.keys;

    if let Some(buffer) = editor.buffer.as_mut() {
        match key.code {
            KeyCode::Esc => editor.buffer = None,
            KeyCode::Backspace => {
                buffer.pop();
            }
            KeyCode::Enter => {
                let value = buffer.clone();
                match editor.field {
                    EditorField::Time => match commit_time(&mut editor.draft, editor.selected, &value) {
                        Ok(()) => {
                            editor.buffer = None;
                            editor.error = None;
                        }
                        Err(e) => editor.error = Some(e.to_string()),
                    },
                    EditorField::Text => {
                        editor.draft.set_text(editor.selected, &value);
                        editor.buffer = None;
                    }
                }
            }
            KeyCode::Char(c) => buffer.push(c),
            _ => {}
        }
        return (true, Vec::new());
    }

    let last = editor.draft.len().saturating_sub(1);
    if keys.matches(key, &keys.back) {
        return (false, vec![Intent::SetLyricsEditing(false)]);
    } else if keys.matches(key, &keys.nav_up) || keys.matches(key, &keys.nav_up_alt) {
        editor.selected = editor.selected.saturating_sub(1);
    } else if keys.matches(key, &keys.nav_down) || keys.matches(key, &keys.nav_down_alt) {
        editor.selected = (editor.selected + 1).min(last);
    } else if key.code == KeyCode::Tab {
        editor.field = editor.field.toggle();
    } else if keys.matches(key, &keys.select) {
        if let Some(line) = editor.draft.lines().get(editor.selected) {
            editor.buffer = Some(match editor.field {
                EditorField::Time => format_timestamp(line.time),
                EditorField::Text => line.text.clone(),
            });
        }
    } else if keys.matches(key, &keys.new_item) {
        editor.selected = editor.draft.add_line();
        editor.field = EditorField::Text;
    } else if keys.matches(key, &keys.delete_item) {
        editor.draft.delete_line(editor.selected);
        editor.selected = editor.selected.min(editor.draft.len().saturating_sub(1));
    } else if keys.matches(key, &keys.save) {
        match editor.draft.clone().finish() {
            Ok(lines) => {
                return (
                    false,
                    vec![Intent::SaveLyrics {
                        track_id: editor.track_id.clone(),
                        lines,
                    }],
                );
            }
            Err(e) => editor.error = Some(e.to_string()),
        }
    }
    (true, Vec::new())
}

/// The field is pre-filled at centisecond precision, so an untouched value
/// must not overwrite the stored time.
fn commit_time(draft: &mut LyricsDraft, index: usize, value: &str) -> Result<()> {
    let unchanged = draft
        .lines()
        .get(index)
        .is_some_and(|line| format_timestamp(line.time) == value.trim());
    if unchanged {
        return Ok(());
    }
    draft.set_time(index, value)
}

fn handle_playlists_key(
    view: &ViewState,
    manager: &mut PlaylistManager,
    state: &AppState,
    key: KeyEvent,
) -> (bool, Vec<Intent>) {
    let keys = &view.keys;

    if let Some((mode, value)) = manager.input.as_mut() {
        match key.code {
            KeyCode::Esc => manager.input = None,
            KeyCode::Backspace => {
                value.pop();
            }
            KeyCode::Enter => {
                // blank names keep the prompt open
                if value.trim().is_empty() {
                    return (true, Vec::new());
                }
                let intent = match mode {
                    PlaylistInput::Create => Intent::CreatePlaylist(value.clone()),
                    PlaylistInput::Rename(id) => Intent::RenamePlaylist {
                        id: id.clone(),
                        name: value.clone(),
                    },
                };
                manager.input = None;
                return (true, vec![intent]);
            }
            KeyCode::Char(c) => value.push(c),
            _ => {}
        }
        return (true, Vec::new());
    }

    if let Some(id) = manager.confirm_delete.take() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Char('y')) {
            return (true, vec![Intent::DeletePlaylist(id)]);
        }
        return (true, Vec::new());
    }

    let ids: Vec<String> = state.playlists.iter().map(|p| p.id.clone()).collect();
    manager.cursor = manager.cursor.min(ids.len().saturating_sub(1));
    let under_cursor = ids.get(manager.cursor).cloned();

    if keys.matches(key, &keys.back) || keys.matches(key, &keys.quit) {
        return (false, Vec::new());
    } else if keys.matches(key, &keys.nav_up) || keys.matches(key, &keys.nav_up_alt) {
        manager.cursor = manager.cursor.saturating_sub(1);
    } else if keys.matches(key, &keys.nav_down) || keys.matches(key, &keys.nav_down_alt) {
        manager.cursor = (manager.cursor + 1).min(ids.len().saturating_sub(1));
    } else if keys.matches(key, &keys.select) {
        if let Some(id) = under_cursor {
            return (false, vec![Intent::SelectPlaylist(id)]);
        }
    } else if keys.matches(key, &keys.new_item) {
        manager.input = Some((PlaylistInput::Create, String::new()));
    } else if keys.matches(key, &keys.rename_item) {
        if let Some(playlist) = under_cursor.as_deref().and_then(|id| state.playlists.get(id)) {
            manager.input = Some((PlaylistInput::Rename(playlist.id.clone()), playlist.name.clone()));
        }
    } else if keys.matches(key, &keys.delete_item) {
        manager.confirm_delete = under_cursor;
    }
    (true, Vec::new())
}
