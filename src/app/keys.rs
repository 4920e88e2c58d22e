use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};

/// Key bindings, one string per action. Single characters match literally;
/// named keys use `Space`, `Enter`, `Esc`, `Tab`, `BackTab`, `Backspace`,
/// `Delete`, `Up`, `Down`, `Left`, `Right`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyConfig {
    // Global
    pub quit: String,
    pub play_pause: String,
    pub next_track: String,
    pub prev_track: String,
    pub volume_up: String,
    pub volume_down: String,
    pub mute: String,
    pub shuffle: String,
    pub repeat: String,
    pub toggle_lyrics: String,

    // Seek
    pub seek_forward: String,
    pub seek_backward: String,

    // Navigation
    pub nav_up: String,
    pub nav_up_alt: String,
    pub nav_down: String,
    pub nav_down_alt: String,

    // Queue
    pub select: String,
    pub grab: String,
    pub add_to_playlist: String,
    pub remove_from_playlist: String,

    // Popups
    pub edit_lyrics: String,
    pub playlists: String,
    pub new_item: String,
    pub rename_item: String,
    pub delete_item: String,
    pub save: String,
    pub back: String,
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            quit: "q".to_string(),
            play_pause: "Space".to_string(),
            next_track: "n".to_string(),
            prev_track: "p".to_string(),
            volume_up: "+".to_string(),
            volume_down: "-".to_string(),
            mute: "m".to_string(),
            shuffle: "z".to_string(),
            repeat: "x".to_string(),
            toggle_lyrics: "y".to_string(),

            seek_forward: "l".to_string(),
            seek_backward: "h".to_string(),

            nav_up: "k".to_string(),
            nav_up_alt: "Up".to_string(),
            nav_down: "j".to_string(),
            nav_down_alt: "Down".to_string(),

            select: "Enter".to_string(),
            grab: "g".to_string(),
            add_to_playlist: "a".to_string(),
            remove_from_playlist: "D".to_string(),

            edit_lyrics: "e".to_string(),
            playlists: "P".to_string(),
            new_item: "c".to_string(),
            rename_item: "r".to_string(),
            delete_item: "d".to_string(),
            save: "S".to_string(),
            back: "Esc".to_string(),
        }
    }
}

impl KeyConfig {
    pub fn matches(&self, event: KeyEvent, key_str: &str) -> bool {
        match key_str {
            "Space" => event.code == KeyCode::Char(' '),
            "Enter" => event.code == KeyCode::Enter,
            "Backspace" => event.code == KeyCode::Backspace,
            "Delete" => event.code == KeyCode::Delete,
            "Esc" => event.code == KeyCode::Esc,
            "Tab" => event.code == KeyCode::Tab,
            "BackTab" => event.code == KeyCode::BackTab,
            "Up" => event.code == KeyCode::Up,
            "Down" => event.code == KeyCode::Down,
            "Left" => event.code == KeyCode::Left,
            "Right" => event.code == KeyCode::Right,
            s => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    // Uppercase bindings also match shift + lowercase
                    (Some(ch), None) if ch.is_uppercase() => {
                        event.code == KeyCode::Char(ch)
                            || (event.code == KeyCode::Char(ch.to_ascii_lowercase())
                                && event.modifiers.contains(KeyModifiers::SHIFT))
                    }
                    (Some(ch), None) => event.code == KeyCode::Char(ch),
                    _ => false,
                }
            }
        }
    }

    /// Short label for the footer hints.
    pub fn display(&self, key_str: &str) -> String {
        match key_str {
            "Up" => "↑".to_string(),
            "Down" => "↓".to_string(),
            "Left" => "←".to_string(),
            "Right" => "→".to_string(),
            "BackTab" => "S-Tab".to_string(),
            "Backspace" => "Bksp".to_string(),
            _ => key_str.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn named_and_char_bindings() {
        let keys = KeyConfig::default();
        assert!(keys.matches(key(KeyCode::Char(' '), KeyModifiers::NONE), &keys.play_pause));
        assert!(keys.matches(key(KeyCode::Char('n'), KeyModifiers::NONE), &keys.next_track));
        assert!(!keys.matches(key(KeyCode::Char('N'), KeyModifiers::NONE), &keys.next_track));
        assert!(keys.matches(key(KeyCode::Esc, KeyModifiers::NONE), &keys.back));
    }

    #[test]
    fn uppercase_binding_accepts_shift() {
        let keys = KeyConfig::default();
        assert!(keys.matches(key(KeyCode::Char('P'), KeyModifiers::SHIFT), &keys.playlists));
        assert!(keys.matches(key(KeyCode::Char('p'), KeyModifiers::SHIFT), &keys.playlists));
        assert!(!keys.matches(key(KeyCode::Char('p'), KeyModifiers::NONE), &keys.playlists));
    }

    #[test]
    fn multi_char_unknown_names_never_match() {
        let keys = KeyConfig::default();
        assert!(!keys.matches(key(KeyCode::Char('x'), KeyModifiers::NONE), "xx"));
        assert_eq!(keys.display("Up"), "↑");
    }
}
