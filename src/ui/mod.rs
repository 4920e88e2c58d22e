pub mod components;
pub mod layout;
pub mod terminal;
pub mod theme;
pub mod utils;

pub use theme::Theme;

use ratatui::{
    layout::Alignment,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{AppState, ViewState};

pub fn ui(f: &mut Frame, state: &AppState, view: &ViewState) {
    let area = f.area();

    // 1. Layout
    let main_layout = layout::get_main_layout(area);
    let content = layout::get_content_layout(main_layout.body_area, state.player.lyrics_visible);

    // 2. Queue (left) and lyrics (right)
    components::queue::render(f, content.queue, state, view);
    if let Some(lyrics_area) = content.lyrics {
        components::lyrics::render(f, lyrics_area, state, view);
    }

    // 3. Player bar
    components::player_card::render(f, main_layout.player_area, state, view);

    // 4. Footer hints
    let theme = &view.theme;
    let keys = &view.keys;
    let key = |k: &str| {
        Span::styled(
            format!(" {} ", keys.display(k)),
            Style::default().fg(theme.overlay).add_modifier(Modifier::BOLD),
        )
    };
    let label = |s: &'static str| Span::styled(s, Style::default().fg(theme.overlay));
    let footer = if view.grabbed.is_some() {
        Line::from(vec![
            key(&keys.nav_down),
            label("move"),
            key(&keys.select),
            label("drop"),
            key(&keys.back),
            label("cancel"),
        ])
    } else {
        Line::from(vec![
            key(&keys.play_pause),
            label("play"),
            key(&keys.grab),
            label("reorder"),
            key(&keys.edit_lyrics),
            label("lyrics"),
            key(&keys.playlists),
            label("playlists"),
            key(&keys.quit),
            label("quit"),
        ])
    };
    f.render_widget(Paragraph::new(footer).alignment(Alignment::Right), main_layout.footer_area);

    // 5. Popups (overlays)
    components::popups::render(f, state, view);
}
