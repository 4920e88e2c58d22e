use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState},
    Frame,
};

use crate::app::{AppState, ViewState};
use crate::ui::utils::{format_time, truncate};

pub fn render(f: &mut Frame, area: Rect, state: &AppState, view: &ViewState) {
    let theme = &view.theme;
    let player = &state.player;

    let title = match state
        .current_playlist
        .as_deref()
        .and_then(|id| state.playlists.get(id))
    {
        Some(playlist) => format!(" Queue · {} ", playlist.name),
        None => " Queue ".to_string(),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.magenta))
        .title(Line::from(Span::styled(
            title,
            Style::default().fg(theme.magenta).add_modifier(Modifier::BOLD),
        )));

    let inner_width = area.width.saturating_sub(2) as usize;
    let items: Vec<ListItem> = state
        .queue_tracks()
        .iter()
        .enumerate()
        .map(|(i, track)| {
            let is_current = track.id == player.current_track_id;
            let is_grabbed = view.grabbed.as_deref() == Some(track.id.as_str());

            let marker = if is_grabbed {
                "≡ ".to_string()
            } else if is_current {
                (if player.playing { "♪ " } else { "‖ " }).to_string()
            } else {
                format!("{:<2}", i + 1)
            };

            let duration = format_time(track.duration);
            let label = format!("{} - {}", track.title, track.artist);
            let label_width = inner_width.saturating_sub(marker.chars().count() + duration.len() + 2);

            let style = if is_grabbed {
                Style::default().fg(theme.yellow).add_modifier(Modifier::BOLD)
            } else if is_current {
                Style::default().fg(theme.green).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text)
            };

            ListItem::new(Line::from(vec![
                Span::styled(marker, style),
                Span::styled(format!("{:<w$}", truncate(&label, label_width), w = label_width), style),
                Span::styled(format!(" {duration}"), Style::default().fg(theme.overlay)),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(theme.surface));

    let mut list_state = ListState::default();
    list_state.select(Some(view.queue_cursor));
    f.render_stateful_widget(list, area, &mut list_state);
}
