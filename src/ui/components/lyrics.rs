use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::app::{AppState, ViewState};

pub fn render(f: &mut Frame, area: Rect, state: &AppState, view: &ViewState) {
    let theme = &view.theme;

    let title = if state.player.lyrics_editing {
        " Lyrics (editing) "
    } else {
        " Lyrics "
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.cyan))
        .title(Line::from(Span::styled(
            title,
            Style::default().fg(theme.cyan).add_modifier(Modifier::BOLD),
        )));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let lyrics = match state.current_track() {
        Ok(track) if track.has_lyrics() => &track.lyrics,
        _ => {
            let empty = Paragraph::new(Line::from(Span::styled(
                "No lyrics available",
                Style::default().fg(theme.overlay),
            )))
            .alignment(Alignment::Center);
            let mid = Rect::new(inner.x, inner.y + inner.height / 2, inner.width, 1.min(inner.height));
            f.render_widget(empty, mid);
            return;
        }
    };

    let active = state.active_lyric();
    let height = inner.height as usize;
    let half = height / 2;
    // The anchor only moves when the active line changes
    let center = view.lyrics_anchor.unwrap_or(0) as isize;

    let mut lines = Vec::with_capacity(height);
    for row in 0..height {
        let idx = center - half as isize + row as isize;
        if idx < 0 || idx >= lyrics.len() as isize {
            lines.push(Line::from(""));
            continue;
        }
        let idx = idx as usize;
        let text = lyrics[idx].text.as_str();

        let style = match active {
            Some(a) if a == idx => Style::default().fg(theme.magenta).add_modifier(Modifier::BOLD),
            Some(a) if a.abs_diff(idx) == 1 => Style::default().fg(theme.text),
            _ => Style::default().fg(theme.overlay).add_modifier(Modifier::DIM),
        };
        let text = if text.is_empty() { "♪" } else { text };
        lines.push(Line::from(Span::styled(text, style)));
    }

    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}
