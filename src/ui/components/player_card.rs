use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::app::{AppState, ViewState};
use crate::player::ClockState;
use crate::ui::utils::{format_time, truncate};

pub fn render(f: &mut Frame, area: Rect, state: &AppState, view: &ViewState) {
    let theme = &view.theme;
    let Ok(track) = state.current_track() else {
        return;
    };
    let player = &state.player;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.blue))
        .title(Line::from(Span::styled(
            " Now Playing ",
            Style::default().fg(theme.blue).add_modifier(Modifier::BOLD),
        )));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title / artist
            Constraint::Length(1), // Album / art
            Constraint::Length(1), // Progress
            Constraint::Length(1), // Controls
        ])
        .split(inner);

    let width = inner.width as usize;
    let info = Line::from(vec![
        Span::styled(
            truncate(&track.title, width / 2),
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        ),
        Span::styled("  ·  ", Style::default().fg(theme.overlay)),
        Span::styled(truncate(&track.artist, width / 2), Style::default().fg(theme.magenta)),
    ]);
    f.render_widget(Paragraph::new(info), rows[0]);

    let album = Line::from(vec![
        Span::styled(&track.album, Style::default().fg(theme.overlay)),
        Span::styled("  ", Style::default()),
        Span::styled(
            truncate(&track.album_art, width.saturating_sub(track.album.len() + 2)),
            Style::default().fg(theme.surface),
        ),
    ]);
    f.render_widget(Paragraph::new(album), rows[1]);

    render_progress(f, rows[2], state, view);

    let on = |flag: bool, label: &'static str| {
        let color = if flag { theme.green } else { theme.overlay };
        Span::styled(label, Style::default().fg(color))
    };
    let volume = if player.muted || player.volume == 0 {
        Span::styled(" muted ", Style::default().fg(theme.red))
    } else {
        Span::styled(format!(" vol {:>3}% ", player.volume), Style::default().fg(theme.text))
    };
    let controls = Line::from(vec![
        Span::styled(
            match player.clock_state() {
                ClockState::Playing => " ⏸ playing ",
                ClockState::Stopped => " ▶ paused ",
            },
            Style::default().fg(theme.yellow).add_modifier(Modifier::BOLD),
        ),
        on(player.shuffle, " shuffle "),
        on(player.repeat, " repeat "),
        volume,
    ]);
    f.render_widget(Paragraph::new(controls).alignment(Alignment::Center), rows[3]);
}

fn render_progress(f: &mut Frame, area: Rect, state: &AppState, view: &ViewState) {
    let theme = &view.theme;
    let Ok(track) = state.current_track() else {
        return;
    };
    let time = state.player.current_time;

    let elapsed = format_time(time);
    let total = format_time(track.duration);
    let bar_width = (area.width as usize).saturating_sub(elapsed.len() + total.len() + 2);

    let ratio = if track.duration > 0 {
        (time as f64 / track.duration as f64).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let filled = (bar_width as f64 * ratio) as usize;

    let fill_style = Style::default().fg(theme.magenta);
    let empty_style = Style::default().fg(theme.surface);

    let mut spans = vec![Span::styled(format!("{elapsed} "), Style::default().fg(theme.overlay))];
    for i in 0..bar_width {
        if i < filled {
            if i + 1 == filled {
                // Playhead knob
                spans.push(Span::styled("●", fill_style));
            } else {
                spans.push(Span::styled("━", fill_style));
            }
        } else {
            spans.push(Span::styled("─", empty_style));
        }
    }
    spans.push(Span::styled(format!(" {total}"), Style::default().fg(theme.overlay)));

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
