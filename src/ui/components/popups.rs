use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::lyrics::format_timestamp;
use crate::app::view::{EditorField, LyricsEditor, PlaylistInput, PlaylistManager, Popup};
use crate::app::{AppState, ViewState};
use crate::ui::layout::centered;
use crate::ui::theme::Theme;

pub fn render(f: &mut Frame, state: &AppState, view: &ViewState) {
    match &view.popup {
        Some(Popup::LyricsEditor(editor)) => render_editor(f, editor, &view.theme),
        Some(Popup::Playlists(manager)) => render_playlists(f, manager, state, &view.theme),
        None => {}
    }
    render_toast(f, view);
}

fn popup_block(title: &str, theme: &Theme) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.blue))
        .title(format!(" {title} "))
        .title_alignment(Alignment::Left)
        .style(Style::default().bg(theme.base))
}

fn hint<'a>(text: &'a str, theme: &Theme) -> Line<'a> {
    Line::from(Span::styled(text, Style::default().fg(theme.overlay)))
}

fn render_editor(f: &mut Frame, editor: &LyricsEditor, theme: &Theme) {
    let area = centered(f.area(), 70, 20);
    f.render_widget(Clear, area);

    let visible = area.height.saturating_sub(5) as usize;
    let first = editor.selected.saturating_sub(visible.saturating_sub(1));

    let mut lines: Vec<Line> = Vec::new();
    if editor.draft.is_empty() {
        lines.push(hint("No lines yet. Press c to add one.", theme));
    }
    for (i, line) in editor.draft.lines().iter().enumerate().skip(first).take(visible) {
        let selected = i == editor.selected;
        let editing = selected && editor.buffer.is_some();

        let field_style = |field: EditorField| {
            let base = Style::default().fg(theme.text);
            match (selected, editor.field == field, editing) {
                (true, true, true) => base.fg(theme.green).add_modifier(Modifier::BOLD),
                (true, true, false) => base.bg(theme.surface).add_modifier(Modifier::BOLD),
                _ => base,
            }
        };

        let (time, text) = match (editing, editor.field, editor.buffer.as_deref()) {
            (true, EditorField::Time, Some(buf)) => (format!("{buf}▌"), line.text.clone()),
            (true, EditorField::Text, Some(buf)) => (format_timestamp(line.time), format!("{buf}▌")),
            _ => (format_timestamp(line.time), line.text.clone()),
        };

        lines.push(Line::from(vec![
            Span::styled(if selected { "> " } else { "  " }, Style::default().fg(theme.magenta)),
            Span::styled(format!("{time:>9}"), field_style(EditorField::Time)),
            Span::raw("  "),
            Span::styled(text, field_style(EditorField::Text)),
        ]));
    }

    lines.push(Line::from(""));
    match &editor.error {
        Some(err) => lines.push(Line::from(Span::styled(err.as_str(), Style::default().fg(theme.red)))),
        None => lines.push(hint(
            "Enter edit · Tab field · c add · d delete · S save · Esc close",
            theme,
        )),
    }

    f.render_widget(Paragraph::new(lines).block(popup_block("Edit Lyrics", theme)), area);
}

fn render_playlists(f: &mut Frame, manager: &PlaylistManager, state: &AppState, theme: &Theme) {
    let area = centered(f.area(), 50, 16);
    f.render_widget(Clear, area);

    let mut lines: Vec<Line> = Vec::new();
    if state.playlists.is_empty() {
        lines.push(hint("No playlists. Press c to create one.", theme));
    }
    for (i, playlist) in state.playlists.iter().enumerate() {
        let selected = i == manager.cursor;
        let is_current = state.current_playlist.as_deref() == Some(playlist.id.as_str());

        let renaming = matches!(
            &manager.input,
            Some((PlaylistInput::Rename(id), _)) if *id == playlist.id
        );
        let name = match (&manager.input, renaming) {
            (Some((_, value)), true) => format!("{value}▌"),
            _ => playlist.name.clone(),
        };

        let mut style = Style::default().fg(if is_current { theme.green } else { theme.text });
        if selected {
            style = style.bg(theme.surface).add_modifier(Modifier::BOLD);
        }
        lines.push(Line::from(vec![
            Span::styled(if selected { "> " } else { "  " }, Style::default().fg(theme.magenta)),
            Span::styled(name, style),
            Span::styled(
                format!("  {} tracks", playlist.track_ids.len()),
                Style::default().fg(theme.overlay),
            ),
        ]));
    }

    lines.push(Line::from(""));
    if let Some((PlaylistInput::Create, value)) = &manager.input {
        lines.push(Line::from(vec![
            Span::styled(" > ", Style::default().fg(theme.green).add_modifier(Modifier::BOLD)),
            Span::styled(value.as_str(), Style::default().fg(theme.text)),
            Span::styled("▌", Style::default().fg(theme.green)),
        ]));
    } else if manager.confirm_delete.is_some() {
        lines.push(Line::from(Span::styled(
            "Delete this playlist? This cannot be undone. (y/N)",
            Style::default().fg(theme.red).add_modifier(Modifier::BOLD),
        )));
    } else {
        lines.push(hint("Enter load · c new · r rename · d delete · Esc close", theme));
    }

    f.render_widget(Paragraph::new(lines).block(popup_block("Playlists", theme)), area);
}

fn render_toast(f: &mut Frame, view: &ViewState) {
    let Some(toast) = &view.toast else {
        return;
    };
    let theme = &view.theme;
    let screen = f.area();

    let width = (toast.message.chars().count() as u16 + 6).min(screen.width.saturating_sub(2));
    let area = Rect::new(screen.width.saturating_sub(width + 1), 1, width, 3).intersection(screen);
    if area.is_empty() {
        return;
    }
    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.blue));
    let text = Paragraph::new(Line::from(Span::styled(
        toast.message.as_str(),
        Style::default().fg(theme.blue).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .block(block);
    f.render_widget(text, area);
}
