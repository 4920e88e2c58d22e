use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct MainLayout {
    pub body_area: Rect,
    pub player_area: Rect,
    pub footer_area: Rect,
}

pub fn get_main_layout(area: Rect) -> MainLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Queue + lyrics
            Constraint::Length(6), // Player bar
            Constraint::Length(1), // Footer
        ])
        .split(area);

    MainLayout {
        body_area: chunks[0],
        player_area: chunks[1],
        footer_area: chunks[2],
    }
}

pub struct ContentLayout {
    pub queue: Rect,
    pub lyrics: Option<Rect>,
}

pub fn get_content_layout(area: Rect, show_lyrics: bool) -> ContentLayout {
    if !show_lyrics {
        return ContentLayout {
            queue: area,
            lyrics: None,
        };
    }

    let direction = if area.width >= 90 {
        Direction::Horizontal
    } else {
        Direction::Vertical
    };
    let chunks = Layout::default()
        .direction(direction)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    ContentLayout {
        queue: chunks[0],
        lyrics: Some(chunks[1]),
    }
}

/// Rect of `width` x `height` centered in `area`, clipped to it.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
