use crossterm::event::Event;

#[derive(Debug, Clone)]
pub enum AppEvent {
    Input(Event),
    /// One playback clock tick, stamped with the timer run that sent it.
    Tick(u64),
    /// Animation/housekeeping frame (toast expiry, redraw).
    Frame,
}
