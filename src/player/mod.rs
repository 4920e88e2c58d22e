pub mod clock;
pub mod demo;
pub mod selection;
pub mod types;

pub use clock::{PlaybackClock, PlaybackTimer, Tick, Ticker};
pub use types::{ClockState, Track};
