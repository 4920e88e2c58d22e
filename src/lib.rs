pub mod app;
pub mod error;
pub mod player;
pub mod ui;

pub use error::PlayerError;
