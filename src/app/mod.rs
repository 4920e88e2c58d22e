pub mod config;
pub mod lyrics;
pub mod playlists;
pub mod queue;
pub mod state;
pub mod store;

pub mod cli;
pub mod events;
pub mod input_handler;
pub mod keys;
pub mod view;

pub use state::{reduce, AppState, Intent, Notice, PlayerState, Snapshot, Transition};
pub use store::Store;
pub use view::ViewState;
