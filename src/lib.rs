pub mod app;
pub mod board;
pub mod config;
pub mod errors;
pub mod logging;
pub mod models;
pub mod render;
pub mod store;
pub mod theme;

pub use app::{Action, App, Flow, Focus};
pub use board::NoteBoard;
pub use errors::{Result, StickiesError};
pub use models::{Note, NoteColor, PALETTE};
pub use store::Store;
pub use theme::Theme;
