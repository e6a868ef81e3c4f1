//! Terminal UI: a board view for playing Connect Four. Everything here reacts
//! to the results the engine returns; nothing writes to the grid directly.

mod app;
pub mod board_widget;
mod game_view;

pub use app::App;
