//! Core Connect Four game logic: board representation, players, and the game
//! state machine that adjudicates drops.

mod board;
mod player;
mod state;

pub use board::{Board, Cell, Run, WinScan, CONNECT, DEFAULT_HEIGHT, DEFAULT_WIDTH};
pub use player::{Player, PlayerProfile};
pub use state::{DropResult, GameState, GameStatus, Outcome};
