//! # Connect Four
//!
//! A rules engine for two-player Connect Four on a configurable grid, with a
//! terminal front-end built with Ratatui and a headless driver for scripts.
//!
//! ## Modules
//!
//! - [`game`] — Core game logic: board, players, drop adjudication, win detection
//! - [`session`] — Lock-guarded handle for sharing one game between threads
//! - [`headless`] — Play a list of columns and report each result as JSON
//! - [`ui`] — Terminal UI that renders the results the engine hands back
//! - [`config`] — TOML configuration loading and validation
//! - [`logging`] — Tracing subscriber setup
//! - [`error`] — Rejection reasons and structured error types

pub mod config;
pub mod error;
pub mod game;
pub mod headless;
pub mod logging;
pub mod session;
pub mod ui;
