use crate::error::RejectReason;
use crate::game::{DropResult, GameState, Outcome};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};
use std::io;

pub struct App {
    game_state: GameState,
    selected_column: usize,
    should_quit: bool,
    message: Option<String>,
}

impl App {
    pub fn new(game_state: GameState) -> Self {
        let selected_column = game_state.board().width() / 2; // Start in middle
        App {
            game_state,
            selected_column,
            should_quit: false,
            message: None,
        }
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()>
    where
        B::Error: Into<io::Error>,
    {
        loop {
            terminal
                .draw(|f| self.render(f))
                .map_err(Into::<io::Error>::into)?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
        }
        Ok(())
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    /// Handle key press
    fn handle_key(&mut self, key: KeyEvent) {
        // Clear message on any key press
        self.message = None;

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left => {
                self.selected_column = self.selected_column.saturating_sub(1);
            }
            KeyCode::Right => {
                if self.selected_column + 1 < self.game_state.board().width() {
                    self.selected_column += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                let result = self.game_state.attempt_drop(self.selected_column);
                self.message = message_for(&result, &self.game_state);
            }
            KeyCode::Char('r') => {
                self.game_state.reset();
                self.selected_column = self.game_state.board().width() / 2;
                self.message = Some("New game started!".to_string());
            }
            _ => {}
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        super::game_view::render(frame, &self.game_state, self.selected_column, &self.message);
    }
}

/// Text for the message line after a drop. Ordinary moves need no message.
fn message_for(result: &DropResult, game: &GameState) -> Option<String> {
    match *result {
        DropResult::Placed {
            player, outcome, ..
        } => match outcome {
            Outcome::Continue => None,
            Outcome::Win => Some(format!(
                "{} wins! Press 'r' for a new game.",
                game.profile(player).name
            )),
            Outcome::Tie => Some("It's a tie! Press 'r' for a new game.".to_string()),
        },
        DropResult::Rejected {
            reason: RejectReason::GameOver,
        } => Some("Game over! Press 'r' to restart.".to_string()),
        DropResult::Rejected {
            reason: RejectReason::ColumnFull,
        } => Some("Column is full!".to_string()),
        DropResult::Rejected {
            reason: RejectReason::InvalidColumn,
        } => Some("Invalid column!".to_string()),
    }
}
