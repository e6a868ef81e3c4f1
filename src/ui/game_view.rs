use crate::game::{GameState, GameStatus};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::board_widget::{cell_span, Palette};

pub fn render(
    frame: &mut Frame,
    game_state: &GameState,
    selected_column: usize,
    message: &Option<String>,
) {
    let palette = Palette::from_game(game_state);
    let board_height = game_state.board().height() as u16 + 4;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),         // Header
            Constraint::Min(board_height), // Board
            Constraint::Length(3),         // Message
            Constraint::Length(3),         // Controls
        ])
        .split(frame.area());

    render_header(frame, game_state, &palette, chunks[0]);
    render_board(frame, game_state, &palette, selected_column, chunks[1]);
    render_message(frame, message, chunks[2]);
    render_controls(frame, chunks[3]);
}

fn render_header(
    frame: &mut Frame,
    game_state: &GameState,
    palette: &Palette,
    area: ratatui::layout::Rect,
) {
    let (status, color) = match game_state.status() {
        GameStatus::InProgress => {
            let player = game_state.current_player();
            (
                format!("Current Player: {}", game_state.profile(player).name),
                palette.color(player),
            )
        }
        GameStatus::Won(player) => (
            format!("Game Over  |  {} wins", game_state.profile(player).name),
            palette.color(player),
        ),
        GameStatus::Tied => ("Game Over  |  Tie".to_string(), Color::White),
    };

    let header = Paragraph::new(status)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Connect Four"),
        );

    frame.render_widget(header, area);
}

fn render_board(
    frame: &mut Frame,
    game_state: &GameState,
    palette: &Palette,
    selected_column: usize,
    area: ratatui::layout::Rect,
) {
    let board = game_state.board();
    let winning = game_state.winning_run();
    let mut lines = Vec::new();

    // Column numbers with selection indicator
    let mut col_line = vec![Span::raw("   ")]; // Padding (3 chars to match "  ║")
    for col in 0..board.width() {
        let label = format!("{:^3}", col + 1);
        if col == selected_column {
            col_line.push(Span::styled(
                label,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            ));
        } else {
            col_line.push(Span::raw(label));
        }
    }
    col_line.push(Span::raw("  ")); // Suffix padding to match " ║"
    lines.push(Line::from(col_line));

    let rule = "═".repeat(board.width() * 3 + 1);
    lines.push(Line::from(format!("  ╔{rule}╗")));

    for row in 0..board.height() {
        let mut row_spans = vec![Span::raw("  ║")];
        for (col, &cell) in board.row(row).iter().enumerate() {
            let highlighted = winning.is_some_and(|run| run.contains(&(row, col)));
            row_spans.push(cell_span(cell, palette, highlighted));
        }
        row_spans.push(Span::raw(" ║"));
        lines.push(Line::from(row_spans));
    }

    lines.push(Line::from(format!("  ╚{rule}╝")));

    // Selection indicator
    let mut indicator_line = vec![Span::raw("   ")];
    for col in 0..board.width() {
        if col == selected_column {
            indicator_line.push(Span::styled(" ▲ ", Style::default().fg(Color::Cyan)));
        } else {
            indicator_line.push(Span::raw("   "));
        }
    }
    indicator_line.push(Span::raw("  "));
    lines.push(Line::from(indicator_line));

    let board_widget = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(board_widget, area);
}

fn render_message(frame: &mut Frame, message: &Option<String>, area: ratatui::layout::Rect) {
    let text = message.as_deref().unwrap_or("");
    let msg_widget = Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, area: ratatui::layout::Rect) {
    let controls = Paragraph::new("←/→: Move  |  Enter: Drop  |  R: New game  |  Q: Quit")
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Controls"),
        );

    frame.render_widget(controls, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn screen(game_state: &GameState, message: Option<String>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        terminal
            .draw(|f| render(f, game_state, 3, &message))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_header_names_current_player() {
        let text = screen(&GameState::default(), None);
        assert!(text.contains("Connect Four"));
        assert!(text.contains("Current Player: Player 1"));
    }

    #[test]
    fn test_wide_board_labels_every_column() {
        let p1 = crate::game::PlayerProfile::new("a", "red");
        let p2 = crate::game::PlayerProfile::new("b", "blue");
        let game = GameState::new(crate::config::MAX_DIMENSION, 4, p1, p2).unwrap();
        let mut terminal = Terminal::new(TestBackend::new(220, 20)).unwrap();
        terminal
            .draw(|f| render(f, &game, 0, &None))
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(text.contains(" 64 "));
        assert!(text.contains(" 10 "));
    }

    #[test]
    fn test_header_announces_winner() {
        let mut game = GameState::default();
        for col in [0, 1, 0, 1, 0, 1, 0] {
            game.attempt_drop(col);
        }
        let text = screen(&game, Some("Player 1 wins!".to_string()));
        assert!(text.contains("Player 1 wins"));
        assert!(text.contains("Game Over"));
    }
}
