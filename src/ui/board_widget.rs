use std::str::FromStr;

use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
};

use crate::game::{Cell, GameState, Player, PlayerProfile};

/// Terminal colors for each seat, taken from the player profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    colors: [Color; 2],
}

impl Palette {
    pub fn from_game(game: &GameState) -> Self {
        Palette {
            colors: [
                profile_color(game.profile(Player::One), Player::One),
                profile_color(game.profile(Player::Two), Player::Two),
            ],
        }
    }

    pub fn color(&self, player: Player) -> Color {
        self.colors[player.index()]
    }
}

/// Parse a profile color ("red", "#ff8800", "42"), falling back to the classic
/// red/yellow when it is not a color the terminal knows.
pub fn profile_color(profile: &PlayerProfile, player: Player) -> Color {
    Color::from_str(&profile.color).unwrap_or(match player {
        Player::One => Color::Red,
        Player::Two => Color::Yellow,
    })
}

/// One board cell as a three-column span. Pieces on the winning line are
/// drawn reversed.
pub fn cell_span(cell: Cell, palette: &Palette, highlighted: bool) -> Span<'static> {
    match cell {
        Cell::Empty => Span::styled(" . ", Style::default().fg(Color::DarkGray)),
        Cell::Piece(player) => {
            let mut style = Style::default().fg(palette.color(player));
            if highlighted {
                style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
            }
            Span::styled(" \u{25cf} ", style)
        }
    }
}
