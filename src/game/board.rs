use serde::{Deserialize, Serialize};

use super::player::Player;

pub const DEFAULT_WIDTH: usize = 7;
pub const DEFAULT_HEIGHT: usize = 6;

/// Number of connected pieces needed to win
pub const CONNECT: usize = 4;

/// Run directions as (row step, column step): right, down, down-right, down-left.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Piece(Player),
}

impl Cell {
    pub fn player(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Piece(player) => Some(player),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

/// How win detection looks for four in a row after a drop.
///
/// Both strategies report the same result for any position reachable through
/// legal play, since a game stops at its first four-in-a-row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WinScan {
    /// Try every cell as the start of a run in each direction.
    #[default]
    FullBoard,
    /// Only count along the four lines through the piece just placed.
    LastMove,
}

/// Four cells forming a winning line, as (row, column) pairs.
pub type Run = [(usize, usize); CONNECT];

/// Row-major grid. Row 0 is the top, row `height - 1` is the bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Create an empty board. Dimensions are validated by the caller, see
    /// `GameConfig::validate`.
    pub(crate) fn new(width: usize, height: usize) -> Self {
        Board {
            width,
            height,
            cells: vec![Cell::Empty; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Get the cell at a specific position.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is outside the board.
    pub fn get(&self, row: usize, col: usize) -> Cell {
        assert!(
            row < self.height && col < self.width,
            "({row}, {col}) is outside a {}x{} board",
            self.width,
            self.height
        );
        self.cells[row * self.width + col]
    }

    /// Cells of one row, left to right.
    ///
    /// # Panics
    ///
    /// Panics if `row` is outside the board.
    pub fn row(&self, row: usize) -> &[Cell] {
        let start = row * self.width;
        &self.cells[start..start + self.width]
    }

    /// Bounds-checked lookup with signed coordinates, for run scanning.
    fn cell_at(&self, row: isize, col: isize) -> Option<Cell> {
        if row < 0 || col < 0 {
            return None;
        }
        let (row, col) = (row as usize, col as usize);
        if row >= self.height || col >= self.width {
            return None;
        }
        Some(self.cells[row * self.width + col])
    }

    pub fn is_valid_column(&self, col: usize) -> bool {
        col < self.width
    }

    /// Lowest empty row in a column, scanning from the bottom up.
    /// `None` when the column is full or does not exist.
    pub fn find_open_row(&self, col: usize) -> Option<usize> {
        if !self.is_valid_column(col) {
            return None;
        }
        (0..self.height)
            .rev()
            .find(|&row| self.cells[row * self.width + col].is_empty())
    }

    /// Check if a column is full. Columns off the board count as full.
    pub fn is_column_full(&self, col: usize) -> bool {
        self.find_open_row(col).is_none()
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }

    /// Number of occupied cells
    pub fn piece_count(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }

    /// Write a piece into an empty cell.
    pub(crate) fn place(&mut self, row: usize, col: usize, player: Player) {
        let idx = row * self.width + col;
        debug_assert!(self.cells[idx].is_empty(), "cell ({row}, {col}) already occupied");
        self.cells[idx] = Cell::Piece(player);
    }

    /// Find a four-in-a-row for `player` by trying every cell as the start of
    /// a rightward, downward, down-right and down-left run.
    pub fn winning_run(&self, player: Player) -> Option<Run> {
        let target = Cell::Piece(player);
        for row in 0..self.height {
            for col in 0..self.width {
                for &(dr, dc) in &DIRECTIONS {
                    let mut run: Run = [(0, 0); CONNECT];
                    let complete = (0..CONNECT).all(|k| {
                        let r = row as isize + dr * k as isize;
                        let c = col as isize + dc * k as isize;
                        if self.cell_at(r, c) == Some(target) {
                            run[k] = (r as usize, c as usize);
                            true
                        } else {
                            false
                        }
                    });
                    if complete {
                        return Some(run);
                    }
                }
            }
        }
        None
    }

    pub fn has_win(&self, player: Player) -> bool {
        self.winning_run(player).is_some()
    }

    /// Check if the piece at (row, col) sits on a line of four or more of its
    /// own color.
    pub fn has_win_through(&self, row: usize, col: usize) -> bool {
        let Some(cell @ Cell::Piece(_)) = self.cell_at(row as isize, col as isize) else {
            return false;
        };

        DIRECTIONS.iter().any(|&(dr, dc)| {
            let count = 1
                + self.count_from(row, col, dr, dc, cell)
                + self.count_from(row, col, -dr, -dc, cell);
            count >= CONNECT
        })
    }

    /// Count consecutive `cell`s stepping away from (row, col), excluding it.
    fn count_from(&self, row: usize, col: usize, dr: isize, dc: isize, cell: Cell) -> usize {
        let mut count = 0;
        let mut r = row as isize + dr;
        let mut c = col as isize + dc;
        while self.cell_at(r, c) == Some(cell) {
            count += 1;
            r += dr;
            c += dc;
        }
        count
    }

    /// Win check for the piece just placed at (row, col), using `scan`.
    pub fn is_winning_move(&self, scan: WinScan, row: usize, col: usize) -> bool {
        match scan {
            WinScan::FullBoard => match self.cell_at(row as isize, col as isize) {
                Some(Cell::Piece(player)) => self.has_win(player),
                _ => false,
            },
            WinScan::LastMove => self.has_win_through(row, col),
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}
