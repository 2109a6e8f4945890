//! Board model: cell states, legality, capture resolution, scoring and
//! terminal detection.

pub mod squares;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub use squares::Square;
use squares::{step, BOARD_SIZE, DIRECTIONS, NUM_SQUARES};

/// A move is the square a side places its disc on.
pub type Move = Square;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Dark,
    Light,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Dark => Side::Light,
            Side::Light => Side::Dark,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Side::Dark => 0,
            Side::Light => 1,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self { Side::Dark => "dark", Side::Light => "light" })
    }
}

impl FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dark" | "d" | "black" | "b" | "x" => Ok(Side::Dark),
            "light" | "l" | "white" | "w" | "o" => Ok(Side::Light),
            other => Err(format!("unknown side: {other}")),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Empty,
    Dark,
    Light,
}

impl Cell {
    pub fn side(self) -> Option<Side> {
        match self {
            Cell::Empty => None,
            Cell::Dark => Some(Side::Dark),
            Cell::Light => Some(Side::Light),
        }
    }

    pub fn is_empty(self) -> bool { self == Cell::Empty }

    fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Dark => 'X',
            Cell::Light => 'O',
        }
    }
}

impl From<Side> for Cell {
    fn from(side: Side) -> Self {
        match side {
            Side::Dark => Cell::Dark,
            Side::Light => Cell::Light,
        }
    }
}

/// Outcome of a finished game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameResult {
    Dark,
    Light,
    Tie,
}

impl GameResult {
    pub fn winner(self) -> Option<Side> {
        match self {
            GameResult::Dark => Some(Side::Dark),
            GameResult::Light => Some(Side::Light),
            GameResult::Tie => None,
        }
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GameResult::Dark => "dark",
            GameResult::Light => "light",
            GameResult::Tie => "tie",
        })
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceCount {
    pub dark: u32,
    pub light: u32,
}

impl PieceCount {
    pub fn of(self, side: Side) -> u32 {
        match side {
            Side::Dark => self.dark,
            Side::Light => self.light,
        }
    }

    pub fn total(self) -> u32 { self.dark + self.light }
}

/// Placing `side` on `square` captures nothing (or the square is taken).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("illegal move {square} for {side}")]
pub struct IllegalMove {
    pub square: Square,
    pub side: Side,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardParseError {
    #[error("expected 64 cells, found {0}")]
    WrongLength(usize),
    #[error("invalid cell character {0:?}")]
    InvalidCell(char),
}

/// An 8x8 snapshot. Never mutated after construction; moves produce a new
/// value.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Cell; NUM_SQUARES],
}

impl Default for Board {
    fn default() -> Self { Self::initial() }
}

impl Board {
    pub fn empty() -> Self { Self { cells: [Cell::Empty; NUM_SQUARES] } }

    /// Standard start: Light on 27 and 36, Dark on 28 and 35.
    pub fn initial() -> Self {
        let mut cells = [Cell::Empty; NUM_SQUARES];
        cells[27] = Cell::Light;
        cells[28] = Cell::Dark;
        cells[35] = Cell::Dark;
        cells[36] = Cell::Light;
        Self { cells }
    }

    pub fn cells(&self) -> &[Cell; NUM_SQUARES] { &self.cells }

    pub fn cell(&self, sq: Square) -> Cell { self.cells[sq] }

    /// Squares `side` would capture by placing on `sq`. Empty when the
    /// placement is illegal.
    pub fn captures(&self, sq: Square, side: Side) -> Vec<Square> {
        let mut flipped = Vec::new();
        self.walk_captures(sq, side, |run| flipped.extend_from_slice(run));
        flipped
    }

    /// Number of discs `side` would capture on `sq`, without allocating.
    pub fn capture_count(&self, sq: Square, side: Side) -> usize {
        let mut n = 0;
        self.walk_captures(sq, side, |run| n += run.len());
        n
    }

    pub fn is_legal(&self, sq: Square, side: Side) -> bool {
        sq < NUM_SQUARES && self.capture_count(sq, side) > 0
    }

    // Calls `on_run` with every bracketed run of opposing discs around `sq`.
    fn walk_captures(&self, sq: Square, side: Side, mut on_run: impl FnMut(&[Square])) {
        if sq >= NUM_SQUARES || !self.cells[sq].is_empty() { return; }
        let own = Cell::from(side);
        let opp = Cell::from(side.opponent());
        // An unbracketed ray can hold up to 7 opposing discs
        let mut run = [0usize; BOARD_SIZE - 1];
        for &dir in &DIRECTIONS {
            let mut len = 0;
            let mut cur = step(sq, dir);
            while let Some(s) = cur {
                let c = self.cells[s];
                if c == opp {
                    run[len] = s;
                    len += 1;
                    cur = step(s, dir);
                } else {
                    if c == own && len > 0 { on_run(&run[..len]); }
                    break;
                }
            }
        }
    }

    pub fn valid_moves(&self, side: Side) -> Vec<Move> {
        (0..NUM_SQUARES).filter(|&sq| self.is_legal(sq, side)).collect()
    }

    pub fn has_any_move(&self, side: Side) -> bool {
        (0..NUM_SQUARES).any(|sq| self.is_legal(sq, side))
    }

    /// Places `side` on `mv` and flips every bracketed run.
    pub fn apply_move(&self, mv: Move, side: Side) -> Result<Board, IllegalMove> {
        let flipped = self.captures(mv, side);
        if flipped.is_empty() {
            return Err(IllegalMove { square: mv, side });
        }
        let mut next = *self;
        next.cells[mv] = Cell::from(side);
        for s in flipped { next.cells[s] = Cell::from(side); }
        Ok(next)
    }

    pub fn count_pieces(&self) -> PieceCount {
        let mut count = PieceCount::default();
        for c in &self.cells {
            match c {
                Cell::Dark => count.dark += 1,
                Cell::Light => count.light += 1,
                Cell::Empty => {}
            }
        }
        count
    }

    pub fn empty_count(&self) -> u32 {
        self.cells.iter().filter(|c| c.is_empty()).count() as u32
    }

    /// Neither side can move, regardless of how many squares are empty.
    pub fn is_terminal(&self) -> bool {
        !self.has_any_move(Side::Dark) && !self.has_any_move(Side::Light)
    }

    /// `None` until the game is over.
    pub fn winner(&self) -> Option<GameResult> {
        if !self.is_terminal() { return None; }
        let count = self.count_pieces();
        Some(match count.dark.cmp(&count.light) {
            std::cmp::Ordering::Greater => GameResult::Dark,
            std::cmp::Ordering::Less => GameResult::Light,
            std::cmp::Ordering::Equal => GameResult::Tie,
        })
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  a b c d e f g h")?;
        for row in 0..8 {
            write!(f, "{}", row + 1)?;
            for col in 0..8 {
                write!(f, " {}", self.cells[row * 8 + col].symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s: String = self.cells.iter().map(|c| c.symbol()).collect();
        write!(f, "Board({s})")
    }
}

/// Parses 64 cell characters in index order, ignoring whitespace.
/// `.`/`-`/`_` are empty, `X`/`B` dark and `O`/`W` light.
impl FromStr for Board {
    type Err = BoardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cells = [Cell::Empty; NUM_SQUARES];
        let mut n = 0usize;
        for ch in s.chars().filter(|c| !c.is_whitespace()) {
            let cell = match ch {
                '.' | '-' | '_' => Cell::Empty,
                'X' | 'x' | 'B' | 'b' => Cell::Dark,
                'O' | 'o' | 'W' | 'w' => Cell::Light,
                other => return Err(BoardParseError::InvalidCell(other)),
            };
            if n < NUM_SQUARES { cells[n] = cell; }
            n += 1;
        }
        if n != NUM_SQUARES { return Err(BoardParseError::WrongLength(n)); }
        Ok(Self { cells })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_follow_each_bracketed_direction() {
        // Light run b2..c3 bracketed by dark d4
        let b: Board = "\
            ........
            .O......
            ..O.....
            ...X....
            ........
            ........
            ........
            ........"
            .parse()
            .unwrap();
        assert_eq!(b.captures(0, Side::Dark), vec![9, 18]);
        assert!(b.captures(0, Side::Light).is_empty());
        assert_eq!(b.capture_count(0, Side::Dark), 2);
    }

    #[test]
    fn run_ending_on_the_edge_captures_nothing() {
        let b: Board = "\
            .OOOOOOO
            ........
            ........
            ........
            ........
            ........
            ........
            ........"
            .parse()
            .unwrap();
        assert!(!b.is_legal(0, Side::Dark));
    }

    #[test]
    fn occupied_square_is_never_legal() {
        let b = Board::initial();
        assert!(!b.is_legal(27, Side::Dark));
        assert!(b.apply_move(27, Side::Dark).is_err());
    }

    #[test]
    fn parse_rejects_short_input() {
        assert_eq!("...".parse::<Board>(), Err(BoardParseError::WrongLength(3)));
        assert!(matches!("Z".repeat(64).parse::<Board>(), Err(BoardParseError::InvalidCell('Z'))));
    }
}
