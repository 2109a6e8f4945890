use crate::board::squares::{is_c_square, is_corner, is_edge, is_x_square, step, DIRECTIONS, NUM_SQUARES};
use crate::board::{Board, Cell, Side};

const CORNER: i32 = 100;
const EDGE: i32 = 20;
const X_SQUARE: i32 = -30;
const C_SQUARE: i32 = -20;

const MOBILITY_WEIGHT: i32 = 10;
const FRONTIER_WEIGHT: i32 = 5;
const PARITY_BONUS: i32 = 5;
/// Parity only matters once this few squares remain.
pub const PARITY_EMPTIES: u32 = 20;
/// At or below this many empty squares a leaf is scored by [`exact`].
pub const EXACT_LEAF_EMPTIES: u32 = 14;

/// Disc differential multiplier for exact scores.
pub const EXACT_WEIGHT: i32 = 1000;

// Class checks are tried in order, so edge membership wins over the
// X-square penalty for the border squares next to a corner.
const fn square_weight(sq: usize) -> i32 {
    if is_corner(sq) { CORNER }
    else if is_edge(sq) { EDGE }
    else if is_x_square(sq) { X_SQUARE }
    else if is_c_square(sq) { C_SQUARE }
    else { 0 }
}

pub const SQUARE_WEIGHTS: [i32; NUM_SQUARES] = {
    let mut t = [0i32; NUM_SQUARES];
    let mut i = 0;
    while i < NUM_SQUARES {
        t[i] = square_weight(i);
        i += 1;
    }
    t
};

/// Sum of square weights, own discs positive and opponent discs negative.
pub fn positional(board: &Board, side: Side) -> i32 {
    let mut score = 0;
    for (sq, cell) in board.cells().iter().enumerate() {
        match cell.side() {
            Some(s) if s == side => score += SQUARE_WEIGHTS[sq],
            Some(_) => score -= SQUARE_WEIGHTS[sq],
            None => {}
        }
    }
    score
}

pub fn mobility(board: &Board, side: Side) -> i32 {
    board.valid_moves(side).len() as i32 - board.valid_moves(side.opponent()).len() as i32
}

fn is_frontier(board: &Board, sq: usize) -> bool {
    DIRECTIONS.iter().any(|&d| matches!(step(sq, d), Some(n) if board.cell(n) == Cell::Empty))
}

/// Opponent frontier discs minus own frontier discs.
pub fn frontier(board: &Board, side: Side) -> i32 {
    let mut own = 0;
    let mut opp = 0;
    for (sq, cell) in board.cells().iter().enumerate() {
        let Some(s) = cell.side() else { continue };
        if !is_frontier(board, sq) { continue; }
        if s == side { own += 1 } else { opp += 1 }
    }
    opp - own
}

/// Bonus for the side whose turn it is under strict alternation from the
/// opening: Dark on even empty counts, Light on odd ones.
pub fn parity(empties: u32, side: Side) -> i32 {
    let dark = side == Side::Dark;
    let even = empties % 2 == 0;
    if dark == even { PARITY_BONUS } else { -PARITY_BONUS }
}

/// Static evaluation of a non-terminal position from `side`'s point of view.
/// Late positions fall back to the disc differential.
pub fn heuristic(board: &Board, side: Side) -> i32 {
    let empties = board.empty_count();
    if empties <= EXACT_LEAF_EMPTIES {
        return exact(board, side);
    }
    let mut score = MOBILITY_WEIGHT * mobility(board, side);
    score += positional(board, side);
    score += FRONTIER_WEIGHT * frontier(board, side);
    if empties <= PARITY_EMPTIES {
        score += parity(empties, side);
    }
    score
}

/// Exact score: disc differential scaled by [`EXACT_WEIGHT`].
pub fn exact(board: &Board, side: Side) -> i32 {
    let count = board.count_pieces();
    EXACT_WEIGHT * (count.of(side) as i32 - count.of(side.opponent()) as i32)
}
