use crate::board::squares::{is_c_square, is_corner, is_edge, is_x_square};
use crate::board::{Board, Move, Side};
use std::cmp::Reverse;

const CORNER_BONUS: i32 = 1000;
const EDGE_BONUS: i32 = 100;
const X_SQUARE_PENALTY: i32 = -300;
const C_SQUARE_PENALTY: i32 = -200;

/// Ordering priority of `mv`. Class terms are additive: an X-square on the
/// border earns the edge bonus and the X-square penalty.
pub fn move_priority(board: &Board, mv: Move, side: Side) -> i32 {
    let mut p = 0;
    if is_corner(mv) { p += CORNER_BONUS; }
    if is_edge(mv) { p += EDGE_BONUS; }
    if is_x_square(mv) { p += X_SQUARE_PENALTY; }
    if is_c_square(mv) { p += C_SQUARE_PENALTY; }
    p + board.capture_count(mv, side) as i32
}

/// Highest priority first; equal priorities keep enumeration order.
pub fn order_moves(board: &Board, moves: &[Move], side: Side) -> Vec<Move> {
    let mut ordered = moves.to_vec();
    ordered.sort_by_cached_key(|&m| Reverse(move_priority(board, m, side)));
    ordered
}
