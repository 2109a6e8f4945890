use crate::board::squares::is_corner;
use crate::board::{Board, Move, Side};

/// Safe substitute when the search fails or yields an unusable move:
/// any legal corner, else the first enumerated legal move.
pub fn fallback_move(board: &Board, side: Side) -> Option<Move> {
    let moves = board.valid_moves(side);
    moves.iter().copied().find(|&m| is_corner(m)).or_else(|| moves.first().copied())
}

/// Returns `candidate` when it is legal for `side`, else [`fallback_move`].
pub fn validated_or_fallback(board: &Board, side: Side, candidate: Option<Move>) -> Option<Move> {
    match candidate {
        Some(m) if board.is_legal(m, side) => Some(m),
        _ => fallback_move(board, side),
    }
}
