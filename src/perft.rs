use crate::board::{Board, Side};

/// Counts move sequences of length `depth`. A forced pass counts as a ply;
/// a finished game is a single leaf.
pub fn perft(board: &Board, side: Side, depth: u32) -> u64 {
    if depth == 0 { return 1; }
    let moves = board.valid_moves(side);
    if moves.is_empty() {
        if !board.has_any_move(side.opponent()) { return 1; }
        return perft(board, side.opponent(), depth - 1);
    }
    let mut nodes = 0u64;
    for m in moves {
        if let Ok(child) = board.apply_move(m, side) {
            nodes += perft(&child, side.opponent(), depth - 1);
        }
    }
    nodes
}
