//! Exact endgame solver: plays every line out to the end of the game and
//! scores it by disc differential. No depth limit, no heuristic and no
//! transposition cache; recursion depth is bounded by the empty squares.

use crate::board::{Board, Side};
use crate::search::alphabeta::{SearchError, SearchOutcome, Searcher, INF};
use crate::search::eval::exact;
use crate::search::ordering::order_moves;

impl Searcher {
    pub fn solve_endgame(&mut self, board: &Board, mut alpha: i32, beta: i32, side: Side) -> Result<SearchOutcome, SearchError> {
        if self.out_of_time() { return Ok(SearchOutcome::NEUTRAL); }
        self.nodes += 1;

        let moves = board.valid_moves(side);
        if moves.is_empty() {
            if !board.has_any_move(side.opponent()) {
                return Ok(SearchOutcome { score: exact(board, side), best: None });
            }
            let reply = self.solve_endgame(board, -beta, -alpha, side.opponent())?;
            return Ok(SearchOutcome { score: -reply.score, best: None });
        }

        let mut best = SearchOutcome { score: -INF, best: None };
        for mv in order_moves(board, &moves, side) {
            let child = board.apply_move(mv, side)?;
            let score = -self.solve_endgame(&child, -beta, -alpha, side.opponent())?.score;
            if score > best.score { best = SearchOutcome { score, best: Some(mv) }; }
            alpha = alpha.max(score);
            if alpha >= beta { break; }
            if self.out_of_time() { break; }
        }
        Ok(best)
    }
}
