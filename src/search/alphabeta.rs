use crate::board::{Board, IllegalMove, Move, Side};
use crate::search::eval::{exact, heuristic};
use crate::search::ordering::order_moves;
use crate::search::safety::{fallback_move, validated_or_fallback};
use crate::search::tt::{Bound, Entry, Tt, DEFAULT_ENTRIES};
use crate::search::zobrist::ZobristKeys;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Window bound; larger than any reachable score (64 discs * 1000).
pub const INF: i32 = 1_000_000;

/// Share of the time budget the search may use.
const TIME_USAGE: f64 = 0.9;
/// Next depth is skipped unless `now + avg_depth_time * 1.5` beats the deadline.
const NEXT_DEPTH_MARGIN: f64 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParams {
    pub max_depth: u32,
    pub movetime: Duration,
    pub iterative_deepening: bool,
    /// Switch to the exact solver at or below this many empty squares; 0 disables it.
    pub endgame_threshold: u32,
    pub tt_entries: usize,
    /// Reject cache hits whose stored piece counts differ from the probed board.
    pub verify_tt: bool,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            max_depth: 15,
            movetime: Duration::from_millis(1000),
            iterative_deepening: true,
            endgame_threshold: 14,
            tt_entries: DEFAULT_ENTRIES,
            verify_tt: false,
        }
    }
}

/// Score from the point of view of the side to move at the node, plus the
/// move that produced it (if any).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchOutcome {
    pub score: i32,
    pub best: Option<Move>,
}

impl SearchOutcome {
    /// Returned when the deadline has already passed.
    pub const NEUTRAL: SearchOutcome = SearchOutcome { score: 0, best: None };
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchResult {
    pub best: Option<Move>,
    pub score: i32,
    /// Deepest iteration whose move was adopted.
    pub depth: u32,
    pub nodes: u64,
    /// The fallback policy chose `best`.
    pub fallback: bool,
}

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("search applied an illegal move: {0}")]
    IllegalMove(#[from] IllegalMove),
}

/// One engine "player". Owns its transposition cache; Zobrist keys are
/// shared read-only and never change after construction.
pub struct Searcher {
    keys: Arc<ZobristKeys>,
    tt: Tt,
    pub(crate) nodes: u64,
    pub(crate) deadline: Option<Instant>,
    verify_tt: bool,
}

impl Default for Searcher {
    fn default() -> Self { Self::new(Arc::new(ZobristKeys::default())) }
}

impl Searcher {
    pub fn new(keys: Arc<ZobristKeys>) -> Self {
        Self { keys, tt: Tt::default(), nodes: 0, deadline: None, verify_tt: false }
    }

    pub fn with_seed(seed: u64) -> Self { Self::new(Arc::new(ZobristKeys::with_seed(seed))) }

    pub fn nodes(&self) -> u64 { self.nodes }

    /// Deadline honoured by [`Searcher::negamax`] and the endgame solver;
    /// `None` searches without a time limit.
    pub fn set_deadline(&mut self, deadline: Option<Instant>) { self.deadline = deadline; }

    /// Depth and bound of the cached entry for `board` with `side` to move.
    pub fn tt_probe(&self, board: &Board, side: Side) -> Option<(i32, Bound)> {
        self.tt.get(self.keys.key(board, side)).map(|e| (e.depth, e.bound))
    }

    pub(crate) fn out_of_time(&self) -> bool {
        self.deadline.is_some_and(|dl| Instant::now() >= dl)
    }

    /// Best move for `side`, or `None` when it has to pass.
    pub fn find_best_move(&mut self, board: &Board, side: Side, params: &SearchParams) -> Option<Move> {
        self.search(board, side, params).best
    }

    /// Runs one independent search. Never fails: search faults and panics
    /// are logged and replaced by the fallback move.
    pub fn search(&mut self, board: &Board, side: Side, params: &SearchParams) -> SearchResult {
        let start = Instant::now();
        // A budget too large to represent means no deadline
        self.deadline = start.checked_add(params.movetime.mul_f64(TIME_USAGE));
        self.nodes = 0;
        self.verify_tt = params.verify_tt;
        if self.tt.capacity() == Tt::rounded_capacity(params.tt_entries) {
            self.tt.clear();
        } else {
            self.tt.set_capacity_entries(params.tt_entries);
        }

        let moves = board.valid_moves(side);
        if moves.is_empty() {
            return SearchResult::default();
        }

        let run = catch_unwind(AssertUnwindSafe(|| self.iterate(board, side, &moves, params, start)));
        let mut result = match run {
            Ok(r) => r,
            Err(_) => {
                warn!("search panicked for {side}; substituting fallback move");
                SearchResult { nodes: self.nodes, fallback: true, ..SearchResult::default() }
            }
        };
        let checked = validated_or_fallback(board, side, result.best);
        if checked != result.best {
            if !result.fallback {
                warn!("search produced unusable move {:?}; substituting fallback move", result.best);
            }
            result.best = checked;
            result.fallback = true;
        }
        result
    }

    fn iterate(&mut self, board: &Board, side: Side, moves: &[Move], params: &SearchParams, start: Instant) -> SearchResult {
        let threshold = params.endgame_threshold;
        let ordered = order_moves(board, moves, side);
        let mut result = SearchResult { best: ordered.first().copied(), ..SearchResult::default() };

        if !params.iterative_deepening {
            match self.negamax(board, params.max_depth as i32, -INF, INF, side, threshold) {
                Ok(out) => {
                    if let Some(m) = out.best.filter(|m| moves.contains(m)) {
                        result.best = Some(m);
                        result.score = out.score;
                        result.depth = params.max_depth;
                    }
                }
                Err(e) => {
                    warn!("search fault at depth {}: {e}", params.max_depth);
                    result.fallback = true;
                    result.best = fallback_move(board, side);
                }
            }
            result.nodes = self.nodes;
            return result;
        }

        let solved_at_root = threshold > 0 && board.empty_count() <= threshold;
        for depth in 1..=params.max_depth {
            if self.out_of_time() { break; }
            self.tt.bump_generation();
            let out = match self.negamax(board, depth as i32, -INF, INF, side, threshold) {
                Ok(out) => out,
                Err(e) => {
                    warn!("search fault at depth {depth}: {e}");
                    if result.depth == 0 {
                        result.fallback = true;
                        result.best = fallback_move(board, side);
                    }
                    break;
                }
            };
            if self.out_of_time() {
                debug!("depth {depth} cut by deadline, keeping depth {}", result.depth);
                break;
            }
            if let Some(m) = out.best.filter(|m| moves.contains(m)) {
                result.best = Some(m);
                result.score = out.score;
                result.depth = depth;
            }
            let elapsed = start.elapsed();
            debug!("depth {depth} score {} move {:?} nodes {} elapsed {:?}", out.score, out.best, self.nodes, elapsed);
            // Deeper iterations repeat the same exact solve
            if solved_at_root { break; }
            if let Some(dl) = self.deadline {
                let avg = elapsed / depth;
                if Instant::now() + avg.mul_f64(NEXT_DEPTH_MARGIN) >= dl {
                    debug!("stopping before depth {}: projected past deadline", depth + 1);
                    break;
                }
            }
        }
        result.nodes = self.nodes;
        result
    }

    /// Negamax with alpha-beta pruning. A forced pass is charged one ply of
    /// depth like a real move.
    pub fn negamax(
        &mut self,
        board: &Board,
        depth: i32,
        mut alpha: i32,
        beta: i32,
        side: Side,
        endgame_threshold: u32,
    ) -> Result<SearchOutcome, SearchError> {
        if self.out_of_time() { return Ok(SearchOutcome::NEUTRAL); }
        self.nodes += 1;

        let key = self.keys.key(board, side);
        if let Some(e) = self.tt.get(key) {
            if !self.verify_tt || e.matches(board) {
                if let Some(score) = e.cutoff(depth, alpha, beta) {
                    return Ok(SearchOutcome { score, best: e.best });
                }
            }
        }

        let moves = board.valid_moves(side);
        if moves.is_empty() {
            if !board.has_any_move(side.opponent()) {
                return Ok(SearchOutcome { score: exact(board, side), best: None });
            }
            let reply = self.negamax(board, depth - 1, -beta, -alpha, side.opponent(), endgame_threshold)?;
            return Ok(SearchOutcome { score: -reply.score, best: None });
        }

        if endgame_threshold > 0 && board.empty_count() <= endgame_threshold {
            return self.solve_endgame(board, alpha, beta, side);
        }

        if depth <= 0 {
            return Ok(SearchOutcome { score: heuristic(board, side), best: moves.first().copied() });
        }

        let orig_alpha = alpha;
        let mut best = SearchOutcome { score: -INF, best: None };
        for mv in order_moves(board, &moves, side) {
            let child = board.apply_move(mv, side)?;
            let score = -self.negamax(&child, depth - 1, -beta, -alpha, side.opponent(), endgame_threshold)?.score;
            if score > best.score { best = SearchOutcome { score, best: Some(mv) }; }
            alpha = alpha.max(score);
            if alpha >= beta { break; }
            if self.out_of_time() { break; }
        }

        // Results of a node cut short by the deadline are not trusted later
        if !self.out_of_time() {
            let bound = Bound::classify(best.score, orig_alpha, beta);
            self.tt.put(Entry::new(key, board, depth, best.score, best.best, bound));
        }
        Ok(best)
    }
}
