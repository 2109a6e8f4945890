use crate::board::{Board, GameResult, Move, Side};
use crate::record::GameRecord;
use crate::search::alphabeta::{SearchParams, Searcher};
use crate::search::zobrist::ZobristKeys;
use log::{debug, warn};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct SelfPlayParams {
    pub games: usize,
    pub dark: SearchParams,
    pub light: SearchParams,
    /// Uniformly random plies played before the engines take over.
    pub random_plies: usize,
    pub seed: u64,
    pub threads: usize,
}

impl Default for SelfPlayParams {
    fn default() -> Self {
        Self {
            games: 1,
            dark: SearchParams::default(),
            light: SearchParams::default(),
            random_plies: 0,
            seed: 42,
            threads: 1,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameLog {
    /// Plies in order; `None` is a pass.
    pub moves: Vec<Option<Move>>,
    pub final_board: Board,
    pub result: GameResult,
}

impl GameLog {
    /// Placed discs, passes excluded.
    pub fn move_count(&self) -> u32 {
        self.moves.iter().filter(|m| m.is_some()).count() as u32
    }

    pub fn to_record(&self, difficulty: Option<String>) -> GameRecord {
        let count = self.final_board.count_pieces();
        GameRecord {
            timestamp: chrono::Utc::now(),
            winner: self.result,
            dark_score: count.dark,
            light_score: count.light,
            move_count: self.move_count(),
            difficulty,
        }
    }
}

/// Plays one full game. Each side gets its own [`Searcher`]; both share
/// the same Zobrist keys.
pub fn play_game(params: &SelfPlayParams, keys: Arc<ZobristKeys>, game_index: usize) -> GameLog {
    let mut rng = SmallRng::seed_from_u64(params.seed ^ (game_index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15));
    let mut engines = [Searcher::new(keys.clone()), Searcher::new(keys)];
    let mut board = Board::initial();
    let mut side = Side::Dark;
    let mut moves = Vec::new();

    while !board.is_terminal() {
        let legal = board.valid_moves(side);
        let chosen = if legal.is_empty() {
            None
        } else if moves.len() < params.random_plies {
            Some(legal[rng.gen_range(0..legal.len())])
        } else {
            let p = if side == Side::Dark { &params.dark } else { &params.light };
            engines[side.index()].find_best_move(&board, side, p)
        };
        if let Some(m) = chosen {
            match board.apply_move(m, side) {
                Ok(next) => board = next,
                Err(e) => {
                    warn!("game {game_index}: {e}; abandoning game");
                    break;
                }
            }
        }
        moves.push(chosen);
        side = side.opponent();
    }

    let result = board.winner().unwrap_or_else(|| {
        let count = board.count_pieces();
        if count.dark > count.light { GameResult::Dark } else if count.light > count.dark { GameResult::Light } else { GameResult::Tie }
    });
    debug!("game {game_index}: {result} after {} plies", moves.len());
    GameLog { moves, final_board: board, result }
}

pub fn generate_games(params: &SelfPlayParams) -> Vec<GameLog> {
    let keys = Arc::new(ZobristKeys::with_seed(params.seed));
    if params.threads <= 1 {
        return (0..params.games).map(|i| play_game(params, keys.clone(), i)).collect();
    }
    match rayon::ThreadPoolBuilder::new().num_threads(params.threads).build() {
        Ok(pool) => pool.install(|| {
            (0..params.games).into_par_iter().map(|i| play_game(params, keys.clone(), i)).collect()
        }),
        Err(_) => (0..params.games).into_par_iter().map(|i| play_game(params, keys.clone(), i)).collect(),
    }
}
