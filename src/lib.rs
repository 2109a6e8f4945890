// Othello move engine: board rules plus negamax alpha-beta search
pub mod board;
pub mod config;
pub mod perft;
pub mod protocol;
pub mod record;
pub mod search;
pub mod selfplay;

pub use board::{Board, Cell, GameResult, IllegalMove, Move, PieceCount, Side};
pub use search::alphabeta::{SearchParams, SearchResult, Searcher};
