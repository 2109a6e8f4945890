pub mod alphabeta;
pub mod endgame;
pub mod eval;
pub mod ordering;
pub mod safety;
pub mod tt;
pub mod zobrist;
