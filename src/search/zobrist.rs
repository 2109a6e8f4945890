use crate::board::squares::NUM_SQUARES;
use crate::board::{Board, Side};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

pub const DEFAULT_SEED: u64 = 0xF00D_F00D_DEAD_BEEF;

/// Random keys for Zobrist-style board fingerprints: one key per
/// (square, side) pair plus a side-to-move key. Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ZobristKeys {
    cells: [[u64; 2]; NUM_SQUARES],
    side: u64,
}

impl Default for ZobristKeys {
    fn default() -> Self { Self::with_seed(DEFAULT_SEED) }
}

impl ZobristKeys {
    pub fn with_seed(seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut cells = [[0u64; 2]; NUM_SQUARES];
        for pair in &mut cells {
            pair[0] = rng.gen();
            pair[1] = rng.gen();
        }
        let side = rng.gen();
        Self { cells, side }
    }

    /// Uses caller-supplied keys as-is.
    pub fn from_keys(cells: [[u64; 2]; NUM_SQUARES], side: u64) -> Self {
        Self { cells, side }
    }

    /// XOR of the keys of every occupied square.
    pub fn board_key(&self, board: &Board) -> u64 {
        let mut key = 0u64;
        for (sq, cell) in board.cells().iter().enumerate() {
            if let Some(s) = cell.side() {
                key ^= self.cells[sq][s.index()];
            }
        }
        key
    }

    /// Cache key for `board` with `side` to move.
    pub fn key(&self, board: &Board, side: Side) -> u64 {
        let key = self.board_key(board);
        if side == Side::Light { key ^ self.side } else { key }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_keys() {
        assert_eq!(ZobristKeys::with_seed(7), ZobristKeys::with_seed(7));
        assert_ne!(ZobristKeys::with_seed(7), ZobristKeys::with_seed(8));
    }

    #[test]
    fn side_to_move_changes_the_key() {
        let keys = ZobristKeys::default();
        let b = Board::initial();
        assert_eq!(keys.key(&b, Side::Dark), keys.board_key(&b));
        assert_ne!(keys.key(&b, Side::Dark), keys.key(&b, Side::Light));
    }

    #[test]
    fn empty_board_hashes_to_zero() {
        assert_eq!(ZobristKeys::default().board_key(&Board::empty()), 0);
    }
}
