use crate::board::{Board, Move, PieceCount};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bound {
    Exact,
    Lower,
    Upper,
}

impl Bound {
    /// Classifies a node score against the window the node was entered with.
    pub fn classify(score: i32, orig_alpha: i32, beta: i32) -> Self {
        if score <= orig_alpha { Bound::Upper } else if score >= beta { Bound::Lower } else { Bound::Exact }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Entry {
    pub key: u64,
    pub depth: i32,
    pub score: i32,
    pub best: Option<Move>,
    pub bound: Bound,
    pub gen: u32,
    /// Piece counts of the stored board, checked when verification is on.
    pub pieces: PieceCount,
}

impl Entry {
    pub fn new(key: u64, board: &Board, depth: i32, score: i32, best: Option<Move>, bound: Bound) -> Self {
        Self { key, depth, score, best, bound, gen: 0, pieces: board.count_pieces() }
    }

    pub fn matches(&self, board: &Board) -> bool { self.pieces == board.count_pieces() }

    /// Score usable without expanding the node, if the stored bound allows it.
    pub fn cutoff(&self, depth: i32, alpha: i32, beta: i32) -> Option<i32> {
        if self.depth < depth { return None; }
        match self.bound {
            Bound::Exact => Some(self.score),
            Bound::Lower if self.score >= beta => Some(self.score),
            Bound::Upper if self.score <= alpha => Some(self.score),
            _ => None,
        }
    }
}

const DEFAULT_WAYS: usize = 4;
pub const DEFAULT_ENTRIES: usize = 1 << 16;

#[derive(Default, Clone, Copy)]
struct Bucket {
    slots: [Option<Entry>; DEFAULT_WAYS],
}

/// Fixed-capacity transposition cache owned by a single search.
pub struct Tt {
    buckets: Vec<Bucket>,
    gen: u32,
}

impl Default for Tt {
    fn default() -> Self { Self::with_capacity_entries(DEFAULT_ENTRIES) }
}

impl Tt {
    pub fn with_capacity_entries(cap: usize) -> Self {
        let mut tt = Self { buckets: Vec::new(), gen: 0 };
        tt.set_capacity_entries(cap);
        tt
    }

    pub fn set_capacity_entries(&mut self, cap: usize) {
        let buckets = Self::rounded_capacity(cap) / DEFAULT_WAYS;
        self.buckets.clear();
        self.buckets.resize(buckets, Bucket::default());
        self.gen = 0;
    }

    pub fn capacity(&self) -> usize { self.buckets.len() * DEFAULT_WAYS }

    /// Capacity a table built for `cap` entries ends up with.
    pub fn rounded_capacity(cap: usize) -> usize { cap.max(DEFAULT_WAYS).div_ceil(DEFAULT_WAYS) * DEFAULT_WAYS }

    pub fn clear(&mut self) {
        self.buckets.iter_mut().for_each(|b| *b = Bucket::default());
        self.gen = 0;
    }

    fn bucket_index(&self, key: u64) -> usize {
        let mixed = key ^ (key >> 32);
        (mixed as usize) % self.buckets.len()
    }

    pub fn get(&self, key: u64) -> Option<Entry> {
        let bucket = &self.buckets[self.bucket_index(key)];
        bucket.slots.iter().flatten().find(|e| e.key == key).copied()
    }

    pub fn len(&self) -> usize {
        self.buckets.iter().map(|b| b.slots.iter().flatten().count()).sum()
    }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    pub fn put(&mut self, mut e: Entry) {
        e.gen = self.gen;
        let idx = self.bucket_index(e.key);
        let bucket = &mut self.buckets[idx];
        // Replace same key if at least as deep
        for slot in &mut bucket.slots {
            if let Some(cur) = slot {
                if cur.key == e.key {
                    if e.depth >= cur.depth { *slot = Some(e); }
                    return;
                }
            }
        }
        if let Some(slot) = bucket.slots.iter_mut().find(|s| s.is_none()) {
            *slot = Some(e);
            return;
        }
        // Evict lowest depth, then oldest generation
        let victim = bucket
            .slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.map(|cur| (i, (cur.depth, cur.gen))))
            .min_by_key(|&(_, rank)| rank)
            .map(|(i, _)| i)
            .unwrap_or(0);
        bucket.slots[victim] = Some(e);
    }

    pub fn bump_generation(&mut self) { self.gen = self.gen.wrapping_add(1); }
}
