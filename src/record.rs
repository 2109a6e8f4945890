//! Finished-game records and the stores that keep them.

use crate::board::{Board, GameResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub timestamp: DateTime<Utc>,
    pub winner: GameResult,
    pub dark_score: u32,
    pub light_score: u32,
    pub move_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
}

impl GameRecord {
    /// Record for a finished board; `None` while the game is still going.
    pub fn from_final_board(board: &Board, move_count: u32, difficulty: Option<String>) -> Option<Self> {
        let winner = board.winner()?;
        let count = board.count_pieces();
        Some(Self {
            timestamp: Utc::now(),
            winner,
            dark_score: count.dark,
            light_score: count.light,
            move_count,
            difficulty,
        })
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record store I/O: {0}")]
    Io(#[from] std::io::Error),
    #[error("record encoding: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Persists finished games and hands back a storage identifier.
pub trait ResultStore {
    fn save(&mut self, record: &GameRecord) -> Result<String, StoreError>;
}

/// One JSON object per line, appended to a file. Identifiers are 1-based
/// line numbers.
pub struct JsonlStore {
    path: PathBuf,
    lines: usize,
}

impl JsonlStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let lines = if path.exists() {
            BufReader::new(File::open(&path)?).lines().count()
        } else {
            0
        };
        Ok(Self { path, lines })
    }

    pub fn path(&self) -> &Path { &self.path }
}

impl ResultStore for JsonlStore {
    fn save(&mut self, record: &GameRecord) -> Result<String, StoreError> {
        let mut line = serde_json::to_string(record)?;
        line.push('\n');
        let mut f = OpenOptions::new().create(true).append(true).open(&self.path)?;
        f.write_all(line.as_bytes())?;
        self.lines += 1;
        Ok(self.lines.to_string())
    }
}

pub fn read_records<P: AsRef<Path>>(path: P) -> Result<Vec<GameRecord>, StoreError> {
    let reader = BufReader::new(File::open(path)?);
    let mut out = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        out.push(serde_json::from_str(&line)?);
    }
    Ok(out)
}

#[derive(Default)]
pub struct MemoryStore {
    pub records: Vec<GameRecord>,
}

impl ResultStore for MemoryStore {
    fn save(&mut self, record: &GameRecord) -> Result<String, StoreError> {
        self.records.push(record.clone());
        Ok(format!("mem-{}", self.records.len()))
    }
}
