//! Named difficulty presets. The search itself only ever sees the
//! resulting [`SearchParams`].

use crate::search::alphabeta::SearchParams;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    #[default]
    Normal,
    Hard,
    Master,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [Difficulty::Beginner, Difficulty::Normal, Difficulty::Hard, Difficulty::Master];

    pub fn params(self) -> SearchParams {
        let (max_depth, ms, iterative_deepening, endgame_threshold) = match self {
            Difficulty::Beginner => (1, 500, false, 0),
            Difficulty::Normal => (3, 800, false, 0),
            Difficulty::Hard => (6, 1000, true, 10),
            Difficulty::Master => (15, 1000, true, 14),
        };
        SearchParams {
            max_depth,
            movetime: Duration::from_millis(ms),
            iterative_deepening,
            endgame_threshold,
            ..SearchParams::default()
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Difficulty::Beginner => "shallow search with corner preference",
            Difficulty::Normal => "fixed depth 3, no endgame solver",
            Difficulty::Hard => "iterative deepening, solves the last 10 squares",
            Difficulty::Master => "iterative deepening, solves the last 14 squares",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
            Difficulty::Master => "master",
        })
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown difficulty: {s}"))
    }
}
