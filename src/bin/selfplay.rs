use clap::Parser;
use othello_engine::config::Difficulty;
use othello_engine::record::{JsonlStore, ResultStore};
use othello_engine::selfplay::{generate_games, SelfPlayParams};
use othello_engine::GameResult;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "othello-selfplay", about = "Play engine-vs-engine games and record the results")]
struct Args {
    #[arg(long, default_value_t = 10)]
    games: usize,
    #[arg(long, value_enum, default_value_t = Difficulty::Hard)]
    dark: Difficulty,
    #[arg(long, value_enum, default_value_t = Difficulty::Normal)]
    light: Difficulty,
    /// Override both presets' think time in milliseconds
    #[arg(long)]
    movetime_ms: Option<u64>,
    /// Random opening plies for game variety
    #[arg(long, default_value_t = 4)]
    random_plies: usize,
    #[arg(long, default_value_t = 1)]
    threads: usize,
    #[arg(long, default_value_t = 42)]
    seed: u64,
    #[arg(long, default_value = "out/selfplay.jsonl")]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let a = Args::parse();
    let mut dark = a.dark.params();
    let mut light = a.light.params();
    if let Some(ms) = a.movetime_ms {
        dark.movetime = Duration::from_millis(ms);
        light.movetime = Duration::from_millis(ms);
    }
    let params = SelfPlayParams { games: a.games, dark, light, random_plies: a.random_plies, seed: a.seed, threads: a.threads };

    eprintln!("Playing {} games: {} (dark) vs {} (light), threads={}", a.games, a.dark, a.light, a.threads);
    let games = generate_games(&params);

    if let Some(dir) = a.out.parent() {
        if !dir.as_os_str().is_empty() { std::fs::create_dir_all(dir)?; }
    }
    let mut store = JsonlStore::open(&a.out)?;
    let tag = format!("{}-vs-{}", a.dark, a.light);
    let (mut dark_wins, mut light_wins, mut ties) = (0, 0, 0);
    for g in &games {
        match g.result {
            GameResult::Dark => dark_wins += 1,
            GameResult::Light => light_wins += 1,
            GameResult::Tie => ties += 1,
        }
        store.save(&g.to_record(Some(tag.clone())))?;
    }
    eprintln!("dark {dark_wins} / light {light_wins} / tie {ties}; records in {}", store.path().display());
    Ok(())
}
