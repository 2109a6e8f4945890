use clap::Parser;
use othello_engine::board::squares::to_notation;
use othello_engine::config::Difficulty;
use othello_engine::{Board, Searcher, Side};
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
#[command(name = "othello-bench", version, about = "Benchmark search speed on a position")]
struct Args {
    /// 64 cell characters or 'startpos'
    #[arg(long, default_value = "startpos")]
    board: String,

    /// Side to move
    #[arg(long, default_value = "dark")]
    side: String,

    /// Preset the search starts from
    #[arg(long, value_enum, default_value_t = Difficulty::Master)]
    difficulty: Difficulty,

    /// Movetime in milliseconds
    #[arg(long, default_value_t = 1000)]
    movetime: u64,

    /// Maximum search depth (0 keeps the preset's)
    #[arg(long, default_value_t = 0)]
    depth: u32,

    /// Endgame solver threshold in empty squares (-1 keeps the preset's)
    #[arg(long, default_value_t = -1, allow_hyphen_values = true)]
    endgame: i64,

    /// Transposition cache capacity in entries
    #[arg(long)]
    tt_entries: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let board = if args.board == "startpos" { Board::initial() } else { args.board.parse::<Board>()? };
    let side: Side = args.side.parse().map_err(|e: String| anyhow::anyhow!(e))?;

    let mut p = args.difficulty.params();
    p.movetime = Duration::from_millis(args.movetime);
    if args.depth > 0 { p.max_depth = args.depth; }
    if args.endgame >= 0 { p.endgame_threshold = args.endgame as u32; }
    if let Some(n) = args.tt_entries { p.tt_entries = n; }

    let mut s = Searcher::default();
    let t0 = Instant::now();
    let res = s.search(&board, side, &p);
    let dt = t0.elapsed();
    let nps = if dt.as_secs_f64() > 0.0 { res.nodes as f64 / dt.as_secs_f64() } else { 0.0 };
    println!("bestmove={} score={} depth={} nodes={} elapsed={:.3}s nps={:.1}",
        res.best.map(to_notation).unwrap_or_else(|| "(pass)".to_string()), res.score, res.depth, res.nodes, dt.as_secs_f64(), nps);
    Ok(())
}
