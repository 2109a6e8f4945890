use othello_engine::perft::perft;
use othello_engine::{Board, Side};

#[derive(clap::Parser, Debug)]
#[command(name = "perft", about = "Move generator node counts")]
struct Args {
    /// Search depth
    #[arg(value_name = "DEPTH")]
    depth: u32,
    /// 64 cell characters or "startpos"
    #[arg(value_name = "BOARD", default_value = "startpos")]
    board: String,
    /// Side to move
    #[arg(long, default_value = "dark")]
    side: String,
    /// Number of threads for root-split
    #[arg(long, default_value_t = 1)]
    threads: usize,
    /// Report elapsed time and NPS
    #[arg(long, default_value_t = false)]
    nps: bool,
}

fn main() -> anyhow::Result<()> {
    use clap::Parser;
    use rayon::prelude::*;
    use std::time::Instant;

    let args = Args::parse();
    let side: Side = args.side.parse().map_err(|e: String| anyhow::anyhow!(e))?;
    let base = if args.board == "startpos" { Board::initial() } else { args.board.parse::<Board>()? };
    let depth = args.depth;

    let pool = rayon::ThreadPoolBuilder::new().num_threads(args.threads.max(1)).build()?;
    let (nodes, dt) = pool.install(|| {
        let t0 = Instant::now();
        let root_moves = base.valid_moves(side);
        let nodes = if args.threads <= 1 || depth == 0 || root_moves.is_empty() {
            perft(&base, side, depth)
        } else {
            root_moves
                .par_iter()
                .filter_map(|&mv| base.apply_move(mv, side).ok())
                .map(|b| perft(&b, side.opponent(), depth - 1))
                .sum()
        };
        (nodes, t0.elapsed().as_secs_f64())
    });

    if args.nps { println!("nodes: {nodes} elapsed: {:.3}s nps: {:.1}", dt, nodes as f64 / dt.max(f64::EPSILON)); }
    else { println!("nodes: {nodes}"); }
    Ok(())
}
