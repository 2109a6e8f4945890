use anyhow::Result;
use clap::Parser;
use othello_engine::board::squares::{parse_square, to_notation};
use othello_engine::config::Difficulty;
use othello_engine::protocol::ProtocolEngine;
use othello_engine::record::{GameRecord, JsonlStore, ResultStore};
use othello_engine::{Board, Searcher, Side};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
#[command(author, version, about = "Play Othello against the engine", long_about = None)]
struct Args {
    /// Your side: 'dark' moves first, 'light' second
    #[arg(long, default_value = "dark")]
    color: String,

    /// Engine strength preset
    #[arg(long, value_enum, default_value_t = Difficulty::Normal)]
    difficulty: Difficulty,

    /// Override the preset's think time in milliseconds
    #[arg(long)]
    movetime: Option<u64>,

    /// Append the finished game to this JSON-lines file
    #[arg(long)]
    record: Option<PathBuf>,

    /// Speak the line protocol on stdin/stdout instead of playing interactively
    #[arg(long)]
    protocol: bool,

    /// Print search statistics
    #[arg(long)]
    verbose: bool,
}

fn get_human_move(board: &Board, side: Side) -> Result<Option<usize>> {
    let legal = board.valid_moves(side);
    loop {
        print!("Enter your move (e.g. d3), or 'quit': ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 { return Ok(None); }
        let input = input.trim();
        if input == "quit" { return Ok(None); }

        match parse_square(input) {
            Some(sq) if legal.contains(&sq) => return Ok(Some(sq)),
            Some(_) => {
                let names: Vec<String> = legal.iter().map(|&m| to_notation(m)).collect();
                println!("Illegal move! Legal moves are: {}", names.join(" "));
            }
            None => println!("Invalid square! Use a column letter and row number like 'd3'"),
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut params = args.difficulty.params();
    if let Some(ms) = args.movetime { params.movetime = Duration::from_millis(ms); }

    if args.protocol {
        let mut engine = ProtocolEngine::new(params);
        engine.run_loop(io::stdin().lock(), io::stdout().lock())?;
        return Ok(());
    }

    let human: Side = args.color.parse().map_err(|e: String| anyhow::anyhow!(e))?;
    let mut searcher = Searcher::default();
    let mut board = Board::initial();
    let mut side = Side::Dark;
    let mut placed = 0u32;

    println!("Engine: {} ({})", args.difficulty, args.difficulty.description());
    while !board.is_terminal() {
        println!("\n{board}");
        let count = board.count_pieces();
        println!("dark {} - light {}, {} to move", count.dark, count.light, side);

        if !board.has_any_move(side) {
            println!("{side} has no legal move and passes");
            side = side.opponent();
            continue;
        }

        let mv = if side == human {
            match get_human_move(&board, side)? {
                Some(m) => m,
                None => {
                    println!("Thanks for playing!");
                    return Ok(());
                }
            }
        } else {
            if args.verbose { println!("Thinking..."); }
            let t0 = Instant::now();
            let res = searcher.search(&board, side, &params);
            if args.verbose {
                println!("depth {} score {} nodes {} elapsed {:.3}s{}", res.depth, res.score, res.nodes,
                    t0.elapsed().as_secs_f64(), if res.fallback { " (fallback)" } else { "" });
            }
            let Some(m) = res.best else { anyhow::bail!("engine found no move for {side} although one exists") };
            println!("Engine plays: {}", to_notation(m));
            m
        };
        board = board.apply_move(mv, side)?;
        placed += 1;
        side = side.opponent();
    }

    println!("\n{board}");
    let Some(record) = GameRecord::from_final_board(&board, placed, Some(args.difficulty.to_string())) else {
        anyhow::bail!("game loop ended before the game was over");
    };
    match record.winner.winner() {
        Some(s) if s == human => println!("You win {}-{}!", record.dark_score.max(record.light_score), record.dark_score.min(record.light_score)),
        Some(_) => println!("Engine wins {}-{}.", record.dark_score.max(record.light_score), record.dark_score.min(record.light_score)),
        None => println!("Tie {}-{}.", record.dark_score, record.light_score),
    }
    if let Some(path) = args.record {
        let mut store = JsonlStore::open(&path)?;
        let id = store.save(&record)?;
        println!("Saved game as record {id} in {}", path.display());
    }
    Ok(())
}
