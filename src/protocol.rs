use crate::board::squares::{parse_square, to_notation};
use crate::board::{Board, Side};
use crate::config::Difficulty;
use crate::search::alphabeta::{SearchParams, Searcher};
use std::io::{self, BufRead, Write};
use std::time::Duration;

/// Line-oriented engine protocol for external front ends.
///
/// Commands: `newgame`, `position <64 cells> <dark|light>`, `play <sq>`,
/// `pass`, `moves`, `show`, `go [movetime <ms>] [depth <n>] [difficulty <name>]`,
/// `quit`. Errors are reported as `error <message>` lines.
pub struct ProtocolEngine {
    board: Board,
    side: Side,
    searcher: Searcher,
    params: SearchParams,
}

impl Default for ProtocolEngine {
    fn default() -> Self { Self::new(SearchParams::default()) }
}

impl ProtocolEngine {
    pub fn new(params: SearchParams) -> Self {
        Self { board: Board::initial(), side: Side::Dark, searcher: Searcher::default(), params }
    }

    pub fn board(&self) -> &Board { &self.board }
    pub fn side_to_move(&self) -> Side { self.side }

    fn cmd_newgame(&mut self) {
        self.board = Board::initial();
        self.side = Side::Dark;
    }

    fn cmd_position(&mut self, args: &str, out: &mut impl Write) -> io::Result<()> {
        // Cells may be written with spaces; the side is the last token
        let mut tokens: Vec<&str> = args.split_whitespace().collect();
        let side = match tokens.pop().map(str::parse::<Side>) {
            Some(Ok(s)) => s,
            _ => return writeln!(out, "error expected side to move"),
        };
        match tokens.concat().parse::<Board>() {
            Ok(b) => {
                self.board = b;
                self.side = side;
                Ok(())
            }
            Err(e) => writeln!(out, "error {e}"),
        }
    }

    fn cmd_play(&mut self, args: &str, out: &mut impl Write) -> io::Result<()> {
        let Some(sq) = parse_square(args) else {
            return writeln!(out, "error bad square {}", args.trim());
        };
        match self.board.apply_move(sq, self.side) {
            Ok(next) => {
                self.board = next;
                self.side = self.side.opponent();
                Ok(())
            }
            Err(e) => writeln!(out, "error {e}"),
        }
    }

    fn cmd_pass(&mut self, out: &mut impl Write) -> io::Result<()> {
        if self.board.has_any_move(self.side) {
            return writeln!(out, "error {} has a legal move", self.side);
        }
        self.side = self.side.opponent();
        Ok(())
    }

    fn cmd_moves(&self, out: &mut impl Write) -> io::Result<()> {
        let moves: Vec<String> = self.board.valid_moves(self.side).into_iter().map(to_notation).collect();
        writeln!(out, "moves {}", moves.join(" "))
    }

    fn cmd_show(&self, out: &mut impl Write) -> io::Result<()> {
        let count = self.board.count_pieces();
        write!(out, "{}", self.board)?;
        writeln!(out, "dark {} light {} to-move {}", count.dark, count.light, self.side)?;
        if let Some(result) = self.board.winner() {
            writeln!(out, "result {result}")?;
        }
        Ok(())
    }

    fn cmd_go(&mut self, args: &str, out: &mut impl Write) -> io::Result<()> {
        let mut params = self.params;
        let mut tokens = args.split_whitespace();
        while let Some(tok) = tokens.next() {
            match tok {
                "difficulty" => {
                    if let Some(d) = tokens.next().and_then(|s| s.parse::<Difficulty>().ok()) { params = d.params(); }
                }
                "movetime" => {
                    if let Some(ms) = tokens.next().and_then(|s| s.parse::<u64>().ok()) { params.movetime = Duration::from_millis(ms); }
                }
                "depth" => {
                    if let Some(d) = tokens.next().and_then(|s| s.parse::<u32>().ok()) { params.max_depth = d.max(1); }
                }
                _ => {}
            }
        }
        let res = self.searcher.search(&self.board, self.side, &params);
        match res.best {
            Some(m) => {
                writeln!(out, "info depth {} score {} nodes {}", res.depth, res.score, res.nodes)?;
                writeln!(out, "bestmove {}", to_notation(m))
            }
            None => writeln!(out, "bestmove pass"),
        }
    }

    /// Handles one command line. Returns `false` on `quit`.
    pub fn handle_line(&mut self, line: &str, out: &mut impl Write) -> io::Result<bool> {
        let line = line.trim();
        let (cmd, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        match cmd {
            "" => {}
            "quit" => return Ok(false),
            "newgame" => self.cmd_newgame(),
            "position" => self.cmd_position(rest, out)?,
            "play" => self.cmd_play(rest, out)?,
            "pass" => self.cmd_pass(out)?,
            "moves" => self.cmd_moves(out)?,
            "show" => self.cmd_show(out)?,
            "go" => self.cmd_go(rest, out)?,
            other => writeln!(out, "error unknown command {other}")?,
        }
        out.flush()?;
        Ok(true)
    }

    pub fn run_loop(&mut self, input: impl BufRead, mut out: impl Write) -> io::Result<()> {
        for line in input.lines() {
            if !self.handle_line(&line?, &mut out)? { break; }
        }
        Ok(())
    }
}
