use othello_engine::board::squares::NUM_SQUARES;
use othello_engine::{Board, Cell, GameResult, IllegalMove, Side};
use pretty_assertions::assert_eq;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

#[test]
fn initial_position() {
    let b = Board::initial();
    let count = b.count_pieces();
    assert_eq!((count.dark, count.light), (2, 2));
    assert_eq!(b.cell(27), Cell::Light);
    assert_eq!(b.cell(28), Cell::Dark);
    assert_eq!(b.cell(35), Cell::Dark);
    assert_eq!(b.cell(36), Cell::Light);
    assert_eq!(b.empty_count(), 60);
    assert!(!b.is_terminal());
    assert_eq!(b.winner(), None);
}

#[test]
fn opening_moves_for_both_sides() {
    let b = Board::initial();
    assert_eq!(b.valid_moves(Side::Dark), vec![19, 26, 37, 44]);
    assert_eq!(b.valid_moves(Side::Light), vec![20, 29, 34, 43]);
    for m in b.valid_moves(Side::Dark) {
        assert_eq!(b.capture_count(m, Side::Dark), 1);
    }
}

#[test]
fn playing_d3_flips_one_disc() {
    let b = Board::initial().apply_move(19, Side::Dark).unwrap();
    let expected: Board = "\
        ........
        ........
        ...X....
        ...XX...
        ...XO...
        ........
        ........
        ........"
        .parse()
        .unwrap();
    assert_eq!(b, expected);
    let count = b.count_pieces();
    assert_eq!((count.dark, count.light), (4, 1));
    // The source position is untouched
    assert_eq!(Board::initial().cell(27), Cell::Light);
}

#[test]
fn illegal_moves_are_rejected() {
    let b = Board::initial();
    assert_eq!(b.apply_move(0, Side::Dark), Err(IllegalMove { square: 0, side: Side::Dark }));
    assert!(b.apply_move(27, Side::Dark).is_err());
    assert!(b.apply_move(64, Side::Dark).is_err());
    assert!(!b.is_legal(20, Side::Dark));
}

#[test]
fn capture_in_every_direction() {
    let b: Board = "\
        ........
        .X.X.X..
        ..OOO...
        .XO.OX..
        ..OOO...
        .X.X.X..
        ........
        ........"
        .parse()
        .unwrap();
    assert_eq!(b.capture_count(27, Side::Dark), 8);
    let after = b.apply_move(27, Side::Dark).unwrap();
    assert_eq!(after.count_pieces().light, 0);
    assert_eq!(after.count_pieces().dark, 17);
    assert!(after.is_terminal());
    assert_eq!(after.winner(), Some(GameResult::Dark));
}

#[test]
fn six_disc_runs_are_captured() {
    let row: Board = format!("XOOOOOO.{}", ".".repeat(56)).parse().unwrap();
    assert_eq!(row.capture_count(7, Side::Dark), 6);
    let after = row.apply_move(7, Side::Dark).unwrap();
    let expected: Board = format!("XXXXXXXX{}", ".".repeat(56)).parse().unwrap();
    assert_eq!(after, expected);

    let diagonal: Board = "\
        X.......
        .O......
        ..O.....
        ...O....
        ....O...
        .....O..
        ......O.
        ........"
        .parse()
        .unwrap();
    assert_eq!(diagonal.captures(63, Side::Dark), vec![54, 45, 36, 27, 18, 9]);
    assert_eq!(diagonal.apply_move(63, Side::Dark).unwrap().count_pieces().light, 0);
}

#[test]
fn seven_disc_ray_to_the_edge_captures_nothing() {
    let b: Board = "\
        .OOOOOOO
        ........
        X.......
        ........
        ........
        ........
        ........
        ........"
        .parse()
        .unwrap();
    assert_eq!(b.capture_count(0, Side::Dark), 0);
    assert!(!b.is_legal(0, Side::Dark));
    assert!(b.valid_moves(Side::Dark).is_empty());
    assert!(b.apply_move(0, Side::Dark).is_err());

    let diagonal: Board = "\
        ........
        .O......
        ..O.....
        ...O....
        ....O...
        .....O..
        ......O.
        .......O"
        .parse()
        .unwrap();
    assert_eq!(diagonal.capture_count(0, Side::Dark), 0);
    assert!(diagonal.valid_moves(Side::Dark).is_empty());
}

#[test]
fn random_games_conserve_discs() {
    let mut rng = SmallRng::seed_from_u64(3);
    for _ in 0..20 {
        let mut b = Board::initial();
        let mut side = Side::Dark;
        let mut placed = 0u32;
        while !b.is_terminal() {
            let moves = b.valid_moves(side);
            if !moves.is_empty() {
                let m = moves[rng.gen_range(0..moves.len())];
                assert!(b.is_legal(m, side));
                let before = b.count_pieces();
                let flips = b.capture_count(m, side) as u32;
                b = b.apply_move(m, side).unwrap();
                placed += 1;
                let after = b.count_pieces();
                assert_eq!(after.of(side), before.of(side) + 1 + flips);
                assert_eq!(after.of(side.opponent()), before.of(side.opponent()) - flips);
            }
            side = side.opponent();
        }
        let count = b.count_pieces();
        assert_eq!(count.total() + b.empty_count(), NUM_SQUARES as u32);
        assert_eq!(count.total(), placed + 4);
        let expected = match count.dark.cmp(&count.light) {
            std::cmp::Ordering::Greater => GameResult::Dark,
            std::cmp::Ordering::Less => GameResult::Light,
            std::cmp::Ordering::Equal => GameResult::Tie,
        };
        assert_eq!(b.winner(), Some(expected));
    }
}

#[test]
fn game_can_end_with_empty_squares() {
    let b: Board = format!("XXXX{}", ".".repeat(60)).parse().unwrap();
    assert!(b.is_terminal());
    assert_eq!(b.empty_count(), 60);
    assert_eq!(b.winner(), Some(GameResult::Dark));
}

#[test]
fn winner_on_full_boards() {
    let tie: Board = "XO".repeat(32).parse().unwrap();
    assert_eq!(tie.winner(), Some(GameResult::Tie));
    let light: Board = format!("{}{}", "O".repeat(40), "X".repeat(24)).parse().unwrap();
    assert_eq!(light.winner(), Some(GameResult::Light));
    assert_eq!(light.winner().and_then(|r| r.winner()), Some(Side::Light));
}

#[test]
fn display_parses_back() {
    let b = Board::initial().apply_move(37, Side::Dark).unwrap();
    let shown = b.to_string();
    let cells: String = shown
        .lines()
        .skip(1)
        .flat_map(|l| l.split_whitespace().skip(1))
        .collect();
    assert_eq!(cells.parse::<Board>().unwrap(), b);
}
