use othello_engine::search::eval::{exact, frontier, heuristic, mobility, parity, positional, SQUARE_WEIGHTS};
use othello_engine::{Board, Side};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

fn random_position(rng: &mut SmallRng, plies: usize) -> Board {
    let mut b = Board::initial();
    let mut side = Side::Dark;
    for _ in 0..plies {
        if b.is_terminal() { break; }
        let moves = b.valid_moves(side);
        if !moves.is_empty() {
            b = b.apply_move(moves[rng.gen_range(0..moves.len())], side).unwrap();
        }
        side = side.opponent();
    }
    b
}

#[test]
fn square_weights_follow_the_class_order() {
    assert_eq!(SQUARE_WEIGHTS[0], 100);
    assert_eq!(SQUARE_WEIGHTS[63], 100);
    assert_eq!(SQUARE_WEIGHTS[3], 20);
    // border squares next to a corner count as edges
    assert_eq!(SQUARE_WEIGHTS[1], 20);
    assert_eq!(SQUARE_WEIGHTS[48], 20);
    assert_eq!(SQUARE_WEIGHTS[9], -20);
    assert_eq!(SQUARE_WEIGHTS[54], -20);
    assert_eq!(SQUARE_WEIGHTS[27], 0);
}

#[test]
fn initial_position_is_balanced() {
    let b = Board::initial();
    assert_eq!(heuristic(&b, Side::Dark), 0);
    assert_eq!(heuristic(&b, Side::Light), 0);
    assert_eq!(exact(&b, Side::Dark), 0);
}

#[test]
fn after_d3_light_has_fewer_frontier_discs() {
    let b = Board::initial().apply_move(19, Side::Dark).unwrap();
    assert_eq!(mobility(&b, Side::Light), 0);
    assert_eq!(positional(&b, Side::Light), 0);
    assert_eq!(frontier(&b, Side::Light), 3);
    assert_eq!(heuristic(&b, Side::Light), 15);
    assert_eq!(exact(&b, Side::Dark), 3000);
    assert_eq!(exact(&b, Side::Light), -3000);
}

#[test]
fn positional_counts_own_and_opponent_discs() {
    let b: Board = "\
        X.......
        .O......
        ........
        ........
        ........
        ........
        ........
        .......O"
        .parse()
        .unwrap();
    // corner +100, opponent c-square -(-20), opponent corner -100
    assert_eq!(positional(&b, Side::Dark), 100 + 20 - 100);
    assert_eq!(positional(&b, Side::Light), -20);
}

#[test]
fn parity_favors_dark_on_even_counts() {
    assert_eq!(parity(20, Side::Dark), 5);
    assert_eq!(parity(20, Side::Light), -5);
    assert_eq!(parity(19, Side::Dark), -5);
    assert_eq!(parity(19, Side::Light), 5);
}

#[test]
fn heuristic_is_antisymmetric() {
    let mut rng = SmallRng::seed_from_u64(3);
    for plies in [4, 12, 24, 40, 48, 54] {
        for _ in 0..5 {
            let b = random_position(&mut rng, plies);
            assert_eq!(heuristic(&b, Side::Dark), -heuristic(&b, Side::Light), "{b:?}");
            assert_eq!(exact(&b, Side::Dark), -exact(&b, Side::Light));
        }
    }
}

#[test]
fn parity_only_applies_late() {
    let mut rng = SmallRng::seed_from_u64(5);
    let mut checked = 0;
    for plies in 40..=48 {
        let b = random_position(&mut rng, plies);
        let empties = b.empty_count();
        if !(15..=20).contains(&empties) { continue; }
        let without = 10 * mobility(&b, Side::Dark) + positional(&b, Side::Dark) + 5 * frontier(&b, Side::Dark);
        assert_eq!(heuristic(&b, Side::Dark) - without, parity(empties, Side::Dark));
        checked += 1;
    }
    assert!(checked > 0, "no position with 15..=20 empties generated");
}

#[test]
fn late_leaves_are_scored_exactly() {
    let mut rng = SmallRng::seed_from_u64(12);
    for plies in [50, 52, 56, 60] {
        let b = random_position(&mut rng, plies);
        if b.empty_count() > 14 { continue; }
        assert_eq!(heuristic(&b, Side::Dark), exact(&b, Side::Dark), "{b:?}");
        assert_eq!(heuristic(&b, Side::Light), exact(&b, Side::Light), "{b:?}");
    }
    // 14 empties: exact; 15 empties: heuristic terms
    let fourteen: Board = format!("{}{}", "X".repeat(30), "O".repeat(20) + &".".repeat(14)).parse().unwrap();
    assert_eq!(heuristic(&fourteen, Side::Dark), 10_000);
    let fifteen: Board = format!("{}{}", "X".repeat(29), "O".repeat(20) + &".".repeat(15)).parse().unwrap();
    assert_ne!(heuristic(&fifteen, Side::Dark), exact(&fifteen, Side::Dark));
}
