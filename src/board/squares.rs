//! Board geometry: square indices, compass directions, square classes and
//! `a1`..`h8` notation.
//!
//! Squares are indexed `row * 8 + col`. Notation uses the column letter
//! followed by the 1-based row, so `a1` is index 0 and `h8` is index 63.

/// A square index in `0..64`.
pub type Square = usize;

pub const BOARD_SIZE: usize = 8;
pub const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;

/// The 8 king-move offsets as `(d_row, d_col)`.
pub const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    (0, -1),           (0, 1),
    (1, -1),  (1, 0),  (1, 1),
];

pub const CORNERS: [Square; 4] = [0, 7, 56, 63];

/// The 24 non-corner border squares.
pub const EDGES: [Square; 24] = [
    1, 2, 3, 4, 5, 6,
    8, 16, 24, 32, 40, 48,
    15, 23, 31, 39, 47, 55,
    57, 58, 59, 60, 61, 62,
];

/// Squares orthogonally next to a corner.
pub const X_SQUARES: [Square; 8] = [1, 6, 8, 15, 48, 55, 57, 62];

/// Squares diagonally next to a corner.
pub const C_SQUARES: [Square; 4] = [9, 14, 49, 54];

#[inline]
pub fn row_col(sq: Square) -> (i32, i32) {
    ((sq / BOARD_SIZE) as i32, (sq % BOARD_SIZE) as i32)
}

#[inline]
pub fn on_board(row: i32, col: i32) -> bool {
    (0..BOARD_SIZE as i32).contains(&row) && (0..BOARD_SIZE as i32).contains(&col)
}

#[inline]
pub fn square_at(row: i32, col: i32) -> Square {
    row as usize * BOARD_SIZE + col as usize
}

/// Steps from `sq` by `(dr, dc)`; `None` once the walk leaves the board.
#[inline]
pub fn step(sq: Square, (dr, dc): (i32, i32)) -> Option<Square> {
    let (r, c) = row_col(sq);
    let (nr, nc) = (r + dr, c + dc);
    if on_board(nr, nc) { Some(square_at(nr, nc)) } else { None }
}

pub const fn is_corner(sq: Square) -> bool { matches!(sq, 0 | 7 | 56 | 63) }

pub const fn is_edge(sq: Square) -> bool {
    let (r, c) = (sq / BOARD_SIZE, sq % BOARD_SIZE);
    sq < NUM_SQUARES && !is_corner(sq) && (r == 0 || r == 7 || c == 0 || c == 7)
}

pub const fn is_x_square(sq: Square) -> bool { matches!(sq, 1 | 6 | 8 | 15 | 48 | 55 | 57 | 62) }
pub const fn is_c_square(sq: Square) -> bool { matches!(sq, 9 | 14 | 49 | 54) }

/// Formats a square as `a1`..`h8`.
pub fn to_notation(sq: Square) -> String {
    let (r, c) = row_col(sq);
    format!("{}{}", (b'a' + c as u8) as char, r + 1)
}

/// Parses `a1`..`h8` (case-insensitive) or a raw index `0`..`63`.
pub fn parse_square(s: &str) -> Option<Square> {
    let s = s.trim();
    if let Ok(idx) = s.parse::<usize>() {
        return (idx < NUM_SQUARES).then_some(idx);
    }
    let b = s.as_bytes();
    if b.len() != 2 { return None; }
    let f = b[0].to_ascii_lowercase();
    let r = b[1];
    if !(b'a'..=b'h').contains(&f) || !(b'1'..=b'8').contains(&r) { return None; }
    Some(square_at((r - b'1') as i32, (f - b'a') as i32))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notation_round_trips_corners_and_center() {
        assert_eq!(to_notation(0), "a1");
        assert_eq!(to_notation(63), "h8");
        assert_eq!(to_notation(19), "d3");
        assert_eq!(parse_square("d3"), Some(19));
        assert_eq!(parse_square("H8"), Some(63));
        assert_eq!(parse_square("44"), Some(44));
        assert_eq!(parse_square("64"), None);
        assert_eq!(parse_square("i1"), None);
    }

    #[test]
    fn step_stops_at_the_edge() {
        assert_eq!(step(0, (-1, 0)), None);
        assert_eq!(step(7, (0, 1)), None);
        assert_eq!(step(8, (0, -1)), None);
        assert_eq!(step(27, (1, 1)), Some(36));
    }

    #[test]
    fn class_checks_match_square_lists() {
        for sq in 0..NUM_SQUARES {
            assert_eq!(is_corner(sq), CORNERS.contains(&sq), "corner {sq}");
            assert_eq!(is_edge(sq), EDGES.contains(&sq), "edge {sq}");
            assert_eq!(is_x_square(sq), X_SQUARES.contains(&sq), "x {sq}");
            assert_eq!(is_c_square(sq), C_SQUARES.contains(&sq), "c {sq}");
        }
    }

    #[test]
    fn square_classes_are_disjoint_where_expected() {
        for &c in &CORNERS { assert!(!is_edge(c) && !is_x_square(c) && !is_c_square(c)); }
        for &x in &X_SQUARES { assert!(is_edge(x)); }
        for &c in &C_SQUARES { assert!(!is_edge(c)); }
    }
}
