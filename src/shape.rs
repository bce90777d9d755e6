// src/shape.rs
// Which piece types could have made a detected move, judged by geometry alone.

use crate::board::{Color, Piece};
use crate::detect::{DetectedMove, MoveAction};
use crate::square::Square;

/// What a pawn reaching the far rank may have become.
const PROMOTED: [Piece; 5] = [Piece::King, Piece::Rook, Piece::Bishop, Piece::Queen, Piece::Knight];

/// Piece types whose movement allows `from` → `to` for `color` doing `action`.
///
/// Order is pawn, king, rook, queen, bishop, knight, with no duplicates. A pawn
/// move onto the last rank short-circuits to every type except pawn.
pub fn candidate_pieces(from: Square, to: Square, color: Color, action: MoveAction) -> Vec<Piece> {
    if action.castle_side().is_some() {
        return vec![Piece::King];
    }

    let mut out = Vec::with_capacity(4);
    if pawn_shape(from, to, color, action.is_capture()) {
        let last_row = match color {
            Color::White => 0,
            Color::Black => 7,
        };
        if to.row() == last_row {
            return PROMOTED.to_vec();
        }
        out.push(Piece::Pawn);
    }
    let (dr, df) = delta(from, to);
    if dr.abs() <= 1 && df.abs() <= 1 {
        out.push(Piece::King);
    }
    if dr == 0 || df == 0 {
        out.extend([Piece::Rook, Piece::Queen]);
    }
    // Rook lines and diagonals never coincide for distinct squares.
    if dr.abs() == df.abs() {
        out.extend([Piece::Bishop, Piece::Queen]);
    }
    if matches!((dr.abs(), df.abs()), (1, 2) | (2, 1)) {
        out.push(Piece::Knight);
    }
    out.dedup();
    out
}

/// [`candidate_pieces`] for a detected move.
pub fn candidates_for(mv: &DetectedMove) -> Vec<Piece> {
    candidate_pieces(mv.from, mv.to, mv.color, mv.action)
}

/// Row and file deltas, `to - from`.
fn delta(from: Square, to: Square) -> (i8, i8) {
    (
        to.row() as i8 - from.row() as i8,
        to.file() as i8 - from.file() as i8,
    )
}

fn pawn_shape(from: Square, to: Square, color: Color, capturing: bool) -> bool {
    let (dr, df) = delta(from, to);
    // Rows grow towards white's side, so white pawns advance with negative `dr`.
    let (forward, start_row) = match color {
        Color::White => (-1, 6),
        Color::Black => (1, 1),
    };
    if capturing {
        dr == forward && df.abs() == 1
    } else {
        df == 0 && (dr == forward || (dr == 2 * forward && from.row() == start_row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        name.parse().unwrap()
    }

    #[test]
    fn castling_is_always_the_king() {
        let got = candidate_pieces(Square::E8, Square::G8, Color::Black, MoveAction::CastlesKingside);
        assert_eq!(got, vec![Piece::King]);
    }

    #[test]
    fn single_pawn_push() {
        let got = candidate_pieces(sq("e2"), sq("e3"), Color::White, MoveAction::Moves);
        assert_eq!(got, vec![Piece::Pawn, Piece::King, Piece::Rook, Piece::Queen]);
    }

    #[test]
    fn double_push_only_from_start_row() {
        let got = candidate_pieces(sq("e2"), sq("e4"), Color::White, MoveAction::Moves);
        assert_eq!(got, vec![Piece::Pawn, Piece::Rook, Piece::Queen]);
        let got = candidate_pieces(sq("e3"), sq("e5"), Color::White, MoveAction::Moves);
        assert_eq!(got, vec![Piece::Rook, Piece::Queen]);
        let got = candidate_pieces(sq("d7"), sq("d5"), Color::Black, MoveAction::Moves);
        assert_eq!(got, vec![Piece::Pawn, Piece::Rook, Piece::Queen]);
    }

    #[test]
    fn pawns_capture_diagonally_forward() {
        let got = candidate_pieces(sq("d5"), sq("e4"), Color::Black, MoveAction::Captures);
        assert_eq!(got, vec![Piece::Pawn, Piece::King, Piece::Bishop, Piece::Queen]);
        // Backwards for white.
        let got = candidate_pieces(sq("d5"), sq("e4"), Color::White, MoveAction::Captures);
        assert_eq!(got, vec![Piece::King, Piece::Bishop, Piece::Queen]);
    }

    #[test]
    fn promotion_rank_excludes_pawn() {
        let got = candidate_pieces(sq("a7"), sq("a8"), Color::White, MoveAction::Moves);
        assert_eq!(got, PROMOTED.to_vec());
        let got = candidate_pieces(sq("b2"), sq("a1"), Color::Black, MoveAction::Captures);
        assert_eq!(got, PROMOTED.to_vec());
    }

    #[test]
    fn knight_jump() {
        let got = candidate_pieces(sq("g1"), sq("f3"), Color::White, MoveAction::Moves);
        assert_eq!(got, vec![Piece::Knight]);
    }

    #[test]
    fn long_diagonal() {
        let got = candidate_pieces(sq("a1"), sq("h8"), Color::White, MoveAction::Moves);
        assert_eq!(got, vec![Piece::Bishop, Piece::Queen]);
    }
}
