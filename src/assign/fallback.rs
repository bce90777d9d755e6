// src/assign/fallback.rs
// Per-square best effort when the budgeted assignment cannot finish.

use crate::board::{Class, Piece};
use crate::config::FALLBACK_ORDER;
use crate::probs::ClassProbs;

/// Most probable piece on a square known to be occupied, ignoring budgets.
///
/// Colour comes from the side-mass comparison. Within that colour the types
/// are scanned in [`FALLBACK_ORDER`] and the running best is only replaced on
/// a strictly greater probability, so ties go to the earlier type.
pub fn most_probable_piece(probs: &ClassProbs) -> Class {
    let color = probs.piece_color();
    first_maximal(probs, FALLBACK_ORDER.iter().map(|&p| Class::from_piece(color, p)))
        .unwrap_or_else(|| Class::from_piece(color, Piece::Queen))
}

/// First class of `candidates` with the highest probability in `probs`.
pub(crate) fn first_maximal<I>(probs: &ClassProbs, candidates: I) -> Option<Class>
where
    I: IntoIterator<Item = Class>,
{
    let mut best: Option<Class> = None;
    for class in candidates {
        match best {
            Some(b) if probs.get(class) <= probs.get(b) => {}
            _ => best = Some(class),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn probs(pairs: &[(Class, f32)]) -> ClassProbs {
        let mut p = ClassProbs::default();
        for &(c, v) in pairs {
            p.0[c.index()] = v;
        }
        p
    }

    #[test]
    fn picks_most_probable_of_winning_colour() {
        let p = probs(&[
            (Class::BlackKnight, 0.35),
            (Class::BlackRook, 0.25),
            (Class::WhiteRook, 0.4),
        ]);
        assert_eq!(most_probable_piece(&p), Class::BlackKnight);
    }

    #[test]
    fn ties_go_to_earlier_type() {
        // Queen before knight before rook before bishop before pawn.
        let p = probs(&[(Class::WhitePawn, 0.3), (Class::WhiteBishop, 0.3)]);
        assert_eq!(most_probable_piece(&p), Class::WhiteBishop);
        let p = probs(&[(Class::WhiteRook, 0.3), (Class::WhiteKnight, 0.3)]);
        assert_eq!(most_probable_piece(&p), Class::WhiteKnight);
    }

    #[test]
    fn never_returns_a_king() {
        let p = probs(&[(Class::BlackKing, 0.9), (Class::BlackPawn, 0.1)]);
        assert_eq!(most_probable_piece(&p), Class::BlackPawn);
    }

    #[test]
    fn all_zero_falls_to_queen() {
        assert_eq!(most_probable_piece(&ClassProbs::default()), Class::WhiteQueen);
    }
}
