// src/assign/balance.rs
// Physical-set feasibility between pawns, queens and bishops.
//
// A standard set gives each side one queen and one bishop per square colour.
// Any queen or same-coloured bishop beyond that must come from a promotion,
// and every promotion used up one of the side's pawns.

use crate::board::{Class, Color, Piece};
use crate::config::PieceBudgets;
use crate::square::Square;

/// Remaining placeable count per class.
#[derive(Debug, Clone)]
pub(crate) struct Budget {
    initial: [u8; Class::COUNT],
    left: [u8; Class::COUNT],
}

impl Budget {
    pub(crate) fn new(budgets: &PieceBudgets) -> Self {
        let mut initial = [0u8; Class::COUNT];
        for class in Class::ALL {
            initial[class.index()] = budgets.for_class(class);
        }
        Budget {
            initial,
            left: initial,
        }
    }

    #[inline(always)]
    pub(crate) fn left(&self, class: Class) -> u8 {
        self.left[class.index()]
    }

    #[inline(always)]
    pub(crate) fn placed(&self, class: Class) -> u8 {
        self.initial[class.index()] - self.left[class.index()]
    }

    #[inline(always)]
    pub(crate) fn initial(&self, class: Class) -> u8 {
        self.initial[class.index()]
    }

    /// Caller checks `left(class) > 0` first.
    #[inline(always)]
    pub(crate) fn take(&mut self, class: Class) {
        debug_assert!(self.left[class.index()] > 0, "budget for {} exhausted", class);
        self.left[class.index()] -= 1;
    }
}

/// Bishops placed so far, per side and square colour.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct BishopSquares {
    light: [u8; 2],
    dark: [u8; 2],
}

impl BishopSquares {
    pub(crate) fn record(&mut self, color: Color, sq: Square) {
        if sq.is_light() {
            self.light[color as usize] += 1;
        } else {
            self.dark[color as usize] += 1;
        }
    }

    #[inline(always)]
    pub(crate) fn light(&self, color: Color) -> u8 {
        self.light[color as usize]
    }

    #[inline(always)]
    pub(crate) fn dark(&self, color: Color) -> u8 {
        self.dark[color as usize]
    }
}

/// Whether putting `class` on `sq` keeps the side's pawns, queens and bishops
/// explainable with one physical set.
///
/// Counts every queen beyond the first and every bishop beyond the first on
/// each square colour (as they would stand after the placement) and requires
/// that, together with the pawns on the board, they fit in the pawn budget.
/// With the default budgets this is the familiar table:
///
/// | placing | promotion debts                                 | must not exceed |
/// |---------|-------------------------------------------------|-----------------|
/// | pawn    | `(queens_left == 0) + (light == 2 \|\| dark == 2)`     | `pawns_left - 1` |
/// | queen   | `(queens_left - 1 == 0) + (light == 2 \|\| dark == 2)` | `pawns_left`     |
/// | bishop  | same, with the target colour counted one higher  | `pawns_left`     |
///
/// Kings, rooks and knights always pass.
pub(crate) fn allows(class: Class, sq: Square, budget: &Budget, bishops: &BishopSquares) -> bool {
    let Some((color, piece)) = class.piece() else {
        return true;
    };

    let queen = Class::from_piece(color, Piece::Queen);
    let pawn = Class::from_piece(color, Piece::Pawn);

    let mut queens = budget.placed(queen) as u32;
    let mut pawns = budget.placed(pawn) as u32;
    let mut light = bishops.light(color) as u32;
    let mut dark = bishops.dark(color) as u32;
    match piece {
        Piece::Pawn => pawns += 1,
        Piece::Queen => queens += 1,
        Piece::Bishop if sq.is_light() => light += 1,
        Piece::Bishop => dark += 1,
        Piece::King | Piece::Rook | Piece::Knight => return true,
    }

    let debts = queens.saturating_sub(1) + light.saturating_sub(1) + dark.saturating_sub(1);
    debts + pawns <= budget.initial(pawn) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        name.parse().unwrap()
    }

    fn place(budget: &mut Budget, bishops: &mut BishopSquares, class: Class, at: &str, n: usize) {
        for _ in 0..n {
            budget.take(class);
            if let Some((color, Piece::Bishop)) = class.piece() {
                bishops.record(color, sq(at));
            }
        }
    }

    #[test]
    fn full_pawn_rank_blocks_second_queen() {
        let mut budget = Budget::new(&PieceBudgets::default());
        let mut bishops = BishopSquares::default();
        place(&mut budget, &mut bishops, Class::WhitePawn, "e2", 8);
        place(&mut budget, &mut bishops, Class::WhiteQueen, "d1", 1);
        assert!(!allows(Class::WhiteQueen, sq("d4"), &budget, &bishops));
        // Black is unaffected.
        assert!(allows(Class::BlackQueen, sq("d8"), &budget, &bishops));
        assert!(allows(Class::BlackQueen, sq("d5"), &budget, &bishops));
    }

    #[test]
    fn second_queen_costs_a_pawn() {
        let mut budget = Budget::new(&PieceBudgets::default());
        let mut bishops = BishopSquares::default();
        place(&mut budget, &mut bishops, Class::WhiteQueen, "d1", 2);
        place(&mut budget, &mut bishops, Class::WhitePawn, "a2", 6);
        assert!(allows(Class::WhitePawn, sq("b2"), &budget, &bishops));
        place(&mut budget, &mut bishops, Class::WhitePawn, "b2", 1);
        assert!(!allows(Class::WhitePawn, sq("c2"), &budget, &bishops));
    }

    #[test]
    fn same_coloured_bishop_pair_costs_a_pawn() {
        let mut budget = Budget::new(&PieceBudgets::default());
        let mut bishops = BishopSquares::default();
        place(&mut budget, &mut bishops, Class::BlackPawn, "a7", 8);
        place(&mut budget, &mut bishops, Class::BlackBishop, "c8", 1);
        assert!(sq("c8").is_light());
        // Second light-squared bishop needs a promotion, no pawn left for it.
        assert!(!allows(Class::BlackBishop, sq("e6"), &budget, &bishops));
        // Dark-squared partner is the normal pair.
        assert!(!sq("f8").is_light());
        assert!(allows(Class::BlackBishop, sq("f8"), &budget, &bishops));
    }

    #[test]
    fn promotion_debts_add_up() {
        let mut budget = Budget::new(&PieceBudgets::default());
        let mut bishops = BishopSquares::default();
        place(&mut budget, &mut bishops, Class::WhiteBishop, "c4", 2);
        assert!(sq("c4").is_light());
        place(&mut budget, &mut bishops, Class::WhiteQueen, "d1", 1);
        place(&mut budget, &mut bishops, Class::WhitePawn, "a2", 7);
        // Two light bishops already owe one pawn; a second queen owes another.
        assert!(!allows(Class::WhiteQueen, sq("d4"), &budget, &bishops));
        assert!(allows(Class::WhiteQueen, sq("d4"), &Budget::new(&PieceBudgets::default()), &bishops));
    }

    #[test]
    fn rooks_knights_and_kings_always_pass() {
        let mut budget = Budget::new(&PieceBudgets::default());
        let mut bishops = BishopSquares::default();
        place(&mut budget, &mut bishops, Class::WhitePawn, "a2", 8);
        place(&mut budget, &mut bishops, Class::WhiteQueen, "d1", 2);
        for class in [Class::WhiteRook, Class::WhiteKnight, Class::WhiteKing, Class::Empty] {
            assert!(allows(class, sq("a1"), &budget, &bishops));
        }
    }
}
