//! Static resolution of a reading into a board, one square at a time.
//!
//! Kings first, then confident empties, then a greedy global pass that always
//! commits the single most probable (type, square) pair still allowed by the
//! piece budgets and the pawn/queen/bishop balance.

mod balance;
pub mod fallback;

use crate::board::{Class, Piece, Placement};
use crate::config::{ASSIGN_ORDER, PieceBudgets};
use crate::decode::DecodeStatus;
use crate::probs::Reading;
use crate::square::Square;
use balance::{BishopSquares, Budget};
use tracing::{debug, warn};

/// Result of the static pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub placement: Placement,
    pub status: DecodeStatus,
}

/// How the greedy loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Greedy {
    Complete,
    /// A candidate list ran dry with squares still open.
    Exhausted(Class),
}

/// Resolve every square of `reading` (FEN order) into a class.
pub fn assign(reading: &Reading, budgets: &PieceBudgets) -> Assignment {
    let mut slots: [Option<Class>; 64] = [None; 64];

    let white_king = best_square(reading, Class::WhiteKing, None);
    let black_king = best_square(reading, Class::BlackKing, Some(white_king));
    slots[white_king.index() as usize] = Some(Class::WhiteKing);
    slots[black_king.index() as usize] = Some(Class::BlackKing);

    for sq in Square::all() {
        let slot = &mut slots[sq.index() as usize];
        if slot.is_none() && reading.get(sq).is_empty() {
            *slot = Some(Class::Empty);
        }
    }

    let status = match greedy(reading, budgets, &mut slots) {
        Greedy::Complete => DecodeStatus::Complete,
        Greedy::Exhausted(class) => {
            let open = slots.iter().filter(|s| s.is_none()).count();
            warn!(
                list = %class,
                open,
                "reading too ambiguous for a balanced board; resolving remaining squares one by one"
            );
            for sq in Square::all() {
                let slot = &mut slots[sq.index() as usize];
                if slot.is_none() {
                    *slot = Some(fallback::most_probable_piece(reading.get(sq)));
                }
            }
            DecodeStatus::FallbackUsed
        }
    };

    let mut placement = Placement::empty();
    for sq in Square::all() {
        if let Some(class) = slots[sq.index() as usize] {
            placement.set(sq, class);
        }
    }
    Assignment { placement, status }
}

/// First square with the highest probability of `class`, skipping `exclude`.
fn best_square(reading: &Reading, class: Class, exclude: Option<Square>) -> Square {
    let mut best: Option<Square> = None;
    for sq in Square::all().filter(|&sq| Some(sq) != exclude) {
        match best {
            Some(b) if reading.prob(sq, class) <= reading.prob(b, class) => {}
            _ => best = Some(sq),
        }
    }
    // 63 candidates remain after one exclusion.
    best.unwrap_or(Square::A8)
}

/// Candidates for `class`: open squares, most probable first, ties in square order.
fn candidates(reading: &Reading, class: Class, slots: &[Option<Class>; 64]) -> Vec<Square> {
    let pawn = matches!(class, Class::WhitePawn | Class::BlackPawn);
    let mut list: Vec<Square> = Square::all()
        .filter(|sq| slots[sq.index() as usize].is_none())
        // Pawns never stand on the first or last rank.
        .filter(|sq| !pawn || (1..7).contains(&sq.row()))
        .collect();
    list.sort_by(|a, b| reading.prob(*b, class).total_cmp(&reading.prob(*a, class)));
    list
}

fn greedy(reading: &Reading, budgets: &PieceBudgets, slots: &mut [Option<Class>; 64]) -> Greedy {
    let mut open = slots.iter().filter(|s| s.is_none()).count();
    let lists: Vec<Vec<Square>> = ASSIGN_ORDER
        .iter()
        .map(|&class| candidates(reading, class, slots))
        .collect();
    let mut heads = [0usize; ASSIGN_ORDER.len()];
    let mut budget = Budget::new(budgets);
    let mut bishops = BishopSquares::default();

    while open > 0 {
        // Highest head across all lists; strict `>` keeps the earlier type on ties.
        let mut pick: Option<(usize, f32)> = None;
        for (t, list) in lists.iter().enumerate() {
            let Some(&sq) = list.get(heads[t]) else {
                continue;
            };
            let p = reading.prob(sq, ASSIGN_ORDER[t]);
            match pick {
                Some((_, best)) if p <= best => {}
                _ => pick = Some((t, p)),
            }
        }
        let Some((t, _)) = pick else {
            // Only reachable when no list ever had a candidate.
            return Greedy::Exhausted(ASSIGN_ORDER[0]);
        };

        let class = ASSIGN_ORDER[t];
        let sq = lists[t][heads[t]];
        let slot = &mut slots[sq.index() as usize];
        if budget.left(class) > 0 && slot.is_none() && balance::allows(class, sq, &budget, &bishops) {
            *slot = Some(class);
            budget.take(class);
            if let Some((color, Piece::Bishop)) = class.piece() {
                bishops.record(color, sq);
            }
            open -= 1;
            debug!(%sq, %class, open, "assigned");
        }

        heads[t] += 1;
        if open > 0 && heads[t] >= lists[t].len() {
            return Greedy::Exhausted(class);
        }
    }
    Greedy::Complete
}
