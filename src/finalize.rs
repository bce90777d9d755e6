// src/finalize.rs
// Play a detected move on the previous position and read the board back.

use crate::board::{Class, Color, Placement, castle_flag};
use crate::detect::{DetectedMove, MoveAction};
use crate::error::{FinalizeError, RulesError};
use crate::probs::Reading;
use crate::promotion::promoted_piece;
use crate::rules::RulesBoard;
use crate::square::Square;
use tracing::debug;

/// Apply `mv` to `previous` through the rules engine `R`.
///
/// A pawn leaving its pre-promotion rank gets the promotion letter picked by
/// [`promoted_piece`]; en passant and castling get the en-passant square or
/// castling right the board-only FEN cannot carry.
pub fn finalize<R: RulesBoard>(
    mv: &DetectedMove,
    previous: &Placement,
    reading: &Reading,
    promotion_cap: u8,
) -> Result<Placement, FinalizeError> {
    let mut uci = mv.uci();
    let mut board = R::from_board_fen(&previous.to_board_fen())?;
    board.set_turn(mv.color);

    if let Some(color) = promoting_pawn(previous, mv.from) {
        let class = promoted_piece(previous, reading, mv.to, color, promotion_cap)?;
        if let Some((_, piece)) = class.piece() {
            uci.push(piece.uci_char());
        }
    } else if mv.action == MoveAction::EnPassant {
        board.set_en_passant(mv.to);
    } else if let Some(side) = mv.action.castle_side() {
        board.grant_castling(castle_flag(mv.color, side));
    }

    board.push_uci(&uci)?;
    debug!(%uci, "move played");

    let fen = board.board_fen();
    let placement = fen
        .parse::<Placement>()
        .map_err(RulesError::InvalidPosition)?;
    Ok(placement)
}

/// Colour of the pawn on `from` if it stands one step from promoting.
fn promoting_pawn(previous: &Placement, from: Square) -> Option<Color> {
    match previous.get(from) {
        Class::WhitePawn if from.rank() == Color::White.pre_promotion_rank() => Some(Color::White),
        Class::BlackPawn if from.rank() == Color::Black.pre_promotion_rank() => Some(Color::Black),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_pawns_on_the_seventh_promote() {
        let prev: Placement = "4k3/P7/8/8/8/8/1p6/R3K3".parse().unwrap();
        let sq = |n: &str| -> Square { n.parse().unwrap() };
        assert_eq!(promoting_pawn(&prev, sq("a7")), Some(Color::White));
        assert_eq!(promoting_pawn(&prev, sq("b2")), Some(Color::Black));
        assert_eq!(promoting_pawn(&prev, sq("a1")), None);
        assert_eq!(promoting_pawn(&prev, sq("e1")), None);
    }
}
