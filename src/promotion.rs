// src/promotion.rs

use crate::assign::fallback::first_maximal;
use crate::board::{Class, Color, Placement};
use crate::config::PROMOTION_ORDER;
use crate::error::DecodeError;
use crate::probs::Reading;
use crate::square::Square;

/// Piece a pawn of `color` promoted to on `to`.
///
/// Only types the previous position holds fewer than `cap` of are eligible;
/// among them the most probable on `to` wins, ties going to the earlier of
/// queen, knight, rook, bishop.
pub fn promoted_piece(
    previous: &Placement,
    reading: &Reading,
    to: Square,
    color: Color,
    cap: u8,
) -> Result<Class, DecodeError> {
    let eligible = PROMOTION_ORDER
        .iter()
        .map(|&piece| Class::from_piece(color, piece))
        .filter(|&class| previous.count(class) < cap as usize);
    first_maximal(reading.get(to), eligible).ok_or(DecodeError::PromotionUndeterminable { color })
}
