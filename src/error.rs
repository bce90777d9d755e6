use crate::board::Color;
use thiserror::Error;

/// Failures that abort a decode.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    #[error("expected 64 square readings, got {0}")]
    WrongSquareCount(usize),

    #[error("invalid previous position: {0}")]
    InvalidFen(String),

    #[error("invalid a1 corner `{0}`, expected one of BL, BR, TL, TR")]
    InvalidCorner(String),

    /// Every promotable type of `color` is already at its cap in the
    /// previous position, so that position cannot be right.
    #[error("cannot determine promoted piece: {color} already has every promotable type at its cap")]
    PromotionUndeterminable { color: Color },
}

/// Rejections reported by a [`RulesBoard`](crate::rules::RulesBoard).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RulesError {
    #[error("rules engine rejected position: {0}")]
    InvalidPosition(String),

    #[error("illegal move `{0}`")]
    IllegalMove(String),
}

/// Why a detected move could not be turned into a board.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FinalizeError {
    /// Fatal for the whole decode.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The decoder can still fall back to the static board.
    #[error(transparent)]
    Rules(#[from] RulesError),
}
