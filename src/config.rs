// src/config.rs

use crate::board::{Class, Piece};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// How many of each non-king piece type a side may own.
///
/// Applied identically to both sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PieceBudgets {
    pub bishops: u8,
    pub knights: u8,
    pub pawns: u8,
    pub queens: u8,
    pub rooks: u8,
}

impl Default for PieceBudgets {
    fn default() -> Self {
        PieceBudgets {
            bishops: 2,
            knights: 2,
            pawns: 8,
            queens: 2,
            rooks: 2,
        }
    }
}

impl PieceBudgets {
    /// Initial budget for `class`; kings and empty squares have none.
    pub fn for_class(&self, class: Class) -> u8 {
        match class.piece() {
            Some((_, Piece::Bishop)) => self.bishops,
            Some((_, Piece::Knight)) => self.knights,
            Some((_, Piece::Pawn)) => self.pawns,
            Some((_, Piece::Queen)) => self.queens,
            Some((_, Piece::Rook)) => self.rooks,
            Some((_, Piece::King)) | None => 0,
        }
    }
}

/// Tunables of a [`Decoder`](crate::decode::Decoder).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    pub budgets: PieceBudgets,
    /// A type can be promoted to while the previous position holds fewer than this many.
    pub promotion_cap: u8,
    /// Run move detection when a previous position is supplied.
    pub move_detection: bool,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        DecoderConfig {
            budgets: PieceBudgets::default(),
            promotion_cap: 2,
            move_detection: true,
        }
    }
}

/// Process-wide default configuration, shared read-only between decodes.
pub static DEFAULT_CONFIG: Lazy<DecoderConfig> = Lazy::new(DecoderConfig::default);

/// Non-king piece types in the order the assigner breaks ties.
pub const ASSIGN_ORDER: [Class; 10] = [
    Class::WhiteBishop,
    Class::WhiteKnight,
    Class::WhitePawn,
    Class::WhiteQueen,
    Class::WhiteRook,
    Class::BlackBishop,
    Class::BlackKnight,
    Class::BlackPawn,
    Class::BlackQueen,
    Class::BlackRook,
];

/// Scan order of the per-square fallback (first maximal wins).
pub const FALLBACK_ORDER: [Piece; 5] = [
    Piece::Queen,
    Piece::Knight,
    Piece::Rook,
    Piece::Bishop,
    Piece::Pawn,
];

/// Scan order of promotion candidates (first maximal wins).
pub const PROMOTION_ORDER: [Piece; 4] = [Piece::Queen, Piece::Knight, Piece::Rook, Piece::Bishop];
