// src/board/castle_bits.rs

use super::Color;

/// Underlying bit type for castling rights.
pub type CastleBits = u8;

pub const CASTLE_WK: CastleBits = 0b0001;
pub const CASTLE_WQ: CastleBits = 0b0010;
pub const CASTLE_BK: CastleBits = 0b0100;
pub const CASTLE_BQ: CastleBits = 0b1000;

/// Which wing a castling move goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    Kingside,
    Queenside,
}

/// The single right a castling move of `color` towards `side` needs.
#[inline]
pub const fn castle_flag(color: Color, side: CastleSide) -> CastleBits {
    match (color, side) {
        (Color::White, CastleSide::Kingside) => CASTLE_WK,
        (Color::White, CastleSide::Queenside) => CASTLE_WQ,
        (Color::Black, CastleSide::Kingside) => CASTLE_BK,
        (Color::Black, CastleSide::Queenside) => CASTLE_BQ,
    }
}

/// FEN castling-field letter for a single right (`K`, `Q`, `k`, `q`).
pub const fn castle_char(flag: CastleBits) -> Option<char> {
    match flag {
        CASTLE_WK => Some('K'),
        CASTLE_WQ => Some('Q'),
        CASTLE_BK => Some('k'),
        CASTLE_BQ => Some('q'),
        _ => None,
    }
}
