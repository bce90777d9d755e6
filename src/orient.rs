//! Reorders a raw capture-order reading into FEN order.
//!
//! The raw order is image row-major starting at the top-left cell. The
//! [`Corner`] says which image corner holds a1; the board is only ever
//! rotated, never mirrored.

use crate::error::DecodeError;
use crate::square::Square;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Image corner that shows square a1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Corner {
    /// Bottom-left: the image already matches FEN order.
    #[default]
    BL,
    BR,
    TL,
    TR,
}

impl Corner {
    /// FEN square shown at image cell (`row`, `col`).
    #[inline]
    pub const fn fen_square(self, row: u8, col: u8) -> Square {
        match self {
            Corner::BL => Square::from_coords(row, col),
            Corner::TR => Square::from_coords(7 - row, 7 - col),
            // a1 bottom-right: files run up the right edge, ranks run left.
            Corner::BR => Square::from_coords(col, 7 - row),
            // a1 top-left: files run down the left edge, ranks run right.
            Corner::TL => Square::from_coords(7 - col, row),
        }
    }
}

impl FromStr for Corner {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "BL" => Ok(Corner::BL),
            "BR" => Ok(Corner::BR),
            "TL" => Ok(Corner::TL),
            "TR" => Ok(Corner::TR),
            other => Err(DecodeError::InvalidCorner(other.to_string())),
        }
    }
}

impl fmt::Display for Corner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Corner::BL => "BL",
            Corner::BR => "BR",
            Corner::TL => "TL",
            Corner::TR => "TR",
        };
        f.write_str(s)
    }
}

/// Reindex 64 capture-order cells into FEN order.
pub fn to_fen_order<T: Copy>(raw: &[T; 64], a1: Corner) -> [T; 64] {
    let mut out = *raw;
    for row in 0..8u8 {
        for col in 0..8u8 {
            let sq = a1.fen_square(row, col);
            out[sq.index() as usize] = raw[(row * 8 + col) as usize];
        }
    }
    out
}

/// Inverse of [`to_fen_order`]: lay FEN-order cells out as the camera sees them.
pub fn to_capture_order<T: Copy>(fen: &[T; 64], a1: Corner) -> [T; 64] {
    let mut out = *fen;
    for row in 0..8u8 {
        for col in 0..8u8 {
            let sq = a1.fen_square(row, col);
            out[(row * 8 + col) as usize] = fen[sq.index() as usize];
        }
    }
    out
}
