// src/square.rs
// Squares are indexed in FEN order: 0 = a8, 7 = h8, 56 = a1, 63 = h1.

use std::fmt;
use std::str::FromStr;

const FILES: &[u8; 8] = b"abcdefgh";
const RANKS: &[u8; 8] = b"87654321";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Square(u8);

impl Square {
    pub const A8: Square = Square(0);
    pub const C8: Square = Square(2);
    pub const E8: Square = Square(4);
    pub const G8: Square = Square(6);
    pub const A1: Square = Square(56);
    pub const C1: Square = Square(58);
    pub const E1: Square = Square(60);
    pub const G1: Square = Square(62);
    pub const H1: Square = Square(63);

    /// Panics if `idx >= 64`.
    #[inline(always)]
    pub const fn from_index(idx: u8) -> Self {
        assert!(idx < 64, "square index out of range");
        Square(idx)
    }

    /// `row` 0 is rank 8, `file` 0 is file a.
    #[inline(always)]
    pub const fn from_coords(row: u8, file: u8) -> Self {
        Square::from_index(row * 8 + file)
    }

    #[inline(always)]
    pub const fn index(self) -> u8 {
        self.0
    }

    #[inline(always)]
    pub const fn row(self) -> u8 {
        self.0 / 8
    }

    #[inline(always)]
    pub const fn file(self) -> u8 {
        self.0 % 8
    }

    /// Rank number as printed, 1..=8.
    #[inline(always)]
    pub const fn rank(self) -> u8 {
        8 - self.row()
    }

    /// Light squares: a8, h1, and every square of the same parity.
    #[inline(always)]
    pub const fn is_light(self) -> bool {
        (self.row() + self.file()) % 2 == 0
    }

    /// All 64 squares in FEN order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0u8..64).map(Square)
    }
}

impl TryFrom<usize> for Square {
    type Error = String;

    fn try_from(idx: usize) -> Result<Self, Self::Error> {
        if idx < 64 {
            Ok(Square(idx as u8))
        } else {
            Err(format!("square index {} out of range", idx))
        }
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            FILES[self.file() as usize] as char,
            RANKS[self.row() as usize] as char
        )
    }
}

impl FromStr for Square {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(format!("invalid square `{}`", s));
        }
        let file = bytes[0].wrapping_sub(b'a');
        let rank = bytes[1].wrapping_sub(b'1');
        if file > 7 || rank > 7 {
            return Err(format!("invalid square `{}`", s));
        }
        Ok(Square::from_coords(7 - rank, file))
    }
}
