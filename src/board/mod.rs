mod fen;

use crate::square::Square;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

pub mod castle_bits;
mod fen_tables;
pub use castle_bits::*;

/// Which side a piece (or a move) belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Color {
    White,
    Black,
}

/// Piece enum to hold all types of pieces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Piece {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

/// The classifier's output classes, in its fixed index order.
///
/// The ordinal of each variant is the index of its probability inside a
/// [`ClassProbs`](crate::probs::ClassProbs) vector, so the order must not change.
/// The same enumeration is used as the board symbol of a resolved square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Class {
    WhiteBishop,
    WhiteKing,
    WhiteKnight,
    WhitePawn,
    WhiteQueen,
    WhiteRook,
    Empty,
    BlackBishop,
    BlackKing,
    BlackKnight,
    BlackPawn,
    BlackQueen,
    BlackRook,
}

impl Class {
    pub const COUNT: usize = 13;

    pub const ALL: [Class; Class::COUNT] = [
        Class::WhiteBishop,
        Class::WhiteKing,
        Class::WhiteKnight,
        Class::WhitePawn,
        Class::WhiteQueen,
        Class::WhiteRook,
        Class::Empty,
        Class::BlackBishop,
        Class::BlackKing,
        Class::BlackKnight,
        Class::BlackPawn,
        Class::BlackQueen,
        Class::BlackRook,
    ];

    /// The six classes of one side, in classifier order.
    pub const fn side(color: Color) -> [Class; 6] {
        match color {
            Color::White => [
                Class::WhiteBishop,
                Class::WhiteKing,
                Class::WhiteKnight,
                Class::WhitePawn,
                Class::WhiteQueen,
                Class::WhiteRook,
            ],
            Color::Black => [
                Class::BlackBishop,
                Class::BlackKing,
                Class::BlackKnight,
                Class::BlackPawn,
                Class::BlackQueen,
                Class::BlackRook,
            ],
        }
    }

    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn from_piece(color: Color, piece: Piece) -> Class {
        match (color, piece) {
            (Color::White, Piece::Pawn) => Class::WhitePawn,
            (Color::White, Piece::Knight) => Class::WhiteKnight,
            (Color::White, Piece::Bishop) => Class::WhiteBishop,
            (Color::White, Piece::Rook) => Class::WhiteRook,
            (Color::White, Piece::Queen) => Class::WhiteQueen,
            (Color::White, Piece::King) => Class::WhiteKing,
            (Color::Black, Piece::Pawn) => Class::BlackPawn,
            (Color::Black, Piece::Knight) => Class::BlackKnight,
            (Color::Black, Piece::Bishop) => Class::BlackBishop,
            (Color::Black, Piece::Rook) => Class::BlackRook,
            (Color::Black, Piece::Queen) => Class::BlackQueen,
            (Color::Black, Piece::King) => Class::BlackKing,
        }
    }

    /// Color and piece type, or `None` for [`Class::Empty`].
    pub const fn piece(self) -> Option<(Color, Piece)> {
        let pc = match self {
            Class::WhiteBishop => (Color::White, Piece::Bishop),
            Class::WhiteKing => (Color::White, Piece::King),
            Class::WhiteKnight => (Color::White, Piece::Knight),
            Class::WhitePawn => (Color::White, Piece::Pawn),
            Class::WhiteQueen => (Color::White, Piece::Queen),
            Class::WhiteRook => (Color::White, Piece::Rook),
            Class::Empty => return None,
            Class::BlackBishop => (Color::Black, Piece::Bishop),
            Class::BlackKing => (Color::Black, Piece::King),
            Class::BlackKnight => (Color::Black, Piece::Knight),
            Class::BlackPawn => (Color::Black, Piece::Pawn),
            Class::BlackQueen => (Color::Black, Piece::Queen),
            Class::BlackRook => (Color::Black, Piece::Rook),
        };
        Some(pc)
    }

    #[inline(always)]
    pub const fn color(self) -> Option<Color> {
        match self.piece() {
            Some((color, _)) => Some(color),
            None => None,
        }
    }

    #[inline(always)]
    pub const fn is_empty(self) -> bool {
        matches!(self, Class::Empty)
    }

    /// FEN letter, or `_` for an empty square.
    #[inline(always)]
    pub fn to_char(self) -> char {
        fen_tables::CLASS_TO_CHAR[self.index()]
    }

    pub fn from_char(c: char) -> Option<Class> {
        if c.is_ascii() {
            fen_tables::CHAR_TO_CLASS[c as usize]
        } else {
            None
        }
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

impl Color {
    pub fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Rank (as printed) a pawn of this colour promotes from.
    #[inline(always)]
    pub const fn pre_promotion_rank(self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 2,
        }
    }
}

impl std::ops::Not for Color {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.opposite()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

impl Piece {
    /// Lowercase letter as used in coordinate-notation promotions.
    pub const fn uci_char(self) -> char {
        match self {
            Piece::Pawn => 'p',
            Piece::Knight => 'n',
            Piece::Bishop => 'b',
            Piece::Rook => 'r',
            Piece::Queen => 'q',
            Piece::King => 'k',
        }
    }
}

/// A fully resolved board: one class per square in FEN order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    squares: [Class; 64],
}

const BACK_RANK: [Piece; 8] = [
    Piece::Rook,
    Piece::Knight,
    Piece::Bishop,
    Piece::Queen,
    Piece::King,
    Piece::Bishop,
    Piece::Knight,
    Piece::Rook,
];

impl Placement {
    /// All 64 squares empty.
    pub const fn empty() -> Self {
        Placement {
            squares: [Class::Empty; 64],
        }
    }

    /// The standard starting position.
    pub fn start() -> Self {
        let mut p = Placement::empty();
        for (file, &piece) in BACK_RANK.iter().enumerate() {
            let file = file as u8;
            p.set(Square::from_coords(0, file), Class::from_piece(Color::Black, piece));
            p.set(Square::from_coords(1, file), Class::BlackPawn);
            p.set(Square::from_coords(6, file), Class::WhitePawn);
            p.set(Square::from_coords(7, file), Class::from_piece(Color::White, piece));
        }
        p
    }

    pub fn from_squares(squares: [Class; 64]) -> Self {
        Placement { squares }
    }

    #[inline(always)]
    pub fn get(&self, sq: Square) -> Class {
        self.squares[sq.index() as usize]
    }

    #[inline(always)]
    pub fn set(&mut self, sq: Square, class: Class) {
        self.squares[sq.index() as usize] = class;
    }

    pub fn squares(&self) -> &[Class; 64] {
        &self.squares
    }

    /// Number of squares holding `class`.
    pub fn count(&self, class: Class) -> usize {
        self.squares.iter().filter(|&&c| c == class).count()
    }

    /// First square holding `class`, if any.
    pub fn find(&self, class: Class) -> Option<Square> {
        self.squares
            .iter()
            .position(|&c| c == class)
            .map(|i| Square::from_index(i as u8))
    }

    /// One symbol per square (`_` for empty), ready for an external FEN formatter.
    pub fn to_symbols(&self) -> [char; 64] {
        let mut out = ['_'; 64];
        for (slot, class) in out.iter_mut().zip(self.squares.iter()) {
            *slot = class.to_char();
        }
        out
    }
}

impl Default for Placement {
    fn default() -> Self {
        Placement::empty()
    }
}

impl Index<Square> for Placement {
    type Output = Class;

    fn index(&self, sq: Square) -> &Class {
        &self.squares[sq.index() as usize]
    }
}

impl IndexMut<Square> for Placement {
    fn index_mut(&mut self, sq: Square) -> &mut Class {
        &mut self.squares[sq.index() as usize]
    }
}

impl FromStr for Placement {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Placement::from_board_fen(s)
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_board_fen())
    }
}
