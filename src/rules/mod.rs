//! The chess rules engine the move finalizer delegates to.
//!
//! The decoder only needs a small slice of a rules engine: load a board,
//! tweak side to move / castling / en passant, push one coordinate-notation
//! move and read the resulting board back. [`RulesBoard`] is that slice;
//! [`StandardBoard`] implements it on top of `shakmaty`.

mod standard;

use crate::board::{CastleBits, Color};
use crate::error::RulesError;
use crate::square::Square;

pub use standard::StandardBoard;

pub trait RulesBoard: Sized {
    /// Load a board-only FEN. Side to move defaults to white, with no
    /// castling rights and no en-passant square.
    fn from_board_fen(fen: &str) -> Result<Self, RulesError>;

    fn set_turn(&mut self, color: Color);

    /// Add the castling rights in `flags` (any combination of `CASTLE_*`).
    fn grant_castling(&mut self, flags: CastleBits);

    fn set_en_passant(&mut self, target: Square);

    /// Play `uci` (e.g. `e2e4`, `a7a8q`) if it is legal in the current position.
    fn push_uci(&mut self, uci: &str) -> Result<(), RulesError>;

    /// Board-only FEN of the current position.
    fn board_fen(&self) -> String;
}
