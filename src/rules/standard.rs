// src/rules/standard.rs
// `RulesBoard` backed by shakmaty's standard chess rules.

use super::RulesBoard;
use crate::board::{CASTLE_BK, CASTLE_BQ, CASTLE_WK, CASTLE_WQ, CastleBits, Color};
use crate::error::RulesError;
use crate::square::Square;
use shakmaty::uci::UciMove;
use shakmaty::{
    Bitboard, Board, CastlingMode, Chess, EnPassantMode, File, FromSetup, Position, PositionError,
    Rank, Setup,
};

/// Rook squares that carry each castling right.
const CASTLE_ROOKS: [(CastleBits, shakmaty::Square); 4] = [
    (CASTLE_WK, shakmaty::Square::H1),
    (CASTLE_WQ, shakmaty::Square::A1),
    (CASTLE_BK, shakmaty::Square::H8),
    (CASTLE_BQ, shakmaty::Square::A8),
];

#[derive(Debug, Clone)]
pub struct StandardBoard {
    setup: Setup,
}

impl StandardBoard {
    fn position(&self) -> Result<Chess, RulesError> {
        // Camera boards are often odd but playable; only refuse what shakmaty cannot play on.
        Chess::from_setup(self.setup.clone(), CastlingMode::Standard)
            .or_else(PositionError::ignore_too_much_material)
            .or_else(PositionError::ignore_impossible_check)
            .map_err(|e| RulesError::InvalidPosition(e.to_string()))
    }
}

#[inline]
fn to_shakmaty(sq: Square) -> shakmaty::Square {
    shakmaty::Square::from_coords(File::new(sq.file() as u32), Rank::new(7 - sq.row() as u32))
}

impl RulesBoard for StandardBoard {
    fn from_board_fen(fen: &str) -> Result<Self, RulesError> {
        let field = fen.split_whitespace().next().unwrap_or("");
        let board = Board::from_ascii_board_fen(field.as_bytes())
            .map_err(|e| RulesError::InvalidPosition(format!("{}: {}", field, e)))?;
        let mut setup = Setup::empty();
        setup.board = board;
        Ok(StandardBoard { setup })
    }

    fn set_turn(&mut self, color: Color) {
        self.setup.turn = match color {
            Color::White => shakmaty::Color::White,
            Color::Black => shakmaty::Color::Black,
        };
    }

    fn grant_castling(&mut self, flags: CastleBits) {
        for (flag, rook) in CASTLE_ROOKS {
            if flags & flag != 0 {
                self.setup.castling_rights |= Bitboard::from(rook);
            }
        }
    }

    fn set_en_passant(&mut self, target: Square) {
        self.setup.ep_square = Some(to_shakmaty(target));
    }

    fn push_uci(&mut self, uci: &str) -> Result<(), RulesError> {
        let pos = self.position()?;
        let mv = UciMove::from_ascii(uci.as_bytes())
            .map_err(|_| RulesError::IllegalMove(uci.to_string()))?
            .to_move(&pos)
            .map_err(|_| RulesError::IllegalMove(uci.to_string()))?;
        let pos = pos
            .play(&mv)
            .map_err(|_| RulesError::IllegalMove(uci.to_string()))?;
        self.setup = pos.into_setup(EnPassantMode::Legal);
        Ok(())
    }

    fn board_fen(&self) -> String {
        self.setup.board.board_fen(Bitboard::EMPTY).to_string()
    }
}
