// src/board/fen.rs
// Board-only FEN field: ranks 8→1 separated by '/', digits for empty runs.

use super::{Class, Placement};
use crate::square::Square;

impl Placement {
    /// Parse the piece-placement field of a FEN string.
    ///
    /// Anything after the first whitespace (side to move, castling, ...) is
    /// ignored, so full FEN strings are accepted too.
    pub fn from_board_fen(fen: &str) -> Result<Self, String> {
        let field = fen.split_whitespace().next().unwrap_or("");
        let ranks: Vec<&str> = field.split('/').collect();
        if ranks.len() != 8 {
            return Err(format!(
                "FEN board `{}` has {} ranks, expected 8",
                field,
                ranks.len()
            ));
        }

        let mut placement = Placement::empty();
        for (row, rank) in ranks.iter().enumerate() {
            let mut file: u8 = 0;
            for ch in rank.chars() {
                if let Some(run) = ch.to_digit(10) {
                    if !(1..=8).contains(&run) {
                        return Err(format!("invalid empty run `{}` in rank {}", ch, 8 - row));
                    }
                    file += run as u8;
                } else {
                    let class = match Class::from_char(ch) {
                        Some(c) if !c.is_empty() => c,
                        _ => return Err(format!("invalid piece `{}` in rank {}", ch, 8 - row)),
                    };
                    if file >= 8 {
                        return Err(format!("rank {} overflows 8 files", 8 - row));
                    }
                    placement.set(Square::from_coords(row as u8, file), class);
                    file += 1;
                }
                if file > 8 {
                    return Err(format!("rank {} overflows 8 files", 8 - row));
                }
            }
            if file != 8 {
                return Err(format!("rank {} covers {} files, expected 8", 8 - row, file));
            }
        }
        Ok(placement)
    }

    /// Format as a board-only FEN field with digit-compressed empty runs.
    pub fn to_board_fen(&self) -> String {
        let mut out = String::with_capacity(71);
        for row in 0..8u8 {
            if row > 0 {
                out.push('/');
            }
            let mut run = 0u8;
            for file in 0..8u8 {
                let class = self.get(Square::from_coords(row, file));
                if class.is_empty() {
                    run += 1;
                    continue;
                }
                if run > 0 {
                    out.push((b'0' + run) as char);
                    run = 0;
                }
                out.push(class.to_char());
            }
            if run > 0 {
                out.push((b'0' + run) as char);
            }
        }
        out
    }
}
