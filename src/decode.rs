//! Top-level decoding: orientation, move detection, static assignment.
//!
//! With a previous position the decoder first tries to read a single move
//! straight off the probabilities. Failing that it resolves the board square
//! by square and tries move detection once more on the result. A move the
//! rules engine accepts always wins over the static board.

use crate::assign::assign;
use crate::board::{Piece, Placement};
use crate::config::{DEFAULT_CONFIG, DecoderConfig};
use crate::detect::{DetectedMove, detect_from_placement, detect_from_reading};
use crate::error::{DecodeError, FinalizeError};
use crate::finalize::finalize;
use crate::orient::{Corner, to_fen_order};
use crate::probs::{ClassProbs, Reading};
use crate::rules::{RulesBoard, StandardBoard};
use crate::shape::candidates_for;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// Whether the board came out of the budgeted assignment intact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DecodeStatus {
    Complete,
    /// Some squares were resolved one by one without budgets.
    FallbackUsed,
}

/// Which detector pass found the move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pass {
    /// Against the raw probabilities.
    Reading,
    /// Against the statically resolved board.
    Resolved,
}

/// How the final placement was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    MoveDetected { mv: DetectedMove, pass: Pass },
    Static,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    pub placement: Placement,
    pub status: DecodeStatus,
    pub resolution: Resolution,
    /// Piece types whose geometry fits the detected move; empty for static results.
    pub candidates: Vec<Piece>,
}

impl Decoded {
    fn statically(placement: Placement, status: DecodeStatus) -> Self {
        Decoded {
            placement,
            status,
            resolution: Resolution::Static,
            candidates: Vec::new(),
        }
    }

    fn moved(placement: Placement, status: DecodeStatus, mv: DetectedMove, pass: Pass) -> Self {
        Decoded {
            placement,
            status,
            resolution: Resolution::MoveDetected { mv, pass },
            candidates: candidates_for(&mv),
        }
    }

    /// Board field of the FEN.
    pub fn fen(&self) -> String {
        self.placement.to_board_fen()
    }

    pub fn detected_move(&self) -> Option<DetectedMove> {
        match self.resolution {
            Resolution::MoveDetected { mv, .. } => Some(mv),
            Resolution::Static => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Decoder {
    config: DecoderConfig,
}

impl Default for Decoder {
    fn default() -> Self {
        Decoder::new(DEFAULT_CONFIG.clone())
    }
}

impl Decoder {
    pub fn new(config: DecoderConfig) -> Self {
        Decoder { config }
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decode 64 vectors in capture order, using shakmaty for move legality.
    pub fn decode(
        &self,
        raw: &[ClassProbs],
        a1: Corner,
        previous: Option<&str>,
    ) -> Result<Decoded, DecodeError> {
        self.decode_with::<StandardBoard>(raw, a1, previous)
    }

    /// Same as [`Decoder::decode`] with a caller-chosen rules engine.
    #[instrument(level = "debug", skip(self, raw), fields(squares = raw.len()))]
    pub fn decode_with<R: RulesBoard>(
        &self,
        raw: &[ClassProbs],
        a1: Corner,
        previous: Option<&str>,
    ) -> Result<Decoded, DecodeError> {
        let raw: &[ClassProbs; 64] = raw
            .try_into()
            .map_err(|_| DecodeError::WrongSquareCount(raw.len()))?;
        let reading = Reading::new(to_fen_order(raw, a1));
        let previous = previous
            .map(|fen| fen.parse::<Placement>().map_err(DecodeError::InvalidFen))
            .transpose()?;
        self.decode_reading::<R>(&reading, previous.as_ref())
    }

    /// Decode a reading already in FEN order.
    pub fn decode_reading<R: RulesBoard>(
        &self,
        reading: &Reading,
        previous: Option<&Placement>,
    ) -> Result<Decoded, DecodeError> {
        let previous = previous.filter(|_| self.config.move_detection);

        if let Some(prev) = previous {
            if let Some(mv) = detect_from_reading(prev, reading) {
                if let Some(placement) = self.play::<R>(&mv, prev, reading)? {
                    return Ok(Decoded::moved(placement, DecodeStatus::Complete, mv, Pass::Reading));
                }
            }
        }

        let assignment = assign(reading, &self.config.budgets);

        if let Some(prev) = previous {
            if let Some(mv) = detect_from_placement(prev, &assignment.placement) {
                if let Some(placement) = self.play::<R>(&mv, prev, reading)? {
                    return Ok(Decoded::moved(placement, assignment.status, mv, Pass::Resolved));
                }
            }
        }

        debug!(status = ?assignment.status, "static resolution");
        Ok(Decoded::statically(assignment.placement, assignment.status))
    }

    /// `Ok(None)` when the rules engine refuses the move.
    fn play<R: RulesBoard>(
        &self,
        mv: &DetectedMove,
        previous: &Placement,
        reading: &Reading,
    ) -> Result<Option<Placement>, DecodeError> {
        match finalize::<R>(mv, previous, reading, self.config.promotion_cap) {
            Ok(placement) => Ok(Some(placement)),
            Err(FinalizeError::Rules(e)) => {
                warn!(%mv, error = %e, "detected move rejected by rules engine");
                Ok(None)
            }
            Err(FinalizeError::Decode(e)) => Err(e),
        }
    }
}

/// Decode with the default configuration.
///
/// `reading_raw` holds 64 vectors in capture order (image row-major from the
/// top-left cell), `a1` names the image corner holding a1 and `previous` is an
/// optional FEN whose board field is the position before this frame.
pub fn decode(
    reading_raw: &[ClassProbs],
    a1: Corner,
    previous: Option<&str>,
) -> Result<Decoded, DecodeError> {
    Decoder::default().decode(reading_raw, a1, previous)
}
