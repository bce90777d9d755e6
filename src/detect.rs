//! Move detection between a known previous position and a new snapshot.
//!
//! Squares are compared by occupancy only (empty, white, black). The set of
//! squares that changed is then matched against the footprints of a simple
//! move or capture (2 squares), en passant (3) and castling (4).

use crate::board::{CastleSide, Class, Color, Piece, Placement};
use crate::probs::{ClassProbs, Reading};
use crate::square::Square;
use arrayvec::ArrayVec;
use std::fmt;
use tracing::debug;

/// Squares whose occupancy changed, in ascending FEN order.
pub type ChangeSet = ArrayVec<Square, 64>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Occupancy {
    Empty,
    White,
    Black,
}

impl Occupancy {
    #[inline]
    pub const fn of_class(class: Class) -> Self {
        match class.color() {
            None => Occupancy::Empty,
            Some(Color::White) => Occupancy::White,
            Some(Color::Black) => Occupancy::Black,
        }
    }

    #[inline]
    pub const fn color(self) -> Option<Color> {
        match self {
            Occupancy::Empty => None,
            Occupancy::White => Some(Color::White),
            Occupancy::Black => Some(Color::Black),
        }
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        matches!(self, Occupancy::Empty)
    }
}

impl From<Color> for Occupancy {
    fn from(color: Color) -> Self {
        match color {
            Color::White => Occupancy::White,
            Color::Black => Occupancy::Black,
        }
    }
}

/// Anything that can say what occupies a square right now.
pub trait OccupancySource {
    fn occupancy(&self, sq: Square) -> Occupancy;
}

impl OccupancySource for ClassProbs {
    fn occupancy(&self, _sq: Square) -> Occupancy {
        if self.is_empty() {
            Occupancy::Empty
        } else {
            self.piece_color().into()
        }
    }
}

impl OccupancySource for Reading {
    fn occupancy(&self, sq: Square) -> Occupancy {
        self.get(sq).occupancy(sq)
    }
}

impl OccupancySource for Placement {
    fn occupancy(&self, sq: Square) -> Occupancy {
        Occupancy::of_class(self.get(sq))
    }
}

/// What kind of move a detected change-set corresponds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveAction {
    Moves,
    Captures,
    EnPassant,
    CastlesKingside,
    CastlesQueenside,
}

impl MoveAction {
    pub const fn castle_side(self) -> Option<CastleSide> {
        match self {
            MoveAction::CastlesKingside => Some(CastleSide::Kingside),
            MoveAction::CastlesQueenside => Some(CastleSide::Queenside),
            _ => None,
        }
    }

    pub const fn is_capture(self) -> bool {
        matches!(self, MoveAction::Captures | MoveAction::EnPassant)
    }

    const fn label(self) -> &'static str {
        match self {
            MoveAction::Moves => "moves",
            MoveAction::Captures => "captures",
            MoveAction::EnPassant => "en_passant",
            MoveAction::CastlesKingside => "castles_kingside",
            MoveAction::CastlesQueenside => "castles_queenside",
        }
    }
}

/// A move recognised from a change-set. For castling `from`/`to` are the king's squares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DetectedMove {
    pub from: Square,
    pub to: Square,
    pub color: Color,
    pub action: MoveAction,
}

impl DetectedMove {
    /// Coordinate notation without a promotion suffix, e.g. `e2e4`.
    pub fn uci(&self) -> String {
        format!("{}{}", self.from, self.to)
    }
}

impl fmt::Display for DetectedMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{} {}", self.color, self.action.label(), self.uci())
    }
}

/// Squares whose occupancy in `current` differs from `previous`.
pub fn changed_squares<S: OccupancySource + ?Sized>(previous: &Placement, current: &S) -> ChangeSet {
    Square::all()
        .filter(|&sq| previous.occupancy(sq) != current.occupancy(sq))
        .collect()
}

/// Classify a change-set as a move, or `None` when its shape is not recognised.
pub fn infer_move<S: OccupancySource + ?Sized>(
    previous: &Placement,
    current: &S,
    changes: &[Square],
) -> Option<DetectedMove> {
    match changes.len() {
        2 => simple_move(previous, current, [changes[0], changes[1]]),
        3 => en_passant(previous, current, [changes[0], changes[1], changes[2]]),
        4 => castling(previous, current, [changes[0], changes[1], changes[2], changes[3]]),
        _ => None,
    }
}

/// Change-set and classification in one go, with logging.
pub fn detect<S: OccupancySource + ?Sized>(previous: &Placement, current: &S) -> Option<DetectedMove> {
    let changes = changed_squares(previous, current);
    let mv = infer_move(previous, current, &changes);
    match mv {
        Some(mv) => debug!(changed = changes.len(), %mv, "move detected"),
        None => debug!(changed = changes.len(), "no recognisable move"),
    }
    mv
}

/// Pass 1: compare against the raw probabilities.
pub fn detect_from_reading(previous: &Placement, reading: &Reading) -> Option<DetectedMove> {
    detect(previous, reading)
}

/// Pass 2: compare against a board already resolved square by square.
pub fn detect_from_placement(previous: &Placement, resolved: &Placement) -> Option<DetectedMove> {
    detect(previous, resolved)
}

fn simple_move<S: OccupancySource + ?Sized>(
    previous: &Placement,
    current: &S,
    [a, b]: [Square; 2],
) -> Option<DetectedMove> {
    let (from, to) = match (current.occupancy(a).is_empty(), current.occupancy(b).is_empty()) {
        (true, false) => (a, b),
        (false, true) => (b, a),
        _ => return None,
    };

    // `from` changed and is now empty, so it held a piece before.
    let color = previous.get(from).color()?;
    if current.occupancy(to) != Occupancy::from(color) {
        // A piece that changes colour on its way is not a move we know.
        return None;
    }
    let action = match previous.occupancy(to).color() {
        None => MoveAction::Moves,
        Some(victim) if victim != color => MoveAction::Captures,
        Some(_) => return None,
    };
    Some(DetectedMove {
        from,
        to,
        color,
        action,
    })
}

fn en_passant<S: OccupancySource + ?Sized>(
    previous: &Placement,
    current: &S,
    squares: [Square; 3],
) -> Option<DetectedMove> {
    let to_pos = squares
        .iter()
        .position(|&sq| !current.occupancy(sq).is_empty())?;
    let to = squares[to_pos];
    let color = current.occupancy(to).color()?;

    let mut others = squares.iter().enumerate().filter(|&(i, _)| i != to_pos).map(|(_, &sq)| sq);
    let (first, second) = (others.next()?, others.next()?);

    let own_pawn = Class::from_piece(color, Piece::Pawn);
    let (from, victim) = if previous.get(first) == own_pawn {
        (first, second)
    } else if previous.get(second) == own_pawn {
        (second, first)
    } else {
        return None;
    };

    let enemy_pawn = Class::from_piece(color.opposite(), Piece::Pawn);
    if previous.get(victim) != enemy_pawn {
        return None;
    }
    Some(DetectedMove {
        from,
        to,
        color,
        action: MoveAction::EnPassant,
    })
}

fn castling<S: OccupancySource + ?Sized>(
    previous: &Placement,
    _current: &S,
    squares: [Square; 4],
) -> Option<DetectedMove> {
    let king_pos = squares
        .iter()
        .position(|&sq| matches!(previous.get(sq), Class::WhiteKing | Class::BlackKing))?;
    let from = squares[king_pos];

    let to = squares
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != king_pos)
        .map(|(_, &sq)| sq)
        .find(|&sq| {
            previous.get(sq).is_empty() && (sq.index() as i16 - from.index() as i16).abs() == 2
        })?;

    let (color, action) = match (previous.get(from), to) {
        (Class::WhiteKing, Square::G1) => (Color::White, MoveAction::CastlesKingside),
        (Class::WhiteKing, Square::C1) => (Color::White, MoveAction::CastlesQueenside),
        (Class::BlackKing, Square::G8) => (Color::Black, MoveAction::CastlesKingside),
        (Class::BlackKing, Square::C8) => (Color::Black, MoveAction::CastlesQueenside),
        _ => return None,
    };
    Some(DetectedMove {
        from,
        to,
        color,
        action,
    })
}
