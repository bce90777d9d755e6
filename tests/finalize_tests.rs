//! tests/finalize_tests.rs
//! Move finalization against a recording fake rules engine.
use std::cell::RefCell;

use fenlens::board::{CASTLE_BK, CASTLE_WQ, CastleBits};
use fenlens::decode::{Pass, Resolution};
use fenlens::detect::{DetectedMove, MoveAction};
use fenlens::error::{FinalizeError, RulesError};
use fenlens::finalize::finalize;
use fenlens::rules::RulesBoard;
use fenlens::square::Square;
use fenlens::{Class, Color, Corner, DecodeError, Decoder, Placement, Reading};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Load(String),
    Turn(Color),
    Castling(CastleBits),
    EnPassant(Square),
    Push(String),
}

thread_local! {
    static CALLS: RefCell<Vec<Call>> = const { RefCell::new(Vec::new()) };
}

fn record(call: Call) {
    CALLS.with(|c| c.borrow_mut().push(call));
}

fn take_calls() -> Vec<Call> {
    CALLS.with(|c| std::mem::take(&mut *c.borrow_mut()))
}

/// Moves pieces without checking any rule; promotions take the suffix letter.
struct Recorder {
    board: Placement,
}

impl RulesBoard for Recorder {
    fn from_board_fen(fen: &str) -> Result<Self, RulesError> {
        record(Call::Load(fen.to_string()));
        let board = fen.parse().map_err(RulesError::InvalidPosition)?;
        Ok(Recorder { board })
    }

    fn set_turn(&mut self, color: Color) {
        record(Call::Turn(color));
    }

    fn grant_castling(&mut self, flags: CastleBits) {
        record(Call::Castling(flags));
    }

    fn set_en_passant(&mut self, target: Square) {
        record(Call::EnPassant(target));
    }

    fn push_uci(&mut self, uci: &str) -> Result<(), RulesError> {
        record(Call::Push(uci.to_string()));
        let illegal = || RulesError::IllegalMove(uci.to_string());
        let from: Square = uci.get(0..2).ok_or_else(illegal)?.parse().map_err(|_| illegal())?;
        let to: Square = uci.get(2..4).ok_or_else(illegal)?.parse().map_err(|_| illegal())?;
        let mut moving = self.board.get(from);
        if let Some(letter) = uci.chars().nth(4) {
            let letter = match moving.color() {
                Some(Color::White) => letter.to_ascii_uppercase(),
                _ => letter,
            };
            moving = Class::from_char(letter).ok_or_else(illegal)?;
        }
        self.board.set(from, Class::Empty);
        self.board.set(to, moving);
        Ok(())
    }

    fn board_fen(&self) -> String {
        self.board.to_board_fen()
    }
}

/// Refuses every move.
struct Stubborn;

impl RulesBoard for Stubborn {
    fn from_board_fen(_: &str) -> Result<Self, RulesError> {
        Ok(Stubborn)
    }
    fn set_turn(&mut self, _: Color) {}
    fn grant_castling(&mut self, _: CastleBits) {}
    fn set_en_passant(&mut self, _: Square) {}
    fn push_uci(&mut self, uci: &str) -> Result<(), RulesError> {
        Err(RulesError::IllegalMove(uci.to_string()))
    }
    fn board_fen(&self) -> String {
        String::new()
    }
}

// ---- Small helpers ----

#[inline]
fn sq(name: &str) -> Square {
    name.parse().unwrap()
}

#[inline]
fn pos(fen: &str) -> Placement {
    fen.parse().unwrap()
}

fn mv(from: &str, to: &str, color: Color, action: MoveAction) -> DetectedMove {
    DetectedMove {
        from: sq(from),
        to: sq(to),
        color,
        action,
    }
}

fn reading_with(placement: &Placement, at: Square, pairs: &[(Class, f32)]) -> Reading {
    let mut squares = *Reading::one_hot(placement).squares();
    let probs = &mut squares[at.index() as usize];
    *probs = Default::default();
    for &(class, p) in pairs {
        probs.0[class.index()] = p;
    }
    Reading::new(squares)
}

#[test]
fn plain_move_loads_turns_and_pushes() {
    take_calls();
    let prev = Placement::start();
    let reading = Reading::one_hot(&prev);
    let out = finalize::<Recorder>(
        &mv("e2", "e4", Color::White, MoveAction::Moves),
        &prev,
        &reading,
        2,
    )
    .unwrap();
    assert_eq!(
        take_calls(),
        vec![
            Call::Load("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR".into()),
            Call::Turn(Color::White),
            Call::Push("e2e4".into()),
        ]
    );
    assert_eq!(out.to_board_fen(), "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR");
}

#[test]
fn promotion_appends_most_probable_letter() {
    take_calls();
    let prev = pos("4k3/P7/8/8/8/8/8/4K3");
    let reading = reading_with(
        &prev,
        Square::A8,
        &[(Class::WhiteKnight, 0.6), (Class::WhiteQueen, 0.4)],
    );
    let out = finalize::<Recorder>(
        &mv("a7", "a8", Color::White, MoveAction::Moves),
        &prev,
        &reading,
        2,
    )
    .unwrap();
    assert_eq!(take_calls().last(), Some(&Call::Push("a7a8n".into())));
    assert_eq!(out.get(Square::A8), Class::WhiteKnight);
}

#[test]
fn black_promotion_by_capture() {
    take_calls();
    let prev = pos("4k3/8/8/8/8/8/1p6/R3K3");
    let reading = reading_with(&prev, Square::A1, &[(Class::BlackQueen, 0.9)]);
    let out = finalize::<Recorder>(
        &mv("b2", "a1", Color::Black, MoveAction::Captures),
        &prev,
        &reading,
        2,
    )
    .unwrap();
    let calls = take_calls();
    assert!(calls.contains(&Call::Turn(Color::Black)));
    assert_eq!(calls.last(), Some(&Call::Push("b2a1q".into())));
    assert_eq!(out.get(Square::A1), Class::BlackQueen);
}

#[test]
fn en_passant_sets_target_square() {
    take_calls();
    let prev = pos("rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR");
    let reading = Reading::one_hot(&prev);
    finalize::<Recorder>(
        &mv("e5", "f6", Color::White, MoveAction::EnPassant),
        &prev,
        &reading,
        2,
    )
    .unwrap();
    let calls = take_calls();
    assert!(calls.contains(&Call::EnPassant(sq("f6"))));
    assert_eq!(calls.last(), Some(&Call::Push("e5f6".into())));
}

#[test]
fn castling_grants_the_matching_right() {
    let prev = pos("r3k2r/8/8/8/8/8/8/R3K2R");
    let reading = Reading::one_hot(&prev);

    take_calls();
    finalize::<Recorder>(
        &mv("e8", "g8", Color::Black, MoveAction::CastlesKingside),
        &prev,
        &reading,
        2,
    )
    .unwrap();
    assert!(take_calls().contains(&Call::Castling(CASTLE_BK)));

    finalize::<Recorder>(
        &mv("e1", "c1", Color::White, MoveAction::CastlesQueenside),
        &prev,
        &reading,
        2,
    )
    .unwrap();
    let calls = take_calls();
    assert!(calls.contains(&Call::Castling(CASTLE_WQ)));
    assert_eq!(calls.last(), Some(&Call::Push("e1c1".into())));
}

#[test]
fn undeterminable_promotion_never_reaches_the_engine() {
    take_calls();
    let prev = pos("4k3/P6K/8/8/8/8/8/QQRRBBNN");
    let reading = Reading::one_hot(&prev);
    let err = finalize::<Recorder>(
        &mv("a7", "a8", Color::White, MoveAction::Moves),
        &prev,
        &reading,
        2,
    )
    .unwrap_err();
    assert_eq!(
        err,
        FinalizeError::Decode(DecodeError::PromotionUndeterminable {
            color: Color::White
        })
    );
    assert!(!take_calls().iter().any(|c| matches!(c, Call::Push(_))));
}

#[test]
fn engine_rejection_is_a_rules_error() {
    let prev = Placement::start();
    let err = finalize::<Stubborn>(
        &mv("e2", "e4", Color::White, MoveAction::Moves),
        &prev,
        &Reading::one_hot(&prev),
        2,
    )
    .unwrap_err();
    assert!(matches!(err, FinalizeError::Rules(RulesError::IllegalMove(_))));
}

#[test]
fn decoder_uses_injected_engine() {
    take_calls();
    let after = pos("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR");
    let raw = *Reading::one_hot(&after).squares();
    let decoded = Decoder::default()
        .decode_with::<Recorder>(&raw, Corner::BL, Some("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"))
        .unwrap();
    assert_eq!(decoded.placement, after);
    assert!(matches!(
        decoded.resolution,
        Resolution::MoveDetected { pass: Pass::Reading, .. }
    ));
    assert!(take_calls().contains(&Call::Push("e2e4".into())));
}

#[test]
fn rejected_moves_fall_back_to_static_board() {
    let after = pos("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR");
    let raw = *Reading::one_hot(&after).squares();
    let decoded = Decoder::default()
        .decode_with::<Stubborn>(&raw, Corner::BL, Some("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"))
        .unwrap();
    assert_eq!(decoded.resolution, Resolution::Static);
    assert_eq!(decoded.placement, after);
    assert!(decoded.candidates.is_empty());
}
