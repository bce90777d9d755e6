pub mod assign;
pub mod board;
pub mod config;
pub mod decode;
pub mod detect;
pub mod error;
pub mod finalize;
#[cfg(feature = "cli")]
pub mod logger;
pub mod orient;
pub mod probs;
pub mod promotion;
pub mod rules;
pub mod shape;
pub mod square;
pub mod synth;

pub use board::{Class, Color, Piece, Placement};
pub use config::DecoderConfig;
pub use decode::{DecodeStatus, Decoded, Decoder, Resolution, decode};
pub use error::DecodeError;
pub use orient::Corner;
pub use probs::{ClassProbs, Reading};
