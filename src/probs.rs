//! Class-probability readings produced by the square classifier.

use crate::board::{Class, Color};
use crate::error::DecodeError;
use crate::square::Square;
use serde::{Deserialize, Serialize};
use std::ops::Index;

/// Probabilities for one square, indexed by [`Class`] ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassProbs(pub [f32; Class::COUNT]);

impl ClassProbs {
    /// Probability 1 on `class`, 0 elsewhere.
    pub fn one_hot(class: Class) -> Self {
        let mut p = [0.0; Class::COUNT];
        p[class.index()] = 1.0;
        ClassProbs(p)
    }

    #[inline(always)]
    pub fn get(&self, class: Class) -> f32 {
        self.0[class.index()]
    }

    /// Most probable class. Ties go to the lowest ordinal.
    pub fn argmax(&self) -> Class {
        let mut best = 0;
        for i in 1..Class::COUNT {
            if self.0[i] > self.0[best] {
                best = i;
            }
        }
        Class::ALL[best]
    }

    /// The classifier is trusted for emptiness: empty iff `Empty` is the argmax.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.argmax() == Class::Empty
    }

    /// Total probability mass of one side's six classes.
    pub fn side_mass(&self, color: Color) -> f32 {
        Class::side(color).iter().map(|&c| self.get(c)).sum()
    }

    /// Colour of the piece on a square assumed to be occupied.
    /// Ties count as white.
    #[inline]
    pub fn piece_color(&self) -> Color {
        if self.side_mass(Color::White) >= self.side_mass(Color::Black) {
            Color::White
        } else {
            Color::Black
        }
    }
}

impl Index<Class> for ClassProbs {
    type Output = f32;

    fn index(&self, class: Class) -> &f32 {
        &self.0[class.index()]
    }
}

impl From<[f32; Class::COUNT]> for ClassProbs {
    fn from(p: [f32; Class::COUNT]) -> Self {
        ClassProbs(p)
    }
}

/// One probability vector per square, in FEN order.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    squares: Box<[ClassProbs; 64]>,
}

impl Reading {
    pub fn new(squares: [ClassProbs; 64]) -> Self {
        Reading {
            squares: Box::new(squares),
        }
    }

    /// Copy 64 vectors out of a slice; any other length is rejected.
    pub fn from_slice(squares: &[ClassProbs]) -> Result<Self, DecodeError> {
        let arr: [ClassProbs; 64] = squares
            .try_into()
            .map_err(|_| DecodeError::WrongSquareCount(squares.len()))?;
        Ok(Reading::new(arr))
    }

    /// A reading that one-hot encodes every square of `placement`.
    pub fn one_hot(placement: &crate::board::Placement) -> Self {
        let mut squares = [ClassProbs::default(); 64];
        for sq in Square::all() {
            squares[sq.index() as usize] = ClassProbs::one_hot(placement.get(sq));
        }
        Reading::new(squares)
    }

    #[inline(always)]
    pub fn get(&self, sq: Square) -> &ClassProbs {
        &self.squares[sq.index() as usize]
    }

    #[inline(always)]
    pub fn prob(&self, sq: Square, class: Class) -> f32 {
        self.get(sq).get(class)
    }

    pub fn squares(&self) -> &[ClassProbs; 64] {
        &self.squares
    }
}

impl Index<Square> for Reading {
    type Output = ClassProbs;

    fn index(&self, sq: Square) -> &ClassProbs {
        self.get(sq)
    }
}
