// src/synth.rs
// Synthetic classifier output for a known position.

use crate::board::{Class, Placement};
use crate::orient::{Corner, to_capture_order};
use crate::probs::{ClassProbs, Reading};
use crate::square::Square;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A reading of `placement` with every class given up to `noise` of spurious mass.
///
/// The true class starts at 1.0 and every other class at a uniform draw from
/// `[0, noise)`, then the vector is normalised. For `noise < 1` the true class
/// therefore stays the unique argmax on every square.
pub fn noisy_reading<R: Rng>(placement: &Placement, noise: f32, rng: &mut R) -> Reading {
    let noise = noise.clamp(0.0, 1.0);
    let mut squares = [ClassProbs::default(); 64];
    for sq in Square::all() {
        squares[sq.index() as usize] = noisy_square(placement.get(sq), noise, rng);
    }
    Reading::new(squares)
}

/// [`noisy_reading`] with a fixed seed.
pub fn seeded_reading(placement: &Placement, noise: f32, seed: u64) -> Reading {
    let mut rng = StdRng::seed_from_u64(seed);
    noisy_reading(placement, noise, &mut rng)
}

/// Reorder a FEN-order reading the way a camera with a1 at `a1` would emit it.
pub fn capture_order(reading: &Reading, a1: Corner) -> [ClassProbs; 64] {
    to_capture_order(reading.squares(), a1)
}

fn noisy_square<R: Rng>(truth: Class, noise: f32, rng: &mut R) -> ClassProbs {
    let mut p = ClassProbs::default();
    for class in Class::ALL {
        p.0[class.index()] = if class == truth {
            1.0
        } else if noise > 0.0 {
            rng.random_range(0.0..noise)
        } else {
            0.0
        };
    }
    let total: f32 = p.0.iter().sum();
    for v in p.0.iter_mut() {
        *v /= total;
    }
    p
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truth_stays_on_top() {
        let start = Placement::start();
        let reading = seeded_reading(&start, 0.9, 7);
        for sq in Square::all() {
            assert_eq!(reading.get(sq).argmax(), start.get(sq));
            let sum: f32 = reading.get(sq).0.iter().sum();
            assert!((sum - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn zero_noise_is_one_hot() {
        let start = Placement::start();
        assert_eq!(seeded_reading(&start, 0.0, 1), Reading::one_hot(&start));
    }

    #[test]
    fn same_seed_same_reading() {
        let start = Placement::start();
        assert_eq!(seeded_reading(&start, 0.3, 42), seeded_reading(&start, 0.3, 42));
    }
}
