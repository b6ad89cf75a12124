//! Shared helpers for the unit tests: seeded signal generation and a direct
//! O(n^2) reference DFT to compare transform output against.

use num_complex::Complex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::lane::FixedLane;
use crate::FftDirection;

/// A reproducible random signal, quantized to the lane's sample format.
/// `amplitude` bounds both components, in unit-range terms.
pub fn random_signal<L: FixedLane>(
    length: usize,
    amplitude: f64,
    seed: u64,
) -> Vec<Complex<L::Sample>> {
    assert!(amplitude > 0.0 && amplitude < 1.0);
    let mut rng = StdRng::seed_from_u64(seed);
    (0..length)
        .map(|_| {
            L::quantize_sample(Complex::new(
                rng.gen_range(-amplitude..amplitude),
                rng.gen_range(-amplitude..amplitude),
            ))
        })
        .collect()
}

pub fn dequantize<L: FixedLane>(buffer: &[Complex<L::Sample>]) -> Vec<Complex<f64>> {
    buffer.iter().map(|&value| L::dequantize_sample(value)).collect()
}

/// Direct evaluation of the (unnormalized) DFT sum.
pub fn reference_dft(input: &[Complex<f64>], direction: FftDirection) -> Vec<Complex<f64>> {
    let len = input.len();
    let sign = match direction {
        FftDirection::Forward => -1.0,
        FftDirection::Inverse => 1.0,
    };
    (0..len)
        .map(|bin| {
            input
                .iter()
                .enumerate()
                .map(|(index, value)| {
                    let angle =
                        sign * 2.0 * std::f64::consts::PI * (bin * index % len) as f64 / len as f64;
                    value * Complex::new(angle.cos(), angle.sin())
                })
                .sum()
        })
        .collect()
}
