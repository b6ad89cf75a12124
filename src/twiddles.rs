use num_complex::Complex;

use crate::lane::FixedLane;
use crate::FftDirection;

/// Computes `e^(-i * 2pi * index / fft_len)` (forward) or its conjugate
/// (inverse), quantized to the lane's twiddle format.
///
/// Deterministic and pure: two calls with identical arguments produce
/// bit-identical coefficients, so rebuilt descriptors always match.
pub(crate) fn compute_twiddle<L: FixedLane>(
    index: usize,
    fft_len: usize,
    direction: FftDirection,
) -> Complex<L::Twiddle> {
    let constant = -2f64 * std::f64::consts::PI / fft_len as f64;
    let angle = constant * index as f64;

    let result = Complex::new(angle.cos(), angle.sin());

    let result = match direction {
        FftDirection::Forward => result,
        FftDirection::Inverse => result.conj(),
    };
    L::quantize_twiddle(result)
}
