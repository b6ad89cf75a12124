//! QFFT is a fixed-point FFT library for embedded-style DSP workloads. It
//! computes forward and inverse transforms over integer sample buffers while
//! guaranteeing that no intermediate value overflows the sample word width.
//!
//! Instead of normalizing with floating-point math, the engine keeps results
//! in block floating-point form: every transform returns the total number of
//! right shifts it applied, and the caller folds that shared exponent back in
//! whenever true magnitudes are needed.
//!
//! ## Usage
//!
//! Build an [`FftDescriptor`] once per (length, direction, precision) tuple,
//! then reuse it for every transform of that shape. The transform call itself
//! never allocates: the caller supplies the input buffer and an equally-sized
//! scratch buffer, and the returned [`TransformResult`] reports which of the
//! two holds the spectrum.
//!
//! ```
//! use qfft::{FftDescriptor, FftDirection, Q15, ResultBuffer, ScalingPolicy};
//! use qfft::num_complex::Complex;
//!
//! let fft = FftDescriptor::<Q15>::new(16, FftDirection::Forward, ScalingPolicy::Static).unwrap();
//!
//! let mut input = [Complex::new(0i16, 0i16); 16];
//! input[0] = Complex::new(16_384, 0); // 0.5 in Q1.15
//! let mut scratch = [Complex::new(0i16, 0i16); 16];
//!
//! let result = fft.process(&mut input, &mut scratch);
//! let spectrum = match result.buffer {
//!     ResultBuffer::Input => &input,
//!     ResultBuffer::Scratch => &scratch,
//! };
//!
//! // An impulse spreads evenly: every bin holds the input scaled by the shift.
//! assert_eq!(result.total_shift, 4);
//! assert!(spectrum.iter().all(|bin| bin.re == 1_024 && bin.im == 0));
//! ```
//!
//! ## Precision lanes
//!
//! The numeric policy is a type parameter implementing [`FixedLane`]:
//! [`Q15`] (16-bit samples and twiddles), [`Q31X15`] (32-bit samples, 16-bit
//! twiddles) and [`Q31`] (32-bit samples and twiddles). All lane arithmetic
//! rounds to nearest with ties away from zero and saturates at the
//! representable extremes.
//!
//! ## Scaling policies
//!
//! [`ScalingPolicy::Static`] shifts by each stage's worst-case growth bound,
//! so the total shift is data-independent and known before the call.
//! [`ScalingPolicy::Dynamic`] measures the buffer's headroom before each
//! stage and shifts only as much as that stage actually needs, preserving
//! more precision for quiet signals at the cost of a data-dependent total.

pub use num_complex;
pub use num_traits;

mod butterflies;
mod common;
mod descriptor;
mod factorization;
mod lane;
mod permutation;
mod real;
mod scaling;
mod stages;
mod twiddles;

#[cfg(test)]
mod test_utils;

pub use crate::common::FftBuildError;
pub use crate::descriptor::FftDescriptor;
pub use crate::factorization::{FactorizationPlan, PermutationClass, RadixFactor};
pub use crate::lane::{FixedLane, Q15, Q31, Q31X15};
pub use crate::permutation::Permutation;
pub use crate::real::RealFftDescriptor;
pub use crate::scaling::{estimate_headroom, ScalingPolicy};

/// Represents a FFT direction, IE a forward FFT or an inverse FFT
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum FftDirection {
    Forward,
    Inverse,
}
impl FftDirection {
    /// Returns the opposite direction of `self`.
    ///
    ///  - If `self` is `FftDirection::Forward`, returns `FftDirection::Inverse`
    ///  - If `self` is `FftDirection::Inverse`, returns `FftDirection::Forward`
    #[inline]
    pub fn opposite_direction(&self) -> FftDirection {
        match self {
            Self::Forward => Self::Inverse,
            Self::Inverse => Self::Forward,
        }
    }
}
impl std::fmt::Display for FftDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        match self {
            Self::Forward => f.write_str("FFT Direction: Forward"),
            Self::Inverse => f.write_str("FFT Direction: Inverse"),
        }
    }
}

/// Identifies which of the two caller-owned buffers holds the transform
/// result.
///
/// The engine ping-pongs between the input and scratch buffers, one hop per
/// stage, so the final location depends only on the stage count of the
/// length's factorization. It is reported explicitly rather than left for the
/// caller to infer.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ResultBuffer {
    /// The result is in the buffer passed as `input`.
    Input,
    /// The result is in the buffer passed as `scratch`.
    Scratch,
}

/// The outcome of one transform call.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct TransformResult {
    /// Which caller-owned buffer holds the spectrum.
    pub buffer: ResultBuffer,
    /// Total number of right shifts applied across all stages. The true
    /// spectrum is the output multiplied by `2^total_shift`.
    pub total_shift: u32,
}

/// A trait that allows FFT algorithms to report their expected input/output size
pub trait Length {
    /// The FFT size that this algorithm can process
    fn len(&self) -> usize;
}

/// A trait that allows FFT algorithms to report whether they compute forward FFTs or inverse FFTs
pub trait Direction {
    /// Returns FftDirection::Forward if this instance computes forward FFTs, and FftDirection::Inverse for inverse FFTs
    fn fft_direction(&self) -> FftDirection;
}
