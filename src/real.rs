//! Forward real-input transform built on a half-size complex transform.
//!
//! An even-length real signal is packed two samples per complex value (even
//! indices in `re`, odd in `im`) and run through a complex transform of half
//! the length. A split pass then untangles the packed spectrum into the
//! `len/2 + 1` non-redundant bins of the real signal's spectrum. The split
//! halves every bin once more to stay in range, so the reported shift is the
//! inner transform's shift plus one.

use num_complex::Complex;
use num_traits::Zero;

use crate::common::FftBuildError;
use crate::descriptor::FftDescriptor;
use crate::lane::FixedLane;
use crate::scaling::ScalingPolicy;
use crate::twiddles;
use crate::{Direction, FftDirection, Length, ResultBuffer};

/// Precomputed state for forward transforms of even-length real signals.
///
/// Only the forward direction is provided; the packed-spectrum trick has no
/// matching gain for inverse transforms, which callers run through a full
/// complex [`FftDescriptor`] instead.
pub struct RealFftDescriptor<L: FixedLane> {
    inner: FftDescriptor<L>,
    /// `W_len^k` for `k` in `1..len/2`, used by the split pass.
    split_twiddles: Box<[Complex<L::Twiddle>]>,
    len: usize,
}

impl<L: FixedLane> RealFftDescriptor<L> {
    /// Plans a real transform of size `len`. `len` must be even, nonzero,
    /// and `len / 2` must factor into the supported radices.
    pub fn new(len: usize, scaling_policy: ScalingPolicy) -> Result<Self, FftBuildError> {
        if len == 0 || len % 2 != 0 {
            return Err(FftBuildError::UnsupportedSize(len));
        }
        let inner = FftDescriptor::new(len / 2, FftDirection::Forward, scaling_policy)
            .map_err(|_| FftBuildError::UnsupportedSize(len))?;

        let split_twiddles = (1..len / 2)
            .map(|k| twiddles::compute_twiddle::<L>(k, len, FftDirection::Forward))
            .collect();

        Ok(Self {
            inner,
            split_twiddles,
            len,
        })
    }

    /// Runs the forward transform and returns the total shift applied.
    ///
    /// `input` holds `len` real samples and is read only. `work_a` and
    /// `work_b` are `len / 2` long and are clobbered. `output` receives the
    /// `len / 2 + 1` non-redundant spectrum bins; the remaining bins of the
    /// full spectrum are their conjugate mirror. The true spectrum is
    /// `output` times `2^shift`.
    pub fn process(
        &self,
        input: &[L::Sample],
        work_a: &mut [Complex<L::Sample>],
        work_b: &mut [Complex<L::Sample>],
        output: &mut [Complex<L::Sample>],
    ) -> u32 {
        let half = self.len / 2;
        debug_assert_eq!(input.len(), self.len);
        debug_assert_eq!(work_a.len(), half);
        debug_assert_eq!(work_b.len(), half);
        debug_assert_eq!(output.len(), half + 1);

        for (packed, pair) in work_a.iter_mut().zip(input.chunks_exact(2)) {
            *packed = Complex::new(pair[0], pair[1]);
        }
        let result = self.inner.process(work_a, work_b);
        let spectrum: &[Complex<L::Sample>] = match result.buffer {
            ResultBuffer::Input => work_a,
            ResultBuffer::Scratch => work_b,
        };

        // Bins 0 and len/2 are real: the packed spectrum's DC entry carries
        // both, as the sum and difference of its components.
        let packed_dc = L::widen(spectrum[0]);
        output[0] = L::narrow_saturating(Complex::new(
            (packed_dc.re + packed_dc.im) >> 1u32,
            L::Acc::zero(),
        ));
        output[half] = L::narrow_saturating(Complex::new(
            (packed_dc.re - packed_dc.im) >> 1u32,
            L::Acc::zero(),
        ));

        for k in 1..half {
            let z = L::widen(spectrum[k]);
            let z_mirror = L::widen(spectrum[half - k]);

            // even and odd halves of the original signal, recovered from the
            // packed spectrum's conjugate symmetry, each halved
            let even_part = Complex::new((z.re + z_mirror.re) >> 1u32, (z.im - z_mirror.im) >> 1u32);
            let odd_part = L::narrow_saturating(Complex::new(
                (z.im + z_mirror.im) >> 1u32,
                (z_mirror.re - z.re) >> 1u32,
            ));

            let rotated = L::widen(L::mul_twiddle(odd_part, self.split_twiddles[k - 1]));
            output[k] = L::narrow_saturating(even_part + rotated);
        }

        result.total_shift + 1
    }

    pub fn scaling_policy(&self) -> ScalingPolicy {
        self.inner.scaling_policy()
    }
}

impl<L: FixedLane> Length for RealFftDescriptor<L> {
    fn len(&self) -> usize {
        self.len
    }
}
impl<L: FixedLane> Direction for RealFftDescriptor<L> {
    fn fft_direction(&self) -> FftDirection {
        FftDirection::Forward
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use crate::lane::Q15;

    #[test]
    fn test_rejects_odd_and_unsupported_lengths() {
        assert!(RealFftDescriptor::<Q15>::new(0, ScalingPolicy::Static).is_err());
        assert!(RealFftDescriptor::<Q15>::new(9, ScalingPolicy::Static).is_err());
        assert!(RealFftDescriptor::<Q15>::new(14, ScalingPolicy::Static).is_err());
        assert!(RealFftDescriptor::<Q15>::new(16, ScalingPolicy::Static).is_ok());
    }

    #[test]
    fn test_dc_signal() {
        let fft = RealFftDescriptor::<Q15>::new(8, ScalingPolicy::Static).unwrap();
        let input = [4096i16; 8];
        let mut work_a = [Complex::new(0i16, 0); 4];
        let mut work_b = [Complex::new(0i16, 0); 4];
        let mut output = [Complex::new(0i16, 0); 5];

        let shift = fft.process(&input, &mut work_a, &mut work_b, &mut output);
        // one radix-4 stage inside, plus the split's own halving
        assert_eq!(shift, 3);
        assert_eq!(output[0], Complex::new(4096, 0));
        for bin in &output[1..] {
            assert_eq!(*bin, Complex::new(0, 0));
        }
    }

    #[test]
    fn test_nyquist_signal() {
        let fft = RealFftDescriptor::<Q15>::new(8, ScalingPolicy::Static).unwrap();
        let mut input = [8192i16; 8];
        for sample in input.iter_mut().skip(1).step_by(2) {
            *sample = -8192;
        }
        let mut work_a = [Complex::new(0i16, 0); 4];
        let mut work_b = [Complex::new(0i16, 0); 4];
        let mut output = [Complex::new(0i16, 0); 5];

        let shift = fft.process(&input, &mut work_a, &mut work_b, &mut output);
        assert_eq!(shift, 3);
        // all energy in the Nyquist bin: 8 * 8192 = 8192 << 3
        assert_eq!(output[4], Complex::new(8192, 0));
        assert_eq!(output[0], Complex::new(0, 0));
        for bin in &output[1..4] {
            assert_eq!(*bin, Complex::new(0, 0));
        }
    }

    #[test]
    fn test_two_point_transform() {
        let fft = RealFftDescriptor::<Q15>::new(2, ScalingPolicy::Static).unwrap();
        let input = [10000i16, 2000];
        let mut work_a = [Complex::new(0i16, 0); 1];
        let mut work_b = [Complex::new(0i16, 0); 1];
        let mut output = [Complex::new(0i16, 0); 2];

        let shift = fft.process(&input, &mut work_a, &mut work_b, &mut output);
        assert_eq!(shift, 1);
        assert_eq!(output[0], Complex::new(6000, 0));
        assert_eq!(output[1], Complex::new(4000, 0));
    }
}
