//! A single decimation-in-time pass over the ping-pong buffers.
//!
//! The transform runs one `Stage` per radix factor. A stage with `span`
//! sub-transforms of cross length `span * radix` reads groups of
//! `span * radix` samples from the source buffer and writes the combined
//! results to the same positions of the destination buffer. Within a group,
//! element `t * span + j` of sub-transform `j` is pre-shifted by the scale
//! schedule, rotated by the stage twiddle for `(j, t)`, widened, run through
//! the radix butterfly, and narrowed back with saturation.

use num_complex::Complex;
use num_traits::Zero;

use crate::butterflies::StageButterfly;
use crate::lane::FixedLane;

pub(crate) struct Stage<L: FixedLane> {
    pub butterfly: StageButterfly<L>,
    /// Number of interleaved sub-transforms, equal to the product of all
    /// earlier radices.
    pub span: usize,
    /// Start of this stage's twiddle block in the descriptor's twiddle table.
    pub twiddle_offset: usize,
    /// Worst-case magnitude growth of this radix, in bits.
    pub growth_bits: u32,
}

macro_rules! run_radix {
    ($self:ident, $butterfly:ident, $radix:literal, $twiddles:ident, $src:ident, $dst:ident, $shift:ident) => {{
        let span = $self.span;
        let stage_twiddles =
            &$twiddles[$self.twiddle_offset..$self.twiddle_offset + span * ($radix - 1)];
        for (src_group, dst_group) in $src
            .chunks_exact(span * $radix)
            .zip($dst.chunks_exact_mut(span * $radix))
        {
            for j in 0..span {
                let mut scratch = [Complex::new(L::Acc::zero(), L::Acc::zero()); $radix];
                scratch[0] = L::widen(L::shift_right(src_group[j], $shift));
                for t in 1..$radix {
                    let sample = L::shift_right(src_group[t * span + j], $shift);
                    let twiddle = stage_twiddles[j * ($radix - 1) + (t - 1)];
                    scratch[t] = L::widen(L::mul_twiddle(sample, twiddle));
                }
                let outputs = $butterfly.apply(scratch);
                for (q, output) in outputs.iter().enumerate() {
                    dst_group[q * span + j] = L::narrow_saturating(*output);
                }
            }
        }
    }};
}

impl<L: FixedLane> Stage<L> {
    /// Executes the stage, reading `src` and writing every element of `dst`.
    /// Both buffers must have the same length, a multiple of
    /// `span * radix`.
    pub fn run(
        &self,
        twiddles: &[Complex<L::Twiddle>],
        src: &[Complex<L::Sample>],
        dst: &mut [Complex<L::Sample>],
        shift: u32,
    ) {
        match &self.butterfly {
            StageButterfly::Factor2(butterfly) => {
                run_radix!(self, butterfly, 2, twiddles, src, dst, shift)
            }
            StageButterfly::Factor3(butterfly) => {
                run_radix!(self, butterfly, 3, twiddles, src, dst, shift)
            }
            StageButterfly::Factor4(butterfly) => {
                run_radix!(self, butterfly, 4, twiddles, src, dst, shift)
            }
            StageButterfly::Factor5(butterfly) => {
                run_radix!(self, butterfly, 5, twiddles, src, dst, shift)
            }
            StageButterfly::Factor8(butterfly) => {
                run_radix!(self, butterfly, 8, twiddles, src, dst, shift)
            }
        }
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use crate::factorization::RadixFactor;
    use crate::lane::Q15;
    use crate::twiddles::compute_twiddle;
    use crate::FftDirection;

    #[test]
    fn test_stage_applies_shift_before_combining() {
        let stage = Stage::<Q15> {
            butterfly: StageButterfly::new(RadixFactor::Factor2, FftDirection::Forward),
            span: 1,
            twiddle_offset: 0,
            growth_bits: 1,
        };
        let twiddles = vec![compute_twiddle::<Q15>(0, 2, FftDirection::Forward)];

        let src = [Complex::new(16000i16, 0), Complex::new(-8000, 4000)];
        let mut dst = [Complex::new(0i16, 0); 2];
        stage.run(&twiddles, &src, &mut dst, 1);

        assert_eq!(dst[0], Complex::new(4000, 2000));
        assert_eq!(dst[1], Complex::new(12000, -2000));
    }

    #[test]
    fn test_stage_twiddle_layout() {
        // radix 2 with span 2 is the second half of a 4 point transform:
        // sub-transform j combines entries j and j+2 with twiddle W_4^j
        let stage = Stage::<Q15> {
            butterfly: StageButterfly::new(RadixFactor::Factor2, FftDirection::Forward),
            span: 2,
            twiddle_offset: 0,
            growth_bits: 1,
        };
        let twiddles = vec![
            compute_twiddle::<Q15>(0, 4, FftDirection::Forward),
            compute_twiddle::<Q15>(1, 4, FftDirection::Forward),
        ];

        let src = [
            Complex::new(1000i16, 0),
            Complex::new(0, 0),
            Complex::new(0, 0),
            Complex::new(2000, 0),
        ];
        let mut dst = [Complex::new(0i16, 0); 4];
        stage.run(&twiddles, &src, &mut dst, 0);

        // entry 3 is rotated by W_4^1 = -j before the combine
        assert_eq!(dst[0], Complex::new(1000, 0));
        assert_eq!(dst[1], Complex::new(0, -2000));
        assert_eq!(dst[2], Complex::new(1000, 0));
        assert_eq!(dst[3], Complex::new(0, 2000));
    }
}
