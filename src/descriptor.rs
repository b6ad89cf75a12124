//! Precomputed transform descriptor and the ping-pong execution loop.

use std::mem;

use num_complex::Complex;

use crate::butterflies::StageButterfly;
use crate::common::FftBuildError;
use crate::factorization::FactorizationPlan;
use crate::lane::FixedLane;
use crate::permutation::Permutation;
use crate::scaling::{ScalingController, ScalingPolicy};
use crate::stages::Stage;
use crate::twiddles;
use crate::{Direction, FftDirection, Length, ResultBuffer, TransformResult};

/// Precomputed state for transforms of one length, direction, and scaling
/// policy: the factorization, the input reorder table, all stage twiddles,
/// and one butterfly per stage.
///
/// Building a descriptor allocates; [`process`](FftDescriptor::process) does
/// not. The caller owns both working buffers, so one descriptor can serve any
/// number of transforms, including concurrently (`process` takes `&self`).
///
/// The output value convention: for a forward transform the buffer named by
/// the returned [`ResultBuffer`] holds `DFT(input) / 2^total_shift`, and for
/// an inverse transform the unnormalized inverse DFT scaled the same way.
/// Callers recovering time-domain data after a roundtrip divide by the length
/// and multiply by `2^(shift_forward + shift_inverse)`.
pub struct FftDescriptor<L: FixedLane> {
    plan: FactorizationPlan,
    direction: FftDirection,
    scaling: ScalingController,
    permutation: Permutation,
    twiddles: Box<[Complex<L::Twiddle>]>,
    stages: Box<[Stage<L>]>,
}

impl<L: FixedLane> FftDescriptor<L> {
    /// Plans a transform of size `len`. Fails if `len` has a prime factor
    /// other than 2, 3, or 5.
    pub fn new(
        len: usize,
        direction: FftDirection,
        scaling_policy: ScalingPolicy,
    ) -> Result<Self, FftBuildError> {
        let plan = FactorizationPlan::new(len)?;
        let permutation = Permutation::new(&plan);

        let mut twiddle_table = Vec::new();
        let mut stages = Vec::with_capacity(plan.num_stages());
        let mut span = 1;
        for &factor in plan.radices() {
            let radix = factor.radix();
            let cross_len = span * radix;
            let twiddle_offset = twiddle_table.len();
            for j in 0..span {
                for t in 1..radix {
                    twiddle_table.push(twiddles::compute_twiddle::<L>(j * t, cross_len, direction));
                }
            }
            stages.push(Stage {
                butterfly: StageButterfly::new(factor, direction),
                span,
                twiddle_offset,
                growth_bits: factor.growth_bits(),
            });
            span = cross_len;
        }

        Ok(Self {
            plan,
            direction,
            scaling: ScalingController::new(scaling_policy),
            permutation,
            twiddles: twiddle_table.into_boxed_slice(),
            stages: stages.into_boxed_slice(),
        })
    }

    /// Runs the transform in place over the two caller-owned buffers.
    ///
    /// Both buffers must be exactly `self.len()` long. On return, the buffer
    /// named by the result's `buffer` field holds the spectrum and the other
    /// buffer holds intermediate stage data with no defined meaning.
    pub fn process(
        &self,
        input: &mut [Complex<L::Sample>],
        scratch: &mut [Complex<L::Sample>],
    ) -> TransformResult {
        debug_assert_eq!(input.len(), self.plan.len());
        debug_assert_eq!(scratch.len(), self.plan.len());

        self.permutation.apply(input, scratch);

        let mut total_shift = 0u32;
        let (mut src, mut dst) = (scratch, input);
        for stage in self.stages.iter() {
            let shift = self.scaling.stage_shift::<L>(stage.growth_bits, src);
            stage.run(&self.twiddles, src, dst, shift);
            total_shift += shift;
            mem::swap(&mut src, &mut dst);
        }

        TransformResult {
            buffer: self.result_buffer(),
            total_shift,
        }
    }

    /// Which buffer the spectrum lands in. Depends only on the stage count,
    /// so it is known without running the transform.
    pub fn result_buffer(&self) -> ResultBuffer {
        if self.plan.num_stages() % 2 == 1 {
            ResultBuffer::Input
        } else {
            ResultBuffer::Scratch
        }
    }

    /// The exact total shift every `process` call will report under
    /// [`ScalingPolicy::Static`]. Under dynamic scaling this is an upper
    /// bound instead.
    pub fn static_total_shift(&self) -> u32 {
        self.plan.static_total_shift()
    }

    pub fn plan(&self) -> &FactorizationPlan {
        &self.plan
    }

    pub fn scaling_policy(&self) -> ScalingPolicy {
        self.scaling.policy()
    }
}

impl<L: FixedLane> Length for FftDescriptor<L> {
    fn len(&self) -> usize {
        self.plan.len()
    }
}
impl<L: FixedLane> Direction for FftDescriptor<L> {
    fn fft_direction(&self) -> FftDirection {
        self.direction
    }
}
