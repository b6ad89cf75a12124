use num_complex::Complex;

use crate::lane::FixedLane;

/// Overflow-avoidance discipline applied between butterfly stages.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ScalingPolicy {
    /// Shift by each stage's worst-case growth bound. Data-independent: the
    /// total shift for a given length is the same for every input and is
    /// known before the transform runs.
    Static,
    /// Measure the buffer's actual headroom before each stage and shift only
    /// as much as that stage can consume. Quiet signals keep more precision;
    /// the total shift is only known once the transform completes.
    Dynamic,
}

/// Number of unused high-order bits shared by every sample in the buffer:
/// the block exponent of the current stage's data.
///
/// Computed fresh from the buffer contents each time, one pass, no state.
pub fn estimate_headroom<L: FixedLane>(buffer: &[Complex<L::Sample>]) -> u32 {
    let mut headroom = L::SAMPLE_BITS - 1;
    for &value in buffer {
        let sample_headroom = L::headroom(value);
        if sample_headroom < headroom {
            headroom = sample_headroom;
            if headroom == 0 {
                break;
            }
        }
    }
    headroom
}

/// Decides the per-stage right shift for one transform call.
#[derive(Copy, Clone, Debug)]
pub(crate) struct ScalingController {
    policy: ScalingPolicy,
}

impl ScalingController {
    pub fn new(policy: ScalingPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> ScalingPolicy {
        self.policy
    }

    /// The shift to apply before a stage whose butterfly can grow magnitudes
    /// by `growth_bits` bits. Clamped to the lane width; a clamped shift can
    /// no longer rule out saturation, which the stage's saturating narrowing
    /// then absorbs silently.
    pub fn stage_shift<L: FixedLane>(
        &self,
        growth_bits: u32,
        buffer: &[Complex<L::Sample>],
    ) -> u32 {
        let shift = match self.policy {
            ScalingPolicy::Static => growth_bits,
            ScalingPolicy::Dynamic => {
                growth_bits.saturating_sub(estimate_headroom::<L>(buffer))
            }
        };
        shift.min(L::SAMPLE_BITS - 1)
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use crate::lane::Q15;

    #[test]
    fn test_headroom_of_silence_is_full() {
        let buffer = vec![Complex::new(0i16, 0i16); 64];
        assert_eq!(estimate_headroom::<Q15>(&buffer), 15);
    }

    #[test]
    fn test_headroom_tracks_loudest_sample() {
        let mut buffer = vec![Complex::new(3i16, 0i16); 16];
        assert_eq!(estimate_headroom::<Q15>(&buffer), 13);
        buffer[9] = Complex::new(0, -0x2001);
        assert_eq!(estimate_headroom::<Q15>(&buffer), 1);
        buffer[3] = Complex::new(i16::MIN, 0);
        assert_eq!(estimate_headroom::<Q15>(&buffer), 0);
    }

    #[test]
    fn test_static_shift_ignores_data() {
        let controller = ScalingController::new(ScalingPolicy::Static);
        let quiet = vec![Complex::new(1i16, 0i16); 8];
        let loud = vec![Complex::new(i16::MAX, 0i16); 8];
        assert_eq!(controller.stage_shift::<Q15>(2, &quiet), 2);
        assert_eq!(controller.stage_shift::<Q15>(2, &loud), 2);
    }

    #[test]
    fn test_dynamic_shift_spends_headroom_first() {
        let controller = ScalingController::new(ScalingPolicy::Dynamic);
        let quiet = vec![Complex::new(64i16, -64i16); 8];
        assert_eq!(controller.stage_shift::<Q15>(3, &quiet), 0);

        let loud = vec![Complex::new(0x3000i16, 0i16); 8];
        assert_eq!(controller.stage_shift::<Q15>(3, &loud), 2);

        let full_scale = vec![Complex::new(i16::MIN, 0i16); 8];
        assert_eq!(controller.stage_shift::<Q15>(3, &full_scale), 3);
    }

    #[test]
    fn test_dynamic_never_exceeds_static() {
        let dynamic = ScalingController::new(ScalingPolicy::Dynamic);
        let fixed = ScalingController::new(ScalingPolicy::Static);
        for magnitude in [0i16, 1, 100, 0x1000, 0x4000, i16::MAX] {
            let buffer = vec![Complex::new(magnitude, -magnitude); 4];
            for growth_bits in 1..=3 {
                assert!(
                    dynamic.stage_shift::<Q15>(growth_bits, &buffer)
                        <= fixed.stage_shift::<Q15>(growth_bits, &buffer)
                );
            }
        }
    }
}
