use num_complex::Complex;
use num_traits::{PrimInt, Signed};

/// Numeric policy for one fixed-point precision variant.
///
/// A lane fixes the sample word width, the twiddle word width and the
/// rounding/saturation rules, and every precision-sensitive operation of the
/// engine goes through it. The transform code itself is written once, generic
/// over the lane, instead of once per width.
///
/// Samples are interpreted as Q1.(B-1) fractions: one sign bit, B-1
/// fractional bits, representing values in [-1, 1). Twiddles use their own
/// fraction width, which may be narrower than the sample width.
///
/// The lane's methods are also the engine's instrumentable call sites: a
/// telemetry wrapper can implement `FixedLane` by delegating to an inner lane
/// and recording statistics, without the engine knowing about it.
pub trait FixedLane: Copy + Send + Sync + 'static {
    /// Sample storage type, a signed integer in Q1.(SAMPLE_BITS-1) format.
    type Sample: Copy + PartialEq + std::fmt::Debug + Send + Sync + 'static;
    /// Twiddle storage type, a signed integer in Q1.TWIDDLE_FRAC_BITS format.
    type Twiddle: Copy + PartialEq + std::fmt::Debug + Send + Sync + 'static;
    /// Wide accumulator type. Butterfly sums live here and are only narrowed
    /// back to `Sample` once per stage output.
    type Acc: Copy
        + std::fmt::Debug
        + num_traits::Num
        + std::ops::Neg<Output = Self::Acc>
        + std::ops::Shr<u32, Output = Self::Acc>;

    /// Total bit width of a sample component.
    const SAMPLE_BITS: u32;
    /// Fractional bits of a twiddle component.
    const TWIDDLE_FRAC_BITS: u32;

    fn zero_sample() -> Complex<Self::Sample>;

    /// Quantizes a unit-range value to the sample format, rounding to nearest
    /// with ties away from zero and saturating at the representable extremes.
    fn quantize_sample(value: Complex<f64>) -> Complex<Self::Sample>;

    /// The real value a sample represents.
    fn dequantize_sample(value: Complex<Self::Sample>) -> Complex<f64>;

    /// Quantizes a unit-magnitude coefficient to the twiddle format. +1.0
    /// saturates to the largest representable value; -1.0 is exact.
    fn quantize_twiddle(value: Complex<f64>) -> Complex<Self::Twiddle>;

    /// Arithmetic right shift of both components.
    fn shift_right(value: Complex<Self::Sample>, bits: u32) -> Complex<Self::Sample>;

    /// Complex multiply of a sample by a twiddle, rounded to nearest (ties
    /// away from zero) at the sample format, saturating.
    fn mul_twiddle(
        value: Complex<Self::Sample>,
        twiddle: Complex<Self::Twiddle>,
    ) -> Complex<Self::Sample>;

    fn widen(value: Complex<Self::Sample>) -> Complex<Self::Acc>;

    /// Narrows an accumulator value back to the sample format, saturating.
    fn narrow_saturating(value: Complex<Self::Acc>) -> Complex<Self::Sample>;

    /// Multiplies an accumulator component by a twiddle-format coefficient,
    /// rounding at the twiddle fraction width. Callers keep the operand
    /// within the sample range, so the product fits the accumulator.
    fn acc_mul_coeff(value: Self::Acc, coeff: Self::Twiddle) -> Self::Acc;

    /// Number of unused high-order bits shared by both components: how far
    /// the value can be left-shifted before overflowing.
    fn headroom(value: Complex<Self::Sample>) -> u32;
}

/// Right shift with round-to-nearest, ties away from zero.
#[inline(always)]
pub(crate) fn rounding_shift<T: PrimInt + Signed>(value: T, bits: u32) -> T {
    debug_assert!(bits > 0);
    let half = T::one() << (bits - 1) as usize;
    if value >= T::zero() {
        (value + half) >> bits as usize
    } else {
        (value + half - T::one()) >> bits as usize
    }
}

macro_rules! impl_fixed_lane {
    ($name:ident, $sample:ty, $twiddle:ty, $acc:ty, $sample_bits:expr, $twiddle_frac:expr, $doc:expr) => {
        #[doc = $doc]
        #[derive(Copy, Clone, Debug)]
        pub struct $name;

        impl FixedLane for $name {
            type Sample = $sample;
            type Twiddle = $twiddle;
            type Acc = $acc;

            const SAMPLE_BITS: u32 = $sample_bits;
            const TWIDDLE_FRAC_BITS: u32 = $twiddle_frac;

            #[inline(always)]
            fn zero_sample() -> Complex<$sample> {
                Complex::new(0, 0)
            }

            fn quantize_sample(value: Complex<f64>) -> Complex<$sample> {
                let scale = (1u64 << ($sample_bits - 1)) as f64;
                Complex::new(
                    (value.re * scale)
                        .round()
                        .max(<$sample>::MIN as f64)
                        .min(<$sample>::MAX as f64) as $sample,
                    (value.im * scale)
                        .round()
                        .max(<$sample>::MIN as f64)
                        .min(<$sample>::MAX as f64) as $sample,
                )
            }

            fn dequantize_sample(value: Complex<$sample>) -> Complex<f64> {
                let scale = (1u64 << ($sample_bits - 1)) as f64;
                Complex::new(value.re as f64 / scale, value.im as f64 / scale)
            }

            fn quantize_twiddle(value: Complex<f64>) -> Complex<$twiddle> {
                let scale = (1u64 << $twiddle_frac) as f64;
                Complex::new(
                    (value.re * scale)
                        .round()
                        .max(<$twiddle>::MIN as f64)
                        .min(<$twiddle>::MAX as f64) as $twiddle,
                    (value.im * scale)
                        .round()
                        .max(<$twiddle>::MIN as f64)
                        .min(<$twiddle>::MAX as f64) as $twiddle,
                )
            }

            #[inline(always)]
            fn shift_right(value: Complex<$sample>, bits: u32) -> Complex<$sample> {
                Complex::new(value.re >> bits, value.im >> bits)
            }

            #[inline(always)]
            fn mul_twiddle(
                value: Complex<$sample>,
                twiddle: Complex<$twiddle>,
            ) -> Complex<$sample> {
                let re = (value.re as $acc) * (twiddle.re as $acc)
                    - (value.im as $acc) * (twiddle.im as $acc);
                let im = (value.re as $acc) * (twiddle.im as $acc)
                    + (value.im as $acc) * (twiddle.re as $acc);
                Complex::new(
                    rounding_shift(re, $twiddle_frac)
                        .clamp(<$sample>::MIN as $acc, <$sample>::MAX as $acc)
                        as $sample,
                    rounding_shift(im, $twiddle_frac)
                        .clamp(<$sample>::MIN as $acc, <$sample>::MAX as $acc)
                        as $sample,
                )
            }

            #[inline(always)]
            fn widen(value: Complex<$sample>) -> Complex<$acc> {
                Complex::new(value.re as $acc, value.im as $acc)
            }

            #[inline(always)]
            fn narrow_saturating(value: Complex<$acc>) -> Complex<$sample> {
                Complex::new(
                    value.re.clamp(<$sample>::MIN as $acc, <$sample>::MAX as $acc) as $sample,
                    value.im.clamp(<$sample>::MIN as $acc, <$sample>::MAX as $acc) as $sample,
                )
            }

            #[inline(always)]
            fn acc_mul_coeff(value: $acc, coeff: $twiddle) -> $acc {
                rounding_shift(value * (coeff as $acc), $twiddle_frac)
            }

            #[inline(always)]
            fn headroom(value: Complex<$sample>) -> u32 {
                let re = if value.re < 0 { !value.re } else { value.re };
                let im = if value.im < 0 { !value.im } else { value.im };
                (re | im).leading_zeros() - 1
            }
        }
    };
}

impl_fixed_lane!(
    Q15,
    i16,
    i16,
    i32,
    16,
    15,
    "16-bit samples with 16-bit twiddles (Q1.15 throughout)."
);
impl_fixed_lane!(
    Q31X15,
    i32,
    i16,
    i64,
    32,
    15,
    "32-bit samples with 16-bit twiddles: full sample precision, compact tables."
);
impl_fixed_lane!(
    Q31,
    i32,
    i32,
    i64,
    32,
    31,
    "32-bit samples with 32-bit twiddles (Q1.31 throughout)."
);
