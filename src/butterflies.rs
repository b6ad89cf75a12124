//! Radix butterflies in the lane's accumulator domain.
//!
//! Inputs arrive already pre-shifted, twiddled, and widened into the
//! accumulator, and stay there until the stage narrows the outputs back to
//! samples. The internal rotation constants (the fixed roots of unity baked
//! into each radix) are quantized to the lane's twiddle format at
//! construction, so each butterfly performs a known, bounded number of
//! rounding events.

use std::marker::PhantomData;

use num_complex::Complex;

use crate::factorization::RadixFactor;
use crate::lane::FixedLane;
use crate::twiddles;
use crate::FftDirection;

/// Rotation by -j (forward) or +j (inverse): multiplication by `W_4^1`,
/// which is exact in fixed point.
#[inline(always)]
fn rotate_90<L: FixedLane>(value: Complex<L::Acc>, direction: FftDirection) -> Complex<L::Acc> {
    match direction {
        FftDirection::Forward => Complex::new(value.im, -value.re),
        FftDirection::Inverse => Complex::new(-value.im, value.re),
    }
}

pub(crate) struct Butterfly2<L: FixedLane> {
    _phantom: PhantomData<L>,
}
impl<L: FixedLane> Butterfly2<L> {
    #[inline(always)]
    pub fn new(_direction: FftDirection) -> Self {
        Self {
            _phantom: PhantomData,
        }
    }

    #[inline(always)]
    pub fn apply(&self, values: [Complex<L::Acc>; 2]) -> [Complex<L::Acc>; 2] {
        [values[0] + values[1], values[0] - values[1]]
    }
}

pub(crate) struct Butterfly3<L: FixedLane> {
    twiddle: Complex<L::Twiddle>,
}
impl<L: FixedLane> Butterfly3<L> {
    #[inline(always)]
    pub fn new(direction: FftDirection) -> Self {
        Self {
            twiddle: twiddles::compute_twiddle::<L>(1, 3, direction),
        }
    }

    #[inline(always)]
    pub fn apply(&self, values: [Complex<L::Acc>; 3]) -> [Complex<L::Acc>; 3] {
        let xp = values[1] + values[2];
        let xn = values[1] - values[2];
        let sum = values[0] + xp;

        let temp_a = Complex::new(
            values[0].re + L::acc_mul_coeff(xp.re, self.twiddle.re),
            values[0].im + L::acc_mul_coeff(xp.im, self.twiddle.re),
        );
        let temp_b = Complex::new(
            -L::acc_mul_coeff(xn.im, self.twiddle.im),
            L::acc_mul_coeff(xn.re, self.twiddle.im),
        );

        [sum, temp_a + temp_b, temp_a - temp_b]
    }
}

pub(crate) struct Butterfly4<L: FixedLane> {
    direction: FftDirection,
    _phantom: PhantomData<L>,
}
impl<L: FixedLane> Butterfly4<L> {
    #[inline(always)]
    pub fn new(direction: FftDirection) -> Self {
        Self {
            direction,
            _phantom: PhantomData,
        }
    }

    #[inline(always)]
    pub fn apply(&self, values: [Complex<L::Acc>; 4]) -> [Complex<L::Acc>; 4] {
        let sum02 = values[0] + values[2];
        let diff02 = values[0] - values[2];
        let sum13 = values[1] + values[3];
        let diff13 = rotate_90::<L>(values[1] - values[3], self.direction);

        [sum02 + sum13, diff02 + diff13, sum02 - sum13, diff02 - diff13]
    }
}

pub(crate) struct Butterfly5<L: FixedLane> {
    twiddle1: Complex<L::Twiddle>,
    twiddle2: Complex<L::Twiddle>,
}
impl<L: FixedLane> Butterfly5<L> {
    #[inline(always)]
    pub fn new(direction: FftDirection) -> Self {
        Self {
            twiddle1: twiddles::compute_twiddle::<L>(1, 5, direction),
            twiddle2: twiddles::compute_twiddle::<L>(2, 5, direction),
        }
    }

    #[inline(always)]
    pub fn apply(&self, values: [Complex<L::Acc>; 5]) -> [Complex<L::Acc>; 5] {
        // Pair the inputs whose twiddles are conjugates: (x1, x4) and
        // (x2, x3). With a_k the pair sums and b_k the pair differences,
        // X1/X4 and X2/X3 differ only in the sign of a purely imaginary
        // cross term.
        let a1 = values[1] + values[4];
        let b1 = values[1] - values[4];
        let a2 = values[2] + values[3];
        let b2 = values[2] - values[3];

        let even1 = Complex::new(
            values[0].re
                + L::acc_mul_coeff(a1.re, self.twiddle1.re)
                + L::acc_mul_coeff(a2.re, self.twiddle2.re),
            values[0].im
                + L::acc_mul_coeff(a1.im, self.twiddle1.re)
                + L::acc_mul_coeff(a2.im, self.twiddle2.re),
        );
        let even2 = Complex::new(
            values[0].re
                + L::acc_mul_coeff(a1.re, self.twiddle2.re)
                + L::acc_mul_coeff(a2.re, self.twiddle1.re),
            values[0].im
                + L::acc_mul_coeff(a1.im, self.twiddle2.re)
                + L::acc_mul_coeff(a2.im, self.twiddle1.re),
        );

        let odd1 = Complex::new(
            L::acc_mul_coeff(b1.re, self.twiddle1.im) + L::acc_mul_coeff(b2.re, self.twiddle2.im),
            L::acc_mul_coeff(b1.im, self.twiddle1.im) + L::acc_mul_coeff(b2.im, self.twiddle2.im),
        );
        let odd2 = Complex::new(
            L::acc_mul_coeff(b1.re, self.twiddle2.im) - L::acc_mul_coeff(b2.re, self.twiddle1.im),
            L::acc_mul_coeff(b1.im, self.twiddle2.im) - L::acc_mul_coeff(b2.im, self.twiddle1.im),
        );

        // j * odd rotates the cross term into place
        let odd1_rotated = Complex::new(-odd1.im, odd1.re);
        let odd2_rotated = Complex::new(-odd2.im, odd2.re);

        [
            values[0] + a1 + a2,
            even1 + odd1_rotated,
            even2 + odd2_rotated,
            even2 - odd2_rotated,
            even1 - odd1_rotated,
        ]
    }
}

pub(crate) struct Butterfly8<L: FixedLane> {
    butterfly4: Butterfly4<L>,
    /// `sqrt(2)/2` in the twiddle format: the real part of `W_8^1`.
    root2_half: L::Twiddle,
    direction: FftDirection,
}
impl<L: FixedLane> Butterfly8<L> {
    #[inline(always)]
    pub fn new(direction: FftDirection) -> Self {
        Self {
            butterfly4: Butterfly4::new(direction),
            root2_half: twiddles::compute_twiddle::<L>(1, 8, direction).re,
            direction,
        }
    }

    /// Multiplication by `W_8^1 = sqrt(2)/2 * (1 -+ j)`.
    #[inline(always)]
    fn mul_root8_1(&self, value: Complex<L::Acc>) -> Complex<L::Acc> {
        match self.direction {
            FftDirection::Forward => Complex::new(
                L::acc_mul_coeff(value.re + value.im, self.root2_half),
                L::acc_mul_coeff(value.im - value.re, self.root2_half),
            ),
            FftDirection::Inverse => Complex::new(
                L::acc_mul_coeff(value.re - value.im, self.root2_half),
                L::acc_mul_coeff(value.im + value.re, self.root2_half),
            ),
        }
    }

    /// Multiplication by `W_8^3 = sqrt(2)/2 * (-1 -+ j)`.
    #[inline(always)]
    fn mul_root8_3(&self, value: Complex<L::Acc>) -> Complex<L::Acc> {
        match self.direction {
            FftDirection::Forward => Complex::new(
                L::acc_mul_coeff(value.im - value.re, self.root2_half),
                L::acc_mul_coeff(-value.re - value.im, self.root2_half),
            ),
            FftDirection::Inverse => Complex::new(
                L::acc_mul_coeff(-value.re - value.im, self.root2_half),
                L::acc_mul_coeff(value.re - value.im, self.root2_half),
            ),
        }
    }

    #[inline(always)]
    pub fn apply(&self, values: [Complex<L::Acc>; 8]) -> [Complex<L::Acc>; 8] {
        let evens = self
            .butterfly4
            .apply([values[0], values[2], values[4], values[6]]);
        let odds = self
            .butterfly4
            .apply([values[1], values[3], values[5], values[7]]);

        let odd0 = odds[0];
        let odd1 = self.mul_root8_1(odds[1]);
        let odd2 = rotate_90::<L>(odds[2], self.direction);
        let odd3 = self.mul_root8_3(odds[3]);

        [
            evens[0] + odd0,
            evens[1] + odd1,
            evens[2] + odd2,
            evens[3] + odd3,
            evens[0] - odd0,
            evens[1] - odd1,
            evens[2] - odd2,
            evens[3] - odd3,
        ]
    }
}

/// Dispatch enum over the radices a stage can execute.
pub(crate) enum StageButterfly<L: FixedLane> {
    Factor2(Butterfly2<L>),
    Factor3(Butterfly3<L>),
    Factor4(Butterfly4<L>),
    Factor5(Butterfly5<L>),
    Factor8(Butterfly8<L>),
}

impl<L: FixedLane> StageButterfly<L> {
    pub fn new(factor: RadixFactor, direction: FftDirection) -> Self {
        match factor {
            RadixFactor::Factor2 => StageButterfly::Factor2(Butterfly2::new(direction)),
            RadixFactor::Factor3 => StageButterfly::Factor3(Butterfly3::new(direction)),
            RadixFactor::Factor4 => StageButterfly::Factor4(Butterfly4::new(direction)),
            RadixFactor::Factor5 => StageButterfly::Factor5(Butterfly5::new(direction)),
            RadixFactor::Factor8 => StageButterfly::Factor8(Butterfly8::new(direction)),
        }
    }

    pub const fn radix(&self) -> usize {
        match self {
            StageButterfly::Factor2(_) => 2,
            StageButterfly::Factor3(_) => 3,
            StageButterfly::Factor4(_) => 4,
            StageButterfly::Factor5(_) => 5,
            StageButterfly::Factor8(_) => 8,
        }
    }
}
