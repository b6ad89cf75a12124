use std::cmp::Reverse;

use crate::common::FftBuildError;

/// A cross-FFT factor for which a butterfly implementation exists.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum RadixFactor {
    Factor2,
    Factor3,
    Factor4,
    Factor5,
    Factor8,
}
impl RadixFactor {
    pub const fn radix(&self) -> usize {
        match self {
            RadixFactor::Factor2 => 2,
            RadixFactor::Factor3 => 3,
            RadixFactor::Factor4 => 4,
            RadixFactor::Factor5 => 5,
            RadixFactor::Factor8 => 8,
        }
    }

    /// Worst-case amplitude growth of one butterfly of this radix, in bits:
    /// `ceil(log2(radix))`, since every twiddle has magnitude <= 1.
    pub const fn growth_bits(&self) -> u32 {
        match self {
            RadixFactor::Factor2 => 1,
            RadixFactor::Factor3 => 2,
            RadixFactor::Factor4 => 2,
            RadixFactor::Factor5 => 3,
            RadixFactor::Factor8 => 3,
        }
    }
}

/// The reordering family a plan's permutation belongs to.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum PermutationClass {
    /// Power-of-two length: the classic reversal over the plan's digits.
    BitReversal,
    /// Composite length: mixed-radix digit reversal.
    DigitReversal,
}

/// Decomposition of a transform length into an ordered radix sequence.
///
/// The product of the stage radices always equals the length exactly, and
/// the ordering is fixed and reproducible per length so that the matching
/// permutation table stays consistent across builds.
///
/// Ordering policy: among the ways to spend the power-of-two budget on
/// radices {8, 4, 2}, prefer a radix multiset that can be arranged as a
/// palindrome (at most one radix with odd multiplicity). A palindromic
/// sequence makes the digit-reversal permutation its own inverse, which both
/// keeps the reorder an involution and lets callers undo it by reapplying it.
/// Among palindromic candidates, fewer stages win, then more radix-8 stages,
/// then more radix-4 stages. Lengths with no palindromic arrangement (both
/// the 3-count and 5-count odd, for example 15) fall back to fewest stages
/// ordered largest radix first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FactorizationPlan {
    radices: Box<[RadixFactor]>,
    permutation_class: PermutationClass,
    len: usize,
}

impl FactorizationPlan {
    /// Factors `len` into the supported radix set {2, 3, 4, 5, 8}.
    pub fn new(len: usize) -> Result<Self, FftBuildError> {
        let mut remainder = len;
        let mut twos = 0u32;
        let mut threes = 0u32;
        let mut fives = 0u32;
        if remainder == 0 {
            return Err(FftBuildError::UnsupportedSize(len));
        }
        while remainder % 2 == 0 {
            remainder /= 2;
            twos += 1;
        }
        while remainder % 3 == 0 {
            remainder /= 3;
            threes += 1;
        }
        while remainder % 5 == 0 {
            remainder /= 5;
            fives += 1;
        }
        if remainder != 1 {
            return Err(FftBuildError::UnsupportedSize(len));
        }

        let radices = choose_radices(twos, threes, fives);
        debug_assert_eq!(radices.iter().map(|r| r.radix()).product::<usize>(), len);

        let permutation_class = if len.is_power_of_two() {
            PermutationClass::BitReversal
        } else {
            PermutationClass::DigitReversal
        };

        Ok(Self {
            radices: radices.into_boxed_slice(),
            permutation_class,
            len,
        })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.radices.is_empty()
    }

    /// Stage radices in application order, earliest stage first.
    pub fn radices(&self) -> &[RadixFactor] {
        &self.radices
    }

    pub fn permutation_class(&self) -> PermutationClass {
        self.permutation_class
    }

    pub fn num_stages(&self) -> usize {
        self.radices.len()
    }

    /// Total right shift the static scaling schedule applies: the sum of the
    /// per-stage worst-case growth bounds. Data-independent.
    pub fn static_total_shift(&self) -> u32 {
        self.radices.iter().map(|r| r.growth_bits()).sum()
    }

    /// True when the radix sequence reads the same in both directions, which
    /// makes the digit-reversal permutation an involution.
    pub fn is_palindromic(&self) -> bool {
        self.radices
            .iter()
            .zip(self.radices.iter().rev())
            .all(|(a, b)| a == b)
    }
}

struct Candidate {
    eights: u32,
    fours: u32,
    twos: u32,
    palindromic: bool,
    stages: u32,
}

fn choose_radices(twos: u32, threes: u32, fives: u32) -> Vec<RadixFactor> {
    let mut best: Option<Candidate> = None;
    for eights in 0..=twos / 3 {
        for fours in 0..=(twos - 3 * eights) / 2 {
            let rest = twos - 3 * eights - 2 * fours;
            let odd_multiplicities = [eights, fours, rest, threes, fives]
                .iter()
                .filter(|&&count| count % 2 == 1)
                .count();
            let candidate = Candidate {
                eights,
                fours,
                twos: rest,
                palindromic: odd_multiplicities <= 1,
                stages: eights + fours + rest + threes + fives,
            };
            let replace = match &best {
                None => true,
                Some(current) => {
                    let key = |c: &Candidate| {
                        (!c.palindromic, c.stages, Reverse(c.eights), Reverse(c.fours))
                    };
                    key(&candidate) < key(current)
                }
            };
            if replace {
                best = Some(candidate);
            }
        }
    }
    // `eights = fours = 0` is always enumerated, so a candidate exists
    let best = best.unwrap();

    // multiplicity per radix, in descending radix order
    let counts = [
        (RadixFactor::Factor8, best.eights),
        (RadixFactor::Factor5, fives),
        (RadixFactor::Factor4, best.fours),
        (RadixFactor::Factor3, threes),
        (RadixFactor::Factor2, best.twos),
    ];

    let num_stages = best.stages as usize;
    let mut radices = Vec::with_capacity(num_stages);
    if best.palindromic {
        let mut middle = None;
        for (radix, count) in counts {
            for _ in 0..count / 2 {
                radices.push(radix);
            }
            if count % 2 == 1 {
                middle = Some(radix);
            }
        }
        let left = radices.clone();
        if let Some(radix) = middle {
            radices.push(radix);
        }
        radices.extend(left.iter().rev());
    } else {
        for (radix, count) in counts {
            for _ in 0..count {
                radices.push(radix);
            }
        }
    }
    debug_assert_eq!(radices.len(), num_stages);
    radices
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use RadixFactor::*;

    #[test]
    fn test_product_equals_len() {
        for len in 1..=512 {
            if let Ok(plan) = FactorizationPlan::new(len) {
                let product: usize = plan.radices().iter().map(|r| r.radix()).product();
                assert_eq!(product, len, "len = {}", len);
            }
        }
    }

    #[test]
    fn test_unsupported_sizes() {
        for len in [0, 7, 11, 13, 14, 21, 22, 49, 77] {
            assert_eq!(
                FactorizationPlan::new(len),
                Err(FftBuildError::UnsupportedSize(len)),
                "len = {}",
                len
            );
        }
    }

    #[test]
    fn test_reproducible() {
        for len in [12, 16, 60, 128, 480] {
            assert_eq!(
                FactorizationPlan::new(len).unwrap(),
                FactorizationPlan::new(len).unwrap()
            );
        }
    }

    #[test]
    fn test_known_plans() {
        let cases: [(usize, &[RadixFactor]); 8] = [
            (2, &[Factor2]),
            (4, &[Factor4]),
            (8, &[Factor8]),
            (12, &[Factor2, Factor3, Factor2]),
            (16, &[Factor4, Factor4]),
            (32, &[Factor2, Factor8, Factor2]),
            (64, &[Factor8, Factor8]),
            (128, &[Factor8, Factor2, Factor8]),
        ];
        for (len, expected) in cases {
            assert_eq!(
                FactorizationPlan::new(len).unwrap().radices(),
                expected,
                "len = {}",
                len
            );
        }
    }

    #[test]
    fn test_powers_of_two_are_palindromic() {
        for exponent in 0..=12 {
            let plan = FactorizationPlan::new(1 << exponent).unwrap();
            assert!(plan.is_palindromic(), "len = {}", 1usize << exponent);
        }
    }

    #[test]
    fn test_fallback_ordering_is_largest_first() {
        // 15 = 3 * 5 admits no palindrome; largest radix leads
        let plan = FactorizationPlan::new(15).unwrap();
        assert_eq!(plan.radices(), &[Factor5, Factor3]);
        assert!(!plan.is_palindromic());
    }

    #[test]
    fn test_permutation_class_tag() {
        assert_eq!(
            FactorizationPlan::new(64).unwrap().permutation_class(),
            PermutationClass::BitReversal
        );
        assert_eq!(
            FactorizationPlan::new(12).unwrap().permutation_class(),
            PermutationClass::DigitReversal
        );
    }

    #[test]
    fn test_static_shift_schedule() {
        // [4, 4] -> 2 + 2
        assert_eq!(FactorizationPlan::new(16).unwrap().static_total_shift(), 4);
        // [8, 8] -> 3 + 3
        assert_eq!(FactorizationPlan::new(64).unwrap().static_total_shift(), 6);
        // [2, 3, 2] -> 1 + 2 + 1
        assert_eq!(FactorizationPlan::new(12).unwrap().static_total_shift(), 4);
    }
}
