use crate::factorization::FactorizationPlan;

/// Cached index reordering between natural order and the order the first
/// stage consumes.
///
/// For a plan with radices `(r_1, ..., r_m)` the table is the mixed-radix
/// digit reversal: index `p` is decomposed into digits weighted by the
/// partial products of the radix sequence, and re-read with the weights
/// reversed. For a uniform power-of-two plan this degenerates to the classic
/// bit-reversal. The table is built once per descriptor and applied as a pure
/// gather; for palindromic radix sequences (which include every supported
/// power of two) it is an involution.
#[derive(Clone, Debug)]
pub struct Permutation {
    table: Box<[u32]>,
}

impl Permutation {
    pub fn new(plan: &FactorizationPlan) -> Self {
        let len = plan.len();
        let mut table = Vec::with_capacity(len);
        for position in 0..len {
            let mut reversed = 0usize;
            let mut weight = 1usize;
            for factor in plan.radices() {
                let radix = factor.radix();
                let digit = (position / weight) % radix;
                reversed = reversed * radix + digit;
                weight *= radix;
            }
            table.push(reversed as u32);
        }
        Self {
            table: table.into_boxed_slice(),
        }
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Reorders `src` into `dst`: `dst[p] = src[table[p]]`. Pure data
    /// movement, no arithmetic.
    pub fn apply<T: Copy>(&self, src: &[T], dst: &mut [T]) {
        debug_assert_eq!(src.len(), self.table.len());
        debug_assert_eq!(dst.len(), self.table.len());
        for (output, &source_index) in dst.iter_mut().zip(self.table.iter()) {
            *output = src[source_index as usize];
        }
    }
}
