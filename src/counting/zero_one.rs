use crate::domain::{IntVec, Matrix};
use ahash::AHashMap;
use num_bigint::BigUint;
use num_traits::{One, Zero};
use tracing::debug;

/// Number of zero/one column selections `z` achieving each right-hand side `r = A z`
///
/// Only achievable right-hand sides are stored, so every count is positive.
#[derive(Debug, Clone, Default)]
pub struct ZeroOneTable {
    counts: AHashMap<IntVec, BigUint>,
}

impl ZeroOneTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` selections achieving `r`; zero counts are ignored
    pub fn add(&mut self, r: IntVec, count: BigUint) {
        if count.is_zero() {
            return;
        }
        *self.counts.entry(r).or_insert_with(BigUint::zero) += count;
    }

    pub fn get(&self, r: &IntVec) -> Option<&BigUint> {
        self.counts.get(r)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&IntVec, &BigUint)> {
        self.counts.iter()
    }

    /// Total number of selections recorded (2^n for a complete table)
    pub fn total(&self) -> BigUint {
        self.counts.values().sum()
    }
}

impl PartialEq for ZeroOneTable {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .counts
                .iter()
                .all(|(r, c)| other.counts.get(r) == Some(c))
    }
}

impl Eq for ZeroOneTable {}

impl FromIterator<(IntVec, BigUint)> for ZeroOneTable {
    fn from_iter<I: IntoIterator<Item = (IntVec, BigUint)>>(iter: I) -> Self {
        let mut table = ZeroOneTable::new();
        for (r, c) in iter {
            table.add(r, c);
        }
        table
    }
}

/// Tabulate `A z` over all 2^n zero/one vectors `z`
pub fn zero_one_counts(matrix: &Matrix) -> ZeroOneTable {
    let mut counts: AHashMap<IntVec, BigUint> = AHashMap::new();
    let mut z = IntVec::zeros(matrix.num_cols());
    loop {
        let r = matrix.mul(&z);
        *counts.entry(r).or_insert_with(BigUint::zero) += BigUint::one();
        if !z.advance_lt(2) {
            break;
        }
    }

    debug!(
        columns = matrix.num_cols(),
        entries = counts.len(),
        "enumerated zero/one table"
    );

    ZeroOneTable { counts }
}
