// Domain value objects representing core counting concepts

use std::fmt;

/// Fixed-length integer vector used as a map key throughout the counter
///
/// Right-hand sides, zero/one selections, parity classes and normal forms are
/// all `IntVec`s. Equality and hashing are by value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IntVec(Vec<i64>);

impl IntVec {
    pub fn new(values: Vec<i64>) -> Self {
        Self(values)
    }

    pub fn zeros(dim: usize) -> Self {
        Self(vec![0; dim])
    }

    pub fn dim(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, i: usize) -> i64 {
        self.0[i]
    }

    pub fn as_slice(&self) -> &[i64] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<i64> {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&v| v == 0)
    }

    pub fn has_negative(&self) -> bool {
        self.0.iter().any(|&v| v < 0)
    }

    /// Elementwise reduction mod 2 (the residue class of the vector)
    pub fn parity(&self) -> IntVec {
        Self(self.0.iter().map(|v| v.rem_euclid(2)).collect())
    }

    /// Elementwise sum; both vectors must have the same dimension
    pub fn plus(&self, other: &IntVec) -> IntVec {
        debug_assert_eq!(self.dim(), other.dim());
        Self(self.0.iter().zip(&other.0).map(|(a, b)| a + b).collect())
    }

    /// True when every coordinate is `<=` the matching bound
    pub fn le_all(&self, bounds: &IntVec) -> bool {
        self.0.iter().zip(&bounds.0).all(|(a, b)| a <= b)
    }

    /// Step to the next vector of `[0, k)^n` in counting order (coordinate 0 fastest).
    ///
    /// Returns `false` once the sequence wraps back around to all zeros.
    pub fn advance_lt(&mut self, k: i64) -> bool {
        for v in self.0.iter_mut() {
            if *v + 1 < k {
                *v += 1;
                return true;
            }
            *v = 0;
        }
        false
    }

    /// Step to the next vector of the box `0 <= x_i <= bounds_i` in counting order.
    ///
    /// Returns `false` once every vector in the box has been visited.
    pub fn advance_le(&mut self, bounds: &IntVec) -> bool {
        debug_assert_eq!(self.dim(), bounds.dim());
        for (v, &bound) in self.0.iter_mut().zip(&bounds.0) {
            if *v < bound {
                *v += 1;
                return true;
            }
            *v = 0;
        }
        false
    }
}

impl From<Vec<i64>> for IntVec {
    fn from(values: Vec<i64>) -> Self {
        Self(values)
    }
}

impl From<&[i64]> for IntVec {
    fn from(values: &[i64]) -> Self {
        Self(values.to_vec())
    }
}

impl fmt::Display for IntVec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", v)?;
        }
        write!(f, "]")
    }
}

/// How the zero/one table is built at construction time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZeroOneStrategy {
    /// Enumerate all 2^n zero/one column selections
    Direct,
    /// Meet-in-the-middle over two column halves
    DivideAndConquer,
    /// Build both tables and insist they agree
    CrossChecked,
}

impl fmt::Display for ZeroOneStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZeroOneStrategy::Direct => write!(f, "Direct"),
            ZeroOneStrategy::DivideAndConquer => write!(f, "Divide and Conquer"),
            ZeroOneStrategy::CrossChecked => write!(f, "Cross Checked"),
        }
    }
}

/// Linear program backend used for the matrix validity check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckerBackend {
    /// Automatically select an available backend
    Auto,
    /// Pure-Rust simplex via good_lp
    MicroLp,
    /// COIN-OR CBC via good_lp
    CoinCbc,
    /// HiGHS solver
    Highs,
}

impl fmt::Display for CheckerBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckerBackend::Auto => write!(f, "Auto"),
            CheckerBackend::MicroLp => write!(f, "microlp"),
            CheckerBackend::CoinCbc => write!(f, "COIN-OR CBC"),
            CheckerBackend::Highs => write!(f, "HiGHS"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_lt_visits_every_binary_vector_once() {
        let mut z = IntVec::zeros(3);
        let mut seen = vec![z.clone()];
        while z.advance_lt(2) {
            seen.push(z.clone());
        }
        assert_eq!(seen.len(), 8);
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), 8);
        assert!(z.is_zero());
    }

    #[test]
    fn advance_le_respects_bounds() {
        let bounds = IntVec::new(vec![2, 0, 1]);
        let mut x = IntVec::zeros(3);
        let mut count = 1;
        while x.advance_le(&bounds) {
            assert!(x.le_all(&bounds));
            count += 1;
        }
        assert_eq!(count, 6);
    }

    #[test]
    fn advance_over_empty_vector_terminates() {
        let mut z = IntVec::zeros(0);
        assert!(!z.advance_lt(2));
        assert!(!z.advance_le(&IntVec::zeros(0)));
    }

    #[test]
    fn parity_and_display() {
        let v = IntVec::new(vec![3, 4, 0, 7]);
        assert_eq!(v.parity(), IntVec::new(vec![1, 0, 0, 1]));
        assert_eq!(v.to_string(), "[3, 4, 0, 7]");
        assert!(!v.has_negative());
        assert!(IntVec::new(vec![0, -1]).has_negative());
    }
}
