use super::zero_one::ZeroOneTable;
use crate::domain::{CountError, IntVec, Result};
use ahash::AHashMap;
use num_bigint::BigUint;
use num_traits::Zero;
use std::collections::hash_map::Entry;

/// Right-hand sides of one residue class with their zero/one counts
pub type ParityGroup = AHashMap<IntVec, BigUint>;

/// Zero/one table indexed first by `r mod 2`, then by `r`
///
/// Built once at construction and read-only afterwards, so it can be shared
/// between concurrent queries.
#[derive(Debug, Clone, Default)]
pub struct ParityIndex {
    groups: AHashMap<IntVec, ParityGroup>,
}

impl ParityIndex {
    /// Organize a zero/one table by residue class
    pub fn organize(table: &ZeroOneTable) -> Result<Self> {
        let mut index = Self::default();
        index.insert_table(table)?;
        Ok(index)
    }

    /// Merge another table into the index.
    ///
    /// A right-hand side already present with a different count means the two
    /// tables were built inconsistently, and is reported rather than resolved.
    pub fn insert_table(&mut self, table: &ZeroOneTable) -> Result<()> {
        for (r, count) in table.iter() {
            if count.is_zero() {
                continue;
            }
            let group = self.groups.entry(r.parity()).or_default();
            match group.entry(r.clone()) {
                Entry::Vacant(slot) => {
                    slot.insert(count.clone());
                }
                Entry::Occupied(slot) if slot.get() == count => {}
                Entry::Occupied(slot) => {
                    return Err(CountError::InternalInconsistency(format!(
                        "zero/one counts disagree for right-hand side {}: {} vs {}",
                        r,
                        slot.get(),
                        count
                    )));
                }
            }
        }
        Ok(())
    }

    /// The group of right-hand sides sharing the residue class `parity`
    pub fn group(&self, parity: &IntVec) -> Option<&ParityGroup> {
        self.groups.get(parity)
    }

    pub fn num_groups(&self) -> usize {
        self.groups.len()
    }

    pub fn num_entries(&self) -> usize {
        self.groups.values().map(|g| g.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counting::zero_one::zero_one_counts;
    use crate::domain::Matrix;

    #[test]
    fn groups_by_residue_class() {
        let a = Matrix::new(vec![vec![1, 1, 2]]).unwrap();
        // right-hand sides 0, 1, 2, 3, 4 with counts 1, 2, 2, 2, 1
        let index = ParityIndex::organize(&zero_one_counts(&a)).unwrap();
        assert_eq!(index.num_groups(), 2);
        assert_eq!(index.num_entries(), 5);

        let even = index.group(&IntVec::new(vec![0])).unwrap();
        assert_eq!(even.len(), 3);
        assert_eq!(even.get(&IntVec::new(vec![2])), Some(&BigUint::from(2u32)));

        let odd = index.group(&IntVec::new(vec![1])).unwrap();
        assert_eq!(odd.len(), 2);
        assert!(odd.keys().all(|r| r.get(0) % 2 == 1));
    }

    #[test]
    fn reinserting_identical_table_is_accepted() {
        let a = Matrix::new(vec![vec![1, 2], vec![3, 1]]).unwrap();
        let table = zero_one_counts(&a);
        let mut index = ParityIndex::organize(&table).unwrap();
        index.insert_table(&table).unwrap();
        assert_eq!(index.num_entries(), table.len());
    }

    #[test]
    fn conflicting_counts_fail_fast() {
        let a = Matrix::new(vec![vec![1, 1]]).unwrap();
        let mut index = ParityIndex::organize(&zero_one_counts(&a)).unwrap();

        let mut bad = ZeroOneTable::new();
        bad.add(IntVec::new(vec![1]), BigUint::from(5u32));
        assert!(matches!(
            index.insert_table(&bad),
            Err(CountError::InternalInconsistency(_))
        ));
    }
}
