// Even/odd recursive counting of non-negative integer solutions to A x = b
//
// Every non-negative solution splits as x = z + 2 y with z zero/one, so
//     count(b) = sum over zero/one images r = A z with r = b (mod 2), r <= b
//                of  #{z : A z = r} * count((b - r) / 2)
// Each step halves every coordinate of the target, so the recursion depth is
// logarithmic in max(b).

use super::divide_conquer::divide_and_conquer_counts;
use super::parity_index::ParityIndex;
use super::zero_one::{zero_one_counts, ZeroOneTable};
use crate::domain::{
    CountError, CountReport, CountStatistics, CounterConfig, CountingProblem, IntVec, Matrix,
    MatrixValidityChecker, Result, ZeroOneStrategy,
};
use crate::solver::CheckerFactory;
use ahash::{AHashMap, AHasher};
use num_bigint::BigUint;
use num_traits::{One, Zero};
use std::hash::{Hash, Hasher};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Memoized counts keyed by the normal form of the target
///
/// A cache is owned by whoever drives the query. `Counter::count` uses a fresh one per
/// call; callers that want to amortize work across related targets can keep one alive
/// and pass it to `Counter::count_with_cache`. The first query binds the cache to the
/// counter's matrix; handing it to a counter over a different matrix is rejected until
/// the cache is cleared.
#[derive(Debug, Clone, Default)]
pub struct MemoCache {
    entries: AHashMap<IntVec, BigUint>,
    hits: u64,
    evaluations: u64,
    matrix_fingerprint: Option<u64>,
}

impl MemoCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn evaluations(&self) -> u64 {
        self.evaluations
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.hits = 0;
        self.evaluations = 0;
        self.matrix_fingerprint = None;
    }

    fn bind(&mut self, fingerprint: u64) -> Result<()> {
        match self.matrix_fingerprint {
            Some(bound) if bound != fingerprint => Err(CountError::InvalidInput(
                "Cache was filled by a counter over a different matrix".to_string(),
            )),
            _ => {
                self.matrix_fingerprint = Some(fingerprint);
                Ok(())
            }
        }
    }
}

/// Counts non-negative integer solutions of `A x = b` for a fixed matrix `A`
#[derive(Debug)]
pub struct Counter {
    problem: CountingProblem,
    strategy: ZeroOneStrategy,
    index: ParityIndex,
    fingerprint: u64,
}

impl Counter {
    /// Validate the problem's matrix and build its parity index.
    ///
    /// The validity checker is selected by `config.checker`.
    pub fn new(problem: CountingProblem, config: CounterConfig) -> Result<Self> {
        let checker = CheckerFactory::create_from_backend(config.checker)?;
        Self::with_checker(problem, config, checker.as_ref())
    }

    /// Same as [`Counter::new`] with an explicitly supplied validity checker
    pub fn with_checker(
        problem: CountingProblem,
        config: CounterConfig,
        checker: &dyn MatrixValidityChecker,
    ) -> Result<Self> {
        let matrix = &problem.matrix;

        // checked before the LP for a readable message
        if let Some(j) = matrix.empty_column() {
            return Err(CountError::InvalidInput(format!(
                "Matrix column {} is all zero (unbounded or empty system)",
                j
            )));
        }

        match checker.check(matrix) {
            Ok(()) => {}
            Err(CountError::SolverFailed(message)) => {
                warn!(checker = checker.name(), reason = %message, "validity check did not complete");
                return Err(CountError::PreconditionViolated(format!(
                    "Unable to confirm x = 0 is the unique non-negative solution of A x = 0 ({}): {}",
                    checker.name(),
                    message
                )));
            }
            Err(e) => {
                warn!(checker = checker.name(), error = %e, "matrix rejected");
                return Err(e);
            }
        }

        let index = build_index(matrix, &config)?;

        info!(
            problem = %problem.name,
            rows = matrix.num_rows(),
            columns = matrix.num_cols(),
            strategy = %config.strategy,
            checker = checker.name(),
            parity_groups = index.num_groups(),
            zero_one_entries = index.num_entries(),
            "counter ready"
        );

        let fingerprint = matrix_fingerprint(matrix);
        Ok(Self {
            problem,
            strategy: config.strategy,
            index,
            fingerprint,
        })
    }

    pub fn problem(&self) -> &CountingProblem {
        &self.problem
    }

    pub fn matrix(&self) -> &Matrix {
        &self.problem.matrix
    }

    pub fn strategy(&self) -> ZeroOneStrategy {
        self.strategy
    }

    pub fn parity_index(&self) -> &ParityIndex {
        &self.index
    }

    /// Number of non-negative integer vectors `x` with `A x = b`
    pub fn count(&self, b: &IntVec) -> Result<BigUint> {
        let mut cache = MemoCache::new();
        self.count_with_cache(b, &mut cache)
    }

    /// Count using a caller-owned cache, which may carry results between queries
    pub fn count_with_cache(&self, b: &IntVec, cache: &mut MemoCache) -> Result<BigUint> {
        self.validate_target(b)?;
        cache.bind(self.fingerprint)?;
        Ok(self.count_recursive(b, cache))
    }

    /// Count with a fresh cache and report statistics for the query
    pub fn count_report(&self, b: &IntVec) -> Result<CountReport> {
        let start_time = Instant::now();
        let mut cache = MemoCache::new();
        let count = self.count_with_cache(b, &mut cache)?;

        let statistics = CountStatistics {
            evaluations: cache.evaluations(),
            cache_hits: cache.hits(),
            cache_entries: cache.len(),
            solve_time_ms: start_time.elapsed().as_secs_f64() * 1000.0,
        };

        debug!(
            rhs = %b,
            evaluations = statistics.evaluations,
            cache_hits = statistics.cache_hits,
            cache_entries = statistics.cache_entries,
            "counted solutions"
        );

        Ok(CountReport { count, statistics })
    }

    fn validate_target(&self, b: &IntVec) -> Result<()> {
        if b.dim() != self.matrix().num_rows() {
            return Err(CountError::InvalidInput(format!(
                "Target has {} entries but matrix has {} rows",
                b.dim(),
                self.matrix().num_rows()
            )));
        }
        if b.has_negative() {
            return Err(CountError::InvalidInput(format!("Negative entry in target {}", b)));
        }
        Ok(())
    }

    fn count_recursive(&self, b: &IntVec, cache: &mut MemoCache) -> BigUint {
        if b.is_zero() {
            return BigUint::one();
        }

        let key = self.problem.normal_form(b);
        if let Some(cached) = cache.entries.get(&key) {
            cache.hits += 1;
            return cached.clone();
        }
        cache.evaluations += 1;

        let mut total = BigUint::zero();
        if let Some(group) = self.index.group(&b.parity()) {
            for (r, zero_one_count) in group.iter() {
                if let Some(b_prime) = halve_remainder(b, r) {
                    let sub = self.count_recursive(&b_prime, cache);
                    if !sub.is_zero() {
                        total += zero_one_count * sub;
                    }
                }
            }
        }

        cache.entries.insert(key, total.clone());
        total
    }
}

/// `(b - r) / 2`, or `None` when some coordinate of `b - r` is negative or odd
fn halve_remainder(b: &IntVec, r: &IntVec) -> Option<IntVec> {
    let mut half = Vec::with_capacity(b.dim());
    for (&bi, &ri) in b.as_slice().iter().zip(r.as_slice()) {
        let diff = bi - ri;
        if diff < 0 || diff & 1 != 0 {
            return None;
        }
        half.push(diff / 2);
    }
    Some(IntVec::new(half))
}

fn matrix_fingerprint(matrix: &Matrix) -> u64 {
    let mut hasher = AHasher::default();
    matrix.hash(&mut hasher);
    hasher.finish()
}

/// Index both tables together, failing unless they hold the same counts for the
/// same right-hand sides
fn cross_checked_index(direct: &ZeroOneTable, split: &ZeroOneTable) -> Result<ParityIndex> {
    let mut index = ParityIndex::organize(direct)?;
    index.insert_table(split)?;
    if index.num_entries() != direct.len() || direct.len() != split.len() {
        return Err(CountError::InternalInconsistency(format!(
            "zero/one tables disagree on achievable right-hand sides: {} direct, {} divide and conquer",
            direct.len(),
            split.len()
        )));
    }
    Ok(index)
}

fn build_index(matrix: &Matrix, config: &CounterConfig) -> Result<ParityIndex> {
    match config.strategy {
        ZeroOneStrategy::Direct => ParityIndex::organize(&zero_one_counts(matrix)),
        ZeroOneStrategy::DivideAndConquer => ParityIndex::organize(&divide_and_conquer_counts(
            matrix,
            config.leaf_columns,
        )),
        ZeroOneStrategy::CrossChecked => cross_checked_index(
            &zero_one_counts(matrix),
            &divide_and_conquer_counts(matrix, config.leaf_columns),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counting::debug_brute_force;
    use crate::domain::Matrix;

    struct AcceptingChecker;

    impl MatrixValidityChecker for AcceptingChecker {
        fn check(&self, _matrix: &Matrix) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "accepting"
        }
    }

    struct FailingChecker;

    impl MatrixValidityChecker for FailingChecker {
        fn check(&self, _matrix: &Matrix) -> Result<()> {
            Err(CountError::SolverFailed("iteration limit".to_string()))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    fn counter(rows: Vec<Vec<i64>>, strategy: ZeroOneStrategy) -> Counter {
        let problem = CountingProblem::new(Matrix::new(rows).unwrap());
        let config = CounterConfig::default().with_strategy(strategy);
        Counter::with_checker(problem, config, &AcceptingChecker).unwrap()
    }

    fn target(values: &[i64]) -> IntVec {
        IntVec::from(values)
    }

    #[test]
    fn two_ones_scenario() {
        let c = counter(vec![vec![1, 1]], ZeroOneStrategy::Direct);
        assert_eq!(c.count(&target(&[2])).unwrap(), BigUint::from(3u32));
    }

    #[test]
    fn two_three_scenario() {
        let c = counter(vec![vec![2, 3]], ZeroOneStrategy::DivideAndConquer);
        assert_eq!(c.count(&target(&[6])).unwrap(), BigUint::from(2u32));
        assert_eq!(c.count(&target(&[1])).unwrap(), BigUint::zero());
    }

    #[test]
    fn zero_target_has_one_solution() {
        let c = counter(vec![vec![1, 2, 3], vec![4, 0, 1]], ZeroOneStrategy::CrossChecked);
        assert_eq!(c.count(&IntVec::zeros(2)).unwrap(), BigUint::one());
    }

    #[test]
    fn negative_target_rejected_before_recursion() {
        let c = counter(vec![vec![1, 1]], ZeroOneStrategy::Direct);
        let mut cache = MemoCache::new();
        let result = c.count_with_cache(&target(&[-4]), &mut cache);
        assert!(matches!(result, Err(CountError::InvalidInput(_))));
        assert!(cache.is_empty());
        assert_eq!(cache.evaluations(), 0);
    }

    #[test]
    fn wrong_dimension_rejected() {
        let c = counter(vec![vec![1, 1]], ZeroOneStrategy::Direct);
        assert!(matches!(c.count(&target(&[1, 1])), Err(CountError::InvalidInput(_))));
    }

    #[test]
    fn empty_column_rejected_at_construction() {
        let problem = CountingProblem::new(Matrix::new(vec![vec![1, 0], vec![2, 0]]).unwrap());
        let result = Counter::with_checker(problem, CounterConfig::default(), &AcceptingChecker);
        assert!(matches!(result, Err(CountError::InvalidInput(_))));
    }

    #[test]
    fn solver_failure_is_a_precondition_violation() {
        let problem = CountingProblem::new(Matrix::new(vec![vec![1, 1]]).unwrap());
        let result = Counter::with_checker(problem, CounterConfig::default(), &FailingChecker);
        assert!(matches!(result, Err(CountError::PreconditionViolated(_))));
    }

    #[test]
    fn agrees_with_brute_force() {
        let rows = vec![vec![1, 1, 0, 2], vec![0, 1, 1, 1]];
        let a = Matrix::new(rows.clone()).unwrap();
        let c = counter(rows, ZeroOneStrategy::CrossChecked);
        for b0 in 0..7 {
            for b1 in 0..7 {
                let b = target(&[b0, b1]);
                assert_eq!(c.count(&b).unwrap(), debug_brute_force(&a, &b).unwrap(), "b = {}", b);
            }
        }
    }

    #[test]
    fn counts_beyond_machine_words() {
        // compositions of n into 8 non-negative parts: C(n + 7, 7)
        let n: u64 = 1_000_000;
        let c = counter(vec![vec![1; 8]], ZeroOneStrategy::DivideAndConquer);
        let mut expected = BigUint::one();
        for k in 1..=7u64 {
            expected = expected * BigUint::from(n + k) / BigUint::from(k);
        }
        let count = c.count(&target(&[n as i64])).unwrap();
        assert_eq!(count, expected);
        assert!(count > BigUint::from(u64::MAX));
    }

    #[test]
    fn persistent_cache_reuses_work() {
        let c = counter(vec![vec![1, 1, 1]], ZeroOneStrategy::Direct);
        let mut cache = MemoCache::new();
        let first = c.count_with_cache(&target(&[40]), &mut cache).unwrap();
        let evaluations = cache.evaluations();
        let again = c.count_with_cache(&target(&[40]), &mut cache).unwrap();
        assert_eq!(first, again);
        assert_eq!(cache.evaluations(), evaluations);
        assert!(cache.hits() > 0);
        // C(42, 2)
        assert_eq!(first, BigUint::from(861u32));
    }

    #[test]
    fn report_carries_statistics() {
        let c = counter(vec![vec![1, 2], vec![2, 1]], ZeroOneStrategy::Direct);
        let report = c.count_report(&target(&[9, 9])).unwrap();
        assert_eq!(report.count, BigUint::one());
        assert!(report.statistics.evaluations >= 1);
        assert_eq!(report.statistics.cache_entries as u64, report.statistics.evaluations);
    }

    #[test]
    fn cache_bound_to_its_matrix() {
        let ones = counter(vec![vec![1, 1]], ZeroOneStrategy::Direct);
        let twos = counter(vec![vec![1, 2]], ZeroOneStrategy::Direct);
        let mut cache = MemoCache::new();
        assert_eq!(ones.count_with_cache(&target(&[4]), &mut cache).unwrap(), BigUint::from(5u32));

        let evaluations = cache.evaluations();
        assert!(matches!(
            twos.count_with_cache(&target(&[4]), &mut cache),
            Err(CountError::InvalidInput(_))
        ));
        assert_eq!(cache.evaluations(), evaluations);

        // a second counter over the same matrix may share the cache
        let ones_again = counter(vec![vec![1, 1]], ZeroOneStrategy::DivideAndConquer);
        assert_eq!(
            ones_again.count_with_cache(&target(&[4]), &mut cache).unwrap(),
            BigUint::from(5u32)
        );

        cache.clear();
        assert_eq!(twos.count_with_cache(&target(&[4]), &mut cache).unwrap(), BigUint::from(3u32));
    }

    #[test]
    fn row_totals_at_the_i64_limit_count_exactly() {
        let half = i64::MAX / 2;
        let c = counter(vec![vec![half, half]], ZeroOneStrategy::CrossChecked);
        assert_eq!(c.count(&target(&[half])).unwrap(), BigUint::from(2u32));
        assert_eq!(c.count(&target(&[half - 1])).unwrap(), BigUint::zero());
    }

    fn table(entries: &[(i64, u32)]) -> ZeroOneTable {
        let mut t = ZeroOneTable::new();
        for &(r, count) in entries {
            t.add(IntVec::new(vec![r]), BigUint::from(count));
        }
        t
    }

    #[test]
    fn cross_check_accepts_identical_tables() {
        let t = table(&[(0, 1), (1, 2), (2, 1)]);
        let index = cross_checked_index(&t, &t.clone()).unwrap();
        assert_eq!(index.num_entries(), 3);
    }

    #[test]
    fn cross_check_rejects_right_hand_side_in_one_table_only() {
        let direct = table(&[(0, 1), (1, 2), (2, 1)]);
        let extra = table(&[(0, 1), (1, 2), (2, 1), (3, 1)]);
        let missing = table(&[(0, 1), (1, 2)]);
        assert!(matches!(
            cross_checked_index(&direct, &extra),
            Err(CountError::InternalInconsistency(_))
        ));
        assert!(matches!(
            cross_checked_index(&direct, &missing),
            Err(CountError::InternalInconsistency(_))
        ));
    }

    #[test]
    fn cross_check_rejects_same_keys_with_different_counts() {
        let direct = table(&[(0, 1), (1, 2)]);
        let split = table(&[(0, 1), (1, 3)]);
        assert!(matches!(
            cross_checked_index(&direct, &split),
            Err(CountError::InternalInconsistency(_))
        ));
    }
}
