//! Swap mutation for permutation-encoded genes.
//!
//! A swap exchanges two positions, so the permutation property holds by
//! construction — no value is created or lost.

use rand::Rng;

/// Per-position swap mutation.
///
/// Scans every position; with probability `rate` the gene at that position is
/// exchanged with a uniformly random partner. The expected number of swaps is
/// `rate * perm.len()`.
///
/// Returns the number of swap events applied, so callers can skip fitness
/// invalidation when nothing fired.
///
/// `rate` is clamped to `[0, 1]`; permutations shorter than two genes are
/// left untouched.
pub fn swap_mutation<R: Rng>(perm: &mut [usize], rate: f64, rng: &mut R) -> usize {
    let n = perm.len();
    if n < 2 || rate <= 0.0 {
        return 0;
    }
    let rate = rate.min(1.0);

    let mut swaps = 0;
    for i in 0..n {
        if rng.random_bool(rate) {
            let j = rng.random_range(0..n);
            perm.swap(i, j);
            swaps += 1;
        }
    }
    swaps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use std::collections::HashSet;

    fn is_valid_permutation(perm: &[usize], n: usize) -> bool {
        let set: HashSet<usize> = perm.iter().copied().collect();
        perm.len() == n && set.len() == n && perm.iter().all(|&v| v < n)
    }

    #[test]
    fn test_swap_preserves_permutation() {
        let mut rng = create_rng(42);
        for rate in [0.0, 0.1, 0.5, 1.0] {
            for _ in 0..100 {
                let mut perm: Vec<usize> = (0..10).collect();
                swap_mutation(&mut perm, rate, &mut rng);
                assert!(is_valid_permutation(&perm, 10), "invalid at rate {rate}: {perm:?}");
            }
        }
    }

    #[test]
    fn test_zero_rate_is_noop() {
        let mut rng = create_rng(42);
        let mut perm: Vec<usize> = (0..10).collect();
        let swaps = swap_mutation(&mut perm, 0.0, &mut rng);
        assert_eq!(swaps, 0);
        assert_eq!(perm, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_full_rate_fires_everywhere() {
        let mut rng = create_rng(42);
        let mut perm: Vec<usize> = (0..10).collect();
        let swaps = swap_mutation(&mut perm, 1.0, &mut rng);
        assert_eq!(swaps, 10);
        assert!(is_valid_permutation(&perm, 10));
    }

    #[test]
    fn test_single_element_untouched() {
        let mut rng = create_rng(42);
        let mut perm = vec![0];
        assert_eq!(swap_mutation(&mut perm, 1.0, &mut rng), 0);
        assert_eq!(perm, vec![0]);
    }

    #[test]
    fn test_rate_above_one_is_clamped() {
        let mut rng = create_rng(42);
        let mut perm: Vec<usize> = (0..5).collect();
        let swaps = swap_mutation(&mut perm, 3.0, &mut rng);
        assert_eq!(swaps, 5);
        assert!(is_valid_permutation(&perm, 5));
    }
}
