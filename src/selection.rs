//! Parent-selection policies.
//!
//! Selection determines which population members become parents for
//! crossover. The default [`Uniform`](Selection::Uniform) policy gives every
//! member an equal chance; the others add selection pressure toward fitter
//! individuals.
//!
//! All policies assume minimization (lower fitness = better) and only read
//! the population.

use crate::chromosome::Chromosome;
use rand::Rng;

/// Strategy for choosing a parent index from the population.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Selection {
    /// Uniform random choice among all members, no fitness bias.
    Uniform,

    /// Tournament selection: pick `k` members at random, keep the best.
    /// Higher `k` means stronger selection pressure.
    Tournament(usize),

    /// Fitness-proportionate (roulette wheel) selection, with inverse
    /// fitness weighting since lower is better.
    Roulette,

    /// Rank-based selection: weight is proportional to rank position
    /// rather than raw fitness, avoiding scaling problems when fitness
    /// variance is high.
    Rank,
}

impl Default for Selection {
    fn default() -> Self {
        Selection::Uniform
    }
}

impl Selection {
    /// Selects a parent index from `population`.
    ///
    /// # Panics
    /// Panics if `population` is empty.
    pub fn select<R: Rng>(&self, population: &[Chromosome], rng: &mut R) -> usize {
        assert!(!population.is_empty(), "cannot select from empty population");

        match self {
            Selection::Uniform => rng.random_range(0..population.len()),
            Selection::Tournament(k) => tournament(population, *k, rng),
            Selection::Roulette => roulette(population, rng),
            Selection::Rank => rank(population, rng),
        }
    }
}

fn tournament<R: Rng>(population: &[Chromosome], k: usize, rng: &mut R) -> usize {
    let k = k.max(1);
    let n = population.len();

    let mut best_idx = rng.random_range(0..n);
    for _ in 1..k {
        let idx = rng.random_range(0..n);
        if population[idx].fitness() < population[best_idx].fitness() {
            best_idx = idx;
        }
    }
    best_idx
}

/// Roulette wheel with inverse fitness transformation: lower fitness gets a
/// higher weight.
fn roulette<R: Rng>(population: &[Chromosome], rng: &mut R) -> usize {
    let n = population.len();
    if n == 1 {
        return 0;
    }

    let fitnesses: Vec<f64> = population.iter().map(|c| c.fitness()).collect();
    let max_fitness = fitnesses.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    let epsilon = 1e-10;
    let weights: Vec<f64> = fitnesses
        .iter()
        .map(|&f| (max_fitness - f + epsilon).max(epsilon))
        .collect();

    let total: f64 = weights.iter().sum();
    if !total.is_finite() || total <= 0.0 {
        return rng.random_range(0..n);
    }

    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (i, &w) in weights.iter().enumerate() {
        cumulative += w;
        if cumulative > threshold {
            return i;
        }
    }

    n - 1 // floating-point fallback
}

/// Linear rank weighting: the best rank gets weight `n`, the worst weight 1.
fn rank<R: Rng>(population: &[Chromosome], rng: &mut R) -> usize {
    let n = population.len();
    if n == 1 {
        return 0;
    }

    let mut indexed: Vec<(usize, f64)> = population
        .iter()
        .enumerate()
        .map(|(i, c)| (i, c.fitness()))
        .collect();
    indexed.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

    let total: f64 = (n * (n + 1)) as f64 / 2.0;
    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;

    for (rank, &(original_idx, _)) in indexed.iter().enumerate() {
        cumulative += (n - rank) as f64;
        if cumulative > threshold {
            return original_idx;
        }
    }

    indexed.last().expect("population has n >= 2 members").0 // fallback
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    /// Builds a population whose fitness equals the first gene, so member k
    /// (rotation by k) has fitness k.
    fn make_population(n: usize) -> Vec<Chromosome> {
        let fitness = |genes: &[usize]| genes[0] as f64;
        (0..n)
            .map(|k| {
                let genes: Vec<usize> = (0..n).map(|i| (i + k) % n).collect();
                let mut c = Chromosome::from_genes(genes).unwrap();
                c.evaluate(&fitness);
                c
            })
            .collect()
    }

    fn selection_counts(sel: Selection, pop: &[Chromosome], trials: usize) -> Vec<u32> {
        let mut rng = create_rng(42);
        let mut counts = vec![0u32; pop.len()];
        for _ in 0..trials {
            counts[sel.select(pop, &mut rng)] += 1;
        }
        counts
    }

    #[test]
    fn test_uniform_is_roughly_uniform() {
        let pop = make_population(4);
        let counts = selection_counts(Selection::Uniform, &pop, 10_000);
        for &c in &counts {
            assert!(c > 2000, "expected roughly uniform, got {counts:?}");
        }
    }

    #[test]
    fn test_tournament_favors_best() {
        let pop = make_population(4);
        let counts = selection_counts(Selection::Tournament(4), &pop, 10_000);
        // Member 0 has the lowest fitness and should dominate.
        assert!(
            counts[0] > 6000,
            "expected best selected >60% of the time, got {counts:?}"
        );
    }

    #[test]
    fn test_tournament_size_1_is_uniform() {
        let pop = make_population(4);
        let counts = selection_counts(Selection::Tournament(1), &pop, 10_000);
        for &c in &counts {
            assert!(c > 1500, "expected uniform, got {counts:?}");
        }
    }

    #[test]
    fn test_roulette_favors_best() {
        let pop = make_population(4);
        let counts = selection_counts(Selection::Roulette, &pop, 10_000);
        assert!(
            counts[0] > counts[3],
            "best should be selected more often: {counts:?}"
        );
    }

    #[test]
    fn test_rank_favors_best() {
        let pop = make_population(4);
        let counts = selection_counts(Selection::Rank, &pop, 10_000);
        assert!(
            counts[0] > counts[3],
            "best should be selected more often: {counts:?}"
        );
    }

    #[test]
    fn test_single_member_population() {
        let pop = make_population(1);
        let mut rng = create_rng(42);
        for sel in [
            Selection::Uniform,
            Selection::Tournament(3),
            Selection::Roulette,
            Selection::Rank,
        ] {
            assert_eq!(sel.select(&pop, &mut rng), 0);
        }
    }

    #[test]
    #[should_panic(expected = "cannot select from empty population")]
    fn test_empty_population_panics() {
        let pop: Vec<Chromosome> = vec![];
        let mut rng = create_rng(42);
        Selection::Uniform.select(&pop, &mut rng);
    }
}
