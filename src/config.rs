//! Engine configuration.
//!
//! [`EngineConfig`] holds every parameter that controls a run. Defaults
//! match a small, general-purpose setup; `validate()` fails fast before any
//! generation runs.

use crate::crossover::Crossover;
use crate::error::{EngineError, Result};
use crate::selection::Selection;

/// Configuration for the evolutionary engine.
///
/// # Builder Pattern
///
/// ```
/// use evoperm::{Crossover, EngineConfig, Selection};
///
/// let config = EngineConfig::default()
///     .with_population_size(100)
///     .with_chromosome_size(50)
///     .with_crossover(Crossover::Pmx)
///     .with_selection(Selection::Tournament(3))
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineConfig {
    /// Number of chromosomes in the population. Must be at least 2 so that
    /// two distinct parents can be chosen.
    pub population_size: usize,

    /// Number of genes per chromosome; the alphabet is `{0..chromosome_size-1}`.
    pub chromosome_size: usize,

    /// Initial per-position swap probability, in `[0, 1]`. Decays over the
    /// run; see [`mutation_decay`](Self::mutation_decay).
    pub mutation_rate: f64,

    /// Factor applied to the mutation rate whenever the best fitness
    /// improves on the best ever seen, in `(0, 1]`. The rate never increases.
    pub mutation_decay: f64,

    /// Fraction of the initial population built as fully random shuffles,
    /// in `[0, 1]`. The remainder is chunk-seeded with increasing structure.
    pub random_fraction: f64,

    /// Number of generations to run.
    pub iterations: usize,

    /// Crossover strategy used for reproduction.
    pub crossover: Crossover,

    /// Parent-selection policy.
    pub selection: Selection,

    /// When set, offspring gene-equal to an existing member still replace a
    /// worst individual. Off by default: duplicate offspring are skipped,
    /// which can reduce the effective offspring count per generation below
    /// `population_size / 2`.
    pub allow_duplicate_offspring: bool,

    /// Scale constant carried for the caller's fitness function. The engine
    /// does not interpret it.
    pub fitness_scale: f64,

    /// Random seed for reproducibility. `None` draws a fresh seed per run.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            chromosome_size: 100,
            mutation_rate: 0.01,
            mutation_decay: 0.9,
            random_fraction: 0.3,
            iterations: 500,
            crossover: Crossover::Cycle,
            selection: Selection::default(),
            allow_duplicate_offspring: false,
            fitness_scale: 1.0,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the chromosome size.
    pub fn with_chromosome_size(mut self, n: usize) -> Self {
        self.chromosome_size = n;
        self
    }

    /// Sets the initial mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets the mutation decay factor.
    pub fn with_mutation_decay(mut self, decay: f64) -> Self {
        self.mutation_decay = decay;
        self
    }

    /// Sets the fraction of fully random initial chromosomes.
    pub fn with_random_fraction(mut self, fraction: f64) -> Self {
        self.random_fraction = fraction;
        self
    }

    /// Sets the generation count.
    pub fn with_iterations(mut self, n: usize) -> Self {
        self.iterations = n;
        self
    }

    /// Sets the crossover strategy.
    pub fn with_crossover(mut self, crossover: Crossover) -> Self {
        self.crossover = crossover;
        self
    }

    /// Sets the parent-selection policy.
    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    /// Allows offspring that duplicate an existing member to replace a
    /// worst individual anyway.
    pub fn with_allow_duplicate_offspring(mut self, allow: bool) -> Self {
        self.allow_duplicate_offspring = allow;
        self
    }

    /// Sets the opaque fitness scale constant.
    pub fn with_fitness_scale(mut self, scale: f64) -> Self {
        self.fitness_scale = scale;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration, failing fast before any generation runs.
    pub fn validate(&self) -> Result<()> {
        if self.population_size < 2 {
            return Err(EngineError::InvalidConfiguration(
                "population_size must be at least 2".into(),
            ));
        }
        if self.chromosome_size == 0 {
            return Err(EngineError::InvalidConfiguration(
                "chromosome_size must be at least 1".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(EngineError::InvalidConfiguration(format!(
                "mutation_rate must be in [0, 1], got {}",
                self.mutation_rate
            )));
        }
        if !(self.mutation_decay > 0.0 && self.mutation_decay <= 1.0) {
            return Err(EngineError::InvalidConfiguration(format!(
                "mutation_decay must be in (0, 1], got {}",
                self.mutation_decay
            )));
        }
        if !(0.0..=1.0).contains(&self.random_fraction) {
            return Err(EngineError::InvalidConfiguration(format!(
                "random_fraction must be in [0, 1], got {}",
                self.random_fraction
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.population_size, 50);
        assert_eq!(config.chromosome_size, 100);
        assert!((config.mutation_rate - 0.01).abs() < 1e-12);
        assert!((config.mutation_decay - 0.9).abs() < 1e-12);
        assert!((config.random_fraction - 0.3).abs() < 1e-12);
        assert_eq!(config.iterations, 500);
        assert_eq!(config.crossover, Crossover::Cycle);
        assert_eq!(config.selection, Selection::Uniform);
        assert!(!config.allow_duplicate_offspring);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = EngineConfig::default()
            .with_population_size(200)
            .with_chromosome_size(30)
            .with_mutation_rate(0.05)
            .with_mutation_decay(0.8)
            .with_random_fraction(0.5)
            .with_iterations(100)
            .with_crossover(Crossover::Order)
            .with_selection(Selection::Tournament(5))
            .with_allow_duplicate_offspring(true)
            .with_fitness_scale(420.0)
            .with_seed(42);

        assert_eq!(config.population_size, 200);
        assert_eq!(config.chromosome_size, 30);
        assert!((config.mutation_rate - 0.05).abs() < 1e-12);
        assert!((config.mutation_decay - 0.8).abs() < 1e-12);
        assert!((config.random_fraction - 0.5).abs() < 1e-12);
        assert_eq!(config.iterations, 100);
        assert_eq!(config.crossover, Crossover::Order);
        assert_eq!(config.selection, Selection::Tournament(5));
        assert!(config.allow_duplicate_offspring);
        assert!((config.fitness_scale - 420.0).abs() < 1e-12);
        assert_eq!(config.seed, Some(42));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_population_too_small() {
        let config = EngineConfig::default().with_population_size(1);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_chromosome_size() {
        let config = EngineConfig::default().with_chromosome_size(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_mutation_rate_out_of_range() {
        assert!(EngineConfig::default()
            .with_mutation_rate(1.5)
            .validate()
            .is_err());
        assert!(EngineConfig::default()
            .with_mutation_rate(-0.1)
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_mutation_decay_out_of_range() {
        assert!(EngineConfig::default()
            .with_mutation_decay(0.0)
            .validate()
            .is_err());
        assert!(EngineConfig::default()
            .with_mutation_decay(1.1)
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_random_fraction_out_of_range() {
        assert!(EngineConfig::default()
            .with_random_fraction(1.5)
            .validate()
            .is_err());
    }

    #[test]
    fn test_zero_iterations_is_valid() {
        assert!(EngineConfig::default().with_iterations(0).validate().is_ok());
    }

    #[test]
    fn test_crossover_name_from_config_boundary() {
        let config =
            EngineConfig::default().with_crossover("pmx".parse().unwrap());
        assert_eq!(config.crossover, Crossover::Pmx);
    }
}
