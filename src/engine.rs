//! The generational evolution loop.
//!
//! [`Engine::run`] orchestrates the complete process: population
//! initialization → {adaptive rate decay → reproduction → replacement →
//! mutation → re-sort} per generation → best chromosome and fitness history.
//!
//! The loop is single-threaded and strictly sequential; with a fixed seed a
//! run is reproducible bit-for-bit.

use crate::chromosome::{Chromosome, FitnessFunction};
use crate::config::EngineConfig;
use crate::error::Result;
use crate::random::create_rng;
use log::{debug, trace};

/// Result of an evolution run.
#[derive(Debug, Clone)]
pub struct RunResult {
    /// The best chromosome found during the entire run.
    pub best: Chromosome,

    /// Best fitness value (same as `best.fitness()`).
    pub best_fitness: f64,

    /// Population-average fitness per generation, including the initial
    /// population: length `iterations + 1`.
    pub avg_fitness_history: Vec<f64>,

    /// Best-so-far fitness per generation, non-increasing by construction:
    /// length `iterations + 1`.
    pub best_fitness_history: Vec<f64>,

    /// Number of generations executed.
    pub generations: usize,

    /// Mutation rate after the final decay step.
    pub final_mutation_rate: f64,
}

/// Executes the evolutionary loop.
///
/// # Usage
///
/// ```
/// use evoperm::{Crossover, Engine, EngineConfig};
///
/// let fitness = |genes: &[usize]| {
///     genes
///         .windows(2)
///         .map(|w| (w[0] as f64 - w[1] as f64).abs())
///         .sum::<f64>()
/// };
///
/// let config = EngineConfig::default()
///     .with_population_size(10)
///     .with_chromosome_size(5)
///     .with_iterations(20)
///     .with_crossover(Crossover::Cycle)
///     .with_seed(42);
///
/// let result = Engine::run(&fitness, &config).unwrap();
/// assert_eq!(result.avg_fitness_history.len(), 21);
/// ```
pub struct Engine;

impl Engine {
    /// Runs the evolution and returns the best chromosome with the fitness
    /// history.
    ///
    /// Fails with `InvalidConfiguration` before the first generation when the
    /// configuration is inconsistent, and with `InvariantViolation` if a
    /// crossover strategy ever emits a non-permutation (a strategy bug; the
    /// run aborts with the strategy and parent indices in the error).
    pub fn run<F: FitnessFunction>(fitness: &F, config: &EngineConfig) -> Result<RunResult> {
        config.validate()?;
        let mut rng = create_rng(config.seed.unwrap_or_else(rand::random));

        // Initialization: a random slice of the population, then
        // chunk-seeded chromosomes with increasing structure.
        let num_random = (config.population_size as f64 * config.random_fraction) as usize;
        let mut population = Vec::with_capacity(config.population_size);
        for _ in 0..num_random {
            population.push(Chromosome::random(config.chromosome_size, &mut rng)?);
        }
        for i in 0..config.population_size - num_random {
            population.push(Chromosome::chunk_seeded(
                config.chromosome_size,
                i + 1,
                &mut rng,
            )?);
        }
        for c in &mut population {
            c.evaluate(fitness);
        }
        sort_by_fitness(&mut population);

        let mut best = population[0].clone();
        let mut avg_fitness_history = Vec::with_capacity(config.iterations + 1);
        let mut best_fitness_history = Vec::with_capacity(config.iterations + 1);
        avg_fitness_history.push(average_fitness(&population));
        best_fitness_history.push(best.fitness());

        debug!(
            "initialized population: size={} chromosome_size={} crossover={} avg_fitness={:.4}",
            config.population_size,
            config.chromosome_size,
            config.crossover,
            avg_fitness_history[0]
        );

        let mut mutation_rate = config.mutation_rate;
        let mut min_fitness = f64::INFINITY;

        for generation in 0..config.iterations {
            // Adaptive decay: mutation pressure shrinks whenever the current
            // best improves on the best ever seen. Never increases.
            let current_best = population[0].fitness();
            if current_best < min_fitness {
                mutation_rate *= config.mutation_decay;
                min_fitness = current_best;
            }

            // Reproduction: population_size / 2 recombinations, each yielding
            // two offspring.
            let mut offspring = Vec::with_capacity(config.population_size);
            for _ in 0..config.population_size / 2 {
                let i = config.selection.select(&population, &mut rng);
                let j = config.selection.select(&population, &mut rng);
                let (genes1, genes2) =
                    config
                        .crossover
                        .recombine(population[i].genes(), population[j].genes(), &mut rng);
                for genes in [genes1, genes2] {
                    let mut child = Chromosome::from_genes(genes).map_err(|e| {
                        e.with_context(format!(
                            "{} crossover of parents #{i} and #{j}",
                            config.crossover
                        ))
                    })?;
                    child.evaluate(fitness);
                    offspring.push(child);
                }
            }

            population =
                merge_replacement(population, offspring, config.allow_duplicate_offspring);

            for c in &mut population {
                c.mutate(mutation_rate, &mut rng);
                c.evaluate(fitness);
            }

            sort_by_fitness(&mut population);

            if population[0].fitness() < best.fitness() {
                best = population[0].clone();
            }
            let avg = average_fitness(&population);
            avg_fitness_history.push(avg);
            best_fitness_history.push(best.fitness());

            trace!(
                "generation {}: best={:.4} avg={:.4} mutation_rate={:.6}",
                generation + 1,
                best.fitness(),
                avg,
                mutation_rate
            );
        }

        debug!(
            "run complete: generations={} best_fitness={:.4} final_mutation_rate={:.6}",
            config.iterations,
            best.fitness(),
            mutation_rate
        );

        Ok(RunResult {
            best_fitness: best.fitness(),
            best,
            avg_fitness_history,
            best_fitness_history,
            generations: config.iterations,
            final_mutation_rate: mutation_rate,
        })
    }
}

/// Sorts ascending by fitness; index 0 is the best (lowest-cost) member.
fn sort_by_fitness(population: &mut [Chromosome]) {
    population.sort_by(|a, b| {
        a.fitness()
            .partial_cmp(&b.fitness())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

fn average_fitness(population: &[Chromosome]) -> f64 {
    population.iter().map(|c| c.fitness()).sum::<f64>() / population.len() as f64
}

/// Elitist-leaning replacement as a single merge: accepted offspring displace
/// the worst parents, the best parents survive.
///
/// `parents` must be sorted ascending by fitness. Offspring gene-equal to an
/// existing parent are skipped unless `allow_duplicates` is set, so the
/// effective offspring count can fall below `offspring.len()`. The returned
/// population has the same size as `parents` and is not yet sorted.
fn merge_replacement(
    parents: Vec<Chromosome>,
    offspring: Vec<Chromosome>,
    allow_duplicates: bool,
) -> Vec<Chromosome> {
    let size = parents.len();

    let mut next: Vec<Chromosome> = offspring
        .into_iter()
        .filter(|child| allow_duplicates || !parents.contains(child))
        .collect();
    next.truncate(size);

    let survivors = size - next.len();
    next.extend(parents.into_iter().take(survivors));
    next
}
