//! Chromosome representation: one candidate permutation plus its cached
//! fitness.
//!
//! A chromosome's genes are always a valid permutation of `{0..size-1}`.
//! Construction, crossover wrapping, and mutation all preserve or defensively
//! check this invariant.

use crate::error::{EngineError, Result};
use crate::mutation::swap_mutation;
use rand::seq::SliceRandom;
use rand::Rng;

/// External fitness seam: a deterministic, side-effect-free cost function
/// over a permutation. Lower values are better.
///
/// Blanket-implemented for closures, so `|genes: &[usize]| -> f64` works
/// directly:
///
/// ```
/// use evoperm::FitnessFunction;
///
/// let f = |genes: &[usize]| genes[0] as f64;
/// assert_eq!(f.evaluate(&[3, 0, 1, 2]), 3.0);
/// ```
pub trait FitnessFunction: Send + Sync {
    /// Computes the cost of a permutation.
    fn evaluate(&self, genes: &[usize]) -> f64;
}

impl<F> FitnessFunction for F
where
    F: Fn(&[usize]) -> f64 + Send + Sync,
{
    fn evaluate(&self, genes: &[usize]) -> f64 {
        self(genes)
    }
}

/// One candidate solution: an ordered permutation of `{0..size-1}` and its
/// lazily cached fitness.
///
/// Equality compares genes only; the fitness cache is ignored. This is what
/// the replacement step uses to detect offspring that duplicate an existing
/// member.
#[derive(Debug, Clone)]
pub struct Chromosome {
    genes: Vec<usize>,
    fitness: Option<f64>,
}

impl PartialEq for Chromosome {
    fn eq(&self, other: &Self) -> bool {
        self.genes == other.genes
    }
}

impl Chromosome {
    /// Builds a fully random chromosome: a uniform shuffle of `0..size`.
    pub fn random<R: Rng>(size: usize, rng: &mut R) -> Result<Self> {
        if size == 0 {
            return Err(EngineError::InvalidConfiguration(
                "chromosome size must be at least 1".into(),
            ));
        }
        let mut genes: Vec<usize> = (0..size).collect();
        genes.shuffle(rng);
        Ok(Self { genes, fitness: None })
    }

    /// Builds a chunk-seeded chromosome: `num_chunk` contiguous runs of the
    /// shuffled alphabet, each sorted ascending, concatenated in random run
    /// order. Any remainder that does not fit into equal-length runs stays
    /// shuffled.
    ///
    /// This biases initial diversity toward locally ordered solutions while
    /// the sequence remains globally random. `num_chunk == 0` degrades to a
    /// pure random shuffle; `num_chunk > size` is clamped to `size`.
    pub fn chunk_seeded<R: Rng>(size: usize, num_chunk: usize, rng: &mut R) -> Result<Self> {
        let mut chromosome = Self::random(size, &mut *rng)?;
        let num_chunk = num_chunk.min(size);
        if num_chunk == 0 {
            return Ok(chromosome);
        }

        let chunk_len = size / num_chunk;
        let seeded_len = num_chunk * chunk_len;

        let mut chunks: Vec<Vec<usize>> = chromosome.genes[..seeded_len]
            .chunks(chunk_len)
            .map(|chunk| {
                let mut chunk = chunk.to_vec();
                chunk.sort_unstable();
                chunk
            })
            .collect();
        chunks.shuffle(rng);

        let mut genes: Vec<usize> = chunks.into_iter().flatten().collect();
        genes.extend_from_slice(&chromosome.genes[seeded_len..]);
        chromosome.genes = genes;
        Ok(chromosome)
    }

    /// Wraps an offspring gene sequence produced by a crossover strategy.
    ///
    /// Defensively checks that `genes` is a permutation of `0..genes.len()`;
    /// a violation indicates a strategy bug and is fatal to the run.
    pub fn from_genes(genes: Vec<usize>) -> Result<Self> {
        let n = genes.len();
        if n == 0 {
            return Err(EngineError::InvariantViolation {
                context: "chromosome".into(),
                detail: "empty gene sequence".into(),
            });
        }
        let mut seen = vec![false; n];
        for &gene in &genes {
            if gene >= n {
                return Err(EngineError::InvariantViolation {
                    context: "chromosome".into(),
                    detail: format!("gene {gene} outside alphabet 0..{n}"),
                });
            }
            if seen[gene] {
                return Err(EngineError::InvariantViolation {
                    context: "chromosome".into(),
                    detail: format!("duplicate gene {gene}"),
                });
            }
            seen[gene] = true;
        }
        Ok(Self { genes, fitness: None })
    }

    /// The gene sequence.
    pub fn genes(&self) -> &[usize] {
        &self.genes
    }

    /// Number of genes.
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Always false: a chromosome holds at least one gene.
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Cached fitness, or `f64::INFINITY` (worst) when not yet evaluated.
    pub fn fitness(&self) -> f64 {
        self.fitness.unwrap_or(f64::INFINITY)
    }

    /// Cached fitness, `None` when not yet evaluated or invalidated by
    /// mutation.
    pub fn cached_fitness(&self) -> Option<f64> {
        self.fitness
    }

    /// Computes and caches fitness. Idempotent while genes are unchanged:
    /// a second call returns the cached value without invoking `f`.
    pub fn evaluate(&mut self, f: &impl FitnessFunction) -> f64 {
        match self.fitness {
            Some(value) => value,
            None => {
                let value = f.evaluate(&self.genes);
                self.fitness = Some(value);
                value
            }
        }
    }

    /// Applies swap mutation at `rate` and invalidates the fitness cache if
    /// any swap fired.
    pub fn mutate<R: Rng>(&mut self, rate: f64, rng: &mut R) {
        if swap_mutation(&mut self.genes, rate, rng) > 0 {
            self.fitness = None;
        }
    }
}
