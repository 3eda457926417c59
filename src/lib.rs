//! Evolutionary optimization engine for permutation-encoded search problems.
//!
//! Evolves a population of candidate permutations over a fixed number of
//! generations, driving it toward lower fitness (minimization). The caller
//! supplies a deterministic fitness function; everything else — chromosome
//! construction, crossover, mutation, replacement — is generic over the
//! permutation encoding.
//!
//! # Key Types
//!
//! - [`Chromosome`]: one candidate permutation plus its cached fitness
//! - [`FitnessFunction`]: the external cost-function seam (closures work)
//! - [`Crossover`]: closed set of five crossover strategies (OX,
//!   position-based, uniform order-based, PMX, CX)
//! - [`Selection`]: parent-selection policy (uniform by default)
//! - [`EngineConfig`]: run parameters with builder methods and validation
//! - [`Engine`] / [`RunResult`]: the generational loop and its output
//!
//! # Example
//!
//! ```
//! use evoperm::{Crossover, Engine, EngineConfig};
//!
//! // Minimize the total jump distance between consecutive genes.
//! let fitness = |genes: &[usize]| {
//!     genes
//!         .windows(2)
//!         .map(|w| (w[0] as f64 - w[1] as f64).abs())
//!         .sum::<f64>()
//! };
//!
//! let config = EngineConfig::default()
//!     .with_population_size(30)
//!     .with_chromosome_size(12)
//!     .with_iterations(50)
//!     .with_crossover(Crossover::Order)
//!     .with_seed(42);
//!
//! let result = Engine::run(&fitness, &config).unwrap();
//! assert_eq!(result.avg_fitness_history.len(), 51);
//! println!("best tour: {:?}", result.best.genes());
//! ```
//!
//! # Determinism
//!
//! A run is single-threaded and strictly sequential; the only source of
//! randomness is the seedable RNG created in [`random`]. Two runs with the
//! same configuration and seed produce identical results bit-for-bit.

pub mod chromosome;
pub mod config;
pub mod crossover;
pub mod engine;
pub mod error;
pub mod mutation;
pub mod random;
pub mod selection;

pub use chromosome::{Chromosome, FitnessFunction};
pub use config::EngineConfig;
pub use crossover::Crossover;
pub use engine::{Engine, RunResult};
pub use error::{EngineError, Result};
pub use selection::Selection;
