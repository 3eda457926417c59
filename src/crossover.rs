//! Permutation crossover strategies.
//!
//! Five classic operators, each a pure function over two parent gene slices
//! that returns two offspring gene sequences. Every offspring is a valid
//! permutation of the shared alphabet by construction; the engine still
//! re-checks through [`Chromosome::from_genes`](crate::Chromosome::from_genes)
//! as a defensive measure.
//!
//! Parents must be permutations of `{0..n-1}` of equal length. Parent
//! selection lives in [`crate::selection`]; these functions never mutate
//! their inputs.
//!
//! # References
//!
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains" (OX)
//! - Syswerda (1991), "Schedule Optimization Using Genetic Algorithms"
//!   (position-based, uniform order-based)
//! - Goldberg & Lingle (1985), "Alleles, Loci, and the Traveling Salesman
//!   Problem" (PMX)
//! - Oliver, Smith & Holland (1987), "A Study of Permutation Crossover
//!   Operators on the Traveling Salesman Problem" (CX)

use crate::error::EngineError;
use rand::Rng;
use std::fmt;
use std::str::FromStr;

/// Closed set of crossover strategies.
///
/// Dispatch is exhaustive over the five variants; unknown strategy names are
/// rejected at the configuration boundary by the [`FromStr`] impl.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Crossover {
    /// Order crossover (OX): copy a cut segment from one parent, fill the
    /// rest in the other parent's relative order.
    Order,
    /// Position-based crossover: fix a random subset of positions from one
    /// parent, fill the rest in the other parent's relative order.
    PositionBased,
    /// Uniform order-based crossover: like position-based, but the fixed
    /// positions come from a per-position coin flip.
    UniformOrderBased,
    /// Partially matched crossover (PMX): copy a cut segment, resolve
    /// conflicts outside it through the segment's value mapping.
    Pmx,
    /// Cycle crossover (CX): alternate whole position-cycles between the
    /// parents.
    Cycle,
}

impl Crossover {
    /// All strategies, for iteration in tests and benchmarks.
    pub const ALL: [Crossover; 5] = [
        Crossover::Order,
        Crossover::PositionBased,
        Crossover::UniformOrderBased,
        Crossover::Pmx,
        Crossover::Cycle,
    ];

    /// Configuration name of the strategy.
    pub fn name(&self) -> &'static str {
        match self {
            Crossover::Order => "order",
            Crossover::PositionBased => "position_based",
            Crossover::UniformOrderBased => "uniform_order_based",
            Crossover::Pmx => "pmx",
            Crossover::Cycle => "cycle",
        }
    }

    /// Produces two offspring gene sequences from two parents.
    pub fn recombine<R: Rng>(
        &self,
        parent1: &[usize],
        parent2: &[usize],
        rng: &mut R,
    ) -> (Vec<usize>, Vec<usize>) {
        match self {
            Crossover::Order => order_crossover(parent1, parent2, rng),
            Crossover::PositionBased => position_based_crossover(parent1, parent2, rng),
            Crossover::UniformOrderBased => uniform_order_based_crossover(parent1, parent2, rng),
            Crossover::Pmx => pmx_crossover(parent1, parent2, rng),
            Crossover::Cycle => cycle_crossover(parent1, parent2),
        }
    }
}

impl fmt::Display for Crossover {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Crossover {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "order" => Ok(Crossover::Order),
            "position_based" => Ok(Crossover::PositionBased),
            "uniform_order_based" => Ok(Crossover::UniformOrderBased),
            "pmx" => Ok(Crossover::Pmx),
            "cycle" => Ok(Crossover::Cycle),
            other => Err(EngineError::InvalidConfiguration(format!(
                "unknown crossover strategy '{other}' \
                 (expected one of: order, position_based, uniform_order_based, pmx, cycle)"
            ))),
        }
    }
}

/// Order Crossover (OX).
///
/// Picks two cut points and copies the half-open segment between them from
/// parent 1 into offspring 1 at the same positions; the remaining positions
/// are filled left to right with parent 2's genes in their relative order,
/// skipping genes already copied. Offspring 2 is built symmetrically with the
/// parents swapped.
///
/// Degenerate cuts are reachable: an empty segment yields the donor parent
/// exactly, a full-span segment yields the template parent exactly.
///
/// # Panics
/// Panics if parents have different lengths or are empty.
pub fn order_crossover<R: Rng>(
    parent1: &[usize],
    parent2: &[usize],
    rng: &mut R,
) -> (Vec<usize>, Vec<usize>) {
    let n = check_parents(parent1, parent2);
    if n == 1 {
        return (parent1.to_vec(), parent2.to_vec());
    }
    let (start, end) = random_cuts(n, rng);
    (
        ox_build_child(parent1, parent2, start, end),
        ox_build_child(parent2, parent1, start, end),
    )
}

/// Build one OX child: copy `template[start..end]`, fill the rest from
/// `donor` in relative order.
fn ox_build_child(template: &[usize], donor: &[usize], start: usize, end: usize) -> Vec<usize> {
    let n = template.len();
    let mut copied = vec![false; n];
    for &value in &template[start..end] {
        copied[value] = true;
    }

    let mut fill = donor.iter().copied().filter(|&value| !copied[value]);
    (0..n)
        .map(|i| {
            if i >= start && i < end {
                template[i]
            } else {
                fill.next()
                    .expect("valid permutation: donor covers the template alphabet")
            }
        })
        .collect()
}

/// Position-Based Crossover.
///
/// Draws a fixed-size random subset of positions. Offspring 1 inherits
/// parent 1's genes at those positions; the remaining positions are filled
/// with parent 2's genes in their relative order, skipping genes already
/// placed. Offspring 2 uses the same position set with the parents swapped.
///
/// # Panics
/// Panics if parents have different lengths or are empty.
pub fn position_based_crossover<R: Rng>(
    parent1: &[usize],
    parent2: &[usize],
    rng: &mut R,
) -> (Vec<usize>, Vec<usize>) {
    let n = check_parents(parent1, parent2);
    if n == 1 {
        return (parent1.to_vec(), parent2.to_vec());
    }

    let count = rng.random_range(0..=n);
    let mut fixed = vec![false; n];
    for i in rand::seq::index::sample(rng, n, count) {
        fixed[i] = true;
    }

    (
        masked_fill(parent1, parent2, &fixed),
        masked_fill(parent2, parent1, &fixed),
    )
}

/// Uniform Order-Based Crossover.
///
/// Like [`position_based_crossover`], but the fixed positions are drawn with
/// an independent fair coin flip per position instead of a fixed-size sample.
///
/// # Panics
/// Panics if parents have different lengths or are empty.
pub fn uniform_order_based_crossover<R: Rng>(
    parent1: &[usize],
    parent2: &[usize],
    rng: &mut R,
) -> (Vec<usize>, Vec<usize>) {
    let n = check_parents(parent1, parent2);
    if n == 1 {
        return (parent1.to_vec(), parent2.to_vec());
    }

    let fixed: Vec<bool> = (0..n).map(|_| rng.random_bool(0.5)).collect();

    (
        masked_fill(parent1, parent2, &fixed),
        masked_fill(parent2, parent1, &fixed),
    )
}

/// Build a child that keeps `template` at fixed positions and fills the rest
/// from `donor` in relative order.
fn masked_fill(template: &[usize], donor: &[usize], fixed: &[bool]) -> Vec<usize> {
    let n = template.len();
    let mut placed = vec![false; n];
    for i in 0..n {
        if fixed[i] {
            placed[template[i]] = true;
        }
    }

    let mut fill = donor.iter().copied().filter(|&value| !placed[value]);
    (0..n)
        .map(|i| {
            if fixed[i] {
                template[i]
            } else {
                fill.next()
                    .expect("valid permutation: donor covers the template alphabet")
            }
        })
        .collect()
}

/// Partially Matched Crossover (PMX).
///
/// Picks two cut points and copies the segment between them from parent 1
/// into offspring 1 as-is. Each position outside the segment takes parent 2's
/// gene; when that gene already sits inside the copied segment, the mapping
/// chain is followed (the conflicting value's position in parent 1's segment
/// points to the substitute in parent 2) until a free value is found.
/// Offspring 2 is built symmetrically.
///
/// # Panics
/// Panics if parents have different lengths or are empty.
pub fn pmx_crossover<R: Rng>(
    parent1: &[usize],
    parent2: &[usize],
    rng: &mut R,
) -> (Vec<usize>, Vec<usize>) {
    let n = check_parents(parent1, parent2);
    if n == 1 {
        return (parent1.to_vec(), parent2.to_vec());
    }
    let (start, end) = random_cuts(n, rng);
    (
        pmx_build_child(parent1, parent2, start, end),
        pmx_build_child(parent2, parent1, start, end),
    )
}

/// Build one PMX child: copy `template[start..end]`, resolve the rest through
/// the segment mapping into `donor`.
fn pmx_build_child(template: &[usize], donor: &[usize], start: usize, end: usize) -> Vec<usize> {
    let n = template.len();
    let mut template_pos = vec![0usize; n];
    for (i, &value) in template.iter().enumerate() {
        template_pos[value] = i;
    }
    let mut in_segment = vec![false; n];
    for &value in &template[start..end] {
        in_segment[value] = true;
    }

    (0..n)
        .map(|i| {
            if i >= start && i < end {
                return template[i];
            }
            let mut value = donor[i];
            // Chain terminates: each hop maps to a distinct segment value,
            // and the segment is finite.
            while in_segment[value] {
                value = donor[template_pos[value]];
            }
            value
        })
        .collect()
}

/// Cycle Crossover (CX).
///
/// Identifies the position cycle starting at index 0 by following
/// `parent1[position] -> index of that value in parent2` until it closes.
/// Offspring 1 inherits parent 1's genes on the cycle and parent 2's genes
/// everywhere else; offspring 2 is the mirror image. Every gene appears
/// exactly once by construction, and no randomness is involved.
///
/// # Panics
/// Panics if parents have different lengths or are empty.
pub fn cycle_crossover(parent1: &[usize], parent2: &[usize]) -> (Vec<usize>, Vec<usize>) {
    let n = check_parents(parent1, parent2);

    let mut parent2_pos = vec![0usize; n];
    for (i, &value) in parent2.iter().enumerate() {
        parent2_pos[value] = i;
    }

    let mut in_cycle = vec![false; n];
    let mut i = 0;
    loop {
        in_cycle[i] = true;
        i = parent2_pos[parent1[i]];
        if i == 0 {
            break;
        }
    }

    let child1 = (0..n)
        .map(|i| if in_cycle[i] { parent1[i] } else { parent2[i] })
        .collect();
    let child2 = (0..n)
        .map(|i| if in_cycle[i] { parent2[i] } else { parent1[i] })
        .collect();
    (child1, child2)
}

/// Common precondition checks; returns the shared length.
fn check_parents(parent1: &[usize], parent2: &[usize]) -> usize {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");
    assert!(n > 0, "parents must not be empty");
    debug_assert!(
        parent1.iter().all(|&v| v < n) && parent2.iter().all(|&v| v < n),
        "parents must be permutations of 0..n"
    );
    n
}

/// Two cut points in `0..=n`, ordered, interpreted as a half-open segment.
/// Both the empty segment and the full span are reachable.
fn random_cuts<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    let a = rng.random_range(0..=n);
    let b = rng.random_range(0..=n);
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
