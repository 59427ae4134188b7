//! Search operators: density factor, intensity and the two update rules.
//!
//! # Draw order
//!
//! Within one iteration the random stream is consumed as:
//!
//! 1. intensity: the index pair, then `r5`
//! 2. phase coin
//! 3. per individual, in index order: `r2, r3, r4, F` (digging) or
//!    `r7, F` (honey)
//!
//! Changing this order changes every seeded run.
//!
//! # Reference
//!
//! Hashim, F. A., Houssein, E. H., Hussain, K., Mabrouk, M. S., & Al-Atabany, W.
//! (2022). "Honey Badger Algorithm: New metaheuristic algorithm for solving
//! optimization problems", *Mathematics and Computers in Simulation* 192, 84-110.

use std::f64::consts::PI;

use super::types::Phase;
use crate::random::RandomSource;

/// Floor substituted for a zero distance to the incumbent.
pub const DISTANCE_FLOOR: f64 = 1e-12;

/// Density factor `alpha(t) = C * exp(-t / max_iter)`.
///
/// Only meaningful for `t < max_iter`, which always holds when an
/// iteration is actually performed.
pub fn density_factor(c: f64, iteration: usize, max_iter: usize) -> f64 {
    c * (-(iteration as f64) / max_iter as f64).exp()
}

/// Squared Euclidean distance.
pub fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

/// Per-individual intensity for one iteration.
///
/// The source strength `S` (squared distance between two distinct random
/// members) and the scalar `r5` are drawn once and shared by every
/// individual; only the distance to the incumbent varies.
pub fn intensity(population: &[Vec<f64>], best: &[f64], rng: &mut RandomSource) -> Vec<f64> {
    let (i1, i2) = rng.distinct_pair(population.len());
    let source = squared_distance(&population[i1], &population[i2]);
    let r5 = rng.uniform();

    population
        .iter()
        .map(|x| {
            let mut d = squared_distance(best, x).sqrt();
            if d == 0.0 {
                d = DISTANCE_FLOOR;
            }
            r5 * source / (4.0 * PI * d * d)
        })
        .collect()
}

/// Picks the update rule for the whole population.
pub fn select_phase(rng: &mut RandomSource) -> Phase {
    if rng.coin() {
        Phase::Digging
    } else {
        Phase::Honey
    }
}

/// Digging move for one individual.
///
/// `new = best + F*beta*I*best + F*r2*alpha*d*|cos(2*pi*r3) * (1 - cos(2*pi*r4))|`
/// with `d = best - x`.
pub fn dig(
    x: &[f64],
    best: &[f64],
    alpha: f64,
    beta: f64,
    intensity: f64,
    rng: &mut RandomSource,
) -> Vec<f64> {
    let r2 = rng.uniform();
    let r3 = rng.uniform();
    let r4 = rng.uniform();
    let flag = rng.sign();

    let shape = ((2.0 * PI * r3).cos() * (1.0 - (2.0 * PI * r4).cos())).abs();
    best.iter()
        .zip(x)
        .map(|(&b, &xi)| {
            let d = b - xi;
            b + flag * beta * intensity * b + flag * r2 * alpha * d * shape
        })
        .collect()
}

/// Honey move for one individual: `new = best + F*r7*alpha*(best - x)`.
pub fn honey(x: &[f64], best: &[f64], alpha: f64, rng: &mut RandomSource) -> Vec<f64> {
    let r7 = rng.uniform();
    let flag = rng.sign();

    best.iter()
        .zip(x)
        .map(|(&b, &xi)| b + flag * r7 * alpha * (b - xi))
        .collect()
}
