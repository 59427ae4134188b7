//! Population state, incumbent tracking and elitist selection.

use super::bounds::Bounds;
use super::types::{is_better, Objective};
use crate::error::{HbaError, Result};
use crate::random::RandomSource;

/// Candidates, their fitness, the incumbent and the convergence trace.
///
/// `fitness[i]` always holds the objective value of `candidates[i]`.
/// The incumbent is a copy of the best candidate ever evaluated, so it
/// survives even when its source is replaced.
#[derive(Debug, Clone)]
pub struct Population {
    candidates: Vec<Vec<f64>>,
    fitness: Vec<f64>,
    best: Vec<f64>,
    best_fitness: f64,
    convergence: Vec<f64>,
    evaluations: usize,
}

impl Population {
    /// Draws `pop_size` candidates uniformly inside `bounds`.
    ///
    /// Fitness is unknown until [`evaluate`](Self::evaluate) runs; the
    /// incumbent and the trace start empty.
    ///
    /// Fails with [`HbaError::InvalidConfiguration`] when `pop_size < 2`,
    /// `dim < 1` or the bounds are empty, and with
    /// [`HbaError::DimensionMismatch`] when per-dimension bounds disagree
    /// with `dim`. Nothing is drawn from `rng` on failure.
    pub fn initialize(
        pop_size: usize,
        dim: usize,
        bounds: &Bounds,
        rng: &mut RandomSource,
    ) -> Result<Self> {
        if pop_size < 2 {
            return Err(HbaError::InvalidConfiguration(format!(
                "pop_size must be at least 2, got {pop_size}"
            )));
        }
        bounds.validate(dim)?;
        Ok(Self::draw(pop_size, dim, bounds, rng))
    }

    /// [`initialize`](Self::initialize) for arguments already validated.
    pub(crate) fn draw(pop_size: usize, dim: usize, bounds: &Bounds, rng: &mut RandomSource) -> Self {
        let candidates = (0..pop_size).map(|_| bounds.sample(dim, rng)).collect();
        Self {
            candidates,
            fitness: vec![f64::INFINITY; pop_size],
            best: Vec::new(),
            best_fitness: f64::INFINITY,
            convergence: Vec::with_capacity(1),
            evaluations: 0,
        }
    }

    /// Evaluates every candidate once and updates the incumbent.
    pub fn evaluate<O: Objective + ?Sized>(&mut self, objective: &O) {
        self.fitness = self
            .candidates
            .iter()
            .map(|x| objective.evaluate(x))
            .collect();
        self.evaluations += self.candidates.len();
        self.update_incumbent();
    }

    /// Installs a freshly generated population and evaluates it.
    ///
    /// Returns the displaced candidates and their fitness, ready for
    /// [`revert_worse`](Self::revert_worse).
    pub(crate) fn replace<O: Objective + ?Sized>(
        &mut self,
        candidates: Vec<Vec<f64>>,
        objective: &O,
    ) -> (Vec<Vec<f64>>, Vec<f64>) {
        debug_assert_eq!(candidates.len(), self.candidates.len());
        let old = std::mem::replace(&mut self.candidates, candidates);
        let old_fitness = self.fitness.clone();
        self.evaluate(objective);
        (old, old_fitness)
    }

    /// Restores each predecessor whose fitness is strictly better than
    /// its replacement. Decisions are made per index.
    ///
    /// The predecessor fitness comes from the previous evaluation instead
    /// of a second objective call; for a pure objective the values are
    /// identical. Returns the number of reverted individuals.
    pub(crate) fn revert_worse(&mut self, old: Vec<Vec<f64>>, old_fitness: Vec<f64>) -> usize {
        let mut reverted = 0;
        let slots = self.candidates.iter_mut().zip(self.fitness.iter_mut());
        for ((cur, cur_f), (x, f)) in slots.zip(old.into_iter().zip(old_fitness)) {
            if is_better(f, *cur_f) {
                *cur = x;
                *cur_f = f;
                reverted += 1;
            }
        }
        reverted
    }

    /// Appends the current incumbent fitness to the convergence trace.
    pub fn record(&mut self) {
        self.convergence.push(self.best_fitness);
    }

    /// Strict-improvement incumbent update; ties keep the earlier find.
    fn update_incumbent(&mut self) {
        let mut idx = 0;
        for i in 1..self.fitness.len() {
            if is_better(self.fitness[i], self.fitness[idx]) {
                idx = i;
            }
        }
        if self.best.is_empty() || is_better(self.fitness[idx], self.best_fitness) {
            self.best = self.candidates[idx].clone();
            self.best_fitness = self.fitness[idx];
        }
    }

    pub fn candidates(&self) -> &[Vec<f64>] {
        &self.candidates
    }

    pub fn fitness(&self) -> &[f64] {
        &self.fitness
    }

    /// Best candidate seen so far. Empty before the first evaluation.
    pub fn best(&self) -> &[f64] {
        &self.best
    }

    pub fn best_fitness(&self) -> f64 {
        self.best_fitness
    }

    pub fn convergence(&self) -> &[f64] {
        &self.convergence
    }

    /// Total objective calls made for this population.
    pub fn evaluations(&self) -> usize {
        self.evaluations
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sphere(x: &[f64]) -> f64 {
        x.iter().map(|v| v * v).sum()
    }

    fn fixed(candidates: Vec<Vec<f64>>) -> Population {
        let n = candidates.len();
        Population {
            candidates,
            fitness: vec![f64::INFINITY; n],
            best: Vec::new(),
            best_fitness: f64::INFINITY,
            convergence: Vec::new(),
            evaluations: 0,
        }
    }

    #[test]
    fn test_initialize_shape_and_containment() {
        let mut rng = RandomSource::from_seed(42);
        let bounds = Bounds::uniform(-5.0, 5.0);
        let pop = Population::initialize(10, 3, &bounds, &mut rng).unwrap();
        assert_eq!(pop.len(), 10);
        assert!(pop.candidates().iter().all(|x| x.len() == 3));
        assert!(pop.candidates().iter().all(|x| bounds.contains(x)));
        assert!(pop.best().is_empty());
        assert!(pop.convergence().is_empty());
    }

    #[test]
    fn test_initialize_rejects_small_population() {
        let mut rng = RandomSource::from_seed(1);
        for n in [0, 1] {
            let err = Population::initialize(n, 2, &Bounds::uniform(-1.0, 1.0), &mut rng).unwrap_err();
            assert!(matches!(err, HbaError::InvalidConfiguration(_)));
        }
    }

    #[test]
    fn test_initialize_rejects_zero_dimension() {
        let mut rng = RandomSource::from_seed(1);
        let err = Population::initialize(3, 0, &Bounds::uniform(-1.0, 1.0), &mut rng).unwrap_err();
        assert!(matches!(err, HbaError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_initialize_rejects_empty_bounds() {
        let mut rng = RandomSource::from_seed(1);
        for bounds in [Bounds::uniform(1.0, 1.0), Bounds::uniform(2.0, 1.0)] {
            let err = Population::initialize(3, 2, &bounds, &mut rng).unwrap_err();
            assert!(matches!(err, HbaError::InvalidConfiguration(_)));
        }
    }

    #[test]
    fn test_initialize_rejects_bounds_of_wrong_length() {
        let mut rng = RandomSource::from_seed(1);
        let bounds = Bounds::per_dimension(vec![(0.0, 1.0), (0.0, 1.0)]);
        let err = Population::initialize(3, 5, &bounds, &mut rng).unwrap_err();
        assert_eq!(err, HbaError::DimensionMismatch { bounds: 2, dim: 5 });
    }

    #[test]
    fn test_initialize_failure_draws_nothing() {
        let mut rng = RandomSource::from_seed(6);
        let mut fresh = RandomSource::from_seed(6);
        assert!(Population::initialize(1, 2, &Bounds::uniform(-1.0, 1.0), &mut rng).is_err());
        assert_eq!(rng.uniform(), fresh.uniform());
    }

    #[test]
    fn test_revert_worse_ignores_extra_predecessors() {
        let mut pop = fixed(vec![vec![2.0], vec![2.0]]);
        pop.evaluate(&sphere);
        let old = vec![vec![1.0], vec![3.0], vec![0.0]];
        let reverted = pop.revert_worse(old, vec![1.0, 9.0, 0.0]);
        assert_eq!(reverted, 1);
        assert_eq!(pop.len(), 2);
        assert_eq!(pop.candidates(), &[vec![1.0], vec![2.0]]);
    }

    #[test]
    fn test_evaluate_sets_incumbent() {
        let mut pop = fixed(vec![vec![3.0], vec![-1.0], vec![2.0]]);
        pop.evaluate(&sphere);
        assert_eq!(pop.fitness(), &[9.0, 1.0, 4.0]);
        assert_eq!(pop.best(), &[-1.0]);
        assert_eq!(pop.best_fitness(), 1.0);
        assert_eq!(pop.evaluations(), 3);
    }

    #[test]
    fn test_incumbent_ties_keep_first() {
        let mut pop = fixed(vec![vec![2.0], vec![-1.0], vec![1.0]]);
        pop.evaluate(&sphere);
        assert_eq!(pop.best(), &[-1.0]);

        let (old, old_fitness) = pop.replace(vec![vec![1.0], vec![-1.0], vec![3.0]], &sphere);
        assert_eq!(old_fitness, vec![4.0, 1.0, 1.0]);
        assert_eq!(old.len(), 3);
        assert_eq!(pop.best(), &[-1.0]);
    }

    #[test]
    fn test_incumbent_survives_worse_population() {
        let mut pop = fixed(vec![vec![0.5], vec![2.0]]);
        pop.evaluate(&sphere);
        pop.replace(vec![vec![3.0], vec![4.0]], &sphere);
        assert_eq!(pop.best(), &[0.5]);
        assert_eq!(pop.best_fitness(), 0.25);
    }

    #[test]
    fn test_revert_worse_is_per_individual() {
        let mut pop = fixed(vec![vec![1.0], vec![1.0], vec![1.0]]);
        pop.evaluate(&sphere);
        let (old, old_fitness) = pop.replace(vec![vec![2.0], vec![0.5], vec![1.0]], &sphere);
        let reverted = pop.revert_worse(old, old_fitness);

        assert_eq!(reverted, 1);
        assert_eq!(pop.candidates(), &[vec![1.0], vec![0.5], vec![1.0]]);
        assert_eq!(pop.fitness(), &[1.0, 0.25, 1.0]);
    }

    #[test]
    fn test_nan_never_becomes_incumbent() {
        let objective = |x: &[f64]| if x[0] > 0.0 { f64::NAN } else { x[0] * x[0] };
        let mut pop = fixed(vec![vec![1.0], vec![-2.0]]);
        pop.evaluate(&objective);
        assert_eq!(pop.best_fitness(), 4.0);

        pop.replace(vec![vec![0.1], vec![0.2]], &objective);
        assert_eq!(pop.best_fitness(), 4.0);
        assert_eq!(pop.best(), &[-2.0]);
    }

    #[test]
    fn test_finite_replaces_nan_incumbent() {
        let objective = |x: &[f64]| if x[0] > 0.0 { f64::NAN } else { x[0] * x[0] };
        let mut pop = fixed(vec![vec![1.0], vec![2.0]]);
        pop.evaluate(&objective);
        assert!(pop.best_fitness().is_nan());
        assert_eq!(pop.best(), &[1.0]);

        pop.replace(vec![vec![-3.0], vec![2.0]], &objective);
        assert_eq!(pop.best_fitness(), 9.0);
    }

    #[test]
    fn test_revert_prefers_finite_over_nan() {
        let objective = |x: &[f64]| if x[0] > 0.0 { f64::NAN } else { x[0] * x[0] };
        let mut pop = fixed(vec![vec![-1.0], vec![-2.0]]);
        pop.evaluate(&objective);
        let (old, old_fitness) = pop.replace(vec![vec![1.0], vec![-0.5]], &objective);
        pop.revert_worse(old, old_fitness);
        assert_eq!(pop.candidates(), &[vec![-1.0], vec![-0.5]]);
        assert!(pop.fitness().iter().all(|f| f.is_finite()));
    }

    #[test]
    fn test_record() {
        let mut pop = fixed(vec![vec![3.0], vec![1.0]]);
        pop.evaluate(&sphere);
        pop.record();
        pop.replace(vec![vec![0.5], vec![2.0]], &sphere);
        pop.record();
        assert_eq!(pop.convergence(), &[1.0, 0.25]);
    }
}
