//! Objective traits and shared value types.

/// A scalar function to minimize over a real vector.
///
/// Constraint handling, if any, must already be folded into the returned
/// value as a penalty; the optimizer treats every point inside the bounds
/// as admissible.
///
/// Any `Fn(&[f64]) -> f64 + Send + Sync` closure is an objective:
///
/// ```
/// use u_hba::hba::Objective;
///
/// let sphere = |x: &[f64]| x.iter().map(|v| v * v).sum::<f64>();
/// assert_eq!(sphere.evaluate(&[3.0, 4.0]), 25.0);
/// ```
pub trait Objective: Send + Sync {
    /// Computes the objective value at `x`. Lower is better.
    ///
    /// Must be pure: the optimizer may evaluate the same point more than
    /// once and assumes identical results.
    fn evaluate(&self, x: &[f64]) -> f64;
}

impl<F> Objective for F
where
    F: Fn(&[f64]) -> f64 + Send + Sync,
{
    fn evaluate(&self, x: &[f64]) -> f64 {
        self(x)
    }
}

/// Detailed result of a constrained objective.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstrainedEvaluation {
    /// Objective value with all penalty terms already added.
    pub value: f64,
    /// Raw constraint values `g_k(x)`.
    pub constraints: Vec<f64>,
    /// Whether each constraint is satisfied.
    pub satisfied: Vec<bool>,
}

impl ConstrainedEvaluation {
    /// Whether every constraint is satisfied.
    pub fn is_feasible(&self) -> bool {
        self.satisfied.iter().all(|&s| s)
    }
}

/// An objective that also reports its constraints.
///
/// The optimizer never looks at the constraint vector. Wrap the problem in
/// [`Scalarized`] to hand it to the optimizer, then call
/// [`evaluate_detailed`](ConstrainedObjective::evaluate_detailed) on the
/// final incumbent to inspect feasibility.
pub trait ConstrainedObjective: Send + Sync {
    fn evaluate_detailed(&self, x: &[f64]) -> ConstrainedEvaluation;
}

/// Adapter exposing only the penalized value of a [`ConstrainedObjective`].
#[derive(Debug, Clone)]
pub struct Scalarized<O>(pub O);

impl<O: ConstrainedObjective> Objective for Scalarized<O> {
    fn evaluate(&self, x: &[f64]) -> f64 {
        self.0.evaluate_detailed(x).value
    }
}

/// Position-update rule applied to the whole population in one iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// Moves scaled by intensity and a cardioid-shaped perturbation.
    Digging,
    /// Moves toward (or past) the incumbent by a random fraction of alpha.
    Honey,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Digging => write!(f, "Digging"),
            Phase::Honey => write!(f, "Honey"),
        }
    }
}

/// Strict "better than" for fitness values.
///
/// A NaN is never better than anything, and any non-NaN value beats a
/// NaN. Otherwise this is plain `<`, so ties keep the current value.
pub fn is_better(candidate: f64, current: f64) -> bool {
    if candidate.is_nan() {
        return false;
    }
    current.is_nan() || candidate < current
}
