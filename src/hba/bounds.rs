//! Box constraints on the search space.

use crate::error::{HbaError, Result};
use crate::random::RandomSource;

/// Lower/upper limits for every coordinate of a candidate.
///
/// `Uniform` applies one pair to all dimensions. `PerDimension` carries one
/// pair per coordinate and is the right choice whenever the variables of a
/// problem live on different scales.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Bounds {
    Uniform { lower: f64, upper: f64 },
    PerDimension(Vec<(f64, f64)>),
}

impl Bounds {
    pub fn uniform(lower: f64, upper: f64) -> Self {
        Bounds::Uniform { lower, upper }
    }

    pub fn per_dimension(pairs: Vec<(f64, f64)>) -> Self {
        Bounds::PerDimension(pairs)
    }

    /// Folds per-dimension pairs into one `(min(lowers), max(uppers))` pair.
    ///
    /// This widens the box for every dimension whose own range is narrower
    /// than the extremes, so candidates may be sampled outside their
    /// legitimate range. Prefer [`Bounds::PerDimension`].
    pub fn collapse(pairs: &[(f64, f64)]) -> Self {
        let lower = pairs.iter().map(|p| p.0).fold(f64::INFINITY, f64::min);
        let upper = pairs.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);
        tracing::warn!(
            dims = pairs.len(),
            lower,
            upper,
            "collapsing per-dimension bounds into a single uniform pair"
        );
        Bounds::Uniform { lower, upper }
    }

    /// Checks the bounds against a problem dimension.
    pub fn validate(&self, dim: usize) -> Result<()> {
        if dim < 1 {
            return Err(HbaError::InvalidConfiguration(
                "dimension must be at least 1".into(),
            ));
        }
        match self {
            Bounds::Uniform { lower, upper } => check_pair(0, *lower, *upper),
            Bounds::PerDimension(pairs) => {
                if pairs.len() != dim {
                    return Err(HbaError::DimensionMismatch {
                        bounds: pairs.len(),
                        dim,
                    });
                }
                pairs
                    .iter()
                    .enumerate()
                    .try_for_each(|(j, &(lo, hi))| check_pair(j, lo, hi))
            }
        }
    }

    /// Limits for coordinate `j`.
    pub fn get(&self, j: usize) -> (f64, f64) {
        match self {
            Bounds::Uniform { lower, upper } => (*lower, *upper),
            Bounds::PerDimension(pairs) => pairs[j],
        }
    }

    /// Draws a point uniformly inside the box.
    pub fn sample(&self, dim: usize, rng: &mut RandomSource) -> Vec<f64> {
        match self {
            Bounds::Uniform { lower, upper } => rng.uniform_range_vec(dim, *lower, *upper),
            Bounds::PerDimension(pairs) => pairs
                .iter()
                .map(|&(lo, hi)| rng.uniform_range(lo, hi))
                .collect(),
        }
    }

    /// Clamps every coordinate of `x` into the box.
    ///
    /// A NaN coordinate is mapped to its lower limit.
    pub fn clip(&self, x: &mut [f64]) {
        for (j, v) in x.iter_mut().enumerate() {
            let (lo, hi) = self.get(j);
            *v = v.max(lo).min(hi);
        }
    }

    /// Whether every coordinate of `x` lies inside the box.
    pub fn contains(&self, x: &[f64]) -> bool {
        x.iter().enumerate().all(|(j, &v)| {
            let (lo, hi) = self.get(j);
            lo <= v && v <= hi
        })
    }
}

fn check_pair(j: usize, lower: f64, upper: f64) -> Result<()> {
    if !(lower.is_finite() && upper.is_finite()) {
        return Err(HbaError::InvalidConfiguration(format!(
            "bounds for dimension {j} must be finite, got ({lower}, {upper})"
        )));
    }
    if lower >= upper {
        return Err(HbaError::InvalidConfiguration(format!(
            "lower bound must be below upper bound for dimension {j}, got ({lower}, {upper})"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_uniform() {
        assert!(Bounds::uniform(-5.0, 5.0).validate(3).is_ok());
        assert!(Bounds::uniform(5.0, 5.0).validate(3).is_err());
        assert!(Bounds::uniform(6.0, 5.0).validate(3).is_err());
        assert!(Bounds::uniform(f64::NEG_INFINITY, 5.0).validate(3).is_err());
        assert!(Bounds::uniform(-5.0, 5.0).validate(0).is_err());
    }

    #[test]
    fn test_validate_per_dimension() {
        let b = Bounds::per_dimension(vec![(0.05, 2.0), (0.25, 1.3), (2.0, 15.0)]);
        assert!(b.validate(3).is_ok());
        assert_eq!(
            b.validate(2),
            Err(HbaError::DimensionMismatch {
                bounds: 3,
                dim: 2
            })
        );

        let bad = Bounds::per_dimension(vec![(0.0, 1.0), (2.0, 1.0)]);
        assert!(matches!(
            bad.validate(2),
            Err(HbaError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_clip() {
        let b = Bounds::per_dimension(vec![(0.0, 1.0), (-2.0, 2.0)]);
        let mut x = vec![1.5, -3.0];
        b.clip(&mut x);
        assert_eq!(x, vec![1.0, -2.0]);

        let mut y = vec![f64::NAN, 0.5];
        b.clip(&mut y);
        assert_eq!(y, vec![0.0, 0.5]);
        assert!(b.contains(&y));
    }

    #[test]
    fn test_sample_inside() {
        let mut rng = RandomSource::from_seed(9);
        let b = Bounds::per_dimension(vec![(0.05, 2.0), (0.25, 1.3), (2.0, 15.0)]);
        for _ in 0..200 {
            let x = b.sample(3, &mut rng);
            assert_eq!(x.len(), 3);
            assert!(b.contains(&x));
        }
    }

    #[test]
    fn test_collapse() {
        let b = Bounds::collapse(&[(0.05, 2.0), (0.25, 1.3), (2.0, 15.0)]);
        assert_eq!(
            b,
            Bounds::Uniform {
                lower: 0.05,
                upper: 15.0
            }
        );
    }
}
