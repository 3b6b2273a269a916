//! Draws `m` independent samples of size `n` from a [`Family`].

use crate::distribution::Family;
use crate::error::CltError;
use rand::Rng;
use rand_distr::{Binomial, Distribution, Exp, Uniform};
use tracing::debug;

/// `rows × cols` matrix of draws, stored row-major.
///
/// Each row is one sample of `n` outcomes.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl SampleMatrix {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> {
        self.data.chunks_exact(self.cols)
    }

    /// All draws flattened row by row.
    pub fn pooled(&self) -> &[f64] {
        &self.data
    }

    pub fn into_pooled(self) -> Vec<f64> {
        self.data
    }
}

/// Returns the number of cells in an `m × n` matrix.
fn check_shape(m: usize, n: usize) -> Result<usize, CltError> {
    if m < 1 {
        return Err(CltError::invalid("m", "must be >= 1, got 0"));
    }
    if n < 1 {
        return Err(CltError::invalid("n", "must be >= 1, got 0"));
    }
    m.checked_mul(n)
        .ok_or_else(|| CltError::invalid("m", format!("m × n overflows, got m={m}, n={n}")))
}

fn fill<D, R>(dist: D, len: usize, rng: &mut R) -> Vec<f64>
where
    D: Distribution<f64>,
    R: Rng + ?Sized,
{
    dist.sample_iter(rng).take(len).collect()
}

/// Draws an `m × n` matrix of i.i.d. values from `family`.
///
/// Values are generated row by row from `rng`, so a seeded generator
/// reproduces the same matrix.
pub fn draw_samples<R: Rng + ?Sized>(
    family: &Family,
    m: usize,
    n: usize,
    rng: &mut R,
) -> Result<SampleMatrix, CltError> {
    let len = check_shape(m, n)?;
    family.validate()?;

    let data: Vec<f64> = match *family {
        Family::Binomial { p, trials } => {
            let dist =
                Binomial::new(trials, p).map_err(|e| CltError::invalid("p", e.to_string()))?;
            dist.sample_iter(&mut *rng).take(len).map(|k| k as f64).collect()
        }
        Family::Exponential { lambda } => {
            let dist = Exp::new(lambda).map_err(|e| CltError::invalid("lambda", e.to_string()))?;
            fill(dist, len, rng)
        }
        Family::Uniform { a, b } => fill(Uniform::new(a, b), len, rng),
    };

    debug!(family = %family, m, n, "drew sample matrix");
    Ok(SampleMatrix {
        rows: m,
        cols: n,
        data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::create_rng;

    #[test]
    fn test_shape() {
        let mut rng = create_rng(Some(1));
        let matrix = draw_samples(&Family::Exponential { lambda: 7.0 }, 30, 12, &mut rng).unwrap();
        assert_eq!(matrix.rows(), 30);
        assert_eq!(matrix.cols(), 12);
        assert_eq!(matrix.iter_rows().count(), 30);
        assert!(matrix.iter_rows().all(|row| row.len() == 12));
        assert_eq!(matrix.pooled().len(), 360);
        assert_eq!(matrix.row(29), &matrix.pooled()[348..360]);
    }

    #[test]
    fn test_binomial_values_are_counts() {
        let mut rng = create_rng(Some(2));
        let family = Family::binomial_coupled(0.3, 20);
        let matrix = draw_samples(&family, 50, 20, &mut rng).unwrap();
        for &v in matrix.pooled() {
            assert!((0.0..=20.0).contains(&v));
            assert_eq!(v.fract(), 0.0);
        }
    }

    #[test]
    fn test_uniform_values_in_interval() {
        let mut rng = create_rng(Some(3));
        let family = Family::Uniform { a: 15.0, b: 35.0 };
        let matrix = draw_samples(&family, 100, 100, &mut rng).unwrap();
        assert!(matrix.pooled().iter().all(|&v| (15.0..=35.0).contains(&v)));
    }

    #[test]
    fn test_exponential_values_non_negative() {
        let mut rng = create_rng(Some(4));
        let family = Family::Exponential { lambda: 7.0 };
        let matrix = draw_samples(&family, 100, 100, &mut rng).unwrap();
        assert!(matrix.pooled().iter().all(|&v| v >= 0.0));
    }

    #[test]
    fn test_same_seed_same_matrix() {
        let family = Family::Uniform { a: 5.0, b: 25.0 };
        let a = draw_samples(&family, 10, 10, &mut create_rng(Some(99))).unwrap();
        let b = draw_samples(&family, 10, 10, &mut create_rng(Some(99))).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_rejects_empty_shape() {
        let mut rng = create_rng(Some(5));
        let family = Family::Exponential { lambda: 1.0 };
        assert_eq!(draw_samples(&family, 0, 5, &mut rng).unwrap_err().field(), "m");
        assert_eq!(draw_samples(&family, 5, 0, &mut rng).unwrap_err().field(), "n");
    }

    #[test]
    fn test_rejects_invalid_family() {
        let mut rng = create_rng(Some(6));
        let err = draw_samples(&Family::Uniform { a: 3.0, b: 1.0 }, 5, 5, &mut rng).unwrap_err();
        assert_eq!(err.field(), "b");
    }

    #[test]
    fn test_rejects_oversized_binomial_trials() {
        let mut rng = create_rng(Some(7));
        let family = Family::Binomial { p: 0.5, trials: u64::MAX };
        let err = draw_samples(&family, 1, 1, &mut rng).unwrap_err();
        assert_eq!(err.field(), "trials");
    }

    #[test]
    fn test_rejects_overflowing_uniform_width() {
        let mut rng = create_rng(Some(8));
        let family = Family::Uniform { a: -1e308, b: 1e308 };
        let err = draw_samples(&family, 1, 1, &mut rng).unwrap_err();
        assert_eq!(err.field(), "b");
    }

    #[test]
    fn test_rejects_overflowing_shape() {
        let mut rng = create_rng(Some(9));
        let family = Family::Exponential { lambda: 1.0 };
        let err = draw_samples(&family, usize::MAX, 2, &mut rng).unwrap_err();
        assert_eq!(err.field(), "m");
    }
}
