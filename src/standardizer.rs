//! Converts sample sums into standardized scores.
//!
//! For a sample of `n` i.i.d. draws with theoretical mean μ and standard
//! deviation σ, `Z = (Sum − n·μ) / (σ·√n)`. Only the theoretical moments are
//! used: the target is N(0, 1), not a normal fitted to the data.

use crate::error::CltError;
use crate::sampler::SampleMatrix;

/// Sum of each row of `matrix`, in row order.
pub fn row_sums(matrix: &SampleMatrix) -> Vec<f64> {
    matrix.iter_rows().map(|row| row.iter().sum()).collect()
}

/// Standardizes every row sum of `matrix` with the given per-draw moments.
///
/// The result has one score per row, whatever the row length.
pub fn standardize(matrix: &SampleMatrix, mean: f64, std_dev: f64) -> Result<Vec<f64>, CltError> {
    if !mean.is_finite() {
        return Err(CltError::invalid("mean", format!("must be finite, got {mean}")));
    }
    if !std_dev.is_finite() || std_dev <= 0.0 {
        return Err(CltError::invalid(
            "std_dev",
            format!("must be finite and > 0, got {std_dev}"),
        ));
    }

    let n = matrix.cols() as f64;
    let center = n * mean;
    let scale = std_dev * n.sqrt();
    Ok(row_sums(matrix)
        .into_iter()
        .map(|sum| (sum - center) / scale)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distribution::Family;
    use crate::sampler::draw_samples;
    use crate::utils::create_rng;
    use approx::assert_relative_eq;

    fn matrix(family: Family, m: usize, n: usize, seed: u64) -> SampleMatrix {
        draw_samples(&family, m, n, &mut create_rng(Some(seed))).unwrap()
    }

    #[test]
    fn test_row_sums_match_rows() {
        let matrix = matrix(Family::Uniform { a: 0.0, b: 1.0 }, 4, 3, 7);
        let sums = row_sums(&matrix);
        assert_eq!(sums.len(), 4);
        for (i, sum) in sums.iter().enumerate() {
            assert_relative_eq!(*sum, matrix.row(i).iter().sum::<f64>());
        }
    }

    #[test]
    fn test_formula_on_single_row() {
        let family = Family::Uniform { a: 15.0, b: 35.0 };
        let matrix = matrix(family, 1, 8, 11);
        let sum: f64 = matrix.row(0).iter().sum();
        let expected = (sum - 8.0 * 25.0) / (family.std_dev() * 8.0_f64.sqrt());
        let z = standardize(&matrix, family.mean(), family.std_dev()).unwrap();
        assert_relative_eq!(z[0], expected, epsilon = 1e-12);
    }

    #[test]
    fn test_length_is_row_count() {
        for n in [1, 5, 50, 200] {
            let family = Family::Exponential { lambda: 3.0 };
            let matrix = matrix(family, 37, n, 13);
            let z = standardize(&matrix, family.mean(), family.std_dev()).unwrap();
            assert_eq!(z.len(), 37);
        }
    }

    #[test]
    fn test_rejects_bad_moments() {
        let matrix = matrix(Family::Exponential { lambda: 1.0 }, 2, 2, 17);
        assert_eq!(standardize(&matrix, 1.0, 0.0).unwrap_err().field(), "std_dev");
        assert_eq!(standardize(&matrix, 1.0, -1.0).unwrap_err().field(), "std_dev");
        assert_eq!(standardize(&matrix, f64::NAN, 1.0).unwrap_err().field(), "mean");
    }
}
