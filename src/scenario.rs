//! One CLT scenario: sample a family, standardize the sums, keep both views.

use crate::datastructures::RunningMoments;
use crate::distribution::Family;
use crate::error::CltError;
use crate::sampler::draw_samples;
use crate::standardizer::standardize;
use rand::Rng;
use tracing::info;

/// Shared sampling shape: `m` samples of `n` draws each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplingParams {
    pub m: usize,
    pub n: usize,
}

/// Everything the presentation layer needs from one run.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioOutcome {
    pub family: Family,
    pub params: SamplingParams,
    /// Theoretical per-draw mean used for standardization.
    pub mean: f64,
    /// Theoretical per-draw standard deviation used for standardization.
    pub std_dev: f64,
    /// All `m·n` draws flattened row by row.
    pub pooled: Vec<f64>,
    /// One standardized score per sample, in sample order.
    pub standardized: Vec<f64>,
}

impl ScenarioOutcome {
    /// Empirical mean and standard deviation of the standardized scores.
    pub fn score_moments(&self) -> Option<(f64, f64)> {
        let moments: RunningMoments = self.standardized.iter().copied().collect();
        Some((moments.mean()?, moments.std_dev()?))
    }
}

/// Samples `family`, then standardizes with moments taken from that same value.
pub fn run_scenario<R: Rng + ?Sized>(
    family: Family,
    params: SamplingParams,
    rng: &mut R,
) -> Result<ScenarioOutcome, CltError> {
    let matrix = draw_samples(&family, params.m, params.n, rng)?;
    let mean = family.mean();
    let std_dev = family.std_dev();
    let standardized = standardize(&matrix, mean, std_dev)?;

    info!(
        family = %family,
        m = params.m,
        n = params.n,
        mean,
        std_dev,
        "scenario sampled and standardized"
    );

    Ok(ScenarioOutcome {
        family,
        params,
        mean,
        std_dev,
        pooled: matrix.into_pooled(),
        standardized,
    })
}

/// Binomial scenario with the trial count tied to the sample size `n`.
pub fn binomial<R: Rng + ?Sized>(
    p: f64,
    m: usize,
    n: usize,
    rng: &mut R,
) -> Result<ScenarioOutcome, CltError> {
    run_scenario(Family::binomial_coupled(p, n), SamplingParams { m, n }, rng)
}

pub fn exponential<R: Rng + ?Sized>(
    lambda: f64,
    m: usize,
    n: usize,
    rng: &mut R,
) -> Result<ScenarioOutcome, CltError> {
    run_scenario(Family::Exponential { lambda }, SamplingParams { m, n }, rng)
}

pub fn uniform<R: Rng + ?Sized>(
    a: f64,
    b: f64,
    m: usize,
    n: usize,
    rng: &mut R,
) -> Result<ScenarioOutcome, CltError> {
    run_scenario(Family::Uniform { a, b }, SamplingParams { m, n }, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::create_rng;
    use approx::assert_relative_eq;

    #[test]
    fn test_outcome_shapes() {
        let outcome = exponential(7.0, 200, 30, &mut create_rng(Some(1))).unwrap();
        assert_eq!(outcome.pooled.len(), 200 * 30);
        assert_eq!(outcome.standardized.len(), 200);
        assert_eq!(outcome.params, SamplingParams { m: 200, n: 30 });
    }

    #[test]
    fn test_exponential_default_scenario() {
        let outcome = exponential(7.0, 1000, 100, &mut create_rng(Some(2))).unwrap();
        assert_relative_eq!(outcome.mean, 1.0 / 7.0, epsilon = 1e-15);
        assert_relative_eq!(outcome.std_dev, 1.0 / 7.0, epsilon = 1e-15);
        assert!(outcome.pooled.iter().all(|&v| v >= 0.0));
    }

    #[test]
    fn test_uniform_default_scenario_centers() {
        let outcome = uniform(15.0, 35.0, 2000, 200, &mut create_rng(Some(3))).unwrap();
        assert_relative_eq!(outcome.mean, 25.0);
        assert_relative_eq!(outcome.std_dev, 5.7735, epsilon = 1e-4);
        let (mean, sd) = outcome.score_moments().unwrap();
        assert!(mean.abs() < 0.1, "mean of Z = {mean}");
        assert!((sd - 1.0).abs() < 0.1, "sd of Z = {sd}");
    }

    #[test]
    fn test_binomial_couples_trials_to_n() {
        let outcome = binomial(0.5, 100, 40, &mut create_rng(Some(4))).unwrap();
        assert_eq!(outcome.family, Family::Binomial { p: 0.5, trials: 40 });
        assert_relative_eq!(outcome.mean, 20.0);
        assert!(outcome.pooled.iter().all(|&v| (0.0..=40.0).contains(&v)));
    }

    fn skewness(values: &[f64]) -> f64 {
        let moments: RunningMoments = values.iter().copied().collect();
        let (mean, sd) = (moments.mean().unwrap(), moments.std_dev().unwrap());
        values.iter().map(|v| ((v - mean) / sd).powi(3)).sum::<f64>() / values.len() as f64
    }

    #[test]
    fn test_convergence_with_larger_n() {
        // Sums of Binomial(n, 0.1) draws are Binomial(n², 0.1): skewness 0.53 at n = 5,
        // 0.013 at n = 200.
        let run = |n| {
            let params = SamplingParams { m: 2000, n };
            run_scenario(Family::binomial_coupled(0.1, n), params, &mut create_rng(Some(5)))
                .unwrap()
        };
        let small = run(5);
        let large = run(200);

        let (mean_large, sd_large) = large.score_moments().unwrap();
        assert!(mean_large.abs() < 0.1, "mean of Z = {mean_large}");
        assert!((sd_large - 1.0).abs() < 0.1, "sd of Z = {sd_large}");

        let skew_small = skewness(&small.standardized);
        let skew_large = skewness(&large.standardized);
        assert!(skew_small > 0.3, "skewness at n = 5 is {skew_small}");
        assert!(skew_large.abs() < 0.25, "skewness at n = 200 is {skew_large}");
        assert!(skew_large.abs() < skew_small.abs());
    }

    #[test]
    fn test_same_seed_same_outcome() {
        let a = uniform(5.0, 25.0, 300, 50, &mut create_rng(Some(42))).unwrap();
        let b = uniform(5.0, 25.0, 300, 50, &mut create_rng(Some(42))).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_parameters_surface_field() {
        let mut rng = create_rng(Some(6));
        assert_eq!(exponential(0.0, 10, 10, &mut rng).unwrap_err().field(), "lambda");
        assert_eq!(uniform(35.0, 15.0, 10, 10, &mut rng).unwrap_err().field(), "b");
        assert_eq!(binomial(1.5, 10, 10, &mut rng).unwrap_err().field(), "p");
        assert_eq!(binomial(0.5, 10, 0, &mut rng).unwrap_err().field(), "n");
    }
}
