use rand::rngs::StdRng;
use rand::SeedableRng;
use std::f64::consts::PI;

/// Creates the random source for one run.
///
/// - `seed`: `Some` gives a reproducible stream, `None` seeds from OS entropy.
pub fn create_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Density of the standard normal distribution N(0, 1) at `x`.
pub fn standard_normal_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::Rng;

    #[test]
    fn test_seeded_rng_is_deterministic() {
        let mut rng1 = create_rng(Some(42));
        let mut rng2 = create_rng(Some(42));
        let a: Vec<f64> = (0..10).map(|_| rng1.gen()).collect();
        let b: Vec<f64> = (0..10).map(|_| rng2.gen()).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_standard_normal_pdf_peak_and_symmetry() {
        assert_relative_eq!(standard_normal_pdf(0.0), 0.398_942_280_401_432_7, epsilon = 1e-12);
        assert_relative_eq!(standard_normal_pdf(1.3), standard_normal_pdf(-1.3), epsilon = 1e-15);
        assert!(standard_normal_pdf(4.0) < 2e-4);
    }
}
