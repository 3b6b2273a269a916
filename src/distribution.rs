//! Distribution families sampled by the demo, with closed-form moments.
//!
//! | Family | Parameters | Mean | Std-dev |
//! |---|---|---|---|
//! | Binomial | p, trials | trials·p | √(trials·p·(1−p)) |
//! | Exponential | λ | 1/λ | 1/λ |
//! | Uniform | a, b | (a+b)/2 | √((b−a)²/12) |

use crate::error::CltError;
use std::fmt;

/// Largest trial count the binomial sampler accepts.
pub const MAX_BINOMIAL_TRIALS: u64 = i32::MAX as u64;

/// A distribution family together with its parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Family {
    /// Each draw is a Binomial(`trials`, `p`) count.
    ///
    /// The interactive scenario couples `trials` to the sample size `n`;
    /// see [`Family::binomial_coupled`].
    Binomial { p: f64, trials: u64 },
    /// Exponential with rate `lambda` (scale `1/lambda`).
    Exponential { lambda: f64 },
    /// Continuous uniform on `[a, b)`.
    Uniform { a: f64, b: f64 },
}

impl Family {
    /// Binomial whose trial count equals the sample size `n`.
    pub fn binomial_coupled(p: f64, n: usize) -> Self {
        Family::Binomial {
            p,
            trials: n as u64,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Family::Binomial { .. } => "binomial",
            Family::Exponential { .. } => "exponential",
            Family::Uniform { .. } => "uniform",
        }
    }

    /// Checks the parameters against the family's domain.
    pub fn validate(&self) -> Result<(), CltError> {
        match *self {
            Family::Binomial { p, trials } => {
                if !(p > 0.0 && p < 1.0) {
                    return Err(CltError::invalid("p", format!("must be in (0, 1), got {p}")));
                }
                if trials < 1 || trials > MAX_BINOMIAL_TRIALS {
                    return Err(CltError::invalid(
                        "trials",
                        format!("must be within [1, {MAX_BINOMIAL_TRIALS}], got {trials}"),
                    ));
                }
            }
            Family::Exponential { lambda } => {
                if !lambda.is_finite() || lambda <= 0.0 {
                    return Err(CltError::invalid(
                        "lambda",
                        format!("must be finite and > 0, got {lambda}"),
                    ));
                }
            }
            Family::Uniform { a, b } => {
                if !a.is_finite() {
                    return Err(CltError::invalid("a", format!("must be finite, got {a}")));
                }
                if !b.is_finite() {
                    return Err(CltError::invalid("b", format!("must be finite, got {b}")));
                }
                if a >= b {
                    return Err(CltError::invalid("b", format!("requires a < b, got a={a}, b={b}")));
                }
                if !(b - a).is_finite() {
                    return Err(CltError::invalid(
                        "b",
                        format!("interval width b - a overflows, got a={a}, b={b}"),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Theoretical mean of a single draw.
    pub fn mean(&self) -> f64 {
        match *self {
            Family::Binomial { p, trials } => trials as f64 * p,
            Family::Exponential { lambda } => 1.0 / lambda,
            Family::Uniform { a, b } => (a + b) / 2.0,
        }
    }

    pub fn variance(&self) -> f64 {
        match *self {
            Family::Binomial { p, trials } => trials as f64 * p * (1.0 - p),
            Family::Exponential { lambda } => 1.0 / (lambda * lambda),
            Family::Uniform { a, b } => (b - a).powi(2) / 12.0,
        }
    }

    /// Theoretical standard deviation of a single draw.
    pub fn std_dev(&self) -> f64 {
        match *self {
            // Exact reciprocal rather than sqrt(1/λ²).
            Family::Exponential { lambda } => 1.0 / lambda,
            _ => self.variance().sqrt(),
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Family::Binomial { p, trials } => write!(f, "Binomial(trials={trials}, p={p})"),
            Family::Exponential { lambda } => write!(f, "Exponential(λ={lambda})"),
            Family::Uniform { a, b } => write!(f, "Uniform(a={a}, b={b})"),
        }
    }
}
