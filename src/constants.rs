use crate::error::CltError;

/// Bounded numeric input, the command-line stand-in for a number widget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlRange {
    pub name: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default: f64,
}

impl ControlRange {
    /// Rejects values outside `[min, max]`. Step alignment is not enforced.
    pub fn check(&self, value: f64) -> Result<f64, CltError> {
        if !value.is_finite() || value < self.min || value > self.max {
            return Err(CltError::invalid(
                self.name,
                format!("must be within [{}, {}], got {value}", self.min, self.max),
            ));
        }
        Ok(value)
    }

    pub fn check_count(&self, value: usize) -> Result<usize, CltError> {
        self.check(value as f64).map(|_| value)
    }
}

pub const SAMPLE_COUNT: ControlRange = ControlRange {
    name: "m",
    min: 100.0,
    max: 2000.0,
    step: 100.0,
    default: 1000.0,
};
pub const SAMPLE_SIZE: ControlRange = ControlRange {
    name: "n",
    min: 5.0,
    max: 200.0,
    step: 10.0,
    default: 100.0,
};
pub const BINS: ControlRange = ControlRange {
    name: "bins",
    min: 5.0,
    max: 55.0,
    step: 2.0,
    default: 35.0,
};
pub const BINOMIAL_P: ControlRange = ControlRange {
    name: "p",
    min: 0.05,
    max: 0.95,
    step: 0.05,
    default: 0.5,
};
/// Explicit trial count; when unset the trials follow the sample size.
pub const BINOMIAL_TRIALS: ControlRange = ControlRange {
    name: "trials",
    min: 1.0,
    max: 10_000.0,
    step: 1.0,
    default: 100.0,
};
pub const EXPONENTIAL_LAMBDA: ControlRange = ControlRange {
    name: "lambda",
    min: 1.0,
    max: 22.0,
    step: 3.0,
    default: 7.0,
};
pub const UNIFORM_A: ControlRange = ControlRange {
    name: "a",
    min: 5.0,
    max: 20.0,
    step: 5.0,
    default: 15.0,
};
pub const UNIFORM_B: ControlRange = ControlRange {
    name: "b",
    min: 25.0,
    max: 50.0,
    step: 5.0,
    default: 35.0,
};

pub const RAW_HISTOGRAM_BINS: usize = 20; // Fixed bin count for the pooled-sample panel
pub const NORMAL_CURVE_RANGE: (f64, f64) = (-4.0, 4.0); // Support drawn for the N(0,1) overlay
pub const NORMAL_CURVE_POINTS: usize = 1000;
pub const FIGURE_WIDTH: u32 = 1200; // Pixels, both panels together
pub const FIGURE_HEIGHT: u32 = 600;

pub const SWEEP_FROM: usize = 5; // Default first n of a convergence sweep
pub const SWEEP_TO: usize = 200;
pub const SWEEP_STEP: usize = 15;
