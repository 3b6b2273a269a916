/// Streaming mean and standard deviation.
///
/// Uses Welford's update so the variance stays accurate without storing the
/// values. Used to summarise standardized scores as they are produced.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunningMoments {
    count: u64,
    mean: f64,
    // Sum of squared deviations from the running mean
    m2: f64,
}

impl RunningMoments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one observation. Non-finite values are ignored.
    pub fn add(&mut self, value: f64) {
        if !value.is_finite() {
            return;
        }
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (value - self.mean);
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then_some(self.mean)
    }

    /// Population standard deviation (denominator `count`).
    pub fn std_dev(&self) -> Option<f64> {
        (self.count > 0).then(|| (self.m2 / self.count as f64).sqrt())
    }
}

impl FromIterator<f64> for RunningMoments {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut moments = RunningMoments::new();
        for value in iter {
            moments.add(value);
        }
        moments
    }
}
