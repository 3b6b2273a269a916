use crate::error::CltError;
use crate::utils::standard_normal_pdf;

/// One equal-width bin `[start, end)`; the last bin also includes `end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
    /// Height such that the bars integrate to 1.
    pub density: f64,
}

/// Density-normalized histogram over the range of the data.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub bins: Vec<Bin>,
    pub total: usize,
}

impl Histogram {
    /// Bins `values` into `n_bins` equal-width buckets between their min and max.
    ///
    /// A degenerate range (every value equal) is widened by 0.5 on each side.
    /// Non-finite values are skipped.
    pub fn density(values: &[f64], n_bins: usize) -> Result<Self, CltError> {
        if n_bins < 1 {
            return Err(CltError::invalid("bins", "must be >= 1, got 0"));
        }

        let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if finite.is_empty() {
            return Ok(Histogram {
                bins: Vec::new(),
                total: 0,
            });
        }

        let mut min_value = finite.iter().copied().fold(f64::MAX, f64::min);
        let mut max_value = finite.iter().copied().fold(f64::MIN, f64::max);
        if max_value - min_value <= 0.0 {
            min_value -= 0.5;
            max_value += 0.5;
        }
        let bucket_size = (max_value - min_value) / n_bins as f64;

        let mut counts = vec![0usize; n_bins];
        for &value in &finite {
            let mut bin_index = ((value - min_value) / bucket_size).floor() as usize;
            if bin_index >= n_bins {
                bin_index = n_bins - 1;
            }
            counts[bin_index] += 1;
        }

        let total = finite.len();
        let bins = counts
            .into_iter()
            .enumerate()
            .map(|(i, count)| Bin {
                start: min_value + i as f64 * bucket_size,
                end: min_value + (i + 1) as f64 * bucket_size,
                count,
                density: count as f64 / (total as f64 * bucket_size),
            })
            .collect();

        Ok(Histogram { bins, total })
    }

    /// `(start of first bin, end of last bin)`, if any bins exist.
    pub fn range(&self) -> Option<(f64, f64)> {
        Some((self.bins.first()?.start, self.bins.last()?.end))
    }

    pub fn max_density(&self) -> f64 {
        self.bins.iter().map(|b| b.density).fold(0.0, f64::max)
    }
}

/// `points` evenly spaced samples of the N(0, 1) density on `[lo, hi]`.
pub fn normal_curve(lo: f64, hi: f64, points: usize) -> Vec<(f64, f64)> {
    match points {
        0 => Vec::new(),
        1 => vec![(lo, standard_normal_pdf(lo))],
        _ => {
            let step = (hi - lo) / (points - 1) as f64;
            (0..points)
                .map(|i| {
                    let x = lo + i as f64 * step;
                    (x, standard_normal_pdf(x))
                })
                .collect()
        }
    }
}
