//! Convergence sweep: the same scenario over increasing sample sizes.
//!
//! Each point runs an independent pipeline with its own generator seeded from
//! `base_seed + index`, so the table does not depend on thread scheduling.

use crate::distribution::Family;
use crate::error::CltError;
use crate::scenario::{run_scenario, SamplingParams};
use crate::utils::create_rng;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::time::Instant;
use tracing::info;

/// Empirical moments of the standardized scores for one sample size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepPoint {
    pub n: usize,
    pub mean: f64,
    pub std_dev: f64,
}

impl SweepPoint {
    /// `|mean| + |std_dev - 1|`, zero for an exact N(0, 1) match.
    pub fn distance_from_standard_normal(&self) -> f64 {
        self.mean.abs() + (self.std_dev - 1.0).abs()
    }
}

/// Sample sizes `from, from + step, ...` up to and including `to`.
pub fn sample_sizes(from: usize, to: usize, step: usize) -> Result<Vec<usize>, CltError> {
    if from < 1 {
        return Err(CltError::invalid("from", "must be >= 1, got 0"));
    }
    if step < 1 {
        return Err(CltError::invalid("step", "must be >= 1, got 0"));
    }
    if to < from {
        return Err(CltError::invalid("to", format!("must be >= from ({from}), got {to}")));
    }
    Ok((from..=to).step_by(step).collect())
}

/// Runs the scenario built by `family_for(n)` for every `n` in `sizes`.
///
/// `family_for` lets the binomial trial count follow `n`. Results come back in
/// the order of `sizes`.
pub fn run_sweep<F>(
    family_for: F,
    m: usize,
    sizes: &[usize],
    base_seed: u64,
    show_progress: bool,
) -> Result<Vec<SweepPoint>, CltError>
where
    F: Fn(usize) -> Family + Sync,
{
    let pb = if show_progress {
        let pb = ProgressBar::new(sizes.len() as u64);
        let template = "[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} n values";
        if let Ok(style) = ProgressStyle::default_bar().template(template) {
            pb.set_style(style.progress_chars("##-"));
        }
        pb
    } else {
        ProgressBar::hidden()
    };

    let started = Instant::now();
    let points = sizes
        .par_iter()
        .enumerate()
        .map(|(i, &n)| {
            let mut rng = create_rng(Some(base_seed.wrapping_add(i as u64)));
            let outcome = run_scenario(family_for(n), SamplingParams { m, n }, &mut rng)?;
            pb.inc(1);
            let (mean, std_dev) = outcome
                .score_moments()
                .ok_or_else(|| CltError::invalid("m", "no standardized scores produced"))?;
            Ok(SweepPoint { n, mean, std_dev })
        })
        .collect::<Result<Vec<_>, CltError>>()?;

    pb.finish_with_message("sweep complete");
    info!(points = points.len(), elapsed = ?started.elapsed(), "sweep finished");
    Ok(points)
}

/// Fixed-width table, one row per sample size.
pub fn format_table(points: &[SweepPoint]) -> String {
    let mut out = format!("{:>5}  {:>10}  {:>10}  {:>10}\n", "n", "mean(Z)", "sd(Z)", "distance");
    for p in points {
        out.push_str(&format!(
            "{:>5}  {:>10.4}  {:>10.4}  {:>10.4}\n",
            p.n,
            p.mean,
            p.std_dev,
            p.distance_from_standard_normal()
        ));
    }
    out
}
