use crate::constants::{NORMAL_CURVE_POINTS, NORMAL_CURVE_RANGE, RAW_HISTOGRAM_BINS};
use crate::histogram::{normal_curve, Histogram};
use crate::scenario::ScenarioOutcome;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;
use tracing::info;

const LIGHT_BLUE: RGBColor = RGBColor(173, 216, 230);
const PINK: RGBColor = RGBColor(255, 192, 203);

/// Renders the two CLT panels side by side into a PNG at `path`.
///
/// Left: pooled raw samples, fixed bin count. Right: standardized scores with
/// `bins` buckets and the N(0, 1) density overlaid on [-4, 4].
pub fn render_clt_figure(
    outcome: &ScenarioOutcome,
    bins: usize,
    path: &Path,
    size: (u32, u32),
) -> Result<(), Box<dyn std::error::Error>> {
    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;

    let (left, right) = root.split_horizontally(size.0 / 2);

    let raw = Histogram::density(&outcome.pooled, RAW_HISTOGRAM_BINS)?;
    draw_histogram(&left, &raw, "Sample histogram", LIGHT_BLUE, None)?;

    let scores = Histogram::density(&outcome.standardized, bins)?;
    let (lo, hi) = NORMAL_CURVE_RANGE;
    let curve = normal_curve(lo, hi, NORMAL_CURVE_POINTS);
    draw_histogram(
        &right,
        &scores,
        "Normalized sample sums vs N(0, 1)",
        PINK,
        Some(&curve),
    )?;

    root.present()?;
    info!(path = %path.display(), "figure written");
    Ok(())
}

fn draw_histogram(
    area: &DrawingArea<BitMapBackend, Shift>,
    histogram: &Histogram,
    title: &str,
    color: RGBColor,
    overlay: Option<&[(f64, f64)]>,
) -> Result<(), Box<dyn std::error::Error>> {
    let (mut x_min, mut x_max) = histogram.range().unwrap_or((0.0, 1.0));
    let mut y_max = histogram.max_density();
    if let Some(points) = overlay {
        for &(x, y) in points {
            x_min = x_min.min(x);
            x_max = x_max.max(x);
            y_max = y_max.max(y);
        }
    }
    if y_max <= 0.0 {
        y_max = 1.0;
    }

    let mut chart = ChartBuilder::on(area)
        .caption(title, ("sans-serif", 24).into_font())
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(50)
        .build_cartesian_2d(x_min..x_max, 0.0..y_max * 1.05)?;

    chart.configure_mesh().disable_x_mesh().draw()?;

    chart.draw_series(histogram.bins.iter().map(|bin| {
        let mut bar = Rectangle::new([(bin.start, 0.0), (bin.end, bin.density)], color.filled());
        bar.set_margin(0, 0, 1, 1);
        bar
    }))?;

    if let Some(points) = overlay {
        chart.draw_series(LineSeries::new(points.iter().copied(), RED.stroke_width(2)))?;
    }

    Ok(())
}
