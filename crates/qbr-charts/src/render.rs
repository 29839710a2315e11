//! Plotters-backed rendering of chart specs.

use std::fmt::Display;
use std::path::{Path, PathBuf};

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use tracing::{info, warn};

use crate::format::ValueFormat;
use crate::spec::{ChartKind, ChartSpec, Series, Shade};
use crate::ChartError;

const WIDTH: u32 = 1400;
const HEIGHT: u32 = 700;
const BAR_HALF_WIDTH: f64 = 0.35;
/// Headroom above the tallest stack so labels and legends stay inside.
const Y_HEADROOM: f64 = 1.15;

const DARK: RGBColor = RGBColor(0, 0, 139);
const LIGHT: RGBColor = RGBColor(173, 216, 230);

/// Result of one chart attempt within a batch.
#[derive(Debug)]
pub struct ChartOutcome {
    pub filename: &'static str,
    pub result: Result<PathBuf, ChartError>,
}

/// Render every spec, collecting per-chart outcomes.
///
/// A failure is logged and recorded; the remaining charts still run.
pub fn render_all(specs: &[ChartSpec], out_dir: &Path) -> Vec<ChartOutcome> {
    specs
        .iter()
        .map(|spec| {
            let result = render(spec, out_dir);
            match &result {
                Ok(path) => info!(chart = %path.display(), "chart written"),
                Err(err) => warn!(chart = spec.filename, error = %err, "chart failed"),
            }
            ChartOutcome {
                filename: spec.filename,
                result,
            }
        })
        .collect()
}

/// Render a single chart spec to `out_dir/<filename>`.
pub fn render(spec: &ChartSpec, out_dir: &Path) -> Result<PathBuf, ChartError> {
    if spec.x_labels.is_empty() || spec.series.is_empty() {
        return Err(ChartError::EmptyTable(spec.filename));
    }

    let path = out_dir.join(spec.filename);
    {
        let root = BitMapBackend::new(&path, (WIDTH, HEIGHT)).into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;

        match spec.kind {
            ChartKind::StackedBar => draw_stacked_bars(spec, &root)?,
            ChartKind::Line => draw_line(spec, &root)?,
        }

        root.present().map_err(draw_err)?;
    }
    Ok(path)
}

fn draw_stacked_bars(
    spec: &ChartSpec,
    root: &DrawingArea<BitMapBackend, plotters::coord::Shift>,
) -> Result<(), ChartError> {
    let n = spec.x_labels.len();
    let totals: Vec<f64> = (0..n)
        .map(|i| spec.series.iter().map(|series| series.values[i]).sum())
        .collect();
    let data_max = totals.iter().cloned().fold(0.0_f64, f64::max);
    let y_max = if data_max > 0.0 { data_max * Y_HEADROOM } else { 1.0 };

    let mut chart = ChartBuilder::on(root)
        .caption(spec.title, ("sans-serif", 28))
        .margin(12)
        .x_label_area_size(48)
        .y_label_area_size(70)
        .build_cartesian_2d(-0.5..(n as f64 - 0.5), 0.0..y_max)
        .map_err(draw_err)?;

    let labels = &spec.x_labels;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(n)
        .x_label_formatter(&|x| nearest_label(*x, labels))
        .x_desc(spec.x_title)
        .y_desc(spec.y_title)
        .axis_desc_style(("sans-serif", 18))
        .draw()
        .map_err(draw_err)?;

    let mut bottoms = vec![0.0_f64; n];
    for series in &spec.series {
        let fill = shade_fill(series.shade);
        let bars: Vec<Rectangle<(f64, f64)>> = (0..n)
            .map(|i| {
                Rectangle::new(
                    [
                        (i as f64 - BAR_HALF_WIDTH, bottoms[i]),
                        (i as f64 + BAR_HALF_WIDTH, bottoms[i] + series.values[i]),
                    ],
                    fill.filled(),
                )
            })
            .collect();
        chart
            .draw_series(bars)
            .map_err(draw_err)?
            .label(series.label)
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 12, y + 5)], fill.filled()));

        let text_style = ("sans-serif", 16)
            .into_font()
            .color(annotation_color(series.shade))
            .pos(Pos::new(HPos::Center, VPos::Center));
        for i in 0..n {
            let value = series.values[i];
            let (text, y) = segment_annotation(
                value,
                bottoms[i],
                spec.value_format,
                spec.zero_label_guard,
                data_max,
            );
            chart
                .draw_series(std::iter::once(Text::new(text, (i as f64, y), text_style.clone())))
                .map_err(draw_err)?;
            bottoms[i] += value;
        }
    }

    chart
        .configure_series_labels()
        .border_style(&BLACK)
        .background_style(&WHITE.mix(0.8))
        .draw()
        .map_err(draw_err)?;
    Ok(())
}

fn draw_line(
    spec: &ChartSpec,
    root: &DrawingArea<BitMapBackend, plotters::coord::Shift>,
) -> Result<(), ChartError> {
    // Line charts carry exactly one series.
    let series: &Series = &spec.series[0];
    let n = spec.x_labels.len();
    let data_max = series.values.iter().cloned().fold(0.0_f64, f64::max);
    let y_max = if data_max > 0.0 { data_max * Y_HEADROOM } else { 1.0 };
    let fill = shade_fill(series.shade);

    let mut chart = ChartBuilder::on(root)
        .caption(spec.title, ("sans-serif", 28))
        .margin(12)
        .x_label_area_size(48)
        .y_label_area_size(70)
        .build_cartesian_2d(-0.5..(n as f64 - 0.5), 0.0..y_max)
        .map_err(draw_err)?;

    let labels = &spec.x_labels;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(n)
        .x_label_formatter(&|x| nearest_label(*x, labels))
        .x_desc(spec.x_title)
        .y_desc(spec.y_title)
        .axis_desc_style(("sans-serif", 18))
        .draw()
        .map_err(draw_err)?;

    let points: Vec<(f64, f64)> = series
        .values
        .iter()
        .enumerate()
        .map(|(i, value)| (i as f64, *value))
        .collect();
    chart
        .draw_series(LineSeries::new(points.clone(), fill.stroke_width(2)))
        .map_err(draw_err)?
        .label(series.label)
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 12, y)], fill.stroke_width(2)));
    chart
        .draw_series(
            points
                .iter()
                .map(|(x, y)| Circle::new((*x, *y), 4, fill.filled())),
        )
        .map_err(draw_err)?;

    // Point labels sit just above each marker.
    let text_style = ("sans-serif", 16)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Bottom));
    for (x, y) in &points {
        let label = spec.value_format.format(*y);
        chart
            .draw_series(std::iter::once(Text::new(
                label,
                (*x, *y + 0.02 * data_max),
                text_style.clone(),
            )))
            .map_err(draw_err)?;
    }

    chart
        .configure_series_labels()
        .border_style(&BLACK)
        .background_style(&WHITE.mix(0.8))
        .draw()
        .map_err(draw_err)?;
    Ok(())
}

/// Text and vertical position for one bar segment.
///
/// Normally the formatted value at the segment midpoint. With the zero-label
/// guard, a zero segment is labeled `<0.1` at 10% of the chart's maximum so
/// it stays legible; the bar itself still has zero height.
fn segment_annotation(
    value: f64,
    bottom: f64,
    format: ValueFormat,
    zero_guard: bool,
    chart_max: f64,
) -> (String, f64) {
    if zero_guard && value == 0.0 {
        ("<0.1".to_string(), 0.1 * chart_max)
    } else {
        (format.format(value), bottom + value / 2.0)
    }
}

fn nearest_label(x: f64, labels: &[String]) -> String {
    let idx = x.round();
    if idx < 0.0 || idx >= labels.len() as f64 || (x - idx).abs() > 0.25 {
        return String::new();
    }
    labels[idx as usize].clone()
}

fn shade_fill(shade: Shade) -> RGBColor {
    match shade {
        Shade::Dark => DARK,
        Shade::Light => LIGHT,
    }
}

fn annotation_color(shade: Shade) -> &'static RGBColor {
    match shade {
        Shade::Dark => &WHITE,
        Shade::Light => &BLACK,
    }
}

fn draw_err<E: Display>(err: E) -> ChartError {
    ChartError::Draw(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segments_are_labeled_at_their_midpoints() {
        let (text, y) = segment_annotation(40.0, 60.0, ValueFormat::Count, false, 100.0);
        assert_eq!(text, "40");
        assert_eq!(y, 80.0);
    }

    #[test]
    fn guarded_zero_gets_synthetic_position() {
        let (text, y) = segment_annotation(0.0, 0.0, ValueFormat::Count, true, 250.0);
        assert_eq!(text, "<0.1");
        assert_eq!(y, 25.0);
    }

    #[test]
    fn unguarded_zero_is_labeled_in_place() {
        let (text, y) = segment_annotation(0.0, 10.0, ValueFormat::Count, false, 250.0);
        assert_eq!(text, "0");
        assert_eq!(y, 10.0);
    }

    #[test]
    fn label_formatter_snaps_to_tick_positions_only() {
        let labels = vec!["Jan/24".to_string(), "Feb/24".to_string()];
        assert_eq!(nearest_label(0.0, &labels), "Jan/24");
        assert_eq!(nearest_label(1.1, &labels), "Feb/24");
        assert_eq!(nearest_label(0.5, &labels), "");
        assert_eq!(nearest_label(-1.0, &labels), "");
        assert_eq!(nearest_label(2.0, &labels), "");
    }
}
