//! # Tide Chart Rendering
//!
//! Renders a [`TideSeries`] as a fixed-height ASCII chart for a terminal or a
//! serial console. Heights are plotted against the station datum; the Y-axis
//! labels can instead be shown relative to mean sea level.

use crate::config::Config;
use crate::station::StationProfile;
use crate::TideSeries;
use std::fmt::Write;

const Y_AXIS_WIDTH: usize = 5; // Minimum space for Y-axis labels

/// Row limits for the chart grid.
pub const MIN_CHART_ROWS: usize = 2;
pub const MAX_CHART_ROWS: usize = 200;

/// Presentation settings for [`render_ascii`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChartOptions {
    /// Chart height in text rows
    pub rows: usize,
    /// Label heights relative to MSL instead of the datum
    pub show_msl: bool,
    /// Datum → MSL offset, the profile's `mean_sea_level`
    pub msl_offset: f32,
}

impl ChartOptions {
    pub fn from_config(config: &Config, profile: &StationProfile) -> Self {
        ChartOptions {
            rows: config.display.rows,
            show_msl: config.station.show_msl,
            msl_offset: profile.mean_sea_level as f32,
        }
    }
}

/// Convert a height above the station datum to a height relative to MSL.
fn datum_to_msl(height: f32, msl_offset: f32) -> f32 {
    height - msl_offset
}

/// Convert a height relative to MSL back to the station datum.
fn msl_to_datum(height_msl: f32, msl_offset: f32) -> f32 {
    height_msl + msl_offset
}

/// Convert a datum height to the value shown on the axis
fn to_display(height: f32, opts: &ChartOptions) -> f32 {
    if opts.show_msl {
        datum_to_msl(height, opts.msl_offset)
    } else {
        height
    }
}

/// Format an axis value based on the display mode
fn format_display_value(display_value: f32, opts: &ChartOptions) -> String {
    if opts.show_msl {
        // MSL format with +/- signs
        format_signed_height(display_value)
    } else if display_value.fract() == 0.0 {
        format!("{:.0}", display_value)
    } else {
        format!("{:.1}", display_value)
    }
}

/// Format a height relative to MSL with an explicit sign
fn format_signed_height(height_msl: f32) -> String {
    if height_msl == 0.0 {
        " 0 ".to_string()
    } else if height_msl > 0.0 {
        if height_msl.fract() == 0.0 {
            format!("+{:.0}", height_msl)
        } else {
            format!("+{:.1}", height_msl)
        }
    } else if height_msl.fract() == 0.0 {
        format!("{:.0}", height_msl)
    } else {
        format!("{:.1}", height_msl)
    }
}

/// Render the series as text. One column per sample, "now" marked with `X`.
pub fn render_ascii(series: &TideSeries, opts: &ChartOptions) -> String {
    let mut out = String::new();
    if series.degraded {
        out.push_str("⚠ OUTSIDE ACCURACY HORIZON\n\n");
    }

    let Some((min_height, max_height)) = series.bounds() else {
        out.push_str("(no samples)\n");
        return out;
    };

    let rows = opts.rows.clamp(MIN_CHART_ROWS, MAX_CHART_ROWS);
    let sample_count = series.samples.len();
    let span = if max_height > min_height {
        max_height - min_height
    } else {
        1.0
    };

    let height_to_row = |height: f32| {
        let normalized = (height - min_height) / span;
        let row = ((1.0 - normalized) * (rows as f32 - 1.0)).round();
        (row.max(0.0) as usize).min(rows - 1)
    };

    // Y-axis labels on whole or half units of the displayed scale. Counted in
    // f64 so a large datum cannot stall the step, and never more than one per row.
    let min_display = f64::from(to_display(min_height, opts));
    let max_display = f64::from(to_display(max_height, opts));
    let label_step = if max_display - min_display > 4.0 {
        1.0
    } else {
        0.5
    };
    let first_label = (min_display / label_step).ceil() * label_step;
    let label_count = if first_label <= max_display {
        (((max_display - first_label) / label_step).floor() as usize + 1).min(rows)
    } else {
        0
    };
    let labels: Vec<(usize, String)> = (0..label_count)
        .map(|k| {
            let label = (first_label + k as f64 * label_step) as f32;
            let height = if opts.show_msl {
                msl_to_datum(label, opts.msl_offset)
            } else {
                label
            };
            (height_to_row(height), format_display_value(label, opts))
        })
        .collect();

    let axis_width = labels
        .iter()
        .map(|(_, text)| text.chars().count() + 1)
        .max()
        .unwrap_or(0)
        .max(Y_AXIS_WIDTH);
    let mut grid = vec![vec![' '; sample_count + axis_width]; rows];
    for (row, text) in &labels {
        let text = format!("{:<width$}", text, width = axis_width - 1);
        for (i, ch) in text.chars().enumerate() {
            grid[*row][i] = ch;
        }
        grid[*row][axis_width - 1] = '│';
    }

    for (column, sample) in series.samples.iter().enumerate() {
        let row = height_to_row(sample.height);
        grid[row][column + axis_width] = if sample.mins_rel == 0 { 'X' } else { '•' };
    }

    for row in grid {
        out.extend(row);
        out.push('\n');
    }

    // Hour ticks below the chart
    let padding = " ".repeat(axis_width);
    let ticks: String = series
        .samples
        .iter()
        .map(|s| if s.mins_rel % 60 == 0 { '|' } else { ' ' })
        .collect();
    let _ = writeln!(out, "{}{}", padding, ticks);

    // Window labels with "Now" centred under the X
    let first_h = series.samples[0].mins_rel / 60;
    let last_h = series.samples[sample_count - 1].mins_rel / 60;
    let left = format!("{:+}h", first_h);
    let right = format!("{:+}h", last_h);
    let now_text = "Now";
    let now_column = series
        .samples
        .iter()
        .position(|s| s.mins_rel == 0)
        .unwrap_or(sample_count / 2);
    let left_width = now_column.saturating_sub(now_text.len() / 2);
    let right_width = sample_count.saturating_sub(left_width + now_text.len());
    let _ = writeln!(
        out,
        "{}{:<lw$}{}{:>rw$}",
        padding,
        left,
        now_text,
        right,
        lw = left_width,
        rw = right_width
    );

    let _ = writeln!(
        out,
        "{}{} ({})",
        padding,
        series.now,
        series.unit.abbreviation()
    );
    out
}

/// Print the chart to stdout.
pub fn draw_ascii(series: &TideSeries, opts: &ChartOptions) {
    print!("{}", render_ascii(series, opts));
}
