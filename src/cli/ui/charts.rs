//! Terminal renderers for the line and box charts.
//!
//! Both return plain lines so callers decide where they go; nothing here prints.

use crate::core::{BoxStats, LineSeries};

use super::formatting::{format_amount, format_date};

const MIN_WIDTH: usize = 10;
const MIN_HEIGHT: usize = 3;

/// Maps `value` in `[lo, hi]` onto `0..slots`. A degenerate range lands in the middle.
fn scale(value: f64, lo: f64, hi: f64, slots: usize) -> usize {
    let last = slots.saturating_sub(1);
    if hi - lo <= f64::EPSILON {
        return last / 2;
    }
    let position = ((value - lo) / (hi - lo) * last as f64).round();
    (position.max(0.0) as usize).min(last)
}

/// Plots amounts against dates. Each expense is one `*`; the y axis is labelled with
/// the extreme amounts and the x axis with the first and last dates.
pub fn render_line_chart(
    series: &LineSeries,
    width: usize,
    height: usize,
    symbol: &str,
) -> Vec<String> {
    let (Some((first, last)), Some((lo, hi))) = (series.date_range(), series.amount_range())
    else {
        return Vec::new();
    };
    let width = width.max(MIN_WIDTH);
    let height = height.max(MIN_HEIGHT);
    let span_days = (last - first).num_days() as f64;

    let mut grid = vec![vec![' '; width]; height];
    for point in series.points() {
        let offset = (point.date - first).num_days() as f64;
        let column = scale(offset, 0.0, span_days, width);
        let row = height - 1 - scale(point.amount, lo, hi, height);
        grid[row][column] = '*';
    }

    let top = format_amount(hi, symbol);
    let bottom = format_amount(lo, symbol);
    let label_width = top.len().max(bottom.len());

    let mut lines = Vec::with_capacity(height + 2);
    for (idx, row) in grid.iter().enumerate() {
        let label = if idx == 0 {
            top.as_str()
        } else if idx == height - 1 {
            bottom.as_str()
        } else {
            ""
        };
        let cells: String = row.iter().collect();
        lines.push(format!("{:>w$} |{}", label, cells.trim_end(), w = label_width));
    }
    lines.push(format!("{} +{}", " ".repeat(label_width), "-".repeat(width)));

    let start = format_date(first);
    let end = format_date(last);
    let gap = width.saturating_sub(start.len() + end.len()).max(1);
    let axis = if first == last {
        start
    } else {
        format!("{}{}{}", start, " ".repeat(gap), end)
    };
    lines.push(format!("{}  {}", " ".repeat(label_width), axis));
    lines
}

/// Draws a horizontal box plot: `|---[==#==]---|` with `o` for outliers, followed by
/// the scale and a numeric summary.
pub fn render_box_plot(stats: &BoxStats, width: usize, symbol: &str) -> Vec<String> {
    let width = width.max(MIN_WIDTH);
    let (lo, hi) = (stats.min, stats.max);
    let at = |value: f64| scale(value, lo, hi, width);

    let mut row = vec![' '; width];
    for cell in &mut row[at(stats.lower_whisker)..=at(stats.upper_whisker)] {
        *cell = '-';
    }
    for cell in &mut row[at(stats.q1)..=at(stats.q3)] {
        *cell = '=';
    }
    row[at(stats.lower_whisker)] = '|';
    row[at(stats.upper_whisker)] = '|';
    row[at(stats.q1)] = '[';
    row[at(stats.q3)] = ']';
    row[at(stats.median)] = '#';
    for outlier in &stats.outliers {
        row[at(*outlier)] = 'o';
    }

    let low_label = format_amount(lo, symbol);
    let high_label = format_amount(hi, symbol);
    let gap = width
        .saturating_sub(low_label.len() + high_label.len())
        .max(1);

    let mut lines = vec![
        row.iter().collect::<String>().trim_end().to_string(),
        format!("{}{}{}", low_label, " ".repeat(gap), high_label),
        String::new(),
    ];
    let summary = [
        ("count", stats.count.to_string()),
        ("min", format_amount(stats.min, symbol)),
        ("q1", format_amount(stats.q1, symbol)),
        ("median", format_amount(stats.median, symbol)),
        ("q3", format_amount(stats.q3, symbol)),
        ("max", format_amount(stats.max, symbol)),
        ("outliers", stats.outliers.len().to_string()),
    ];
    lines.extend(
        summary
            .iter()
            .map(|(label, value)| format!("  {:<9}{}", label, value)),
    );
    lines
}
