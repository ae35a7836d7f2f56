//! Chart data derived from ledger records: a dated line series and box-plot statistics.

use chrono::NaiveDate;

use crate::domain::Record;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinePoint {
    pub date: NaiveDate,
    pub amount: f64,
}

/// Amounts over time, ordered by date (ties keep ledger order).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineSeries {
    points: Vec<LinePoint>,
}

impl LineSeries {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a Record>) -> Self {
        let mut points: Vec<LinePoint> = records
            .into_iter()
            .map(|record| LinePoint {
                date: record.date,
                amount: record.amount,
            })
            .collect();
        points.sort_by_key(|point| point.date);
        Self { points }
    }

    pub fn points(&self) -> &[LinePoint] {
        &self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((self.points.first()?.date, self.points.last()?.date))
    }

    pub fn amount_range(&self) -> Option<(f64, f64)> {
        let mut amounts = self.points.iter().map(|point| point.amount);
        let first = amounts.next()?;
        Some(amounts.fold((first, first), |(lo, hi), value| {
            (lo.min(value), hi.max(value))
        }))
    }
}

/// Five-number summary with Tukey whiskers (1.5 × IQR).
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    pub count: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub lower_whisker: f64,
    pub upper_whisker: f64,
    pub outliers: Vec<f64>,
}

const WHISKER_FACTOR: f64 = 1.5;

impl BoxStats {
    /// Returns `None` for an empty input.
    pub fn from_amounts(amounts: &[f64]) -> Option<Self> {
        if amounts.is_empty() {
            return None;
        }
        let mut sorted = amounts.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let q1 = percentile(&sorted, 0.25);
        let median = percentile(&sorted, 0.5);
        let q3 = percentile(&sorted, 0.75);
        let reach = WHISKER_FACTOR * (q3 - q1);
        let (low_fence, high_fence) = (q1 - reach, q3 + reach);

        let inside: Vec<f64> = sorted
            .iter()
            .copied()
            .filter(|value| (low_fence..=high_fence).contains(value))
            .collect();
        // Whiskers never retract inside the box.
        let lower_whisker = inside.iter().copied().fold(q1, f64::min);
        let upper_whisker = inside.iter().copied().fold(q3, f64::max);
        let outliers = sorted
            .iter()
            .copied()
            .filter(|value| *value < lower_whisker || *value > upper_whisker)
            .collect();

        Some(Self {
            count: sorted.len(),
            min: sorted[0],
            q1,
            median,
            q3,
            max: sorted[sorted.len() - 1],
            lower_whisker,
            upper_whisker,
            outliers,
        })
    }

    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}

/// Linear-interpolation percentile over an ascending, non-empty slice.
fn percentile(sorted: &[f64], fraction: f64) -> f64 {
    let rank = fraction * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    sorted[lower] + (sorted[upper] - sorted[lower]) * (rank - lower as f64)
}
