use ndarray::{Array2, ArrayView1, Axis};

use crate::dataset::{AirfoilDataset, COLUMNS};

/// Summary rows produced by [`describe`], matching the pandas layout.
pub const DESCRIBE_ROWS: [&str; 8] = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

/// Descriptive statistics for one column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnStats {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

impl ColumnStats {
    pub fn from_values(values: ArrayView1<'_, f64>) -> Self {
        let mut sorted: Vec<f64> = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let count = sorted.len();
        let mean = values.mean().unwrap_or(f64::NAN);
        // Sample standard deviation; undefined for a single value.
        let std = if count > 1 {
            values.std(1.0)
        } else {
            f64::NAN
        };

        Self {
            count,
            mean,
            std,
            min: sorted.first().copied().unwrap_or(f64::NAN),
            q25: quantile(&sorted, 0.25),
            median: quantile(&sorted, 0.5),
            q75: quantile(&sorted, 0.75),
            max: sorted.last().copied().unwrap_or(f64::NAN),
        }
    }

    /// Values in [`DESCRIBE_ROWS`] order.
    pub fn as_row(&self) -> [f64; 8] {
        [
            self.count as f64,
            self.mean,
            self.std,
            self.min,
            self.q25,
            self.median,
            self.q75,
            self.max,
        ]
    }
}

/// Linear-interpolation quantile over already sorted values.
pub fn quantile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let fraction = pos - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}

/// Per-column statistics in storage column order.
pub fn describe(dataset: &AirfoilDataset) -> Vec<(&'static str, ColumnStats)> {
    COLUMNS
        .iter()
        .zip(dataset.data().axis_iter(Axis(1)))
        .map(|(&name, column)| (name, ColumnStats::from_values(column)))
        .collect()
}

/// Pearson correlation between every pair of columns.
///
/// A constant column has no defined correlation with anything else, so its
/// off-diagonal entries are NaN.
pub fn correlation(dataset: &AirfoilDataset) -> Array2<f64> {
    let data = dataset.data();
    let n_cols = data.ncols();
    let mut matrix = Array2::from_elem((n_cols, n_cols), f64::NAN);

    let centered: Vec<Vec<f64>> = data
        .axis_iter(Axis(1))
        .map(|column| {
            let mean = column.mean().unwrap_or(0.0);
            column.iter().map(|&v| v - mean).collect()
        })
        .collect();

    for i in 0..n_cols {
        matrix[[i, i]] = 1.0;
        for j in (i + 1)..n_cols {
            let r = pearson(&centered[i], &centered[j]);
            matrix[[i, j]] = r;
            matrix[[j, i]] = r;
        }
    }

    matrix
}

fn pearson(a: &[f64], b: &[f64]) -> f64 {
    let cov: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let var_a: f64 = a.iter().map(|x| x * x).sum();
    let var_b: f64 = b.iter().map(|y| y * y).sum();
    let denom = (var_a * var_b).sqrt();
    if denom == 0.0 {
        f64::NAN
    } else {
        (cov / denom).clamp(-1.0, 1.0)
    }
}

/// Equal-width histogram.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// `counts.len() + 1` bin edges, ascending.
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    pub fn new(values: ArrayView1<'_, f64>, bins: usize) -> Option<Self> {
        if values.is_empty() || bins == 0 {
            return None;
        }

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        if max - min <= 0.0 {
            return Some(Self {
                edges: vec![min, max],
                counts: vec![values.len()],
            });
        }

        let width = (max - min) / bins as f64;
        let edges = (0..=bins).map(|i| min + width * i as f64).collect();
        let mut counts = vec![0usize; bins];

        for &v in values.iter() {
            // The last bin is closed on the right.
            let idx = (((v - min) / width) as usize).min(bins - 1);
            counts[idx] += 1;
        }

        Some(Self { edges, counts })
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}
