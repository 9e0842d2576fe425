use log::{debug, info};
use ndarray::{s, Array2, ArrayView1};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::error::{DataError, LoadError};
use crate::TARGET_COLUMN;

/// Columns kept from the CSV, in storage order: the five features then SSPL.
pub const COLUMNS: [&str; 6] = ["f", "alpha", "c", "U_infinity", "delta", TARGET_COLUMN];

/// Min, mean and max of one column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnSummary {
    pub min: f64,
    pub mean: f64,
    pub max: f64,
}

/// The airfoil self-noise measurements held as an `(n, 6)` matrix.
///
/// Every cell is finite; the loader rejects `NaN` and infinities.
#[derive(Debug, Clone)]
pub struct AirfoilDataset {
    path: PathBuf,
    data: Array2<f64>,
}

impl AirfoilDataset {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| LoadError::from_dataset_io(path, e))?;
        let mut dataset = Self::parse(file).map_err(|e| LoadError::unexpected(path, e))?;
        dataset.path = path.to_path_buf();

        info!(
            "Loaded dataset {} with {} rows",
            path.display(),
            dataset.len()
        );
        Ok(dataset)
    }

    /// Builds a dataset from rows already in storage order.
    ///
    /// Rows are numbered from 1 in errors.
    pub fn from_rows(rows: &[[f64; 6]]) -> Result<Self, DataError> {
        if rows.is_empty() {
            return Err(DataError::Empty);
        }
        for (i, row) in rows.iter().enumerate() {
            if let Some(j) = row.iter().position(|v| !v.is_finite()) {
                return Err(DataError::NotNumeric {
                    row: i + 1,
                    column: COLUMNS[j].to_string(),
                    value: row[j].to_string(),
                });
            }
        }
        let data = Array2::from_shape_fn((rows.len(), COLUMNS.len()), |(i, j)| rows[i][j]);
        Ok(Self {
            path: PathBuf::new(),
            data,
        })
    }

    fn parse<R: Read>(reader: R) -> Result<Self, DataError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let indices = COLUMNS
            .iter()
            .map(|&name| {
                headers
                    .iter()
                    .position(|h| h == name)
                    .ok_or_else(|| DataError::MissingColumn(name.to_string()))
            })
            .collect::<Result<Vec<usize>, DataError>>()?;
        debug!("Dataset column indices: {:?}", indices);

        let mut rows = Vec::new();
        for (i, record) in reader.records().enumerate() {
            // Header is line 1.
            let row = i + 2;
            let record = record?;

            let mut values = [0.0; 6];
            for ((value, &idx), &name) in values.iter_mut().zip(&indices).zip(COLUMNS.iter()) {
                // Records have as many fields as the header, so `idx` is in range.
                let cell = record.get(idx).unwrap_or_default();
                *value = cell
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| DataError::NotNumeric {
                        row,
                        column: name.to_string(),
                        value: cell.to_string(),
                    })?;
            }
            rows.push(values);
        }

        Self::from_rows(&rows)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.data.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.data.nrows() == 0
    }

    pub fn data(&self) -> &Array2<f64> {
        &self.data
    }

    /// The first `n` rows, or all of them when fewer exist.
    pub fn head(&self, n: usize) -> Array2<f64> {
        let end = n.min(self.data.nrows());
        self.data.slice(s![..end, ..]).to_owned()
    }

    pub fn column(&self, name: &str) -> Option<ArrayView1<'_, f64>> {
        COLUMNS
            .iter()
            .position(|&c| c == name)
            .map(|idx| self.data.column(idx))
    }

    pub fn column_summary(&self, name: &str) -> Option<ColumnSummary> {
        let column = self.column(name)?;
        let min = column.iter().copied().fold(f64::INFINITY, f64::min);
        let max = column.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = column.mean()?;
        Some(ColumnSummary { min, mean, max })
    }

    /// `(feature, SSPL)` pairs for a scatter plot.
    pub fn scatter(&self, feature: &str) -> Option<Vec<(f64, f64)>> {
        let x = self.column(feature)?;
        let y = self.data.column(COLUMNS.len() - 1);
        Some(x.iter().copied().zip(y.iter().copied()).collect())
    }
}
