use log::{debug, error, info};
use ndarray::Array1;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{LoadError, ModelError};
use crate::FEATURE_COLUMNS;

/// On-disk layout of a fitted linear regression.
#[derive(Debug, Clone, Deserialize)]
struct ModelFile {
    coefficients: Vec<f64>,
    intercept: f64,
    #[serde(default)]
    feature_names: Option<Vec<String>>,
}

/// A pre-fitted affine model over the five airfoil features.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearModel {
    coefficients: Array1<f64>,
    intercept: f64,
}

impl LinearModel {
    pub fn new(coefficients: [f64; 5], intercept: f64) -> Self {
        Self {
            coefficients: Array1::from(coefficients.to_vec()),
            intercept,
        }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| LoadError::from_model_io(path, e))?;
        let model = Self::from_json(&raw).map_err(|e| LoadError::unexpected(path, e))?;

        info!(
            "Model loaded from {} (intercept {:.4})",
            path.display(),
            model.intercept
        );
        Ok(model)
    }

    pub fn from_json(raw: &str) -> Result<Self, ModelError> {
        let file: ModelFile = serde_json::from_str(raw)?;

        if file.coefficients.len() != FEATURE_COLUMNS.len() {
            return Err(ModelError::CoefficientCount {
                expected: FEATURE_COLUMNS.len(),
                found: file.coefficients.len(),
            });
        }

        if let Some(names) = file.feature_names {
            if names.iter().map(String::as_str).ne(FEATURE_COLUMNS.iter().copied()) {
                return Err(ModelError::FeatureNames {
                    expected: FEATURE_COLUMNS.iter().map(|s| s.to_string()).collect(),
                    found: names,
                });
            }
        }

        if !file.intercept.is_finite() || file.coefficients.iter().any(|w| !w.is_finite()) {
            return Err(ModelError::NonFinite);
        }

        Ok(Self {
            coefficients: Array1::from(file.coefficients),
            intercept: file.intercept,
        })
    }

    pub fn coefficients(&self) -> &Array1<f64> {
        &self.coefficients
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }
}

/// Lazily loaded models, keyed by path.
///
/// The first request for a path loads it and remembers the outcome, failure
/// included. Later requests reuse that outcome until `reload` drops it.
#[derive(Debug, Default)]
pub struct ModelCache {
    entries: HashMap<PathBuf, Result<LinearModel, LoadError>>,
    loads: usize,
}

impl ModelCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_load<P: AsRef<Path>>(&mut self, path: P) -> Result<&LinearModel, LoadError> {
        let path = path.as_ref();

        if self.entries.contains_key(path) {
            debug!("Model cache hit for {}", path.display());
        } else {
            debug!("Model cache miss for {}", path.display());
            let outcome = LinearModel::load(path);
            if let Err(e) = &outcome {
                error!("Failed to load model: {}", e);
            }
            self.loads += 1;
            self.entries.insert(path.to_path_buf(), outcome);
        }

        match &self.entries[path] {
            Ok(model) => Ok(model),
            Err(e) => Err(e.clone()),
        }
    }

    /// Forgets the cached outcome for `path` so the next request reads the file again.
    pub fn reload<P: AsRef<Path>>(&mut self, path: P) {
        if self.entries.remove(path.as_ref()).is_some() {
            info!("Model cache invalidated for {}", path.as_ref().display());
        }
    }

    /// Number of file reads performed so far.
    pub fn loads(&self) -> usize {
        self.loads
    }
}
