use std::error::Error as StdError;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Failures while loading the dataset or the model file.
///
/// Both loads report through this enum. The dashboard decides per section
/// what a failure disables: any dataset failure halts rendering, any model
/// failure only disables prediction.
#[derive(Debug, Clone, Error)]
pub enum LoadError {
    #[error("file '{}' not found", path.display())]
    DatasetNotFound { path: PathBuf },

    #[error("model '{}' not found", path.display())]
    ModelUnavailable { path: PathBuf },

    #[error("error while loading '{}': {source}", path.display())]
    UnexpectedLoadError {
        path: PathBuf,
        #[source]
        source: Arc<dyn StdError + Send + Sync>,
    },
}

impl LoadError {
    pub fn path(&self) -> &Path {
        match self {
            LoadError::DatasetNotFound { path }
            | LoadError::ModelUnavailable { path }
            | LoadError::UnexpectedLoadError { path, .. } => path,
        }
    }

    pub(crate) fn unexpected<E>(path: &Path, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        LoadError::UnexpectedLoadError {
            path: path.to_path_buf(),
            source: Arc::new(source),
        }
    }

    pub(crate) fn from_dataset_io(path: &Path, err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::NotFound {
            LoadError::DatasetNotFound { path: path.to_path_buf() }
        } else {
            Self::unexpected(path, err)
        }
    }

    pub(crate) fn from_model_io(path: &Path, err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::NotFound {
            LoadError::ModelUnavailable { path: path.to_path_buf() }
        } else {
            Self::unexpected(path, err)
        }
    }
}

/// Schema problems found while parsing the dataset.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing required column '{0}'")]
    MissingColumn(String),

    #[error("row {row}: column '{column}' value '{value}' is not a finite number")]
    NotNumeric {
        row: usize,
        column: String,
        value: String,
    },

    #[error("dataset contains no rows")]
    Empty,
}

/// Problems with the contents of a model file.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid model file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("coefficient count mismatch: expected {expected}, got {found}")]
    CoefficientCount { expected: usize, found: usize },

    #[error("feature names {found:?} do not match expected {expected:?}")]
    FeatureNames {
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("model parameters must be finite")]
    NonFinite,
}
