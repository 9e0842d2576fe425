pub mod config;
pub mod dashboard;
pub mod dataset;
pub mod error;
pub mod model_inference;
pub mod predictor;
pub mod render;
pub mod statistics;

pub use config::{DashboardConfig, LoadingMode, Variant, View};
pub use dashboard::Dashboard;
pub use dataset::AirfoilDataset;
pub use error::{DataError, LoadError, ModelError};
pub use model_inference::{LinearModel, ModelCache};
pub use predictor::{classify, parse_feature_value, predict, FeatureVector, PredictionResult};

/// Feature columns in the order the model was trained on.
pub const FEATURE_COLUMNS: [&str; 5] = ["f", "alpha", "c", "U_infinity", "delta"];

/// Scaled sound pressure level, the regression target.
pub const TARGET_COLUMN: &str = "SSPL";

/// Ordered noise bands over a predicted SSPL value, quietest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SeverityCategory {
    VeryGood = 0,
    Good = 1,
    Moderate = 2,
    Poor = 3,
}

impl SeverityCategory {
    pub const ALL: [SeverityCategory; 4] = [
        SeverityCategory::VeryGood,
        SeverityCategory::Good,
        SeverityCategory::Moderate,
        SeverityCategory::Poor,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SeverityCategory::VeryGood => "Very good (very low noise contribution)",
            SeverityCategory::Good => "Good (low noise contribution)",
            SeverityCategory::Moderate => "Moderate (moderate noise contribution)",
            SeverityCategory::Poor => "Poor (very high noise contribution)",
        }
    }

    /// Display color name for the band.
    pub fn color(&self) -> &'static str {
        match self {
            SeverityCategory::VeryGood => "green",
            SeverityCategory::Good => "blue",
            SeverityCategory::Moderate => "orange",
            SeverityCategory::Poor => "red",
        }
    }
}

pub type Result<T> = anyhow::Result<T>;
