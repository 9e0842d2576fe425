//! Presentation settings for a dashboard session.
//!
//! The two dashboard variants share the same prediction core and differ only
//! in what is configured here: slider ranges, offered views, and whether the
//! model is loaded as soon as the prediction section renders or only when the
//! user asks for a prediction.

use clap::ValueEnum;
use log::debug;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::dataset::AirfoilDataset;
use crate::predictor::FeatureVector;
use crate::FEATURE_COLUMNS;

pub const DEFAULT_DATASET_PATH: &str = "AirfoilSelfNoise.csv";
pub const DEFAULT_MODEL_PATH: &str = "linear_regression_model.json";
pub const DEFAULT_RAW_ROWS: usize = 5;
pub const DEFAULT_HISTOGRAM_BINS: usize = 20;

/// How slider ranges are derived from the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    /// `[0, 1.1 × max]`, defaulting to the column mean.
    #[default]
    Extended,
    /// `[min, max]`, defaulting to the column mean.
    Observed,
}

impl Variant {
    /// Views offered by the selector for this variant.
    pub fn views(&self) -> &'static [View] {
        match self {
            Variant::Extended => &[View::Summary, View::Correlation, View::Scatter],
            Variant::Observed => &[View::Summary, View::Histogram, View::Scatter],
        }
    }

    pub fn default_loading(&self) -> LoadingMode {
        match self {
            Variant::Extended => LoadingMode::Eager,
            Variant::Observed => LoadingMode::OnDemand,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoadingMode {
    /// Load the model whenever the prediction section renders.
    Eager,
    /// Load the model only when a prediction is explicitly requested.
    OnDemand,
}

/// Analysis views available to the selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum View {
    Summary,
    Correlation,
    Histogram,
    Scatter,
}

impl View {
    pub fn title(&self) -> &'static str {
        match self {
            View::Summary => "Descriptive Statistics",
            View::Correlation => "Correlation Heatmap",
            View::Histogram => "SSPL Distribution",
            View::Scatter => "Scatter Plot: All Features vs SSPL",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        <View as ValueEnum>::from_str(name, true).ok()
    }
}

/// Settings file contents. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub dataset_path: Option<PathBuf>,
    pub model_path: Option<PathBuf>,
    pub variant: Option<Variant>,
    pub loading: Option<LoadingMode>,
    pub view: Option<View>,
    pub show_raw: Option<bool>,
    pub raw_rows: Option<usize>,
    pub histogram_bins: Option<usize>,
    pub color: Option<bool>,
}

impl ConfigFile {
    pub fn load<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
        let config = serde_json::from_str(&raw)
            .map_err(|e| anyhow::anyhow!("Invalid config {}: {}", path.display(), e))?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }
}

/// Resolved settings for one dashboard session.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub dataset_path: PathBuf,
    pub model_path: PathBuf,
    pub variant: Variant,
    pub loading: LoadingMode,
    pub view: View,
    pub show_raw: bool,
    pub raw_rows: usize,
    pub histogram_bins: usize,
    pub color: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self::for_variant(Variant::default())
    }
}

impl DashboardConfig {
    pub fn for_variant(variant: Variant) -> Self {
        Self {
            dataset_path: PathBuf::from(DEFAULT_DATASET_PATH),
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            variant,
            loading: variant.default_loading(),
            view: variant.views()[0],
            show_raw: false,
            raw_rows: DEFAULT_RAW_ROWS,
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
            color: true,
        }
    }

    /// Applies the fields a settings file sets on top of the variant defaults.
    pub fn from_file(file: &ConfigFile) -> Self {
        let mut config = Self::for_variant(file.variant.unwrap_or_default());
        if let Some(path) = &file.dataset_path {
            config.dataset_path = path.clone();
        }
        if let Some(path) = &file.model_path {
            config.model_path = path.clone();
        }
        if let Some(loading) = file.loading {
            config.loading = loading;
        }
        if let Some(view) = file.view {
            config.view = view;
        }
        if let Some(show_raw) = file.show_raw {
            config.show_raw = show_raw;
        }
        if let Some(rows) = file.raw_rows {
            config.raw_rows = rows;
        }
        if let Some(bins) = file.histogram_bins {
            config.histogram_bins = bins.max(1);
        }
        if let Some(color) = file.color {
            config.color = color;
        }
        config
    }
}

/// Range and starting value of one numeric input.
#[derive(Debug, Clone, PartialEq)]
pub struct SliderSpec {
    pub column: &'static str,
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
    pub default: f64,
}

impl SliderSpec {
    /// Pins `value` into `[min, max]`. `NaN` resets to the default.
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            self.default
        } else {
            value.clamp(self.min, self.max)
        }
    }
}

const SLIDER_LABELS: [&str; 5] = [
    "1. Frequency (f) [Hz]",
    "2. Angle of attack (alpha) [deg]",
    "3. Chord length (c) [m]",
    "4. Free-stream velocity (U_infinity) [m/s]",
    "5. Suction-side displacement thickness (delta) [m]",
];

/// One slider per feature, in model input order.
///
/// Dataset cells are finite, so every range satisfies `min <= max`.
pub fn slider_specs(dataset: &AirfoilDataset, variant: Variant) -> Vec<SliderSpec> {
    FEATURE_COLUMNS
        .iter()
        .zip(SLIDER_LABELS)
        .filter_map(|(&column, label)| {
            let summary = dataset.column_summary(column)?;
            let (min, max) = match variant {
                Variant::Extended => (0.0, (summary.max * 1.1).max(0.0)),
                Variant::Observed => (summary.min, summary.max),
            };
            Some(SliderSpec {
                column,
                label,
                min,
                max,
                default: summary.mean.clamp(min, max),
            })
        })
        .collect()
}

/// Starting inputs: every slider at its default.
pub fn default_features(sliders: &[SliderSpec]) -> FeatureVector {
    let mut values = [0.0; 5];
    for (value, slider) in values.iter_mut().zip(sliders) {
        *value = slider.default;
    }
    FeatureVector::from_array(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> AirfoilDataset {
        AirfoilDataset::from_rows(&[
            [200.0, 0.0, 0.1, 30.0, 0.001, 110.0],
            [1000.0, 10.0, 0.3, 70.0, 0.003, 130.0],
        ])
        .unwrap()
    }

    #[test]
    fn extended_variant_starts_at_zero_and_adds_ten_percent() {
        let sliders = slider_specs(&dataset(), Variant::Extended);
        assert_eq!(sliders.len(), 5);
        assert_eq!(sliders[0].column, "f");
        assert_eq!(sliders[0].min, 0.0);
        assert!((sliders[0].max - 1100.0).abs() < 1e-9);
        assert_eq!(sliders[0].default, 600.0);
    }

    #[test]
    fn observed_variant_uses_data_bounds() {
        let sliders = slider_specs(&dataset(), Variant::Observed);
        assert_eq!((sliders[3].min, sliders[3].max), (30.0, 70.0));
        assert_eq!(sliders[3].default, 50.0);
        assert_eq!(sliders[3].clamp(100.0), 70.0);
        assert_eq!(sliders[3].clamp(10.0), 30.0);
    }

    #[test]
    fn nan_input_falls_back_to_default() {
        let sliders = slider_specs(&dataset(), Variant::Observed);
        assert_eq!(sliders[0].clamp(f64::NAN), sliders[0].default);
        assert_eq!(sliders[0].clamp(f64::INFINITY), sliders[0].max);
        assert_eq!(sliders[0].clamp(f64::NEG_INFINITY), sliders[0].min);
    }

    #[test]
    fn ranges_never_invert() {
        let negative = AirfoilDataset::from_rows(&[
            [-10.0, -5.0, -0.2, -1.0, -0.01, -3.0],
            [-20.0, -1.0, -0.1, -2.0, -0.02, -4.0],
        ])
        .unwrap();
        for variant in [Variant::Extended, Variant::Observed] {
            for slider in slider_specs(&negative, variant) {
                assert!(slider.min <= slider.max, "{variant:?} {}", slider.column);
                assert!((slider.min..=slider.max).contains(&slider.default));
            }
        }
    }

    #[test]
    fn default_features_follow_slider_defaults() {
        let sliders = slider_specs(&dataset(), Variant::Extended);
        let features = default_features(&sliders);
        assert_eq!(features.frequency, 600.0);
        assert_eq!(features.angle, 5.0);
        assert_eq!(features.velocity, 50.0);
    }

    #[test]
    fn variants_pick_their_own_loading_and_views() {
        let extended = DashboardConfig::for_variant(Variant::Extended);
        assert_eq!(extended.loading, LoadingMode::Eager);
        assert_eq!(extended.view, View::Summary);

        let observed = DashboardConfig::for_variant(Variant::Observed);
        assert_eq!(observed.loading, LoadingMode::OnDemand);
        assert!(observed.variant.views().contains(&View::Histogram));
    }

    #[test]
    fn config_file_overrides_defaults() {
        let file: ConfigFile = serde_json::from_str(
            r#"{"variant": "observed", "model_path": "m.json", "loading": "eager", "show_raw": true}"#,
        )
        .unwrap();
        let config = DashboardConfig::from_file(&file);
        assert_eq!(config.variant, Variant::Observed);
        assert_eq!(config.model_path, PathBuf::from("m.json"));
        assert_eq!(config.loading, LoadingMode::Eager);
        assert!(config.show_raw);
        assert_eq!(config.dataset_path, PathBuf::from(DEFAULT_DATASET_PATH));
    }

    #[test]
    fn unknown_config_keys_are_rejected() {
        assert!(serde_json::from_str::<ConfigFile>(r#"{"colour": false}"#).is_err());
    }

    #[test]
    fn view_names_parse_case_insensitively() {
        assert_eq!(View::parse("Scatter"), Some(View::Scatter));
        assert_eq!(View::parse("heatmap"), None);
    }
}
