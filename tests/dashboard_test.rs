use airfoil_noise_dashboard::{
    classify, predict, AirfoilDataset, Dashboard, DashboardConfig, FeatureVector, LinearModel,
    LoadError, LoadingMode, SeverityCategory, Variant, View, FEATURE_COLUMNS,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const MODEL_JSON: &str = r#"{
    "coefficients": [-0.00128, -0.4219, -35.69, 0.0999, -147.3],
    "intercept": 132.83,
    "feature_names": ["f", "alpha", "c", "U_infinity", "delta"]
}"#;

/// Writes `rows` synthetic measurements in the published value ranges.
fn write_dataset(dir: &Path, rows: usize) -> PathBuf {
    let mut rng = StdRng::seed_from_u64(7);
    let mut csv = String::from("f,alpha,c,U_infinity,delta,SSPL\n");
    for _ in 0..rows {
        let f = rng.gen_range(200.0..20_000.0);
        let alpha = rng.gen_range(0.0..22.2);
        let c = rng.gen_range(0.0254..0.3048);
        let u = rng.gen_range(31.7..71.3);
        let delta = rng.gen_range(0.0004..0.058);
        let sspl = rng.gen_range(103.38..140.987);
        let _ = writeln!(csv, "{f},{alpha},{c},{u},{delta},{sspl}");
    }
    let path = dir.join("AirfoilSelfNoise.csv");
    fs::write(&path, csv).unwrap();
    path
}

fn write_model(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("linear_regression_model.json");
    fs::write(&path, contents).unwrap();
    path
}

fn config(dir: &TempDir, variant: Variant) -> DashboardConfig {
    let mut config = DashboardConfig::for_variant(variant);
    config.dataset_path = dir.path().join("AirfoilSelfNoise.csv");
    config.model_path = dir.path().join("linear_regression_model.json");
    config.color = false;
    config
}

#[test]
fn missing_dataset_halts_before_the_model_is_touched() {
    let dir = tempfile::tempdir().unwrap();
    write_model(dir.path(), MODEL_JSON);

    let mut dashboard = Dashboard::new(config(&dir, Variant::Extended));
    let frame = dashboard.render();

    assert!(matches!(frame.dataset_error, Some(LoadError::DatasetNotFound { .. })));
    assert!(frame.prediction.is_none());
    assert!(frame.model_error.is_none());
    assert_eq!(dashboard.models().loads(), 0);
    assert!(frame.text.contains("not found"));
    assert!(!frame.text.contains("Noise Level Prediction"));
}

#[test]
fn missing_model_keeps_dataset_views() {
    let dir = tempfile::tempdir().unwrap();
    write_dataset(dir.path(), 40);

    let mut dashboard = Dashboard::new(config(&dir, Variant::Extended));
    let frame = dashboard.render();

    assert!(frame.dataset_error.is_none());
    assert!(matches!(frame.model_error, Some(LoadError::ModelUnavailable { .. })));
    assert!(frame.prediction.is_none());
    assert!(frame.text.contains("Descriptive Statistics"));
    assert!(frame.text.contains("count"));
    assert!(frame.text.contains("Prediction is disabled"));
    assert!(frame.text.contains("About This Dashboard"));
}

#[test]
fn corrupt_model_disables_prediction_with_generic_message() {
    let dir = tempfile::tempdir().unwrap();
    write_dataset(dir.path(), 10);
    write_model(dir.path(), "{\"coefficients\": [1.0]");

    let mut dashboard = Dashboard::new(config(&dir, Variant::Extended));
    let frame = dashboard.render();

    assert!(matches!(frame.model_error, Some(LoadError::UnexpectedLoadError { .. })));
    assert!(frame.text.contains("An error occurred while loading the model"));
}

#[test]
fn eager_prediction_uses_slider_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let data_path = write_dataset(dir.path(), 60);
    write_model(dir.path(), MODEL_JSON);

    let mut dashboard = Dashboard::new(config(&dir, Variant::Extended));
    let frame = dashboard.render();
    let result = frame.prediction.expect("prediction rendered");

    let dataset = AirfoilDataset::load(&data_path).unwrap();
    let mut means = [0.0; 5];
    for (mean, name) in means.iter_mut().zip(FEATURE_COLUMNS) {
        *mean = dataset.column_summary(name).unwrap().mean;
    }
    let features = FeatureVector::from_array(means);
    let model = LinearModel::from_json(MODEL_JSON).unwrap();

    assert!((result.value - predict(&features, &model)).abs() < 1e-9);
    assert_eq!(result.category, classify(result.value));
    assert!(frame.text.contains(&format!("{:.2} dB", result.value)));
}

#[test]
fn nan_column_is_a_dataset_error_not_a_crash() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("AirfoilSelfNoise.csv"),
        "f,alpha,c,U_infinity,delta,SSPL\n800,NaN,0.3,71.3,0.002,126.2\n1000,NaN,0.3,71.3,0.002,125.2\n",
    )
    .unwrap();
    write_model(dir.path(), MODEL_JSON);

    let mut dashboard = Dashboard::new(config(&dir, Variant::Observed));
    dashboard.request_prediction();
    let frame = dashboard.render();

    assert!(matches!(frame.dataset_error, Some(LoadError::UnexpectedLoadError { .. })));
    assert!(frame.prediction.is_none());
    assert!(frame.text.contains("column 'alpha' value 'NaN'"));
}

#[test]
fn non_finite_inputs_keep_the_prediction_defined() {
    let dir = tempfile::tempdir().unwrap();
    write_dataset(dir.path(), 30);
    write_model(dir.path(), MODEL_JSON);

    let mut dashboard = Dashboard::new(config(&dir, Variant::Observed));
    let baseline = {
        dashboard.request_prediction();
        dashboard.render().prediction.expect("prediction rendered")
    };

    dashboard.set_input(0, f64::NAN);
    dashboard.set_input(4, f64::INFINITY);
    let result = dashboard.render().prediction.expect("prediction rendered");

    assert!(result.value.is_finite());
    assert_eq!(result, baseline);
}

#[test]
fn on_demand_loading_waits_for_the_button() {
    let dir = tempfile::tempdir().unwrap();
    write_dataset(dir.path(), 20);
    write_model(dir.path(), MODEL_JSON);

    let mut dashboard = Dashboard::new(config(&dir, Variant::Observed));
    assert_eq!(dashboard.config().loading, LoadingMode::OnDemand);

    let frame = dashboard.render();
    assert!(frame.prediction.is_none());
    assert_eq!(dashboard.models().loads(), 0);

    dashboard.request_prediction();
    assert!(dashboard.render().prediction.is_some());
    assert!(dashboard.render().prediction.is_some());
    assert_eq!(dashboard.models().loads(), 1);
}

#[test]
fn inputs_are_clamped_to_slider_range() {
    let dir = tempfile::tempdir().unwrap();
    write_dataset(dir.path(), 30);
    write_model(dir.path(), r#"{"coefficients": [0, 0, 0, 1, 0], "intercept": 0}"#);

    let mut dashboard = Dashboard::new(config(&dir, Variant::Observed));
    dashboard.request_prediction();
    dashboard.set_features(&FeatureVector::new(1000.0, 5.0, 0.1, 500.0, 0.01));
    let high = dashboard.render().prediction.unwrap();

    dashboard.set_input(3, -10.0);
    let low = dashboard.render().prediction.unwrap();

    // Velocity is the only weighted feature, so the prediction is the clamped input.
    assert!(high.value <= 71.3);
    assert!(low.value >= 31.7);
    assert_eq!(low.category, SeverityCategory::VeryGood);
}

#[test]
fn reload_picks_up_a_fixed_model_file() {
    let dir = tempfile::tempdir().unwrap();
    write_dataset(dir.path(), 15);

    let mut dashboard = Dashboard::new(config(&dir, Variant::Extended));
    assert!(dashboard.render().model_error.is_some());

    write_model(dir.path(), r#"{"coefficients": [0, 0, 0, 0, 0], "intercept": 125}"#);
    assert!(dashboard.render().model_error.is_some());

    dashboard.reload();
    let result = dashboard.render().prediction.unwrap();
    assert_eq!(result.value, 125.0);
    assert_eq!(result.category, SeverityCategory::Poor);
}

#[test]
fn every_view_renders() {
    let dir = tempfile::tempdir().unwrap();
    write_dataset(dir.path(), 50);
    write_model(dir.path(), MODEL_JSON);

    let mut dashboard = Dashboard::new(config(&dir, Variant::Extended));
    let expectations = [
        (View::Summary, "75%"),
        (View::Correlation, "legend"),
        (View::Histogram, "50 samples"),
        (View::Scatter, "delta vs SSPL"),
    ];
    for (view, marker) in expectations {
        dashboard.set_view(view);
        let frame = dashboard.render();
        assert!(frame.text.contains(marker), "{view:?} missing {marker}");
    }
}

#[test]
fn raw_preview_is_opt_in() {
    let dir = tempfile::tempdir().unwrap();
    write_dataset(dir.path(), 12);

    let mut dashboard = Dashboard::new(config(&dir, Variant::Extended));
    assert!(!dashboard.render().text.contains("Raw Data Preview"));

    dashboard.set_show_raw(true);
    let text = dashboard.render().text;
    assert!(text.contains("Raw Data Preview"));
    assert!(text.contains("U_infinity"));
}

#[test]
fn bundled_demo_files_parse() {
    let model = LinearModel::load("demos/linear_regression_model.json").unwrap();
    assert_eq!(model.coefficients().len(), 5);

    let file = airfoil_noise_dashboard::config::ConfigFile::load("demos/settings.json").unwrap();
    let config = DashboardConfig::from_file(&file);
    assert_eq!(config.variant, Variant::Observed);
    assert_eq!(config.view, View::Histogram);
    assert_eq!(config.histogram_bins, 15);
}
