use log::{debug, error, info, warn};

use crate::config::{default_features, slider_specs, DashboardConfig, LoadingMode, View};
use crate::dataset::AirfoilDataset;
use crate::error::LoadError;
use crate::model_inference::ModelCache;
use crate::predictor::{parse_feature_value, FeatureVector, PredictionResult};
use crate::render::{self, Painter};
use crate::statistics::{self, Histogram};
use crate::{Result, FEATURE_COLUMNS, TARGET_COLUMN};

/// Output of one render pass.
#[derive(Debug, Clone)]
pub struct Frame {
    pub text: String,
    pub dataset_error: Option<LoadError>,
    pub model_error: Option<LoadError>,
    pub prediction: Option<PredictionResult>,
}

/// One user interaction in an interactive session.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    View(View),
    Set { column: usize, value: f64 },
    Raw(bool),
    Predict,
    Reload,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  view <summary|correlation|histogram|scatter>   switch the analysis view
  set <f|alpha|c|U_infinity|delta> <value>      move a feature slider
  raw <on|off>                                   toggle the raw data preview
  predict                                        run the prediction
  reload                                         re-read the dataset and model files
  help                                           show this message
  quit                                           leave the dashboard
";

impl Command {
    pub fn parse(line: &str) -> Result<Self> {
        let mut parts = line.split_whitespace();
        let name = parts
            .next()
            .ok_or_else(|| anyhow::anyhow!("Empty command"))?;

        let command = match name.to_ascii_lowercase().as_str() {
            "view" => {
                let view = parts
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("Usage: view <name>"))?;
                Command::View(
                    View::parse(view).ok_or_else(|| anyhow::anyhow!("Unknown view '{}'", view))?,
                )
            }
            "set" => {
                let (column, value) = match (parts.next(), parts.next()) {
                    (Some(column), Some(value)) => (column, value),
                    _ => return Err(anyhow::anyhow!("Usage: set <feature> <value>")),
                };
                let column = FEATURE_COLUMNS
                    .iter()
                    .position(|c| c.eq_ignore_ascii_case(column))
                    .ok_or_else(|| anyhow::anyhow!("Unknown feature '{}'", column))?;
                let value = parse_feature_value(value).map_err(anyhow::Error::msg)?;
                Command::Set { column, value }
            }
            "raw" => match parts.next() {
                Some("on") => Command::Raw(true),
                Some("off") => Command::Raw(false),
                _ => return Err(anyhow::anyhow!("Usage: raw <on|off>")),
            },
            "predict" => Command::Predict,
            "reload" => Command::Reload,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(anyhow::anyhow!("Unknown command '{}'", other)),
        };

        Ok(command)
    }
}

/// A dashboard session: the loaded files, the model cache and the user's inputs.
pub struct Dashboard {
    config: DashboardConfig,
    painter: Painter,
    dataset: Option<std::result::Result<AirfoilDataset, LoadError>>,
    models: ModelCache,
    inputs: [Option<f64>; 5],
    prediction_requested: bool,
}

impl Dashboard {
    pub fn new(config: DashboardConfig) -> Self {
        let painter = Painter::new(config.color);
        Self {
            config,
            painter,
            dataset: None,
            models: ModelCache::new(),
            inputs: [None; 5],
            prediction_requested: false,
        }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn models(&self) -> &ModelCache {
        &self.models
    }

    pub fn set_view(&mut self, view: View) {
        if !self.config.variant.views().contains(&view) {
            debug!("View {:?} is outside the {:?} selector", view, self.config.variant);
        }
        self.config.view = view;
    }

    pub fn set_show_raw(&mut self, show: bool) {
        self.config.show_raw = show;
    }

    /// Sets a slider by feature index; the value is clamped when rendered.
    /// Non-finite values are ignored.
    pub fn set_input(&mut self, column: usize, value: f64) {
        if !value.is_finite() {
            warn!("Ignoring non-finite input {} for feature {}", value, column);
            return;
        }
        if let Some(slot) = self.inputs.get_mut(column) {
            *slot = Some(value);
        }
    }

    pub fn set_features(&mut self, features: &FeatureVector) {
        for (column, value) in features.to_array().into_iter().enumerate() {
            self.set_input(column, value);
        }
    }

    /// The on-demand "predict" button.
    pub fn request_prediction(&mut self) {
        self.prediction_requested = true;
    }

    /// Drops the dataset and the cached model so both are read again.
    pub fn reload(&mut self) {
        info!("Reloading dataset and model");
        self.dataset = None;
        self.models.reload(&self.config.model_path);
    }

    /// Applies a command; returns `false` when the session should end.
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::View(view) => self.set_view(view),
            Command::Set { column, value } => self.set_input(column, value),
            Command::Raw(show) => self.set_show_raw(show),
            Command::Predict => self.request_prediction(),
            Command::Reload => self.reload(),
            Command::Help => {}
            Command::Quit => return false,
        }
        true
    }

    fn ensure_dataset(&mut self) {
        if self.dataset.is_none() {
            let outcome = AirfoilDataset::load(&self.config.dataset_path);
            if let Err(e) = &outcome {
                error!("Failed to load dataset: {}", e);
            }
            self.dataset = Some(outcome);
        }
    }

    pub fn render(&mut self) -> Frame {
        self.ensure_dataset();

        let painter = self.painter;
        let mut frame = Frame {
            text: render::title(&painter),
            dataset_error: None,
            model_error: None,
            prediction: None,
        };

        let dataset = match &self.dataset {
            Some(Ok(dataset)) => dataset,
            Some(Err(e)) => {
                frame.text.push_str(&dataset_failure(&painter, e));
                frame.dataset_error = Some(e.clone());
                return frame;
            }
            None => return frame,
        };

        let text = &mut frame.text;
        text.push_str(&painter.success("Airfoil Self-Noise data loaded."));
        text.push('\n');
        if self.config.show_raw {
            text.push_str(&render::heading(&painter, "Raw Data Preview"));
            text.push_str(&render::raw_table(&dataset.head(self.config.raw_rows)));
        }

        text.push_str(&render::rule());
        text.push_str(&render::heading(&painter, "Interactive Exploratory Data Analysis"));
        text.push_str(&render::view_selector(
            self.config.variant.views(),
            self.config.view,
        ));
        text.push_str(&render::heading(&painter, self.config.view.title()));
        text.push_str(&render_view(&painter, dataset, self.config.view, self.config.histogram_bins));

        text.push_str(&render::rule());
        text.push_str(&render::heading(&painter, "Noise Level Prediction (SSPL)"));

        let sliders = slider_specs(dataset, self.config.variant);
        let mut values = default_features(&sliders).to_array();
        for ((value, input), spec) in values.iter_mut().zip(self.inputs).zip(&sliders) {
            if let Some(raw) = input {
                let clamped = spec.clamp(raw);
                if clamped != raw {
                    warn!("{} = {} clamped to {}", spec.column, raw, clamped);
                }
                *value = clamped;
            }
        }
        let features = FeatureVector::from_array(values);

        if self.config.loading == LoadingMode::OnDemand && !self.prediction_requested {
            text.push_str(&render::sliders(&sliders, &features));
            text.push_str(&painter.info("Adjust the inputs, then run 'predict' to load the model."));
            text.push('\n');
        } else {
            match self.models.get_or_load(&self.config.model_path) {
                Ok(model) => {
                    let result = PredictionResult::new(&features, model);
                    info!(
                        "Predicted {} = {:.2} dB ({:?})",
                        TARGET_COLUMN, result.value, result.category
                    );
                    text.push_str("Input features:\n");
                    text.push_str(&render::sliders(&sliders, &features));
                    text.push_str(&render::prediction(&painter, &result));
                    text.push_str(&render::category_legend(&painter));
                    frame.prediction = Some(result);
                }
                Err(e) => {
                    text.push_str(&model_failure(&painter, &e));
                    frame.model_error = Some(e);
                }
            }
        }

        frame.text.push_str(&render::footer(&painter));
        frame
    }
}

fn render_view(painter: &Painter, dataset: &AirfoilDataset, view: View, bins: usize) -> String {
    match view {
        View::Summary => render::summary_table(&statistics::describe(dataset)),
        View::Correlation => {
            render::correlation_heatmap(painter, &statistics::correlation(dataset))
        }
        View::Histogram => dataset
            .column(TARGET_COLUMN)
            .and_then(|column| Histogram::new(column, bins))
            .map(|hist| render::histogram_chart(&hist))
            .unwrap_or_default(),
        View::Scatter => render::scatter_grid(dataset),
    }
}

fn dataset_failure(painter: &Painter, err: &LoadError) -> String {
    let mut out = String::new();
    match err {
        LoadError::DatasetNotFound { path } => {
            out.push_str(&painter.error(&format!("Error: file '{}' not found.", path.display())));
            out.push('\n');
            out.push_str(&painter.info(
                "Make sure the CSV file is in the same directory the dashboard is started from.",
            ));
        }
        other => {
            out.push_str(&painter.error(&format!("An error occurred while loading the data: {other}")));
        }
    }
    out.push('\n');
    out
}

fn model_failure(painter: &Painter, err: &LoadError) -> String {
    let mut out = String::new();
    match err {
        LoadError::ModelUnavailable { path } => {
            out.push_str(&painter.error(&format!("Error: model '{}' not found.", path.display())));
            out.push('\n');
            out.push_str(&painter.info(
                "Train the model and save it as linear_regression_model.json next to the dataset.",
            ));
        }
        other => {
            out.push_str(&painter.error(&format!("An error occurred while loading the model: {other}")));
        }
    }
    out.push('\n');
    out.push_str(&painter.warning(
        "The prediction model is unavailable or failed to load. Prediction is disabled.",
    ));
    out.push('\n');
    out
}
