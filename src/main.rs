use airfoil_noise_dashboard::config::ConfigFile;
use airfoil_noise_dashboard::dashboard::{Command, HELP};
use airfoil_noise_dashboard::{
    parse_feature_value, Dashboard, DashboardConfig, LoadingMode, Result, Variant, View,
};
use clap::Parser;
use log::{info, warn};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Airfoil self-noise data explorer and SSPL predictor.
#[derive(Debug, Parser)]
#[command(name = "airfoil-dashboard", version, about)]
struct Cli {
    /// JSON settings file; explicit flags override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Dataset CSV path.
    #[arg(long)]
    data: Option<PathBuf>,

    /// Serialized linear model path.
    #[arg(long)]
    model: Option<PathBuf>,

    /// Slider range layout and offered views.
    #[arg(long, value_enum)]
    variant: Option<Variant>,

    /// When the model is loaded.
    #[arg(long, value_enum)]
    loading: Option<LoadingMode>,

    /// Analysis view to render.
    #[arg(long, value_enum)]
    view: Option<View>,

    /// Show the first rows of the raw data.
    #[arg(long)]
    raw: bool,

    /// Number of raw rows to show.
    #[arg(long)]
    raw_rows: Option<usize>,

    /// Bins for the SSPL histogram.
    #[arg(long)]
    bins: Option<usize>,

    /// Frequency f [Hz].
    #[arg(long = "f", value_parser = parse_feature_value, allow_negative_numbers = true)]
    frequency: Option<f64>,

    /// Angle of attack alpha [deg].
    #[arg(long = "alpha", value_parser = parse_feature_value, allow_negative_numbers = true)]
    angle: Option<f64>,

    /// Chord length c [m].
    #[arg(long = "c", value_parser = parse_feature_value, allow_negative_numbers = true)]
    chord: Option<f64>,

    /// Free-stream velocity U_infinity [m/s].
    #[arg(long = "u-infinity", value_parser = parse_feature_value, allow_negative_numbers = true)]
    velocity: Option<f64>,

    /// Suction-side displacement thickness delta [m].
    #[arg(long = "delta", value_parser = parse_feature_value, allow_negative_numbers = true)]
    displacement: Option<f64>,

    /// Run the prediction even when loading is on-demand.
    #[arg(long)]
    predict: bool,

    /// Disable ANSI colors.
    #[arg(long)]
    no_color: bool,

    /// Read commands from stdin and re-render after each one.
    #[arg(short, long)]
    interactive: bool,

    /// Debug logging unless RUST_LOG is set.
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn resolve_config(&self) -> Result<DashboardConfig> {
        let mut file = match &self.config {
            Some(path) => ConfigFile::load(path)?,
            None => ConfigFile::default(),
        };

        if self.variant.is_some() {
            file.variant = self.variant;
        }
        let mut config = DashboardConfig::from_file(&file);

        if let Some(path) = &self.data {
            config.dataset_path = path.clone();
        }
        if let Some(path) = &self.model {
            config.model_path = path.clone();
        }
        if let Some(loading) = self.loading {
            config.loading = loading;
        }
        if let Some(view) = self.view {
            config.view = view;
        }
        if self.raw {
            config.show_raw = true;
        }
        if let Some(rows) = self.raw_rows {
            config.raw_rows = rows;
        }
        if let Some(bins) = self.bins {
            config.histogram_bins = bins.max(1);
        }
        if self.no_color {
            config.color = false;
        }
        Ok(config)
    }

    fn inputs(&self) -> [Option<f64>; 5] {
        [
            self.frequency,
            self.angle,
            self.chord,
            self.velocity,
            self.displacement,
        ]
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let config = cli.resolve_config()?;
    info!("Using dataset: {}", config.dataset_path.display());
    info!("Using model: {}", config.model_path.display());

    let mut dashboard = Dashboard::new(config);
    for (column, value) in cli.inputs().into_iter().enumerate() {
        if let Some(value) = value {
            dashboard.set_input(column, value);
        }
    }
    if cli.predict {
        dashboard.request_prediction();
    }

    if cli.interactive {
        run_interactive(&mut dashboard)
    } else {
        let frame = dashboard.render();
        print!("{}", frame.text);
        match frame.dataset_error {
            Some(e) => Err(e.into()),
            None => Ok(()),
        }
    }
}

fn run_interactive(dashboard: &mut Dashboard) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    print!("{}", dashboard.render().text);
    println!("{HELP}");

    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        match Command::parse(&line) {
            Ok(Command::Help) => println!("{HELP}"),
            Ok(command) => {
                if !dashboard.apply(command) {
                    break;
                }
                print!("{}", dashboard.render().text);
            }
            Err(e) => {
                warn!("Rejected command {:?}: {}", line.trim(), e);
                println!("{e}");
            }
        }
    }

    info!("Shutting down dashboard");
    Ok(())
}
