//! Terminal rendering for the dashboard sections.
//!
//! Every function returns the section as a `String`; the caller decides where
//! it goes. Nothing here touches files or the model.

use ndarray::Array2;
use std::fmt::Write;

use crate::config::{SliderSpec, View};
use crate::dataset::{AirfoilDataset, COLUMNS};
use crate::predictor::{FeatureVector, PredictionResult};
use crate::statistics::{ColumnStats, Histogram, DESCRIBE_ROWS};
use crate::{SeverityCategory, FEATURE_COLUMNS, TARGET_COLUMN};

const RESET: &str = "\x1b[0m";
const RULE: &str = "────────────────────────────────────────────────────────────────────────────";

const SCATTER_WIDTH: usize = 34;
const SCATTER_HEIGHT: usize = 10;
const SCATTER_COLUMNS: usize = 2;
const BAR_WIDTH: usize = 40;

/// Applies ANSI colors when enabled.
#[derive(Debug, Clone, Copy)]
pub struct Painter {
    enabled: bool,
}

impl Painter {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn paint(&self, text: &str, color: &str) -> String {
        if !self.enabled {
            return text.to_string();
        }
        let code = match color {
            "red" => "\x1b[31m",
            "green" => "\x1b[32m",
            "orange" | "yellow" => "\x1b[33m",
            "blue" => "\x1b[34m",
            "bold" => "\x1b[1m",
            _ => return text.to_string(),
        };
        format!("{code}{text}{RESET}")
    }

    pub fn success(&self, text: &str) -> String {
        self.paint(&format!("✓ {text}"), "green")
    }

    pub fn error(&self, text: &str) -> String {
        self.paint(&format!("✗ {text}"), "red")
    }

    pub fn warning(&self, text: &str) -> String {
        self.paint(&format!("! {text}"), "yellow")
    }

    pub fn info(&self, text: &str) -> String {
        self.paint(&format!("i {text}"), "blue")
    }
}

pub fn rule() -> String {
    format!("{RULE}\n")
}

pub fn heading(painter: &Painter, text: &str) -> String {
    format!("{}\n", painter.paint(&format!("== {text} =="), "bold"))
}

pub fn title(painter: &Painter) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}",
        painter.paint("Airfoil Self-Noise Data and Prediction Dashboard", "bold")
    );
    out.push_str(
        "Explore airfoil self-noise measurements and predict the scaled sound pressure level.\n",
    );
    out.push_str(&rule());
    out
}

pub fn footer(painter: &Painter) -> String {
    let mut out = rule();
    out.push_str(&heading(painter, "About This Dashboard"));
    out.push_str(&painter.info(
        "Visualizes the Airfoil Self-Noise data and predicts SSPL with a multiple linear regression model.",
    ));
    out.push('\n');
    out
}

fn format_value(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value != 0.0 && (value.abs() < 0.01 || value.abs() >= 1e6) {
        format!("{value:.4e}")
    } else {
        format!("{value:.4}")
    }
}

/// First rows of the dataset with their index.
pub fn raw_table(rows: &Array2<f64>) -> String {
    let mut out = String::new();
    let _ = write!(out, "{:>5}", "");
    for name in COLUMNS {
        let _ = write!(out, " {name:>12}");
    }
    out.push('\n');

    for (i, row) in rows.outer_iter().enumerate() {
        let _ = write!(out, "{i:>5}");
        for &value in row.iter() {
            let _ = write!(out, " {:>12}", format_value(value));
        }
        out.push('\n');
    }
    out
}

/// The `describe()` table: one row per statistic, one column per dataset column.
pub fn summary_table(stats: &[(&'static str, ColumnStats)]) -> String {
    let mut out = String::new();
    let _ = write!(out, "{:>6}", "");
    for (name, _) in stats {
        let _ = write!(out, " {name:>12}");
    }
    out.push('\n');

    for (row_idx, label) in DESCRIBE_ROWS.iter().enumerate() {
        let _ = write!(out, "{label:>6}");
        for (_, column) in stats {
            let _ = write!(out, " {:>12}", format_value(column.as_row()[row_idx]));
        }
        out.push('\n');
    }
    out
}

fn shade(r: f64) -> char {
    if r.is_nan() {
        return ' ';
    }
    match r.abs() {
        a if a >= 0.75 => '█',
        a if a >= 0.5 => '▓',
        a if a >= 0.25 => '▒',
        _ => '░',
    }
}

fn correlation_color(r: f64) -> &'static str {
    if r.is_nan() {
        ""
    } else if r >= 0.0 {
        "red"
    } else {
        "blue"
    }
}

/// Annotated correlation matrix; shading tracks |r|, color tracks sign.
pub fn correlation_heatmap(painter: &Painter, matrix: &Array2<f64>) -> String {
    let mut out = String::new();
    let _ = write!(out, "{:>11}", "");
    for name in COLUMNS {
        let _ = write!(out, " {name:>10}");
    }
    out.push('\n');

    for (i, row) in matrix.outer_iter().enumerate() {
        let _ = write!(out, "{:>11}", COLUMNS.get(i).copied().unwrap_or(""));
        for &r in row.iter() {
            let cell = if r.is_nan() {
                format!("{:>10}", "NaN")
            } else {
                let bar = shade(r).to_string().repeat(3);
                format!("{bar} {r:>6.2}")
            };
            let _ = write!(out, " {}", painter.paint(&cell, correlation_color(r)));
        }
        out.push('\n');
    }
    out.push_str("legend: ░ <0.25  ▒ <0.50  ▓ <0.75  █ >=0.75 (red positive, blue negative)\n");
    out
}

/// Horizontal bar chart of histogram bins.
pub fn histogram_chart(hist: &Histogram) -> String {
    let mut out = String::new();
    let peak = hist.counts.iter().copied().max().unwrap_or(0).max(1);

    for (i, &count) in hist.counts.iter().enumerate() {
        let filled = count * BAR_WIDTH / peak;
        let _ = writeln!(
            out,
            "{:>9.2} - {:<9.2} │{}{} {count}",
            hist.edges[i],
            hist.edges[i + 1],
            "█".repeat(filled),
            "░".repeat(BAR_WIDTH - filled)
        );
    }
    let _ = writeln!(out, "{TARGET_COLUMN} (dB), {} samples", hist.total());
    out
}

fn density_mark(count: usize) -> char {
    match count {
        0 => ' ',
        1 => '.',
        2..=4 => 'o',
        _ => '@',
    }
}

/// One scatter plot as fixed-width text lines.
fn scatter_panel(feature: &str, points: &[(f64, f64)]) -> Vec<String> {
    let title = format!("{feature} vs {TARGET_COLUMN}");
    let mut lines = vec![format!("{title:^width$}", width = SCATTER_WIDTH + 9)];

    let bounds = |pick: fn(&(f64, f64)) -> f64| {
        points.iter().map(pick).fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        })
    };
    let (x_min, x_max) = bounds(|p| p.0);
    let (y_min, y_max) = bounds(|p| p.1);

    let mut grid = vec![vec![0usize; SCATTER_WIDTH]; SCATTER_HEIGHT];
    for &(x, y) in points {
        let col = scale(x, x_min, x_max, SCATTER_WIDTH);
        let row = SCATTER_HEIGHT - 1 - scale(y, y_min, y_max, SCATTER_HEIGHT);
        grid[row][col] += 1;
    }

    for (i, cells) in grid.iter().enumerate() {
        let label = match i {
            0 => format!("{y_max:>7.1}"),
            i if i == SCATTER_HEIGHT - 1 => format!("{y_min:>7.1}"),
            _ => " ".repeat(7),
        };
        let row: String = cells.iter().map(|&c| density_mark(c)).collect();
        lines.push(format!("{label} │{row}"));
    }
    lines.push(format!("{} └{}", " ".repeat(7), "─".repeat(SCATTER_WIDTH)));
    let x_axis = format!(
        "{:<half$}{:>half$}",
        format_value(x_min),
        format_value(x_max),
        half = SCATTER_WIDTH / 2
    );
    lines.push(format!("{}  {x_axis}", " ".repeat(7)));
    lines
}

fn scale(value: f64, min: f64, max: f64, cells: usize) -> usize {
    if max.is_nan() || min.is_nan() || max <= min || !value.is_finite() {
        return 0;
    }
    let position = ((value - min) / (max - min) * (cells - 1) as f64).round();
    (position.max(0.0) as usize).min(cells - 1)
}

/// Every feature against SSPL, two panels per row.
pub fn scatter_grid(dataset: &AirfoilDataset) -> String {
    let panels: Vec<Vec<String>> = FEATURE_COLUMNS
        .iter()
        .filter_map(|&feature| dataset.scatter(feature).map(|p| scatter_panel(feature, &p)))
        .collect();

    let mut out = String::new();
    for row in panels.chunks(SCATTER_COLUMNS) {
        let height = row.iter().map(Vec::len).max().unwrap_or(0);
        for line in 0..height {
            let joined: Vec<String> = row
                .iter()
                .map(|panel| {
                    let text = panel.get(line).map(String::as_str).unwrap_or("");
                    format!("{text:<width$}", width = SCATTER_WIDTH + 9)
                })
                .collect();
            let _ = writeln!(out, "{}", joined.join("   ").trim_end());
        }
        out.push('\n');
    }
    let _ = writeln!(out, "marks: . 1 point  o 2-4 points  @ 5+ points; y axis {TARGET_COLUMN} (dB)");
    out
}

/// The view selector, marking the active choice.
pub fn view_selector(views: &[View], active: View) -> String {
    let mut out = String::from("Select analysis view:\n");
    for view in views {
        let mark = if *view == active { "(•)" } else { "( )" };
        let _ = writeln!(out, "  {mark} {}", view.title());
    }
    out
}

/// Slider positions for the current inputs.
pub fn sliders(specs: &[SliderSpec], features: &FeatureVector) -> String {
    let mut out = String::new();
    for (spec, value) in specs.iter().zip(features.to_array()) {
        let span = spec.max - spec.min;
        let filled = if span > 0.0 {
            (((value - spec.min) / span) * 20.0).round().clamp(0.0, 20.0) as usize
        } else {
            0
        };
        let _ = writeln!(
            out,
            "  {:<52} [{}{}] {} (range {} .. {})",
            spec.label,
            "=".repeat(filled),
            "-".repeat(20 - filled),
            format_value(value),
            format_value(spec.min),
            format_value(spec.max)
        );
    }
    out
}

/// The predicted level and its band, colored per band.
pub fn prediction(painter: &Painter, result: &PredictionResult) -> String {
    let mut out = String::new();
    if result.value.is_nan() {
        let _ = writeln!(
            out,
            "Predicted Sound Pressure Level (SSPL) for the given inputs: undefined"
        );
        let _ = writeln!(out, "Noise category: Undefined (no band applies)");
        return out;
    }
    let color = result.category.color();
    let _ = writeln!(
        out,
        "Predicted Sound Pressure Level (SSPL) for the given inputs: {}",
        painter.paint(&format!("{:.2} dB", result.value), color)
    );
    let _ = writeln!(
        out,
        "Noise category: {}",
        painter.paint(result.category.as_str(), color)
    );
    out
}

/// Legend of every band and its bounds.
pub fn category_legend(painter: &Painter) -> String {
    let mut out = String::from("Bands:");
    for category in SeverityCategory::ALL.iter().rev() {
        let bounds = match category {
            SeverityCategory::Poor => "> 120",
            SeverityCategory::Moderate => "100 - 120",
            SeverityCategory::Good => "80 - <100",
            SeverityCategory::VeryGood => "< 80",
        };
        let _ = write!(out, "  {}", painter.paint(bounds, category.color()));
    }
    out.push('\n');
    out
}
