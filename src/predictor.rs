//! The prediction core: one affine forward pass and the band lookup.

use ndarray::Array1;

use crate::model_inference::LinearModel;
use crate::SeverityCategory;

/// Inputs for a single prediction, in training column order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector {
    /// Frequency `f` in Hz.
    pub frequency: f64,
    /// Angle of attack `alpha` in degrees.
    pub angle: f64,
    /// Chord length `c` in meters.
    pub chord: f64,
    /// Free-stream velocity `U_infinity` in m/s.
    pub velocity: f64,
    /// Suction-side displacement thickness `delta` in meters.
    pub displacement: f64,
}

impl FeatureVector {
    pub fn new(frequency: f64, angle: f64, chord: f64, velocity: f64, displacement: f64) -> Self {
        Self {
            frequency,
            angle,
            chord,
            velocity,
            displacement,
        }
    }

    pub fn from_array(values: [f64; 5]) -> Self {
        let [frequency, angle, chord, velocity, displacement] = values;
        Self::new(frequency, angle, chord, velocity, displacement)
    }

    pub fn to_array(&self) -> [f64; 5] {
        [
            self.frequency,
            self.angle,
            self.chord,
            self.velocity,
            self.displacement,
        ]
    }

    pub fn to_ndarray(&self) -> Array1<f64> {
        Array1::from(self.to_array().to_vec())
    }
}

/// A predicted SSPL value with its band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictionResult {
    pub value: f64,
    pub category: SeverityCategory,
}

impl PredictionResult {
    pub fn new(features: &FeatureVector, model: &LinearModel) -> Self {
        let value = predict(features, model);
        Self {
            value,
            category: classify(value),
        }
    }
}

/// Parses a user-supplied feature value. Only finite numbers are accepted.
pub fn parse_feature_value(raw: &str) -> Result<f64, String> {
    let value = raw
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("'{raw}' is not a number"))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(format!("'{raw}' is not a finite number"))
    }
}

/// Affine model output: `w · x + b`.
pub fn predict(features: &FeatureVector, model: &LinearModel) -> f64 {
    model.coefficients().dot(&features.to_ndarray()) + model.intercept()
}

/// Maps a predicted level to its band. NaN falls through to the last branch.
pub fn classify(prediction: f64) -> SeverityCategory {
    if prediction > 120.0 {
        SeverityCategory::Poor
    } else if prediction >= 100.0 {
        SeverityCategory::Moderate
    } else if prediction >= 80.0 {
        SeverityCategory::Good
    } else {
        SeverityCategory::VeryGood
    }
}
