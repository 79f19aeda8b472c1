//! Study-hours to score prediction with a single-feature least-squares line.

use crate::error::{RecordError, Result};

/// Smallest number of usable samples a fit will accept.
pub const MIN_SAMPLES: usize = 5;

/// A fitted line `score = slope * hours + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScorePredictor {
    slope: f64,
    intercept: f64,
    samples: usize,
}

impl ScorePredictor {
    /// Fits ordinary least squares over `(study_hours, score)` pairs.
    ///
    /// Pairs with a non-finite value are dropped before counting. If every
    /// sample has the same hours the line is flat at the mean score.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::InsufficientData`] if fewer than [`MIN_SAMPLES`]
    /// usable pairs remain.
    pub fn fit(samples: &[(f64, f64)]) -> Result<Self> {
        let (hours, scores): (Vec<f64>, Vec<f64>) = samples
            .iter()
            .copied()
            .filter(|(h, s)| h.is_finite() && s.is_finite())
            .unzip();

        if hours.len() < MIN_SAMPLES {
            return Err(RecordError::InsufficientData {
                have: hours.len(),
                need: MIN_SAMPLES,
            });
        }

        let n = hours.len() as f64;
        let mean_h = hours.iter().sum::<f64>() / n;
        let mean_s = scores.iter().sum::<f64>() / n;

        let (covariance, variance) = hours.iter().zip(&scores).fold(
            (0.0, 0.0),
            |(cov, var), (h, s)| {
                let dh = h - mean_h;
                (cov + dh * (s - mean_s), var + dh * dh)
            },
        );

        let slope = if variance == 0.0 { 0.0 } else { covariance / variance };

        Ok(Self {
            slope,
            intercept: mean_s - slope * mean_h,
            samples: hours.len(),
        })
    }

    /// Raw regression output; may fall outside 0..=100.
    pub fn predict(&self, hours: f64) -> f64 {
        self.slope * hours + self.intercept
    }

    /// Prediction limited to the valid score range, for display.
    pub fn predict_clamped(&self, hours: f64) -> f64 {
        self.predict(hours).clamp(0.0, 100.0)
    }

    pub fn slope(&self) -> f64 {
        self.slope
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    pub fn sample_count(&self) -> usize {
        self.samples
    }
}
