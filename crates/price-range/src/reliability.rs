use pricing_core::PipelineError;
use serde::{Deserialize, Serialize};

use crate::PriceRange;

/// Observed production tuning: a band as wide as 20% of the estimate
/// maps to a score of exactly 0.5.
pub const DEFAULT_CENTER: f64 = 0.2;
pub const DEFAULT_SHAPE: f64 = 20.0;

/// Maps the relative width of a reconciled price band to a confidence
/// score in (0, 1) via a logistic transform.
///
/// `score = 1 / (1 + e^{shape * (u - center)})` where
/// `u = (high - low) / mid`. Strictly decreasing in `u`: tight bands
/// approach 1, wide bands approach 0. `center` is the relative width
/// scored 0.5; `shape` controls how sharp the transition is.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ReliabilityScorer {
    pub center: f64,
    pub shape: f64,
}

impl Default for ReliabilityScorer {
    fn default() -> Self {
        Self {
            center: DEFAULT_CENTER,
            shape: DEFAULT_SHAPE,
        }
    }
}

impl ReliabilityScorer {
    pub fn new(center: f64, shape: f64) -> Self {
        Self { center, shape }
    }

    /// Score a reconciled band. `mid` must be strictly positive; a price
    /// model predicting a non-positive median violates the caller's
    /// precondition and is reported as invalid data.
    pub fn score(&self, range: &PriceRange) -> Result<f64, PipelineError> {
        if range.mid <= 0.0 {
            return Err(PipelineError::InvalidData(format!(
                "reliability needs a positive mid price, got {}",
                range.mid
            )));
        }
        let uncertainty = range.relative_width();
        Ok(1.0 / (1.0 + (self.shape * (uncertainty - self.center)).exp()))
    }
}
