use serde::{Deserialize, Serialize};

/// An ordered price band: `low <= mid <= high`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub low: f64,
    pub mid: f64,
    pub high: f64,
}

impl PriceRange {
    /// Band width relative to the point estimate.
    pub fn relative_width(&self) -> f64 {
        (self.high - self.low) / self.mid
    }
}

/// Repair the ordering of three independently predicted quantiles
/// (25th/50th/75th).
///
/// Models trained separately on each quantile loss can cross for a given
/// input. First matching rule wins:
/// - endpoints inverted (`q3 <= q1`): swap them and synthesize the
///   midpoint as their average, discarding the model's own median;
/// - midpoint out of order: keep the outer bounds, synthesize the
///   midpoint as their average;
/// - otherwise pass the triple through unchanged.
///
/// Total over all real inputs; never an error.
pub fn reconcile(q1: f64, q2: f64, q3: f64) -> PriceRange {
    if q3 <= q1 {
        return PriceRange {
            low: q3,
            mid: (q1 + q3) / 2.0,
            high: q1,
        };
    }
    if q1 >= q2 || q2 >= q3 {
        return PriceRange {
            low: q1,
            mid: (q1 + q3) / 2.0,
            high: q3,
        };
    }
    PriceRange {
        low: q1,
        mid: q2,
        high: q3,
    }
}
