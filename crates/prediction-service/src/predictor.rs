use std::collections::HashMap;

use price_range::{reconcile, PriceRange, ReliabilityScorer};
use pricing_core::{schema, PipelineError, QuantileModel, Value};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// A displayed estimate: the reconciled band plus its reliability score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceEstimate {
    pub range: PriceRange,
    pub reliability: f64,
}

/// End-to-end estimator over three independently trained quantile
/// models (25th/50th/75th price percentile).
pub struct PriceEstimator {
    q25: Box<dyn QuantileModel>,
    q50: Box<dyn QuantileModel>,
    q75: Box<dyn QuantileModel>,
    scorer: ReliabilityScorer,
}

impl PriceEstimator {
    pub fn new(
        q25: Box<dyn QuantileModel>,
        q50: Box<dyn QuantileModel>,
        q75: Box<dyn QuantileModel>,
        scorer: ReliabilityScorer,
    ) -> Self {
        Self {
            q25,
            q50,
            q75,
            scorer,
        }
    }

    /// Estimate a price band for one user input row.
    ///
    /// The three raw predictions may cross; the reconciler repairs the
    /// ordering before scoring, so callers always see a valid band.
    pub fn estimate(
        &self,
        input: &HashMap<String, Value>,
    ) -> Result<PriceEstimate, PipelineError> {
        check_categorical_domains(input);

        // The location features are a fixed reference point, never part
        // of the form input.
        let mut input = input.clone();
        let expected = self.q50.feature_names();
        if expected.iter().any(|n| n == "lat") {
            input
                .entry("lat".to_string())
                .or_insert(Value::Num(schema::REFERENCE_LAT));
        }
        if expected.iter().any(|n| n == "lon") {
            input
                .entry("lon".to_string())
                .or_insert(Value::Num(schema::REFERENCE_LON));
        }

        let row = crate::assemble_features(self.q50.as_ref(), &input);
        let raw_q1 = self.q25.predict(&row)?;
        let raw_q2 = self.q50.predict(&row)?;
        let raw_q3 = self.q75.predict(&row)?;
        debug!(raw_q1, raw_q2, raw_q3, "raw quantile predictions");

        let range = reconcile(raw_q1, raw_q2, raw_q3);
        let reliability = self.scorer.score(&range)?;
        Ok(PriceEstimate { range, reliability })
    }
}

/// Warn about categorical labels outside the known schema domains. The
/// models handle unseen categories themselves, so this only flags likely
/// form mistakes instead of rejecting the request. Returns the offending
/// field names.
fn check_categorical_domains(input: &HashMap<String, Value>) -> Vec<&'static str> {
    let domains: [(&str, &[&str]); 8] = [
        ("fuel_type", schema::FUEL_TYPES),
        ("gearbox_type", schema::GEARBOX_TYPES),
        ("interior_type", schema::INTERIOR_TYPES),
        ("exterior_color", schema::EXTERIOR_COLORS),
        ("interior_color", schema::INTERIOR_COLORS),
        ("number_plate_ending", schema::NUMBER_PLATE_ENDINGS),
        ("drive_type", schema::DRIVE_TYPES),
        ("body_type", schema::BODY_TYPES),
    ];
    let mut flagged = Vec::new();
    for (field, domain) in domains {
        if let Some(Value::Cat(label)) = input.get(field) {
            if !domain.contains(&label.as_str()) {
                warn!(field, label = %label, "label outside the known domain");
                flagged.push(field);
            }
        }
    }
    flagged
}
