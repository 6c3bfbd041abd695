use std::collections::HashMap;

use pricing_core::{FeatureRow, QuantileModel, Value};
use tracing::warn;

/// Reindex a user input mapping into the model's expected column order.
///
/// Fields the user did not supply stay `Missing`; names the model does
/// not know are dropped with a warning rather than failing the request.
pub fn assemble_features(
    model: &dyn QuantileModel,
    input: &HashMap<String, Value>,
) -> FeatureRow {
    let names = model.feature_names().to_vec();
    let values = names
        .iter()
        .map(|name| input.get(name).cloned().unwrap_or(Value::Missing))
        .collect();

    for name in input.keys() {
        if !names.iter().any(|n| n == name) {
            warn!(field = %name, "input field not known to the model, ignoring");
        }
    }

    FeatureRow { names, values }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricing_core::PipelineError;

    struct FixedModel {
        names: Vec<String>,
    }

    impl QuantileModel for FixedModel {
        fn feature_names(&self) -> &[String] {
            &self.names
        }

        fn categorical_features(&self) -> Vec<usize> {
            vec![1]
        }

        fn predict(&self, _row: &FeatureRow) -> Result<f64, PipelineError> {
            Ok(0.0)
        }
    }

    fn model() -> FixedModel {
        FixedModel {
            names: vec!["mileage".into(), "brand".into(), "engine_size".into()],
        }
    }

    #[test]
    fn test_order_follows_model_not_input() {
        let model = model();
        let mut input = HashMap::new();
        input.insert("engine_size".to_string(), Value::Num(1600.0));
        input.insert("brand".to_string(), Value::Cat("opel".into()));
        input.insert("mileage".to_string(), Value::Num(90_000.0));

        let row = assemble_features(&model, &input);
        assert_eq!(row.names, model.names);
        assert_eq!(row.values[0], Value::Num(90_000.0));
        assert_eq!(row.values[1], Value::Cat("opel".into()));
        assert_eq!(row.values[2], Value::Num(1600.0));
    }

    #[test]
    fn test_absent_fields_stay_missing() {
        let model = model();
        let mut input = HashMap::new();
        input.insert("brand".to_string(), Value::Cat("fiat".into()));

        let row = assemble_features(&model, &input);
        assert_eq!(row.values[0], Value::Missing);
        assert_eq!(row.values[2], Value::Missing);
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let model = model();
        let mut input = HashMap::new();
        input.insert("spoiler_count".to_string(), Value::Num(2.0));

        let row = assemble_features(&model, &input);
        assert_eq!(row.values.len(), 3);
        assert!(row.get("spoiler_count").is_none());
    }
}
