//! Hierarchical group-wise imputation of missing values.
//!
//! Missing cells are filled from the finest cohort that has any observed
//! value for the target column: (brand, model, registration_year), then
//! (brand, model), then the whole dataset. Categorical columns take the
//! cohort mode, numeric columns the cohort mean.

use std::collections::HashMap;

use pricing_core::{group_rows, CohortLevel, Dataset, PipelineError, Value};
use statrs::statistics::Statistics;
use tracing::debug;

use crate::columns::{classify, ColumnKind};

/// Cohort fallback order, finest first.
const FALLBACK_LEVELS: [CohortLevel; 2] = [CohortLevel::BrandModelYear, CohortLevel::BrandModel];

/// Mode over the given rows' non-missing values. Ties break toward the
/// highest count, then the lexicographically smallest rendered value, so
/// repeated runs fill identically.
fn mode_of(values: &[Value], rows: &[usize]) -> Option<Value> {
    let mut counts: HashMap<String, (usize, &Value)> = HashMap::new();
    for &row in rows {
        let v = &values[row];
        if v.is_missing() {
            continue;
        }
        let entry = counts.entry(v.key_token()).or_insert((0, v));
        entry.0 += 1;
    }
    counts
        .into_iter()
        .max_by(|(ka, (ca, _)), (kb, (cb, _))| ca.cmp(cb).then_with(|| kb.cmp(ka)))
        .map(|(_, (_, v))| v.clone())
}

/// Mean over the given rows' non-missing numeric values.
fn mean_of(values: &[Value], rows: &[usize]) -> Option<Value> {
    let observed: Vec<f64> = rows
        .iter()
        .filter_map(|&row| values[row].as_num())
        .collect();
    if observed.is_empty() {
        return None;
    }
    let observed: &[f64] = &observed;
    Some(Value::Num(observed.mean()))
}

/// Fill missing cells of one column in place.
///
/// After this call the column has no missing cells, unless it had no
/// observed value anywhere in the dataset, in which case it is left
/// entirely missing (documented limitation, not an error).
pub fn impute_column(dataset: &mut Dataset, name: &str) -> Result<(), PipelineError> {
    let kind = classify(dataset.require_column(name)?);
    let aggregate = match kind {
        ColumnKind::Categorical => mode_of,
        ColumnKind::Numeric => mean_of,
    };

    for level in FALLBACK_LEVELS {
        let groups = group_rows(dataset, level);
        let col = dataset
            .column_mut(name)
            .ok_or_else(|| PipelineError::MissingColumn(name.to_string()))?;
        for rows in groups.values() {
            if !rows.iter().any(|&r| col.values[r].is_missing()) {
                continue;
            }
            let Some(fill) = aggregate(&col.values, rows) else {
                continue;
            };
            for &row in rows {
                if col.values[row].is_missing() {
                    col.values[row] = fill.clone();
                }
            }
        }
    }

    // Global fallback for rows whose cohorts held no observed value at
    // any level.
    let col = dataset
        .column_mut(name)
        .ok_or_else(|| PipelineError::MissingColumn(name.to_string()))?;
    if col.has_missing() {
        let all_rows: Vec<usize> = (0..col.values.len()).collect();
        if let Some(fill) = aggregate(&col.values, &all_rows) {
            for value in &mut col.values {
                if value.is_missing() {
                    *value = fill.clone();
                }
            }
        } else {
            debug!(column = name, "no observed value anywhere, column left missing");
        }
    }

    cast_binary_to_bool(dataset, name);
    Ok(())
}

/// Fill every column that still contains a missing value.
pub fn impute_all(dataset: &mut Dataset) -> Result<(), PipelineError> {
    let targets: Vec<String> = dataset
        .columns()
        .iter()
        .filter(|c| c.has_missing())
        .map(|c| c.name.clone())
        .collect();
    for name in &targets {
        impute_column(dataset, name)?;
    }
    debug!(columns = targets.len(), "imputation pass complete");
    Ok(())
}

/// Boolean flags sometimes survive scraping as 1.0/0.0 numbers. One such
/// cell anywhere marks the whole column as a flag column, so every
/// numeric cell is cast, nonzero meaning true (a fractional mean fill in
/// a flag column becomes true). Text columns are never a numeric
/// encoding and are left alone.
fn cast_binary_to_bool(dataset: &mut Dataset, name: &str) {
    let Some(col) = dataset.column_mut(name) else {
        return;
    };
    let has_text = col.values.iter().any(|v| matches!(v, Value::Cat(_)));
    let has_binary_num = col
        .values
        .iter()
        .any(|v| matches!(v, Value::Num(x) if *x == 0.0 || *x == 1.0));
    if has_text || !has_binary_num {
        return;
    }
    for v in &mut col.values {
        if let Value::Num(x) = v {
            *v = Value::Bool(*x != 0.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricing_core::Column;

    fn keyed(brand: &[&str], model: &[&str], year: &[f64], target: Column) -> Dataset {
        let n = brand.len();
        Dataset::new(
            (0..n).map(|i| i.to_string()).collect(),
            vec![
                Column::new(
                    "brand",
                    brand.iter().map(|b| Value::Cat((*b).into())).collect(),
                ),
                Column::new(
                    "model",
                    model.iter().map(|m| Value::Cat((*m).into())).collect(),
                ),
                Column::new(
                    "registration_year",
                    year.iter().map(|y| Value::Num(*y)).collect(),
                ),
                target,
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_numeric_fill_uses_finest_cohort_mean() {
        let mut ds = keyed(
            &["opel", "opel", "opel"],
            &["corsa", "corsa", "corsa"],
            &[2015.0, 2015.0, 2015.0],
            Column::new(
                "mileage",
                vec![Value::Num(100.0), Value::Num(200.0), Value::Missing],
            ),
        );
        impute_column(&mut ds, "mileage").unwrap();
        assert_eq!(ds.value("mileage", 2), Some(&Value::Num(150.0)));
    }

    #[test]
    fn test_coarser_cohort_fallback() {
        // The (opel, corsa, 2016) cohort is entirely missing; the value
        // must come from the (opel, corsa) level.
        let mut ds = keyed(
            &["opel", "opel", "opel"],
            &["corsa", "corsa", "corsa"],
            &[2015.0, 2015.0, 2016.0],
            Column::new(
                "mileage",
                vec![Value::Num(100.0), Value::Num(300.0), Value::Missing],
            ),
        );
        impute_column(&mut ds, "mileage").unwrap();
        assert_eq!(ds.value("mileage", 2), Some(&Value::Num(200.0)));
    }

    #[test]
    fn test_global_fallback() {
        let mut ds = keyed(
            &["opel", "fiat"],
            &["corsa", "panda"],
            &[2015.0, 2016.0],
            Column::new("mileage", vec![Value::Num(100.0), Value::Missing]),
        );
        impute_column(&mut ds, "mileage").unwrap();
        assert_eq!(ds.value("mileage", 1), Some(&Value::Num(100.0)));
    }

    #[test]
    fn test_categorical_fill_uses_mode() {
        let mut ds = keyed(
            &["opel"; 4],
            &["corsa"; 4],
            &[2015.0; 4],
            Column::new(
                "fuel_type",
                vec![
                    Value::Cat("diesel".into()),
                    Value::Cat("diesel".into()),
                    Value::Cat("petrol".into()),
                    Value::Missing,
                ],
            ),
        );
        impute_column(&mut ds, "fuel_type").unwrap();
        assert_eq!(ds.value("fuel_type", 3), Some(&Value::Cat("diesel".into())));
    }

    #[test]
    fn test_mode_tie_is_deterministic() {
        let mut ds = keyed(
            &["opel"; 3],
            &["corsa"; 3],
            &[2015.0; 3],
            Column::new(
                "fuel_type",
                vec![
                    Value::Cat("petrol".into()),
                    Value::Cat("diesel".into()),
                    Value::Missing,
                ],
            ),
        );
        impute_column(&mut ds, "fuel_type").unwrap();
        // tie on count, "diesel" < "petrol"
        assert_eq!(ds.value("fuel_type", 2), Some(&Value::Cat("diesel".into())));
    }

    #[test]
    fn test_entirely_missing_column_stays_missing() {
        let mut ds = keyed(
            &["opel", "fiat"],
            &["corsa", "panda"],
            &[2015.0, 2016.0],
            Column::new("torque", vec![Value::Missing, Value::Missing]),
        );
        impute_column(&mut ds, "torque").unwrap();
        assert_eq!(ds.column("torque").unwrap().missing_count(), 2);
    }

    #[test]
    fn test_binary_numeric_column_cast_to_bool() {
        let mut ds = keyed(
            &["opel"; 3],
            &["corsa"; 3],
            &[2015.0; 3],
            Column::new(
                "never_crashed",
                vec![Value::Num(1.0), Value::Num(1.0), Value::Missing],
            ),
        );
        impute_column(&mut ds, "never_crashed").unwrap();
        let col = ds.column("never_crashed").unwrap();
        assert!(col
            .values
            .iter()
            .all(|v| matches!(v, Value::Bool(_))));
    }

    #[test]
    fn test_fractional_mean_fill_still_casts_flag_column() {
        // a 0/1 flag column classifies as numeric, so the mean fill puts
        // 0.5 into the gap; the binary cells elsewhere must still force
        // the boolean cast, fractional fill included (nonzero is true)
        let mut ds = keyed(
            &["opel"; 3],
            &["corsa"; 3],
            &[2015.0; 3],
            Column::new(
                "never_crashed",
                vec![Value::Num(1.0), Value::Num(0.0), Value::Missing],
            ),
        );
        impute_column(&mut ds, "never_crashed").unwrap();
        let col = ds.column("never_crashed").unwrap();
        assert_eq!(col.values[0], Value::Bool(true));
        assert_eq!(col.values[1], Value::Bool(false));
        assert_eq!(col.values[2], Value::Bool(true));
    }

    #[test]
    fn test_text_column_is_never_cast_by_binary_rule() {
        let mut ds = keyed(
            &["opel"; 3],
            &["corsa"; 3],
            &[2015.0; 3],
            Column::new(
                "trim",
                vec![
                    Value::Cat("sport".into()),
                    Value::Num(1.0),
                    Value::Missing,
                ],
            ),
        );
        impute_column(&mut ds, "trim").unwrap();
        let col = ds.column("trim").unwrap();
        assert!(!col.values.iter().any(|v| matches!(v, Value::Bool(_))));
    }

    #[test]
    fn test_impute_all_clears_every_fillable_column() {
        let mut ds = keyed(
            &["opel", "opel"],
            &["corsa", "corsa"],
            &[2015.0, 2015.0],
            Column::new("mileage", vec![Value::Num(100.0), Value::Missing]),
        );
        ds.push_column(Column::new(
            "fuel_type",
            vec![Value::Cat("diesel".into()), Value::Missing],
        ))
        .unwrap();
        impute_all(&mut ds).unwrap();
        assert_eq!(ds.column("mileage").unwrap().missing_count(), 0);
        assert_eq!(ds.column("fuel_type").unwrap().missing_count(), 0);
    }
}
