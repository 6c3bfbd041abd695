//! Column-type classification shared by outlier detection (numeric only)
//! and imputation (mode vs. mean).

use pricing_core::{schema, Column, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Numeric,
    Categorical,
}

/// Classify a column. A column is categorical if its name is one of the
/// fixed exceptions (numeric-looking but discrete), or if any non-missing
/// cell holds a text or boolean value. Otherwise it is numeric.
pub fn classify(column: &Column) -> ColumnKind {
    if schema::CATEGORICAL_EXCEPTIONS.contains(&column.name.as_str()) {
        return ColumnKind::Categorical;
    }
    let non_numeric = column
        .non_missing()
        .any(|(_, v)| matches!(v, Value::Cat(_) | Value::Bool(_)));
    if non_numeric {
        ColumnKind::Categorical
    } else {
        ColumnKind::Numeric
    }
}
