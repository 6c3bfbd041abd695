use serde::{Deserialize, Serialize};

use crate::PipelineError;

/// A single cell of a listing record.
///
/// Missing is an explicit variant rather than `Option` so that every
/// cleaning stage handles absent data through the same code path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Num(f64),
    Cat(String),
    Bool(bool),
    Missing,
}

impl Value {
    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    /// Numeric view of the cell. Booleans count as 0/1 so that flag
    /// columns stored as numbers and as booleans behave the same.
    pub fn as_num(&self) -> Option<f64> {
        match self {
            Value::Num(v) => Some(*v),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            _ => None,
        }
    }

    pub fn as_cat(&self) -> Option<&str> {
        match self {
            Value::Cat(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Canonical token used for grouping keys and mode counting.
    /// Missing values get a sentinel that cannot collide with real data.
    pub fn key_token(&self) -> String {
        match self {
            Value::Num(v) => format!("{v}"),
            Value::Cat(s) => s.clone(),
            Value::Bool(b) => format!("{b}"),
            Value::Missing => "\u{1}missing".to_string(),
        }
    }
}

/// A named column of cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub values: Vec<Value>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn missing_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_missing()).count()
    }

    pub fn has_missing(&self) -> bool {
        self.values.iter().any(|v| v.is_missing())
    }

    /// Iterator over (row index, value) pairs with a present value.
    pub fn non_missing(&self) -> impl Iterator<Item = (usize, &Value)> {
        self.values
            .iter()
            .enumerate()
            .filter(|(_, v)| !v.is_missing())
    }
}

/// Column-oriented tabular dataset with an opaque per-row identifier.
///
/// The id column is carried for traceability only and never participates
/// in any computation. All columns hold exactly one value per row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    ids: Vec<String>,
    columns: Vec<Column>,
}

impl Dataset {
    pub fn new(ids: Vec<String>, columns: Vec<Column>) -> Result<Self, PipelineError> {
        for col in &columns {
            if col.values.len() != ids.len() {
                return Err(PipelineError::InvalidData(format!(
                    "column {} has {} rows, expected {}",
                    col.name,
                    col.values.len(),
                    ids.len()
                )));
            }
        }
        Ok(Self { ids, columns })
    }

    pub fn empty() -> Self {
        Self {
            ids: Vec::new(),
            columns: Vec::new(),
        }
    }

    pub fn n_rows(&self) -> usize {
        self.ids.len()
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_mut(&mut self, name: &str) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.name == name)
    }

    pub fn require_column(&self, name: &str) -> Result<&Column, PipelineError> {
        self.column(name)
            .ok_or_else(|| PipelineError::MissingColumn(name.to_string()))
    }

    pub fn value(&self, name: &str, row: usize) -> Option<&Value> {
        self.column(name).and_then(|c| c.values.get(row))
    }

    pub fn set_value(&mut self, name: &str, row: usize, value: Value) {
        if let Some(col) = self.column_mut(name) {
            if row < col.values.len() {
                col.values[row] = value;
            }
        }
    }

    pub fn push_column(&mut self, column: Column) -> Result<(), PipelineError> {
        if column.values.len() != self.ids.len() {
            return Err(PipelineError::InvalidData(format!(
                "column {} has {} rows, expected {}",
                column.name,
                column.values.len(),
                self.ids.len()
            )));
        }
        if self.column(&column.name).is_some() {
            return Err(PipelineError::InvalidData(format!(
                "duplicate column {}",
                column.name
            )));
        }
        self.columns.push(column);
        Ok(())
    }

    /// Drop every column whose name matches the predicate. Returns the
    /// number of columns removed.
    pub fn drop_columns(&mut self, drop: impl Fn(&str) -> bool) -> usize {
        let before = self.columns.len();
        self.columns.retain(|c| !drop(&c.name));
        before - self.columns.len()
    }

    /// Keep exactly the rows where `keep` is true. The mask must cover
    /// every row.
    pub fn retain_rows(&mut self, keep: &[bool]) -> Result<(), PipelineError> {
        if keep.len() != self.ids.len() {
            return Err(PipelineError::InvalidData(format!(
                "row mask has {} entries, expected {}",
                keep.len(),
                self.ids.len()
            )));
        }
        let mut it = keep.iter();
        self.ids.retain(|_| *it.next().unwrap_or(&true));
        for col in &mut self.columns {
            let mut it = keep.iter();
            col.values.retain(|_| *it.next().unwrap_or(&true));
        }
        Ok(())
    }
}

/// A single-row feature vector in a model's expected column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRow {
    pub names: Vec<String>,
    pub values: Vec<Value>,
}

impl FeatureRow {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| &self.values[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        Dataset::new(
            vec!["a".into(), "b".into(), "c".into()],
            vec![
                Column::new(
                    "price",
                    vec![Value::Num(1000.0), Value::Num(2000.0), Value::Missing],
                ),
                Column::new(
                    "brand",
                    vec![
                        Value::Cat("opel".into()),
                        Value::Cat("fiat".into()),
                        Value::Cat("opel".into()),
                    ],
                ),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_ragged_columns_rejected() {
        let result = Dataset::new(
            vec!["a".into()],
            vec![Column::new("x", vec![Value::Num(1.0), Value::Num(2.0)])],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_retain_rows() {
        let mut ds = sample();
        ds.retain_rows(&[true, false, true]).unwrap();
        assert_eq!(ds.n_rows(), 2);
        assert_eq!(ds.ids(), &["a".to_string(), "c".to_string()]);
        assert_eq!(
            ds.value("price", 1),
            Some(&Value::Missing)
        );
    }

    #[test]
    fn test_drop_columns() {
        let mut ds = sample();
        let dropped = ds.drop_columns(|name| name == "price");
        assert_eq!(dropped, 1);
        assert!(ds.column("price").is_none());
        assert!(ds.column("brand").is_some());
    }

    #[test]
    fn test_value_numeric_views() {
        assert_eq!(Value::Num(2.5).as_num(), Some(2.5));
        assert_eq!(Value::Bool(true).as_num(), Some(1.0));
        assert_eq!(Value::Missing.as_num(), None);
        assert!(Value::Cat("x".into()).as_num().is_none());
    }

    #[test]
    fn test_missing_key_token_is_distinct() {
        assert_ne!(Value::Missing.key_token(), Value::Cat("missing".into()).key_token());
    }
}
