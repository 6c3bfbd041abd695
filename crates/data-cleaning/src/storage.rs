//! CSV persistence of datasets.
//!
//! One file per split, header row, `id` index column first. Missing
//! cells render as empty strings; load applies the same silent coercion
//! rules as the normalizer (boolean literals, then numbers, then text).

use std::path::{Path, PathBuf};

use pricing_core::{Column, Dataset, PipelineError, Value};
use tracing::info;

use crate::strategy::Strategy;

/// Flat-file store for strategy outputs. Writes are idempotent by name:
/// re-running a strategy overwrites its pair, last write wins.
pub struct DatasetStore {
    root: PathBuf,
}

impl DatasetStore {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, PipelineError> {
        let root = root.into();
        std::fs::create_dir_all(&root)
            .map_err(|e| PipelineError::StorageError(format!("create {}: {e}", root.display())))?;
        Ok(Self { root })
    }

    pub fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}.csv"))
    }

    pub fn save(&self, name: &str, dataset: &Dataset) -> Result<(), PipelineError> {
        let path = self.path_for(name);
        let mut writer = csv::Writer::from_path(&path)
            .map_err(|e| PipelineError::StorageError(format!("open {}: {e}", path.display())))?;

        let mut header = vec!["id".to_string()];
        header.extend(dataset.column_names());
        writer
            .write_record(&header)
            .map_err(|e| PipelineError::StorageError(e.to_string()))?;

        for row in 0..dataset.n_rows() {
            let mut record = vec![dataset.ids()[row].clone()];
            for col in dataset.columns() {
                record.push(render_cell(&col.values[row]));
            }
            writer
                .write_record(&record)
                .map_err(|e| PipelineError::StorageError(e.to_string()))?;
        }
        writer
            .flush()
            .map_err(|e| PipelineError::StorageError(e.to_string()))?;
        info!(
            name,
            rows = dataset.n_rows(),
            columns = dataset.n_columns(),
            "dataset saved"
        );
        Ok(())
    }

    pub fn load(&self, name: &str) -> Result<Dataset, PipelineError> {
        load_csv(&self.path_for(name))
    }

    /// Persist a strategy's train/test pair under its qualified names.
    pub fn save_pair(
        &self,
        strategy: Strategy,
        train: &Dataset,
        test: &Dataset,
    ) -> Result<(), PipelineError> {
        self.save(&format!("train_{strategy}"), train)?;
        self.save(&format!("test_{strategy}"), test)
    }
}

fn render_cell(value: &Value) -> String {
    match value {
        Value::Num(v) => v.to_string(),
        Value::Cat(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Missing => String::new(),
    }
}

fn parse_cell(raw: &str) -> Value {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Value::Missing;
    }
    match trimmed {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => Value::Num(v),
        _ => Value::Cat(trimmed.to_string()),
    }
}

/// Load a dataset from a headered CSV file with an `id` first column.
pub fn load_csv(path: &Path) -> Result<Dataset, PipelineError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| PipelineError::StorageError(format!("open {}: {e}", path.display())))?;

    let headers = reader
        .headers()
        .map_err(|e| PipelineError::StorageError(e.to_string()))?
        .clone();
    if headers.is_empty() {
        return Err(PipelineError::StorageError(format!(
            "{}: empty header row",
            path.display()
        )));
    }
    let column_names: Vec<String> = headers.iter().skip(1).map(|h| h.to_string()).collect();

    let mut ids = Vec::new();
    let mut columns: Vec<Vec<Value>> = vec![Vec::new(); column_names.len()];
    for record in reader.records() {
        let record = record.map_err(|e| PipelineError::StorageError(e.to_string()))?;
        ids.push(record.get(0).unwrap_or_default().to_string());
        for (i, cell) in record.iter().skip(1).enumerate() {
            if i < columns.len() {
                columns[i].push(parse_cell(cell));
            }
        }
        for col in columns.iter_mut().filter(|c| c.len() < ids.len()) {
            col.push(Value::Missing);
        }
    }

    let columns = column_names
        .into_iter()
        .zip(columns)
        .map(|(name, values)| Column::new(name, values))
        .collect();
    Dataset::new(ids, columns)
}
