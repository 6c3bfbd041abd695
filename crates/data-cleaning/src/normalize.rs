//! Best-effort coercion of raw scraped text fields into numeric cells.
//!
//! Conversion failure for a cell is never an error: the cell becomes
//! `Missing` so the downstream imputer sees one uniform notion of
//! absence and a single bad row can never fail a batch.

use pricing_core::{Dataset, Value};
use tracing::debug;

/// Fields scraped as locale-formatted decimal text (comma separator).
const DECIMAL_TEXT_FIELDS: &[&str] = &["fuel_consumption", "acceleration"];

/// Fields holding a plain year or duration that should end up as floats.
const NUMERIC_COERCED_FIELDS: &[&str] = &["registration_year", "battery_charge_time"];

/// Composite "month/year" inspection-date field.
const INSPECTION_DATE_FIELD: &str = "kteo";

/// Parse a locale decimal ("7,5" or "7.5") into a float.
fn parse_locale_decimal(raw: &str) -> Option<f64> {
    let cleaned = raw.trim().replace(',', ".");
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a "month/year" composite into a fractional year, e.g. "7/2024"
/// becomes 2024.5.
fn parse_month_year(raw: &str) -> Option<f64> {
    let (month, year) = raw.trim().split_once('/')?;
    let month: u32 = month.trim().parse().ok()?;
    let year: f64 = year.trim().parse().ok()?;
    if !(1..=12).contains(&month) {
        return None;
    }
    Some(year + (month - 1) as f64 / 12.0)
}

fn coerce_column(dataset: &mut Dataset, name: &str, convert: impl Fn(&Value) -> Value) {
    let Some(col) = dataset.column_mut(name) else {
        return;
    };
    let mut failed = 0usize;
    for value in &mut col.values {
        if value.is_missing() {
            continue;
        }
        let converted = convert(value);
        if converted.is_missing() {
            failed += 1;
        }
        *value = converted;
    }
    if failed > 0 {
        debug!(column = name, failed, "coerced unparseable cells to missing");
    }
}

/// Coerce the fixed set of numeric-looking text fields in place.
pub fn normalize_types(dataset: &mut Dataset) {
    for name in DECIMAL_TEXT_FIELDS {
        coerce_column(dataset, name, |v| match v {
            Value::Num(n) => Value::Num(*n),
            Value::Cat(s) => parse_locale_decimal(s).map_or(Value::Missing, Value::Num),
            _ => Value::Missing,
        });
    }

    for name in NUMERIC_COERCED_FIELDS {
        coerce_column(dataset, name, |v| match v {
            Value::Num(n) => Value::Num(*n),
            Value::Cat(s) => parse_locale_decimal(s).map_or(Value::Missing, Value::Num),
            Value::Bool(_) => Value::Missing,
            Value::Missing => Value::Missing,
        });
    }

    coerce_column(dataset, INSPECTION_DATE_FIELD, |v| match v {
        Value::Num(n) => Value::Num(*n),
        Value::Cat(s) => parse_month_year(s).map_or(Value::Missing, Value::Num),
        _ => Value::Missing,
    });
}
