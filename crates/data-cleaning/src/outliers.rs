//! Cohort-relative price outlier detection plus a global engine rule.
//!
//! Price dispersion differs wildly across market segments, so the price
//! rule is applied within mutually exclusive cohorts (finest level with
//! enough support wins). Implausibly small engine figures are a global
//! data-entry-error signal and get their own rule, lower bound only.

use pricing_core::{group_rows, CohortLevel, Dataset, PipelineError};
use statrs::statistics::{Data, OrderStatistics};
use tracing::debug;

/// A cohort must have more rows than this to participate in the price rule.
pub const MIN_COHORT_SUPPORT: usize = 40;

const IQR_WHISKER: f64 = 1.5;

/// Keeps ln(engine_power + EPSILON) defined for zero-power rows.
const POWER_EPSILON: f64 = 1e-6;

struct Fences {
    lower: f64,
    upper: f64,
}

fn iqr_fences(values: &[f64]) -> Option<Fences> {
    if values.is_empty() {
        return None;
    }
    let mut data = Data::new(values.to_vec());
    let q1 = data.lower_quartile();
    let q3 = data.upper_quartile();
    let iqr = q3 - q1;
    Some(Fences {
        lower: q1 - IQR_WHISKER * iqr,
        upper: q3 + IQR_WHISKER * iqr,
    })
}

/// Flag outlier rows of a training dataset. Returns one flag per row;
/// callers drop flagged rows from the training split only, never from
/// evaluation data.
pub fn flag_outliers(dataset: &Dataset) -> Result<Vec<bool>, PipelineError> {
    let n = dataset.n_rows();
    let price = dataset.require_column("price")?;

    // Non-positive or missing prices have no log-price and never flag.
    let log_price: Vec<Option<f64>> = price
        .values
        .iter()
        .map(|v| v.as_num().filter(|p| *p > 0.0).map(f64::ln))
        .collect();

    let mut flags = vec![false; n];
    let mut covered = vec![false; n];

    // Finest level first; a record claimed by a finer level is excluded
    // from every coarser one.
    for level in [
        CohortLevel::BrandModelYear,
        CohortLevel::BrandModel,
        CohortLevel::Brand,
    ] {
        for rows in group_rows(dataset, level).values() {
            if rows.len() <= MIN_COHORT_SUPPORT {
                continue;
            }
            let members: Vec<usize> = rows.iter().copied().filter(|r| !covered[*r]).collect();
            if members.is_empty() {
                continue;
            }
            let observed: Vec<f64> = members.iter().filter_map(|r| log_price[*r]).collect();
            if let Some(fences) = iqr_fences(&observed) {
                for &row in &members {
                    if let Some(lp) = log_price[row] {
                        if lp < fences.lower || lp > fences.upper {
                            flags[row] = true;
                        }
                    }
                }
            }
            for &row in &members {
                covered[row] = true;
            }
        }
    }

    let price_flagged = flags.iter().filter(|f| **f).count();

    flag_engine_outliers(dataset, "engine_size", false, &mut flags);
    flag_engine_outliers(dataset, "engine_power", true, &mut flags);

    debug!(
        rows = n,
        price_flagged,
        total_flagged = flags.iter().filter(|f| **f).count(),
        "outlier detection complete"
    );
    Ok(flags)
}

/// Global lower-fence rule on an engine metric. For the log variant the
/// fence is computed on ln(value + ε) and exponentiated back before
/// comparing against the raw value. No upper bound: big engines are a
/// market segment, tiny ones are data entry errors.
fn flag_engine_outliers(dataset: &Dataset, column: &str, log_scale: bool, flags: &mut [bool]) {
    let Some(col) = dataset.column(column) else {
        return;
    };
    let raw: Vec<(usize, f64)> = col
        .values
        .iter()
        .enumerate()
        .filter_map(|(row, v)| v.as_num().map(|x| (row, x)))
        .collect();

    let observed: Vec<f64> = if log_scale {
        raw.iter()
            .filter(|(_, x)| *x >= 0.0)
            .map(|(_, x)| (x + POWER_EPSILON).ln())
            .collect()
    } else {
        raw.iter().map(|(_, x)| *x).collect()
    };

    let Some(fences) = iqr_fences(&observed) else {
        return;
    };
    let bound = if log_scale {
        fences.lower.exp()
    } else {
        fences.lower
    };

    for (row, value) in raw {
        if value < bound {
            flags[row] = true;
        }
    }
}
