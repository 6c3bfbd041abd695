//! Column-pruning strategies.
//!
//! Each strategy is a pure function from an owned (train, test) pair to
//! a transformed pair; strategies are independent and never composed.
//! Dispatch goes through the single `transform` entry point so adding a
//! strategy means adding one enum variant and one match arm.

use std::fmt;
use std::str::FromStr;

use pricing_core::{schema, Dataset, PipelineError};
use tracing::info;

use crate::impute::impute_all;
use crate::outliers::flag_outliers;
use crate::storage::DatasetStore;

/// The fixed set of dataset variants, one trained model per variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    AllExtras,
    Options,
    RemoveOutliers,
    DropExtrasAndOptions,
    DropUnpractical,
    DropLowImportance,
    ImputeMissingValues,
}

impl Strategy {
    pub const ALL: [Strategy; 7] = [
        Strategy::AllExtras,
        Strategy::Options,
        Strategy::RemoveOutliers,
        Strategy::DropExtrasAndOptions,
        Strategy::DropUnpractical,
        Strategy::DropLowImportance,
        Strategy::ImputeMissingValues,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::AllExtras => "all_extras",
            Strategy::Options => "options",
            Strategy::RemoveOutliers => "remove_outliers",
            Strategy::DropExtrasAndOptions => "drop_extras_and_options",
            Strategy::DropUnpractical => "drop_unpractical",
            Strategy::DropLowImportance => "drop_low_importance",
            Strategy::ImputeMissingValues => "impute_missing_values",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Strategy::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| PipelineError::InvalidData(format!("unknown strategy: {s}")))
    }
}

fn drop_option_columns(dataset: &mut Dataset) -> usize {
    dataset.drop_columns(|name| name.contains(schema::OPTION_MARKER))
}

fn drop_extra_columns(dataset: &mut Dataset) -> usize {
    dataset.drop_columns(|name| name.contains(schema::EXTRA_MARKER))
}

/// Apply a strategy's pure transform to an owned train/test pair.
/// Row-dropping stages touch the training split only; the evaluation
/// split is never filtered.
pub fn transform(
    strategy: Strategy,
    mut train: Dataset,
    mut test: Dataset,
) -> Result<(Dataset, Dataset), PipelineError> {
    match strategy {
        Strategy::AllExtras => {
            drop_option_columns(&mut train);
            drop_option_columns(&mut test);
        }
        Strategy::Options => {
            drop_extra_columns(&mut train);
            drop_extra_columns(&mut test);
        }
        Strategy::DropExtrasAndOptions => {
            drop_option_columns(&mut train);
            drop_extra_columns(&mut train);
            drop_option_columns(&mut test);
            drop_extra_columns(&mut test);
        }
        Strategy::DropUnpractical => {
            for split in [&mut train, &mut test] {
                split.drop_columns(|name| {
                    schema::UNPRACTICAL_COLUMNS.contains(&name)
                        || name.contains(schema::OPTION_MARKER)
                });
            }
        }
        Strategy::DropLowImportance => {
            train.drop_columns(|name| schema::LOW_IMPORTANCE_COLUMNS.contains(&name));
            test.drop_columns(|name| schema::LOW_IMPORTANCE_COLUMNS.contains(&name));
        }
        Strategy::ImputeMissingValues => {
            for split in [&mut train, &mut test] {
                split.drop_columns(|name| schema::HIGH_MISSINGNESS_COLUMNS.contains(&name));
                impute_all(split)?;
            }
        }
        Strategy::RemoveOutliers => {
            drop_option_columns(&mut train);
            drop_option_columns(&mut test);
            let flags = flag_outliers(&train)?;
            let keep: Vec<bool> = flags.iter().map(|f| !f).collect();
            let dropped = flags.iter().filter(|f| **f).count();
            train.retain_rows(&keep)?;
            info!(strategy = %strategy, dropped, "outlier rows removed from training split");
        }
    }
    Ok((train, test))
}

/// Transform and persist under the strategy-qualified names.
pub fn apply(
    strategy: Strategy,
    train: Dataset,
    test: Dataset,
    store: &DatasetStore,
) -> Result<(Dataset, Dataset), PipelineError> {
    let (train, test) = transform(strategy, train, test)?;
    store.save_pair(strategy, &train, &test)?;
    Ok((train, test))
}
