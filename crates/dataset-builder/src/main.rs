//! dataset-builder: run the cleaning pipeline over a scraped train/test
//! CSV pair and persist one transformed pair per strategy.
//!
//! Usage:
//!   cargo run -p dataset-builder -- --data-dir data --out-dir data/processed
//!   cargo run -p dataset-builder -- --strategies remove_outliers,options
//!   cargo run -p dataset-builder -- --dry-run

use std::path::Path;

use anyhow::Context;
use chrono::Utc;
use data_cleaning::{apply, load_csv, normalize_types, DatasetStore, Strategy};
use rayon::prelude::*;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dataset_builder=info,data_cleaning=info".into()),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    let dry_run = args.iter().any(|a| a == "--dry-run");

    let data_dir = args
        .iter()
        .position(|a| a == "--data-dir")
        .and_then(|i| args.get(i + 1))
        .map(|s| s.as_str())
        .unwrap_or("data");

    let out_dir = args
        .iter()
        .position(|a| a == "--out-dir")
        .and_then(|i| args.get(i + 1))
        .map(|s| s.to_string())
        .unwrap_or_else(|| format!("{data_dir}/processed"));

    let strategies: Vec<Strategy> = match args
        .iter()
        .position(|a| a == "--strategies")
        .and_then(|i| args.get(i + 1))
    {
        Some(list) => list
            .split(',')
            .map(|tag| tag.trim().parse())
            .collect::<Result<_, _>>()
            .context("invalid --strategies list")?,
        None => Strategy::ALL.to_vec(),
    };

    let started = Utc::now();
    tracing::info!(
        data_dir,
        out_dir = %out_dir,
        strategies = strategies.len(),
        "starting cleaning run at {}",
        started.format("%Y-%m-%d %H:%M:%S")
    );

    let mut train = load_csv(&Path::new(data_dir).join("train.csv"))
        .with_context(|| format!("loading {data_dir}/train.csv"))?;
    let mut test = load_csv(&Path::new(data_dir).join("test.csv"))
        .with_context(|| format!("loading {data_dir}/test.csv"))?;

    normalize_types(&mut train);
    normalize_types(&mut test);
    tracing::info!(
        train_rows = train.n_rows(),
        test_rows = test.n_rows(),
        columns = train.n_columns(),
        "types normalized"
    );

    if dry_run {
        tracing::info!("dry run, skipping strategy fan-out");
        return Ok(());
    }

    let store = DatasetStore::new(&out_dir)?;

    // Each strategy gets its own deep copy; nothing is shared or mutated
    // across runs. Failures are collected, not fatal to the batch.
    let failed: Vec<Strategy> = strategies
        .par_iter()
        .filter_map(|&strategy| {
            let t0 = std::time::Instant::now();
            match apply(strategy, train.clone(), test.clone(), &store) {
                Ok((out_train, out_test)) => {
                    tracing::info!(
                        strategy = %strategy,
                        train_rows = out_train.n_rows(),
                        columns = out_train.n_columns(),
                        test_rows = out_test.n_rows(),
                        elapsed_ms = t0.elapsed().as_millis() as u64,
                        "strategy complete"
                    );
                    None
                }
                Err(e) => {
                    tracing::error!(strategy = %strategy, error = %e, "strategy failed");
                    Some(strategy)
                }
            }
        })
        .collect();

    if !failed.is_empty() {
        let tags: Vec<&str> = failed.iter().map(|s| s.as_str()).collect();
        anyhow::bail!("{} strategies failed: {}", failed.len(), tags.join(", "));
    }

    tracing::info!(
        elapsed_s = (Utc::now() - started).num_seconds(),
        "cleaning run complete"
    );
    Ok(())
}
