//! Cleaning pipeline for scraped car-listing datasets: type
//! normalization, strategy-based column pruning, cohort outlier removal,
//! hierarchical group imputation, and CSV persistence of each strategy's
//! train/test pair.

pub mod columns;
pub mod impute;
pub mod normalize;
pub mod outliers;
pub mod storage;
pub mod strategy;

pub use columns::*;
pub use impute::*;
pub use normalize::*;
pub use outliers::*;
pub use storage::*;
pub use strategy::*;
