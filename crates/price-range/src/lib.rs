//! Price-range post-processing: ordering repair for independently
//! trained quantile regressors and a logistic reliability score derived
//! from the repaired band.

pub mod reconcile;
pub mod reliability;

pub use reconcile::*;
pub use reliability::*;
