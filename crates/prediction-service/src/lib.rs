//! Serving-time glue: turn a single-row user input mapping into the
//! feature vector a model expects, run the three quantile models, and
//! post-process into an ordered price band with a reliability score.

pub mod assemble;
pub mod predictor;

pub use assemble::*;
pub use predictor::*;
