use crate::{FeatureRow, PipelineError};

/// Boundary to a trained quantile regression model.
///
/// The pipeline never trains or introspects models; it only needs the
/// expected feature ordering, which of those features are categorical,
/// and a blocking single-row prediction. No timeout or cancellation
/// semantics at this layer.
pub trait QuantileModel: Send + Sync {
    /// Feature columns in the exact order the model expects.
    fn feature_names(&self) -> &[String];

    /// Indices into `feature_names()` of the categorical features.
    fn categorical_features(&self) -> Vec<usize>;

    /// Predict the model's target quantile of price for one row.
    fn predict(&self, row: &FeatureRow) -> Result<f64, PipelineError>;
}
