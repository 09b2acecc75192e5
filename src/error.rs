// Analytics errors: parameter problems rejected before any computation runs.
//
// "No data" is never an error here: empty corpora produce zeroed summaries and
// empty keyword/cluster collections. Only caller mistakes surface.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AnalyticsError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalyticsError {
    /// k must be at least 1.
    #[error("invalid cluster count {0}: must be at least 1")]
    InvalidClusterCount(usize),

    /// The smoothing factor must lie in (0, 1].
    #[error("invalid smoothing factor {0}: must be in (0, 1]")]
    InvalidSmoothingFactor(f64),

    #[error("invalid iteration cap {0}: must be at least 1")]
    InvalidIterationCap(usize),
}
