// Analytics parameters: validated once, before any computation starts.

use serde::{Deserialize, Serialize};

use crate::cluster::kmeans::{Initialization, DEFAULT_CLUSTERS, DEFAULT_MAX_ITERATIONS};
use crate::error::{AnalyticsError, Result};
use crate::timeline::smoothing::{validate_smoothing, DEFAULT_SMOOTHING};
use crate::timeline::TimestampGrouping;

pub const DEFAULT_TOP_N: usize = 10;

/// Default per-query parameters for the analytics views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsParams {
    /// k for the clustering view
    pub clusters: usize,
    /// n for keyword lists
    pub top_n: usize,
    /// γ for the rating timeline
    pub smoothing: f64,
    pub max_iterations: usize,
    /// Seeded random k-means initialisation; farthest-first when unset
    pub seed: Option<u64>,
    pub grouping: TimestampGrouping,
}

impl Default for AnalyticsParams {
    fn default() -> Self {
        Self {
            clusters: DEFAULT_CLUSTERS,
            top_n: DEFAULT_TOP_N,
            smoothing: DEFAULT_SMOOTHING,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            seed: None,
            grouping: TimestampGrouping::default(),
        }
    }
}

impl AnalyticsParams {
    pub fn validate(&self) -> Result<()> {
        if self.clusters == 0 {
            return Err(AnalyticsError::InvalidClusterCount(self.clusters));
        }
        if self.max_iterations == 0 {
            return Err(AnalyticsError::InvalidIterationCap(self.max_iterations));
        }
        validate_smoothing(self.smoothing)
    }

    pub fn initialization(&self) -> Initialization {
        match self.seed {
            Some(seed) => Initialization::Seeded(seed),
            None => Initialization::FarthestFirst,
        }
    }
}
