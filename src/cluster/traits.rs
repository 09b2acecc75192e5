// Clusterer trait: swap-ready abstraction over the clustering algorithm.
//
// The analytics layer only needs "one label per row". K-means over TF-IDF rows
// is the default; anything else that honours the label contract can slot in.

use serde::{Deserialize, Serialize};

/// One cluster id per input row, same order and length as the input.
///
/// Every label is in `[0, k)`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClusterAssignment {
    pub labels: Vec<usize>,
    pub k: usize,
}

impl ClusterAssignment {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Row indices for each cluster id, ids `0..k` in order.
    pub fn members(&self) -> Vec<Vec<usize>> {
        let mut groups = vec![Vec::new(); self.k];
        for (row, &label) in self.labels.iter().enumerate() {
            groups[label].push(row);
        }
        groups
    }
}

/// Trait for partitioning dense row vectors into clusters.
pub trait Clusterer {
    /// Assign every row to a cluster. An empty input yields an empty assignment.
    fn cluster(&self, rows: &[Vec<f64>]) -> ClusterAssignment;
}
