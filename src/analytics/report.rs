// Analytics result types: plain data, ready for serde.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::db::models::FeedbackRecord;
use crate::text::KeywordCount;
use crate::timeline::TimePoint;

/// Headline numbers for an organization's feedback.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Summary {
    pub average_rating: f64,
    pub feedback_count: usize,
    /// Mean text length in characters.
    pub average_text_length: f64,
}

/// Rating distribution plus the smoothed rating timeline.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RatingsOverTime {
    /// rating value -> number of feedbacks with that rating
    pub histogram: BTreeMap<i64, usize>,
    /// Ascending by timestamp
    pub timeline: Vec<TimePoint>,
}

/// One k-means cluster of feedback and its most frequent words.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterGroup {
    pub cluster_id: usize,
    pub feedback: Vec<FeedbackRecord>,
    pub keywords: Vec<KeywordCount>,
}

/// Exactly k groups, ordered by cluster id. Unused ids are empty groups.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ClusterReport {
    pub groups: Vec<ClusterGroup>,
}

impl ClusterReport {
    /// Cluster id holding the feedback with this id.
    pub fn label_of(&self, feedback_id: i64) -> Option<usize> {
        self.groups
            .iter()
            .find(|g| g.feedback.iter().any(|f| f.id == feedback_id))
            .map(|g| g.cluster_id)
    }
}
