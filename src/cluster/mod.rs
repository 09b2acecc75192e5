// Clustering: grouping TF-IDF rows of feedback by similarity.

pub mod kmeans;
pub mod traits;

pub use kmeans::{Initialization, KMeans, KMeansFit};
pub use traits::{ClusterAssignment, Clusterer};
