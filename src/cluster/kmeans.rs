// K-means clustering over dense vectors (Lloyd's algorithm).
//
// 1. Pick initial centroids from the input rows.
// 2. Assign every row to its nearest centroid (squared Euclidean distance,
//    ties go to the lower cluster id).
// 3. Move each centroid to the mean of its rows. A centroid that lost all of
//    its rows stays where it was.
// 4. Repeat until no assignment changes or the iteration cap is hit. Hitting
//    the cap is not an error; the last assignment is returned.
//
// Initialisation is deterministic. Farthest-first starts from row 0 and keeps
// adding the row farthest from every centroid chosen so far (lowest index wins
// ties). Seeded mode samples distinct rows with a `StdRng`, so the same seed
// and input always give the same labels.
//
// With fewer rows than k, only as many clusters as rows are used; labels still
// fall in [0, k) and the surplus ids are simply empty.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use super::traits::{ClusterAssignment, Clusterer};
use crate::error::{AnalyticsError, Result};

pub const DEFAULT_CLUSTERS: usize = 3;
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// How the first centroids are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Initialization {
    /// Row 0, then repeatedly the row farthest from the chosen centroids.
    FarthestFirst,
    /// Distinct rows sampled with a seeded RNG.
    Seeded(u64),
}

#[derive(Debug, Clone)]
pub struct KMeans {
    k: usize,
    max_iterations: usize,
    init: Initialization,
}

/// Full result of a k-means run.
#[derive(Debug, Clone)]
pub struct KMeansFit {
    pub assignment: ClusterAssignment,
    pub centroids: Vec<Vec<f64>>,
    pub iterations: usize,
    pub converged: bool,
}

impl KMeans {
    pub fn new(k: usize) -> Result<Self> {
        if k == 0 {
            return Err(AnalyticsError::InvalidClusterCount(k));
        }
        Ok(Self {
            k,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            init: Initialization::FarthestFirst,
        })
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Result<Self> {
        if max_iterations == 0 {
            return Err(AnalyticsError::InvalidIterationCap(max_iterations));
        }
        self.max_iterations = max_iterations;
        Ok(self)
    }

    pub fn with_initialization(mut self, init: Initialization) -> Self {
        self.init = init;
        self
    }

    pub fn k(&self) -> usize {
        self.k
    }

    /// Run k-means and return labels plus centroids and convergence info.
    pub fn fit(&self, rows: &[Vec<f64>]) -> KMeansFit {
        if rows.is_empty() {
            return KMeansFit {
                assignment: ClusterAssignment {
                    labels: Vec::new(),
                    k: self.k,
                },
                centroids: Vec::new(),
                iterations: 0,
                converged: true,
            };
        }

        let effective_k = self.k.min(rows.len());
        let mut centroids = self.initial_centroids(rows, effective_k);
        let mut labels = assign(rows, &centroids);
        let mut iterations = 1;
        let mut converged = false;

        while iterations < self.max_iterations {
            update_centroids(rows, &labels, &mut centroids);
            let next = assign(rows, &centroids);
            iterations += 1;
            if next == labels {
                converged = true;
                break;
            }
            labels = next;
        }

        if converged {
            debug!(rows = rows.len(), k = effective_k, iterations, "K-means converged");
        } else {
            info!(
                rows = rows.len(),
                k = effective_k,
                iterations,
                "K-means hit the iteration cap, returning last assignment"
            );
        }

        KMeansFit {
            assignment: ClusterAssignment { labels, k: self.k },
            centroids,
            iterations,
            converged,
        }
    }

    fn initial_centroids(&self, rows: &[Vec<f64>], k: usize) -> Vec<Vec<f64>> {
        match self.init {
            Initialization::FarthestFirst => farthest_first(rows, k),
            Initialization::Seeded(seed) => {
                let mut rng = StdRng::seed_from_u64(seed);
                rand::seq::index::sample(&mut rng, rows.len(), k)
                    .into_iter()
                    .map(|i| rows[i].clone())
                    .collect()
            }
        }
    }
}

impl Clusterer for KMeans {
    fn cluster(&self, rows: &[Vec<f64>]) -> ClusterAssignment {
        self.fit(rows).assignment
    }
}

fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

/// Index of the nearest centroid; the lowest index wins ties.
fn nearest(row: &[f64], centroids: &[Vec<f64>]) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (i, centroid) in centroids.iter().enumerate() {
        let dist = squared_distance(row, centroid);
        if dist < best_dist {
            best = i;
            best_dist = dist;
        }
    }
    best
}

fn assign(rows: &[Vec<f64>], centroids: &[Vec<f64>]) -> Vec<usize> {
    rows.iter().map(|row| nearest(row, centroids)).collect()
}

fn update_centroids(rows: &[Vec<f64>], labels: &[usize], centroids: &mut [Vec<f64>]) {
    let width = centroids.first().map(Vec::len).unwrap_or(0);
    let mut sums = vec![vec![0.0; width]; centroids.len()];
    let mut counts = vec![0usize; centroids.len()];

    for (row, &label) in rows.iter().zip(labels) {
        counts[label] += 1;
        for (acc, value) in sums[label].iter_mut().zip(row) {
            *acc += value;
        }
    }

    for ((centroid, sum), count) in centroids.iter_mut().zip(sums).zip(counts) {
        if count > 0 {
            *centroid = sum.into_iter().map(|s| s / count as f64).collect();
        }
    }
}

fn farthest_first(rows: &[Vec<f64>], k: usize) -> Vec<Vec<f64>> {
    let mut centroids = vec![rows[0].clone()];
    // Distance from each row to its closest chosen centroid so far
    let mut closest: Vec<f64> = rows
        .iter()
        .map(|row| squared_distance(row, &rows[0]))
        .collect();

    while centroids.len() < k {
        let mut pick = 0;
        let mut pick_dist = f64::NEG_INFINITY;
        for (i, &dist) in closest.iter().enumerate() {
            if dist > pick_dist {
                pick = i;
                pick_dist = dist;
            }
        }
        let chosen = rows[pick].clone();
        for (row, dist) in rows.iter().zip(closest.iter_mut()) {
            *dist = dist.min(squared_distance(row, &chosen));
        }
        centroids.push(chosen);
    }

    centroids
}
