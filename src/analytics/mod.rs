// Feedback analytics: the four dashboard views over one organization's corpus.
//
//   summary            average rating, count, average text length
//   ratings_over_time  rating histogram + smoothed timeline
//   top_keywords       most frequent non-stop words across all feedback
//   cluster_keywords   k-means over TF-IDF rows, top words per cluster
//
// Every view is a pure function of the corpus it is handed. Empty corpora give
// zeroed or empty results; only invalid parameters are errors.

pub mod params;
pub mod report;

use tracing::info;

use crate::cluster::{Clusterer, KMeans};
use crate::db::models::FeedbackRecord;
use crate::error::Result;
use crate::text::{tokenize, KeywordCount, TextAnalyzer, TfIdfMatrix};
use crate::timeline::smoothing::{smoothed_series, validate_smoothing};

pub use params::AnalyticsParams;
pub use report::{ClusterGroup, ClusterReport, RatingsOverTime, Summary};

/// Analytics engine: an immutable text analyzer plus default parameters.
#[derive(Debug, Clone)]
pub struct FeedbackAnalytics {
    analyzer: TextAnalyzer,
    params: AnalyticsParams,
}

impl FeedbackAnalytics {
    pub fn new(analyzer: TextAnalyzer, params: AnalyticsParams) -> Result<Self> {
        params.validate()?;
        Ok(Self { analyzer, params })
    }

    pub fn analyzer(&self) -> &TextAnalyzer {
        &self.analyzer
    }

    pub fn params(&self) -> &AnalyticsParams {
        &self.params
    }

    /// Average rating, feedback count, and average text length.
    pub fn summary(&self, corpus: &[FeedbackRecord]) -> Summary {
        if corpus.is_empty() {
            return Summary::default();
        }
        let count = corpus.len() as f64;
        let rating_sum: i64 = corpus.iter().map(|r| r.rating).sum();
        let length_sum: usize = corpus.iter().map(|r| r.text.chars().count()).sum();

        Summary {
            average_rating: rating_sum as f64 / count,
            feedback_count: corpus.len(),
            average_text_length: length_sum as f64 / count,
        }
    }

    /// Rating histogram and the timeline smoothed with factor `gamma`.
    pub fn ratings_over_time(
        &self,
        corpus: &[FeedbackRecord],
        gamma: f64,
    ) -> Result<RatingsOverTime> {
        validate_smoothing(gamma)?;

        let mut result = RatingsOverTime::default();
        for record in corpus {
            *result.histogram.entry(record.rating).or_insert(0) += 1;
        }
        result.timeline = smoothed_series(corpus, gamma, self.params.grouping)?;
        Ok(result)
    }

    /// The `n` most frequent words across all feedback, ties in first-seen order.
    pub fn top_keywords(&self, corpus: &[FeedbackRecord], n: usize) -> Vec<KeywordCount> {
        self.keywords_for(corpus.iter(), n)
    }

    /// Cluster the corpus into `k` groups and list each group's top `n` words.
    pub fn cluster_keywords(
        &self,
        corpus: &[FeedbackRecord],
        k: usize,
        n: usize,
    ) -> Result<ClusterReport> {
        let kmeans = KMeans::new(k)?
            .with_max_iterations(self.params.max_iterations)?
            .with_initialization(self.params.initialization());

        if corpus.is_empty() {
            return Ok(ClusterReport {
                groups: (0..k)
                    .map(|cluster_id| ClusterGroup {
                        cluster_id,
                        feedback: Vec::new(),
                        keywords: Vec::new(),
                    })
                    .collect(),
            });
        }

        // Stop words stay in the vectors; only the keyword summaries drop them
        let documents: Vec<Vec<String>> =
            corpus.iter().map(|record| tokenize(&record.text)).collect();
        let matrix = TfIdfMatrix::fit(&documents);
        let assignment = kmeans.cluster(matrix.rows());

        info!(
            documents = corpus.len(),
            vocabulary = matrix.vocabulary().len(),
            k,
            "Clustered feedback"
        );

        let groups = assignment
            .members()
            .into_iter()
            .enumerate()
            .map(|(cluster_id, rows)| {
                let feedback: Vec<FeedbackRecord> =
                    rows.iter().map(|&row| corpus[row].clone()).collect();
                let keywords = self.keywords_for(feedback.iter(), n);
                ClusterGroup {
                    cluster_id,
                    feedback,
                    keywords,
                }
            })
            .collect();

        Ok(ClusterReport { groups })
    }

    /// Join texts with a space (so boundary words don't fuse) and count words.
    fn keywords_for<'a>(
        &self,
        records: impl Iterator<Item = &'a FeedbackRecord>,
        n: usize,
    ) -> Vec<KeywordCount> {
        let text = records
            .map(|r| r.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        self.analyzer.word_frequency(&text).top_n(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::StopWords;
    use chrono::{TimeZone, Utc};

    fn analytics() -> FeedbackAnalytics {
        let analyzer = TextAnalyzer::new(StopWords::from_words(["the", "was", "and"]));
        FeedbackAnalytics::new(analyzer, AnalyticsParams::default()).unwrap()
    }

    fn record(id: i64, text: &str, rating: i64) -> FeedbackRecord {
        FeedbackRecord {
            id,
            organization_id: "acme".to_string(),
            text: text.to_string(),
            rating,
            created_at: Utc.timestamp_opt(1_700_000_000 + id * 60, 0).unwrap(),
        }
    }

    #[test]
    fn test_summary_empty_is_zeroed() {
        assert_eq!(analytics().summary(&[]), Summary::default());
    }

    #[test]
    fn test_summary_averages() {
        let corpus = vec![record(1, "abcd", 4), record(2, "ab", 1)];
        let s = analytics().summary(&corpus);
        assert!((s.average_rating - 2.5).abs() < 1e-12);
        assert_eq!(s.feedback_count, 2);
        assert!((s.average_text_length - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_histogram_counts_ratings() {
        let corpus = vec![record(1, "", 5), record(2, "", 5), record(3, "", 2)];
        let r = analytics().ratings_over_time(&corpus, 0.6).unwrap();
        assert_eq!(r.histogram.get(&5), Some(&2));
        assert_eq!(r.histogram.get(&2), Some(&1));
        assert_eq!(r.timeline.len(), 3);
    }

    #[test]
    fn test_ratings_rejects_bad_gamma_even_when_empty() {
        assert!(analytics().ratings_over_time(&[], 0.0).is_err());
    }

    #[test]
    fn test_keywords_do_not_fuse_across_records() {
        let corpus = vec![record(1, "great service", 5), record(2, "bad service", 1)];
        let top = analytics().top_keywords(&corpus, 10);
        assert_eq!(top[0].word, "service");
        assert_eq!(top[0].count, 2);
        assert!(top.iter().all(|k| k.word != "servicebad"));
    }

    #[test]
    fn test_cluster_rejects_zero_k() {
        assert!(analytics().cluster_keywords(&[], 0, 10).is_err());
    }

    #[test]
    fn test_cluster_empty_corpus_gives_k_empty_groups() {
        let report = analytics().cluster_keywords(&[], 3, 10).unwrap();
        assert_eq!(report.groups.len(), 3);
        assert!(report
            .groups
            .iter()
            .all(|g| g.feedback.is_empty() && g.keywords.is_empty()));
    }
}
