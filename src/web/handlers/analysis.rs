// Analysis handlers: the four dashboard views as JSON.
//
// GET /api/analysis/average?organization=ID
// GET /api/analysis/ratings?organization=ID[&gamma=]
// GET /api/analysis/keywords?organization=ID[&n=]
// GET /api/analysis/clustering?organization=ID[&k=&n=]
//
// Keyword lists come back as {word: count} objects in rank order (serde_json
// is built with preserve_order). Averages are strings with two decimals, as
// the charts expect. Under keep-all grouping timeData is an array of
// {date, rating} so points sharing a timestamp are all sent.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::db::models::FeedbackRecord;
use crate::text::KeywordCount;
use crate::timeline::{TimePoint, TimestampGrouping};
use crate::web::{api_error, AppState};

#[derive(Deserialize, Default)]
pub struct AnalysisQuery {
    /// Organization whose feedback to analyze (required)
    pub organization: Option<String>,
    /// Keywords to return
    pub n: Option<usize>,
    /// Cluster count
    pub k: Option<usize>,
    /// Smoothing factor for the timeline
    pub gamma: Option<f64>,
}

/// GET /api/analysis/average
pub async fn average(State(state): State<AppState>, Query(q): Query<AnalysisQuery>) -> Response {
    let corpus = match load_corpus(&state, &q).await {
        Ok(corpus) => corpus,
        Err(response) => return response,
    };
    let summary = state.analytics.summary(&corpus);

    Json(serde_json::json!({
        "averageRating": format!("{:.2}", summary.average_rating),
        "numberFeedbacks": summary.feedback_count,
        "averageWordNumber": format!("{:.2}", summary.average_text_length),
    }))
    .into_response()
}

/// GET /api/analysis/ratings
pub async fn ratings(State(state): State<AppState>, Query(q): Query<AnalysisQuery>) -> Response {
    let corpus = match load_corpus(&state, &q).await {
        Ok(corpus) => corpus,
        Err(response) => return response,
    };
    let gamma = q.gamma.unwrap_or(state.analytics.params().smoothing);
    let ratings = match state.analytics.ratings_over_time(&corpus, gamma) {
        Ok(ratings) => ratings,
        Err(e) => return api_error(StatusCode::BAD_REQUEST, &e.to_string()),
    };

    let timeline = time_data(&ratings.timeline, state.analytics.params().grouping);
    let histogram: Map<String, Value> = ratings
        .histogram
        .iter()
        .map(|(rating, count)| (rating.to_string(), Value::from(*count)))
        .collect();

    Json(serde_json::json!({
        "timeData": timeline,
        "histogram": histogram,
    }))
    .into_response()
}

/// GET /api/analysis/keywords
pub async fn keywords(State(state): State<AppState>, Query(q): Query<AnalysisQuery>) -> Response {
    let corpus = match load_corpus(&state, &q).await {
        Ok(corpus) => corpus,
        Err(response) => return response,
    };
    let n = q.n.unwrap_or(state.analytics.params().top_n);
    let top = state.analytics.top_keywords(&corpus, n);

    Json(serde_json::json!({ "popularWords": keyword_map(&top) })).into_response()
}

/// GET /api/analysis/clustering
pub async fn clustering(
    State(state): State<AppState>,
    Query(q): Query<AnalysisQuery>,
) -> Response {
    let corpus = match load_corpus(&state, &q).await {
        Ok(corpus) => corpus,
        Err(response) => return response,
    };
    let k = q.k.unwrap_or(state.analytics.params().clusters);
    let n = q.n.unwrap_or(state.analytics.params().top_n);
    let report = match state.analytics.cluster_keywords(&corpus, k, n) {
        Ok(report) => report,
        Err(e) => return api_error(StatusCode::BAD_REQUEST, &e.to_string()),
    };

    let clusters: Vec<&Vec<FeedbackRecord>> = report.groups.iter().map(|g| &g.feedback).collect();
    let cluster_keywords: Vec<Map<String, Value>> = report
        .groups
        .iter()
        .map(|g| keyword_map(&g.keywords))
        .collect();

    Json(serde_json::json!({
        "clusters": clusters,
        "clusterKeywords": cluster_keywords,
    }))
    .into_response()
}

/// Fetch the requested organization's corpus, or the error response to send.
async fn load_corpus(
    state: &AppState,
    q: &AnalysisQuery,
) -> Result<Vec<FeedbackRecord>, Response> {
    let organization = match q.organization.as_deref().map(str::trim) {
        Some(org) if !org.is_empty() => org,
        _ => {
            return Err(api_error(
                StatusCode::BAD_REQUEST,
                "Missing required query parameter: organization",
            ))
        }
    };

    state
        .db
        .feedback_for_organization(organization)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, organization, "DB error loading feedback");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "Database error")
        })
}

/// Timeline as {timestamp: rating}, or a list of points when timestamps may repeat.
fn time_data(timeline: &[TimePoint], grouping: TimestampGrouping) -> Value {
    match grouping {
        TimestampGrouping::LastWriteWins => Value::Object(
            timeline
                .iter()
                .map(|point| (point.timestamp.to_rfc3339(), Value::from(point.rating)))
                .collect(),
        ),
        TimestampGrouping::KeepAll => Value::Array(
            timeline
                .iter()
                .map(|point| {
                    serde_json::json!({
                        "date": point.timestamp.to_rfc3339(),
                        "rating": point.rating,
                    })
                })
                .collect(),
        ),
    }
}

/// Ranked keywords as a {word: count} object, rank order preserved.
fn keyword_map(keywords: &[KeywordCount]) -> Map<String, Value> {
    keywords
        .iter()
        .map(|k| (k.word.clone(), Value::from(k.count)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(secs: i64, rating: f64) -> TimePoint {
        use chrono::TimeZone;
        TimePoint {
            timestamp: chrono::Utc.timestamp_opt(secs, 0).unwrap(),
            rating,
        }
    }

    #[test]
    fn test_time_data_keep_all_sends_every_point() {
        let timeline = vec![point(100, 2.0), point(100, 4.0), point(200, 3.0)];
        let data = time_data(&timeline, TimestampGrouping::KeepAll);
        let points = data.as_array().unwrap();
        assert_eq!(points.len(), 3);
        assert_eq!(points[0]["date"], points[1]["date"]);
        assert_eq!(points[1]["rating"], 4.0);
    }

    #[test]
    fn test_time_data_last_write_wins_is_keyed_by_timestamp() {
        let timeline = vec![point(100, 2.0), point(200, 3.0)];
        let data = time_data(&timeline, TimestampGrouping::LastWriteWins);
        assert_eq!(data.as_object().unwrap().len(), 2);
    }

    #[test]
    fn test_keyword_map_keeps_rank_order() {
        let keywords = vec![
            KeywordCount {
                word: "zebra".to_string(),
                count: 3,
            },
            KeywordCount {
                word: "apple".to_string(),
                count: 1,
            },
        ];
        let map = keyword_map(&keywords);
        let words: Vec<&String> = map.keys().collect();
        assert_eq!(words, vec!["zebra", "apple"]);
        assert_eq!(map["zebra"], Value::from(3));
    }
}
