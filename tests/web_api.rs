// HTTP tests for the JSON API, driven through the router without a socket.

#![cfg(feature = "web")]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{TimeZone, Utc};
use serde_json::Value;
use tower::ServiceExt;

use feedlens::analytics::{AnalyticsParams, FeedbackAnalytics};
use feedlens::db::models::NewFeedback;
use feedlens::text::{StopWords, TextAnalyzer};
use feedlens::timeline::TimestampGrouping;
use feedlens::web::{build_router, AppState};

async fn state() -> AppState {
    state_with(AnalyticsParams::default()).await
}

async fn state_with(params: AnalyticsParams) -> AppState {
    let db = feedlens::db::memory_sqlite().unwrap();
    let rows = [
        ("acme", "great service", 5, 0),
        ("acme", "bad service", 1, 60),
        ("acme", "great price", 5, 120),
        ("globex", "slow shipping", 2, 0),
    ];
    let batch: Vec<NewFeedback> = rows
        .iter()
        .map(|(org, text, rating, offset)| NewFeedback {
            organization_id: org.to_string(),
            text: text.to_string(),
            rating: *rating,
            created_at: Utc.timestamp_opt(1_700_000_000 + offset, 0).unwrap(),
        })
        .collect();
    db.insert_feedback_batch(&batch).await.unwrap();

    let analyzer = TextAnalyzer::new(StopWords::from_words(["the", "a", "and"]));
    let analytics = FeedbackAnalytics::new(analyzer, params).unwrap();
    AppState {
        db,
        analytics: Arc::new(analytics),
    }
}

async fn get(uri: &str) -> (StatusCode, Value) {
    get_from(state().await, uri).await
}

async fn get_from(state: AppState, uri: &str) -> (StatusCode, Value) {
    let app = build_router(state);
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

// ============================================================
// Plumbing
// ============================================================

#[tokio::test]
async fn health_is_ok() {
    let (status, body) = get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn organizations_listed_largest_first() {
    let (status, body) = get("/api/organizations").await;
    assert_eq!(status, StatusCode::OK);
    let orgs = body["organizations"].as_array().unwrap();
    assert_eq!(orgs.len(), 2);
    assert_eq!(orgs[0]["organization_id"], "acme");
    assert_eq!(orgs[0]["feedback_count"], 3);
}

#[tokio::test]
async fn missing_organization_is_bad_request() {
    for route in ["average", "ratings", "keywords", "clustering"] {
        let (status, body) = get(&format!("/api/analysis/{route}")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{route}");
        assert!(body["error"].as_str().unwrap().contains("organization"));
    }
}

// ============================================================
// Views
// ============================================================

#[tokio::test]
async fn average_formats_two_decimals() {
    let (status, body) = get("/api/analysis/average?organization=acme").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["averageRating"], "3.67");
    assert_eq!(body["numberFeedbacks"], 3);
    assert_eq!(body["averageWordNumber"], "11.67");
}

#[tokio::test]
async fn unknown_organization_is_an_empty_corpus() {
    let (status, body) = get("/api/analysis/average?organization=initech").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["averageRating"], "0.00");
    assert_eq!(body["numberFeedbacks"], 0);
}

#[tokio::test]
async fn ratings_have_histogram_and_timeline() {
    let (status, body) = get("/api/analysis/ratings?organization=acme&gamma=1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["histogram"]["5"], 2);
    assert_eq!(body["histogram"]["1"], 1);
    assert_eq!(body["timeData"].as_object().unwrap().len(), 3);
}

#[tokio::test]
async fn keep_all_timeline_sends_points_sharing_a_timestamp() {
    let state = state_with(AnalyticsParams {
        grouping: TimestampGrouping::KeepAll,
        ..Default::default()
    })
    .await;
    // Two more acme ratings at the same instant as "great service"
    let same_instant = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
    let extra: Vec<NewFeedback> = [3, 4]
        .iter()
        .map(|rating| NewFeedback {
            organization_id: "acme".to_string(),
            text: "okay".to_string(),
            rating: *rating,
            created_at: same_instant,
        })
        .collect();
    state.db.insert_feedback_batch(&extra).await.unwrap();

    let (status, body) = get_from(state, "/api/analysis/ratings?organization=acme").await;
    assert_eq!(status, StatusCode::OK);
    let points = body["timeData"].as_array().unwrap();
    assert_eq!(points.len(), 5);
    assert_eq!(points[0]["date"], points[1]["date"]);
    assert_eq!(points[1]["date"], points[2]["date"]);
    assert!(points.iter().all(|p| p["rating"].is_number()));
}

#[tokio::test]
async fn bad_gamma_is_bad_request() {
    let (status, _) = get("/api/analysis/ratings?organization=acme&gamma=2").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn keywords_come_back_in_rank_order() {
    let (status, body) = get("/api/analysis/keywords?organization=acme&n=2").await;
    assert_eq!(status, StatusCode::OK);
    let words = body["popularWords"].as_object().unwrap();
    let keys: Vec<&String> = words.keys().collect();
    assert_eq!(keys, vec!["great", "service"]);
    assert_eq!(words["service"], 2);
}

#[tokio::test]
async fn clustering_returns_k_groups() {
    let (status, body) = get("/api/analysis/clustering?organization=acme&k=2&n=3").await;
    assert_eq!(status, StatusCode::OK);
    let clusters = body["clusters"].as_array().unwrap();
    let keywords = body["clusterKeywords"].as_array().unwrap();
    assert_eq!(clusters.len(), 2);
    assert_eq!(keywords.len(), 2);

    let total: usize = clusters.iter().map(|c| c.as_array().unwrap().len()).sum();
    assert_eq!(total, 3);
    let lonely = clusters
        .iter()
        .find(|c| c.as_array().unwrap().len() == 1)
        .unwrap();
    assert_eq!(lonely[0]["text"], "bad service");
}

#[tokio::test]
async fn zero_clusters_is_bad_request() {
    let (status, body) = get("/api/analysis/clustering?organization=acme&k=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}
