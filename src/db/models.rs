// Data models: Rust structs that map to database rows.
//
// These are the types that flow through the application. They're separate
// from the database queries so the analytics modules can use them without
// depending on rusqlite directly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored feedback entry. Read-only as far as analytics is concerned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub id: i64,
    pub organization_id: String,
    pub text: String,
    pub rating: i64,
    pub created_at: DateTime<Utc>,
}

/// A feedback entry that hasn't been stored yet.
///
/// Accepts the legacy document field names (`company`, `feedback`,
/// `createdAt`) so exports from the old dashboard import unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewFeedback {
    #[serde(alias = "company", alias = "organizationId")]
    pub organization_id: String,
    #[serde(alias = "feedback")]
    pub text: String,
    pub rating: i64,
    #[serde(alias = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// How many feedbacks an organization has on file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationCount {
    pub organization_id: String,
    pub feedback_count: i64,
}
