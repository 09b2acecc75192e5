// Database trait: backend-agnostic async interface for feedback storage.
//
// Implementor: SqliteDatabase (wraps rusqlite). All methods are async so a
// sync backend behind a Mutex and a native async backend fit the same
// interface, and web handlers can hold an `Arc<dyn Database>`.

use anyhow::Result;
use async_trait::async_trait;

use super::models::{FeedbackRecord, NewFeedback, OrganizationCount};

#[async_trait]
pub trait Database: Send + Sync {
    // --- Lifecycle ---

    /// Count the number of user-created tables in the database.
    async fn table_count(&self) -> Result<i64>;

    // --- Feedback ---

    /// Store one feedback and return its id.
    async fn insert_feedback(&self, feedback: &NewFeedback) -> Result<i64>;

    /// Store many feedbacks atomically. Returns how many were stored.
    async fn insert_feedback_batch(&self, batch: &[NewFeedback]) -> Result<usize>;

    /// Load one organization's corpus, in insertion order.
    async fn feedback_for_organization(&self, organization_id: &str)
        -> Result<Vec<FeedbackRecord>>;

    /// Feedback counts per organization, largest first.
    async fn organization_counts(&self) -> Result<Vec<OrganizationCount>>;
}
