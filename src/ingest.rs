// Feedback import: load a JSON export into the database.
//
// The file is a JSON array of feedback objects. Both the current field names
// and the old dashboard's document names are accepted:
//
//   { "organization_id": "acme", "text": "...", "rating": 4,
//     "created_at": "2024-03-01T09:30:00Z" }
//   { "company": "acme", "feedback": "...", "rating": 4,
//     "createdAt": "2024-03-01T09:30:00.000Z" }

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::db::models::NewFeedback;
use crate::db::Database;

/// Parse a JSON array of feedback records.
pub fn parse_feedback(json: &str) -> Result<Vec<NewFeedback>> {
    let records: Vec<NewFeedback> =
        serde_json::from_str(json).context("Feedback file is not a JSON array of records")?;
    Ok(records)
}

/// Read a feedback file from disk.
pub fn read_feedback_file(path: &Path) -> Result<Vec<NewFeedback>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_feedback(&json).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Import a feedback file into the database. Returns the number of records.
pub async fn import_file(db: &Arc<dyn Database>, path: &Path) -> Result<usize> {
    let records = read_feedback_file(path)?;
    let stored = db.insert_feedback_batch(&records).await?;
    info!(records = stored, path = %path.display(), "Imported feedback");
    Ok(stored)
}
