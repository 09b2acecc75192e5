// Database queries: CRUD operations for feedback.
//
// Every database interaction goes through this module. This keeps SQL
// contained in one place and gives the rest of the app clean Rust interfaces.

use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection};

use super::models::{FeedbackRecord, NewFeedback, OrganizationCount};

/// Store one feedback and return its row id.
pub fn insert_feedback(conn: &Connection, feedback: &NewFeedback) -> Result<i64> {
    conn.execute(
        "INSERT INTO feedback (organization_id, text, rating, created_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            feedback.organization_id,
            feedback.text,
            feedback.rating,
            format_timestamp(&feedback.created_at),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Store many feedbacks in a single transaction. Returns how many were stored.
pub fn insert_feedback_batch(conn: &mut Connection, batch: &[NewFeedback]) -> Result<usize> {
    let tx = conn.transaction()?;
    for feedback in batch {
        insert_feedback(&tx, feedback)?;
    }
    tx.commit()?;
    Ok(batch.len())
}

/// All feedback for one organization, in insertion order.
pub fn feedback_for_organization(
    conn: &Connection,
    organization_id: &str,
) -> Result<Vec<FeedbackRecord>> {
    let mut stmt = conn.prepare(
        "SELECT id, organization_id, text, rating, created_at
         FROM feedback
         WHERE organization_id = ?1
         ORDER BY id",
    )?;

    let rows = stmt
        .query_map(params![organization_id], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, i64>(3)?,
                row.get::<_, String>(4)?,
            ))
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    rows.into_iter()
        .map(|(id, organization_id, text, rating, created_at)| {
            Ok(FeedbackRecord {
                id,
                organization_id,
                text,
                rating,
                created_at: parse_timestamp(&created_at)
                    .with_context(|| format!("Bad created_at on feedback {id}"))?,
            })
        })
        .collect()
}

/// Feedback counts per organization, largest first.
pub fn organization_counts(conn: &Connection) -> Result<Vec<OrganizationCount>> {
    let mut stmt = conn.prepare(
        "SELECT organization_id, COUNT(*) AS n
         FROM feedback
         GROUP BY organization_id
         ORDER BY n DESC, organization_id",
    )?;
    let counts = stmt
        .query_map([], |row| {
            Ok(OrganizationCount {
                organization_id: row.get(0)?,
                feedback_count: row.get(1)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(counts)
}

fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    let parsed = DateTime::parse_from_rfc3339(raw)?;
    Ok(parsed.with_timezone(&Utc))
}
