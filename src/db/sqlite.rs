// SqliteDatabase: rusqlite backend implementing the Database trait.
//
// The Connection is wrapped in tokio::sync::Mutex because Connection is !Sync.
// Trait methods lock the mutex, do synchronous rusqlite work, and return.
// The lock is never held across other .await points.

use anyhow::Result;
use async_trait::async_trait;
use rusqlite::Connection;
use tokio::sync::Mutex;

use super::models::{FeedbackRecord, NewFeedback, OrganizationCount};
use super::traits::Database;

pub struct SqliteDatabase {
    conn: Mutex<Connection>,
}

impl SqliteDatabase {
    /// Wrap an already-opened rusqlite Connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }
}

#[async_trait]
impl Database for SqliteDatabase {
    async fn table_count(&self) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::schema::table_count(&conn)
    }

    async fn insert_feedback(&self, feedback: &NewFeedback) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::queries::insert_feedback(&conn, feedback)
    }

    async fn insert_feedback_batch(&self, batch: &[NewFeedback]) -> Result<usize> {
        let mut conn = self.conn.lock().await;
        super::queries::insert_feedback_batch(&mut conn, batch)
    }

    async fn feedback_for_organization(
        &self,
        organization_id: &str,
    ) -> Result<Vec<FeedbackRecord>> {
        let conn = self.conn.lock().await;
        super::queries::feedback_for_organization(&conn, organization_id)
    }

    async fn organization_counts(&self) -> Result<Vec<OrganizationCount>> {
        let conn = self.conn.lock().await;
        super::queries::organization_counts(&conn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn memory_db() -> SqliteDatabase {
        let conn = Connection::open_in_memory().unwrap();
        super::super::schema::create_tables(&conn).unwrap();
        SqliteDatabase::new(conn)
    }

    #[tokio::test]
    async fn test_trait_roundtrip() {
        let db = memory_db();
        let feedback = NewFeedback {
            organization_id: "acme".to_string(),
            text: "Quick delivery".to_string(),
            rating: 5,
            created_at: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
        };
        db.insert_feedback(&feedback).await.unwrap();
        db.insert_feedback_batch(&[feedback.clone(), feedback.clone()])
            .await
            .unwrap();

        let records = db.feedback_for_organization("acme").await.unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].text, "Quick delivery");

        let counts = db.organization_counts().await.unwrap();
        assert_eq!(counts[0].feedback_count, 3);
        assert_eq!(db.table_count().await.unwrap(), 2);
    }
}
