// System status display: database location, size, and per-organization counts.

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

use crate::db::Database;

/// Display system status to the terminal.
pub async fn show(db: &Arc<dyn Database>, db_path: &str) -> Result<()> {
    let file_size = std::fs::metadata(db_path)
        .map(|m| format_bytes(m.len()))
        .unwrap_or_else(|_| "unknown".to_string());
    println!("Database: {} ({})", db_path, file_size);

    let counts = db.organization_counts().await?;
    if counts.is_empty() {
        println!("Feedback: none imported yet");
        println!("  Run `feedlens import <file.json>` to load some");
        return Ok(());
    }

    let total: i64 = counts.iter().map(|c| c.feedback_count).sum();
    println!(
        "Feedback: {} records across {} organizations",
        total,
        counts.len()
    );
    for count in &counts {
        println!("  {:<32} {:>8}", count.organization_id, count.feedback_count);
    }

    Ok(())
}

/// Whether a database file exists at `db_path`.
pub fn database_exists(db_path: &str) -> bool {
    Path::new(db_path).exists()
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.0 KB");
        assert_eq!(format_bytes(3 * 1024 * 1024), "3.0 MB");
    }
}
