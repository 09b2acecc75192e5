// Colored terminal output for the analytics views.
//
// main.rs calls these after running a query; `--json` bypasses them entirely.

use colored::Colorize;

use crate::analytics::{ClusterReport, RatingsOverTime, Summary};
use crate::text::KeywordCount;

const BAR_WIDTH: usize = 20;

/// Display the headline numbers for an organization.
pub fn display_summary(organization: &str, summary: &Summary) {
    println!(
        "\n{}",
        format!("=== Feedback Summary for {organization} ===").bold()
    );
    if summary.feedback_count == 0 {
        println!("  No feedback on file yet.");
        return;
    }
    println!("  Feedbacks:           {}", summary.feedback_count);
    println!(
        "  Average rating:      {}",
        colorize_rating(summary.average_rating)
    );
    println!("  Average text length: {:.2} chars", summary.average_text_length);
}

/// Display the rating histogram and the smoothed timeline.
pub fn display_ratings(ratings: &RatingsOverTime) {
    println!("\n{}", "=== Rating Distribution ===".bold());
    let total: usize = ratings.histogram.values().sum();
    if total == 0 {
        println!("  No ratings yet.");
        return;
    }
    for (rating, count) in &ratings.histogram {
        let fraction = *count as f64 / total as f64;
        println!(
            "  {:>3}  {} {:>5}",
            rating,
            super::bar(fraction, BAR_WIDTH).bright_blue(),
            count
        );
    }

    println!("\n{}", "=== Smoothed Rating Timeline ===".bold());
    for point in &ratings.timeline {
        println!(
            "  {}  {}",
            point.timestamp.format("%Y-%m-%d %H:%M").to_string().dimmed(),
            colorize_rating(point.rating)
        );
    }
}

/// Display a ranked keyword list.
pub fn display_keywords(title: &str, keywords: &[KeywordCount]) {
    println!("\n{}", format!("=== {title} ===").bold());
    if keywords.is_empty() {
        println!("  No keywords found.");
        return;
    }
    let max = keywords.iter().map(|k| k.count).max().unwrap_or(1).max(1);
    for (i, keyword) in keywords.iter().enumerate() {
        println!(
            "  {:>2}. {:<24} {} {}",
            i + 1,
            keyword.word.bold(),
            super::bar(keyword.count as f64 / max as f64, BAR_WIDTH).bright_green(),
            keyword.count
        );
    }
}

/// Display each cluster's size, keywords, and a few sample feedbacks.
pub fn display_clusters(report: &ClusterReport) {
    println!(
        "\n{}",
        format!("=== Feedback Clusters ({}) ===", report.groups.len()).bold()
    );
    for group in &report.groups {
        println!(
            "\n  {} {}",
            format!("Cluster {}", group.cluster_id + 1).bold(),
            format!("({} feedbacks)", group.feedback.len()).dimmed()
        );
        if group.feedback.is_empty() {
            println!("    (empty)");
            continue;
        }
        let keywords: Vec<String> = group
            .keywords
            .iter()
            .map(|k| format!("{} ({})", k.word, k.count))
            .collect();
        println!("    Keywords: {}", keywords.join(", "));
        for record in group.feedback.iter().take(3) {
            let preview = super::truncate_chars(&record.text, 100);
            println!("    [{}] {}", record.rating, preview.dimmed());
        }
    }
}

/// Color a rating by how good it is on a 1-5 scale.
fn colorize_rating(rating: f64) -> colored::ColoredString {
    let text = format!("{rating:.2}");
    if rating >= 4.0 {
        text.green()
    } else if rating >= 2.5 {
        text.yellow()
    } else {
        text.red()
    }
}
