use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde::Serialize;
use tracing::info;

use feedlens::analytics::FeedbackAnalytics;
use feedlens::config::Config;

/// Feedlens: rating, keyword, and cluster analytics over organization feedback.
#[derive(Parser)]
#[command(name = "feedlens", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the database
    Init,

    /// Import feedback from a JSON file (array of records)
    Import {
        /// Path to the JSON file
        path: PathBuf,
    },

    /// Show database status and per-organization feedback counts
    Status,

    /// Average rating, feedback count, and average text length
    Summary {
        /// Organization to analyze
        #[arg(long)]
        org: String,

        /// Print JSON instead of formatted output
        #[arg(long)]
        json: bool,
    },

    /// Rating histogram and smoothed rating timeline
    Ratings {
        #[arg(long)]
        org: String,

        /// Smoothing factor in (0, 1] (default: FEEDLENS_SMOOTHING or 0.6)
        #[arg(long)]
        gamma: Option<f64>,

        #[arg(long)]
        json: bool,
    },

    /// Most frequent words across all feedback
    Keywords {
        #[arg(long)]
        org: String,

        /// Number of keywords (default: FEEDLENS_TOP_N or 10)
        #[arg(long)]
        top: Option<usize>,

        #[arg(long)]
        json: bool,
    },

    /// Cluster feedback by TF-IDF similarity and list each cluster's keywords
    Clusters {
        #[arg(long)]
        org: String,

        /// Number of clusters (default: FEEDLENS_CLUSTERS or 3)
        #[arg(long)]
        clusters: Option<usize>,

        /// Keywords per cluster (default: FEEDLENS_TOP_N or 10)
        #[arg(long)]
        top: Option<usize>,

        /// Seed for random centroid initialisation (default: farthest-first)
        #[arg(long)]
        seed: Option<u64>,

        #[arg(long)]
        json: bool,
    },

    /// Serve the analytics API over HTTP
    #[cfg(feature = "web")]
    Serve {
        /// Port to listen on (default: 3000)
        #[arg(long, default_value = "3000")]
        port: u16,

        /// Address to bind (default: 127.0.0.1)
        #[arg(long, default_value = "127.0.0.1")]
        bind: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("feedlens=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Init => {
            info!("Initializing Feedlens database...");
            let db = feedlens::db::initialize_sqlite(&config.db_path)?;
            let table_count = db.table_count().await?;
            println!("Database initialized at: {}", config.db_path);
            println!("Tables created: {table_count}");
            println!("\nNext step: feedlens import <feedback.json>");
        }

        Commands::Import { path } => {
            let db = feedlens::db::initialize_sqlite(&config.db_path)?;
            let stored = feedlens::ingest::import_file(&db, &path).await?;
            println!("{}", format!("Imported {stored} feedback records.").bold());
        }

        Commands::Status => {
            if !feedlens::status::database_exists(&config.db_path) {
                println!("Database: not initialized");
                println!("\nRun `feedlens init` to set up the database.");
                return Ok(());
            }
            let db = feedlens::db::open_sqlite(&config.db_path)?;
            feedlens::status::show(&db, &config.db_path).await?;
        }

        Commands::Summary { org, json } => {
            let analytics = config.analytics()?;
            let corpus = load_corpus(&config, &org).await?;
            let summary = analytics.summary(&corpus);
            if json {
                print_json(&summary)?;
            } else {
                feedlens::output::terminal::display_summary(&org, &summary);
            }
        }

        Commands::Ratings { org, gamma, json } => {
            let analytics = config.analytics()?;
            let corpus = load_corpus(&config, &org).await?;
            let gamma = gamma.unwrap_or(analytics.params().smoothing);
            let ratings = analytics.ratings_over_time(&corpus, gamma)?;
            if json {
                print_json(&ratings)?;
            } else {
                feedlens::output::terminal::display_ratings(&ratings);
            }
        }

        Commands::Keywords { org, top, json } => {
            let analytics = config.analytics()?;
            let corpus = load_corpus(&config, &org).await?;
            let n = top.unwrap_or(analytics.params().top_n);
            let keywords = analytics.top_keywords(&corpus, n);
            if json {
                print_json(&keywords)?;
            } else {
                feedlens::output::terminal::display_keywords("Top Keywords", &keywords);
            }
        }

        Commands::Clusters {
            org,
            clusters,
            top,
            seed,
            json,
        } => {
            let mut params = config.params.clone();
            if seed.is_some() {
                params.seed = seed;
            }
            let analytics = FeedbackAnalytics::new(config.analyzer()?, params)?;
            let corpus = load_corpus(&config, &org).await?;
            let k = clusters.unwrap_or(analytics.params().clusters);
            let n = top.unwrap_or(analytics.params().top_n);
            let report = analytics.cluster_keywords(&corpus, k, n)?;
            if json {
                print_json(&report)?;
            } else {
                feedlens::output::terminal::display_clusters(&report);
            }
        }

        #[cfg(feature = "web")]
        Commands::Serve { port, bind } => {
            let db = feedlens::db::initialize_sqlite(&config.db_path)?;
            let analytics = config.analytics()?;
            feedlens::web::run_server(db, analytics, port, &bind).await?;
        }
    }

    Ok(())
}

/// Load one organization's feedback from the configured database.
async fn load_corpus(
    config: &Config,
    organization: &str,
) -> Result<Vec<feedlens::db::models::FeedbackRecord>> {
    let db = feedlens::db::open_sqlite(&config.db_path)?;
    let corpus = db.feedback_for_organization(organization).await?;
    info!(organization, feedbacks = corpus.len(), "Loaded corpus");
    Ok(corpus)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
