use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::analytics::{AnalyticsParams, FeedbackAnalytics};
use crate::text::{StopWords, TextAnalyzer};

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy. Every value
/// has a default, so an empty environment is a working setup.
#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: String,
    /// Default parameters for the analytics views (CLI flags and query
    /// parameters override them per request)
    pub params: AnalyticsParams,
    /// Newline-separated custom stop-word list; English defaults when unset
    pub stop_words_file: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Malformed numbers are reported here rather than at first use.
    pub fn load() -> Result<Self> {
        let defaults = AnalyticsParams::default();

        let params = AnalyticsParams {
            clusters: parse_var("FEEDLENS_CLUSTERS")?.unwrap_or(defaults.clusters),
            top_n: parse_var("FEEDLENS_TOP_N")?.unwrap_or(defaults.top_n),
            smoothing: parse_var("FEEDLENS_SMOOTHING")?.unwrap_or(defaults.smoothing),
            max_iterations: parse_var("FEEDLENS_MAX_ITERATIONS")?
                .unwrap_or(defaults.max_iterations),
            seed: parse_var("FEEDLENS_SEED")?,
            grouping: match env::var("FEEDLENS_TIMESTAMP_GROUPING") {
                Ok(raw) => raw.parse().map_err(anyhow::Error::msg)?,
                Err(_) => defaults.grouping,
            },
        };
        params
            .validate()
            .context("Invalid analytics settings in environment")?;

        Ok(Self {
            db_path: env::var("FEEDLENS_DB_PATH").unwrap_or_else(|_| "./feedlens.db".to_string()),
            params,
            stop_words_file: env::var("FEEDLENS_STOP_WORDS_FILE").ok().map(PathBuf::from),
        })
    }

    /// Build the text analyzer from the configured stop-word source.
    pub fn analyzer(&self) -> Result<TextAnalyzer> {
        let stop_words = match &self.stop_words_file {
            Some(path) => StopWords::from_file(path)?,
            None => StopWords::english(),
        };
        Ok(TextAnalyzer::new(stop_words))
    }

    /// Build the analytics engine with this configuration's defaults.
    pub fn analytics(&self) -> Result<FeedbackAnalytics> {
        Ok(FeedbackAnalytics::new(self.analyzer()?, self.params.clone())?)
    }
}

/// Parse an optional env var, failing on values that don't parse.
fn parse_var<T>(name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("{name} has an invalid value: {raw}")),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_var_missing_is_none() {
        let value: Option<usize> = parse_var("FEEDLENS_TEST_SURELY_UNSET_VAR").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_parse_var_reports_bad_number() {
        env::set_var("FEEDLENS_TEST_BAD_NUMBER", "three");
        let result: Result<Option<usize>> = parse_var("FEEDLENS_TEST_BAD_NUMBER");
        env::remove_var("FEEDLENS_TEST_BAD_NUMBER");
        let err = result.unwrap_err().to_string();
        assert!(err.contains("FEEDLENS_TEST_BAD_NUMBER"), "got: {err}");
    }

    #[test]
    fn test_parse_var_trims() {
        env::set_var("FEEDLENS_TEST_PADDED", " 0.8 ");
        let value: Option<f64> = parse_var("FEEDLENS_TEST_PADDED").unwrap();
        env::remove_var("FEEDLENS_TEST_PADDED");
        assert_eq!(value, Some(0.8));
    }
}
