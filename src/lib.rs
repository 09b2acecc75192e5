// Feedlens: feedback analytics for organizations
//
// This is the library root. The analytics core (text, cluster, timeline,
// analytics) is pure and synchronous; db, ingest, and web are the plumbing
// that feeds it a corpus and ships the results.

pub mod analytics;
pub mod cluster;
pub mod config;
pub mod db;
pub mod error;
pub mod ingest;
pub mod output;
pub mod status;
pub mod text;
pub mod timeline;

#[cfg(feature = "web")]
pub mod web;
