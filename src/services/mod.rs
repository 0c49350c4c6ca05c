//! External service interactions
//!
//! This module contains services for interacting with external systems:
//! - The remote analysis service (HTTP)
//! - Background execution of analysis requests
//! - GitHub link construction

pub mod analysis;
pub mod fetch_runner;
pub mod links;

pub use analysis::{AnalysisClient, HttpAnalysisClient};
pub use fetch_runner::AnalysisRunner;
pub use links::{commit_link, repo_web_url};
