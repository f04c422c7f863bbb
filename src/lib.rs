// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! MXC - Structured commit pipeline for Mendix projects
//!
//! Transforms one commit's raw change export (per-file status, staged flag,
//! diff text and optional model-element changes) into a deterministic,
//! enriched structured commit record used to drive commit-message
//! suggestions and downstream analytics.
//!
//! # Features
//!
//! - **Entity Extraction**: Domain entities from model changes or path conventions
//! - **File Normalization**: Tagged, classified per-file change records
//! - **Model Aggregation**: Breakdowns, microflow-action and domain summaries
//! - **Message Heuristics**: Suggested type, scopes, subject, highlights, risks
//! - **Stable Identity**: Content-derived SHA-256 commit identifier
//! - **Atomic Persistence**: Temp-then-rename JSON output
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use mxc::pipeline::assemble;
//! use mxc::storage::load_export;
//!
//! let raw = load_export(Path::new("exports/commit.json")).unwrap();
//! let data = assemble(&raw);
//! println!("{}: {}", data.commit_id, data.message_context.suggested_subject);
//! ```

// Module declarations
pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod storage;

// Re-exports for convenience
pub use config::MxcConfig;
pub use error::{MxcError, Result};
pub use model::StructuredCommitData;

/// Version information embedded at compile time.
pub mod version {
    /// The current version of mxc.
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    /// The git SHA at compile time (if available).
    pub const GIT_SHA: Option<&str> = option_env!("VERGEN_GIT_SHA");

    /// The git commit date at compile time (if available).
    pub const GIT_COMMIT_DATE: Option<&str> = option_env!("VERGEN_GIT_COMMIT_DATE");

    /// Get a formatted version string.
    pub fn version_string() -> String {
        match (GIT_SHA, GIT_COMMIT_DATE) {
            (Some(sha), Some(date)) => {
                format!("{} ({} {})", VERSION, &sha[..7.min(sha.len())], date)
            }
            (Some(sha), None) => {
                format!("{} ({})", VERSION, &sha[..7.min(sha.len())])
            }
            _ => VERSION.to_string(),
        }
    }
}
