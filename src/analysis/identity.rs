// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Content-derived commit identity.

use sha2::{Digest, Sha256};

/// Compute the stable commit identifier.
///
/// The seed is the pipe-joined concatenation of timestamp, project, branch,
/// user email and the affected files; the files are re-sorted
/// case-insensitively first, so the identifier does not depend on input file
/// ordering.
pub fn compute_commit_id(
    timestamp: &str,
    project_name: &str,
    branch_name: &str,
    user_email: &str,
    affected_files: &[String],
) -> String {
    let mut sorted_files: Vec<&str> = affected_files.iter().map(String::as_str).collect();
    sorted_files.sort_by_key(|f| f.to_lowercase());

    let seed = format!(
        "{}|{}|{}|{}|{}",
        timestamp,
        project_name,
        branch_name,
        user_email,
        sorted_files.join("|")
    );
    format!("{:x}", Sha256::digest(seed.as_bytes()))
}
