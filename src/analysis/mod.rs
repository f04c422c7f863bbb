// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! The transformation pipeline components.
//!
//! Every function here is pure: one raw export in, newly allocated output
//! out, no shared state between invocations.

pub mod entities;
pub mod files;
pub mod flatten;
pub mod identity;
pub mod message;
pub mod summary;

pub use entities::extract_entities;
pub use files::normalize_file_change;
pub use flatten::flatten_model_changes;
pub use identity::compute_commit_id;
pub use message::build_message_context;
pub use summary::summarize_model_changes;
