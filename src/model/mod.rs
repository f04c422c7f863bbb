// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Data model: raw export input and structured commit output.

mod raw;
mod structured;

pub use raw::{RawCommitData, RawFileChange, RawModelChange, RawModelDumpArtifact};
pub use structured::{
    ChangeKind, CommitMessageContext, CommitMetrics, DomainModelSummary, EntityAttributeChange,
    ExtractedEntity, MicroflowActionSummary, ModelChangeBreakdown, ModelChangeSummary,
    StructuredCommitData, StructuredFileChange, StructuredModelChange, StructuredModelDumpArtifact,
};

/// Schema version written into every structured commit record.
pub const STRUCTURED_SCHEMA_VERSION: &str = "1.0";
