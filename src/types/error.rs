//! Error Types
//!
//! Two layers, matching the failure model of the analyzer:
//!
//! - [`ScopeError`] is fatal: an unreadable or nonexistent root path, broken
//!   configuration, or an I/O failure outside any single document. These end
//!   the run before output is produced.
//! - [`AnalysisError`] is non-fatal and scoped to one document or one
//!   extraction step. It is carried inside the report data and rendered as an
//!   inline note; it never propagates past the analyzer boundary, so sibling
//!   files keep being analyzed.

use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// Fatal Errors
// =============================================================================

#[derive(Debug, Error)]
pub enum ScopeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("root path does not exist: {0}")]
    RootNotFound(PathBuf),

    #[error("root path is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("config error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ScopeError>;

// =============================================================================
// Per-Document Errors
// =============================================================================

/// Non-fatal failure attached to one document or one extraction step.
///
/// The three variants are deliberately distinct so callers can tell "this
/// feature set is absent in the build" from "this document is broken" from
/// "one step inside an otherwise fine document failed".
#[derive(Debug, Clone, Error, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnalysisError {
    /// The optional subsystem for this format is not compiled in or disabled.
    #[error("analysis unavailable: the `{capability}` capability is missing")]
    CapabilityMissing { capability: String },

    /// The document could not be opened or parsed at all.
    #[error("could not open document: {message}")]
    Unreadable { message: String },

    /// One extraction step failed; the rest of the analysis stands.
    #[error("{stage} extraction failed: {message}")]
    Extraction { stage: String, message: String },
}

impl AnalysisError {
    pub fn capability(capability: impl Into<String>) -> Self {
        Self::CapabilityMissing {
            capability: capability.into(),
        }
    }

    pub fn unreadable(message: impl ToString) -> Self {
        Self::Unreadable {
            message: message.to_string(),
        }
    }

    pub fn extraction(stage: impl Into<String>, message: impl ToString) -> Self {
        Self::Extraction {
            stage: stage.into(),
            message: message.to_string(),
        }
    }

    /// True when the document itself could not be read (as opposed to a
    /// missing capability or a partial step failure).
    pub fn is_unreadable(&self) -> bool {
        matches!(self, Self::Unreadable { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analysis_error_display_names_the_capability() {
        let err = AnalysisError::capability("xlsx");
        assert!(err.to_string().contains("xlsx"));
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn extraction_error_keeps_stage_context() {
        let err = AnalysisError::extraction("merged ranges", "bad xml");
        assert_eq!(
            err.to_string(),
            "merged ranges extraction failed: bad xml"
        );
        assert!(!err.is_unreadable());
    }

    #[test]
    fn unreadable_is_distinguishable() {
        assert!(AnalysisError::unreadable("truncated zip").is_unreadable());
        assert!(!AnalysisError::capability("pdf").is_unreadable());
    }
}
