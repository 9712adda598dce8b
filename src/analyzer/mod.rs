//! Document Structure Analyzers
//!
//! One analyzer per office format, each producing pure data from `types`.
//! Which analyzers exist is a compile-time question (cargo features); which
//! ones a given `FileAnalyzer` may use is a runtime question answered by the
//! [`Capabilities`] it was built with. Analyzers never panic on hostile
//! input: every failure becomes a typed [`AnalysisError`] that renders as a
//! placeholder section in the report.

pub mod formula;

#[cfg(feature = "docx")]
pub mod document;
#[cfg(feature = "xlsx")]
mod ooxml;
#[cfg(feature = "pdf")]
pub mod pdf;
#[cfg(any(feature = "xlsx", feature = "docx"))]
mod xmlpart;

#[cfg(any(feature = "xlsx", feature = "xls"))]
pub mod spreadsheet;

use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::constants::{extensions, limits};
use crate::types::{AnalysisError, FileAnalysis, normalized_extension};

// =============================================================================
// Capabilities
// =============================================================================

/// Which format analyzers this analyzer instance is allowed to use.
///
/// [`Capabilities::detect`] reflects the compiled feature set; tests build
/// arbitrary values to exercise the placeholder paths without recompiling.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Capabilities {
    pub xlsx: bool,
    pub xls: bool,
    pub docx: bool,
    pub pdf: bool,
}

impl Capabilities {
    /// Capabilities of the current build.
    pub fn detect() -> Self {
        Self {
            xlsx: cfg!(feature = "xlsx"),
            xls: cfg!(feature = "xls"),
            docx: cfg!(feature = "docx"),
            pdf: cfg!(feature = "pdf"),
        }
    }

    /// Feature names that are absent, for banner and report hints.
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if !self.xlsx {
            missing.push("xlsx");
        }
        if !self.xls {
            missing.push("xls");
        }
        if !self.docx {
            missing.push("docx");
        }
        if !self.pdf {
            missing.push("pdf");
        }
        missing
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::detect()
    }
}

// =============================================================================
// Dispatch
// =============================================================================

/// Routes files to the right format analyzer by extension.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileAnalyzer {
    caps: Capabilities,
}

impl FileAnalyzer {
    pub fn new(caps: Capabilities) -> Self {
        Self { caps }
    }

    pub fn capabilities(&self) -> Capabilities {
        self.caps
    }

    /// Analyze one file. Never fails; missing capabilities and broken files
    /// come back as [`FileAnalysis::Skipped`] placeholders.
    pub fn analyze(&self, path: &Path) -> FileAnalysis {
        let extension = normalized_extension(path);
        debug!(path = %path.display(), %extension, "analyzing file");

        if extensions::EXCEL.contains(&extension.as_str()) {
            return self.analyze_excel(path);
        }
        if extensions::EXCEL_LEGACY.contains(&extension.as_str()) {
            return self.analyze_legacy_excel(path);
        }
        if extensions::WORD.contains(&extension.as_str()) {
            return self.analyze_word(path);
        }
        if extensions::PDF.contains(&extension.as_str()) {
            return self.analyze_pdf_file(path);
        }
        FileAnalysis::Unsupported { extension }
    }

    fn analyze_excel(&self, path: &Path) -> FileAnalysis {
        if !self.caps.xlsx {
            return FileAnalysis::Skipped(AnalysisError::capability("xlsx"));
        }
        #[cfg(feature = "xlsx")]
        {
            match spreadsheet::analyze_workbook(path) {
                Ok(analysis) => FileAnalysis::Spreadsheet(analysis),
                Err(err) => FileAnalysis::Skipped(err),
            }
        }
        #[cfg(not(feature = "xlsx"))]
        {
            let _ = path;
            FileAnalysis::Skipped(AnalysisError::capability("xlsx"))
        }
    }

    fn analyze_legacy_excel(&self, path: &Path) -> FileAnalysis {
        if !self.caps.xls {
            return FileAnalysis::Skipped(AnalysisError::capability("xls"));
        }
        #[cfg(feature = "xls")]
        {
            match spreadsheet::analyze_legacy_workbook(path) {
                Ok(analysis) => FileAnalysis::LegacySpreadsheet(analysis),
                Err(err) => FileAnalysis::Skipped(err),
            }
        }
        #[cfg(not(feature = "xls"))]
        {
            let _ = path;
            FileAnalysis::Skipped(AnalysisError::capability("xls"))
        }
    }

    fn analyze_word(&self, path: &Path) -> FileAnalysis {
        if !self.caps.docx {
            return FileAnalysis::Skipped(AnalysisError::capability("docx"));
        }
        #[cfg(feature = "docx")]
        {
            match document::analyze_document(path) {
                Ok(analysis) => FileAnalysis::Document(analysis),
                Err(err) => FileAnalysis::Skipped(err),
            }
        }
        #[cfg(not(feature = "docx"))]
        {
            let _ = path;
            FileAnalysis::Skipped(AnalysisError::capability("docx"))
        }
    }

    fn analyze_pdf_file(&self, path: &Path) -> FileAnalysis {
        if !self.caps.pdf {
            return FileAnalysis::Skipped(AnalysisError::capability("pdf"));
        }
        #[cfg(feature = "pdf")]
        {
            match pdf::analyze_pdf(path) {
                Ok(analysis) => FileAnalysis::Pdf(analysis),
                Err(err) => FileAnalysis::Skipped(err),
            }
        }
        #[cfg(not(feature = "pdf"))]
        {
            let _ = path;
            FileAnalysis::Skipped(AnalysisError::capability("pdf"))
        }
    }
}

// =============================================================================
// Shared Text Helpers
// =============================================================================

/// Truncate to at most `max` characters, appending `...` when clipped.
/// Returns the text and whether clipping happened.
pub(crate) fn truncate_chars(text: &str, max: usize) -> (String, bool) {
    if text.chars().count() <= max {
        return (text.to_string(), false);
    }
    let clipped: String = text.chars().take(max).collect();
    (format!("{}...", clipped.trim_end()), true)
}

/// Report preview of a document's text: first `PREVIEW_CHARS` characters
/// with newlines flattened to spaces.
pub(crate) fn make_preview(text: &str) -> (String, bool) {
    let flat = text
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    truncate_chars(&flat, limits::PREVIEW_CHARS)
}
