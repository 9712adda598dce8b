//! Analysis Result Model
//!
//! Pure data produced by the format analyzers, deliberately free of any
//! Markdown: rendering lives in `report::render` so both sides are testable
//! on their own. Every struct serializes, because the whole-tree result is
//! also returned as JSON to front-end collaborators.
//!
//! Display caps (30 formulas, 20 dependency rows, ...) are applied at render
//! time; the structs carry everything collected within the scan ceilings plus
//! the true totals where collection itself is capped.

use serde::Serialize;

use crate::types::AnalysisError;

// =============================================================================
// Tagged Result
// =============================================================================

/// Outcome of analyzing one file.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "format", rename_all = "snake_case")]
pub enum FileAnalysis {
    Spreadsheet(SpreadsheetAnalysis),
    /// Reduced-capability path for legacy binary workbooks.
    LegacySpreadsheet(LegacySpreadsheetAnalysis),
    Document(DocumentAnalysis),
    Pdf(PdfAnalysis),
    /// No structural analyzer exists for this extension.
    Unsupported { extension: String },
    /// Placeholder: capability missing or document unreadable.
    Skipped(AnalysisError),
}

// =============================================================================
// Spreadsheet
// =============================================================================

#[derive(Debug, Clone, Serialize, Default)]
pub struct SpreadsheetAnalysis {
    pub sheet_names: Vec<String>,
    /// Defined (named) ranges: (name, reference text).
    pub defined_names: Vec<(String, String)>,
    pub sheets: Vec<SheetAnalysis>,
    /// Partial-failure notes surfaced inline in the report.
    pub notes: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct SheetAnalysis {
    pub name: String,
    /// Bounding range in A1 notation, absent for an empty sheet.
    pub dimensions: Option<String>,
    pub row_count: usize,
    pub col_count: usize,
    /// First-row values, capped at `SHEET_HEADER_COLS`.
    pub headers: Vec<String>,
    /// Merged ranges, capped at `MERGES_SHOWN`; `merged_total` is exact.
    pub merged_ranges: Vec<String>,
    pub merged_total: usize,
    /// Formula cells found inside the scan window, in sheet order.
    pub formulas: Vec<FormulaCell>,
    /// Dependency edges per formula cell, first-seen order, duplicates kept.
    pub dependencies: Vec<CellDependencies>,
    /// List-style tables anchored on this sheet.
    pub tables: Vec<TableInfo>,
    /// Data-validation rules, capped at `VALIDATIONS_SHOWN`.
    pub validations: Vec<ValidationRule>,
    pub validation_total: usize,
    pub conditional_formatting: usize,
    pub chart_count: usize,
    /// Cell comments, capped at `COMMENTS_SHOWN` and `COMMENT_CHARS` each.
    pub comments: Vec<CellComment>,
    pub comment_total: usize,
    /// First `SAMPLE_ROWS` rows x `SAMPLE_COLS` columns; row 0 is the header.
    pub sample_rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FormulaCell {
    /// A1-style cell reference.
    pub cell: String,
    /// Formula text, normalized to start with `=`.
    pub formula: String,
}

/// Edges extracted from one formula cell. References are not validated
/// against the workbook and sheet qualifiers are dropped.
#[derive(Debug, Clone, Serialize)]
pub struct CellDependencies {
    pub cell: String,
    pub references: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TableInfo {
    pub name: String,
    pub sheet: String,
    pub range: String,
    pub columns: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationRule {
    /// Cell range(s) the rule applies to.
    pub sqref: String,
    pub kind: String,
    pub formula: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CellComment {
    pub cell: String,
    pub text: String,
}

/// What the legacy `.xls` path can report: shape and header row only.
#[derive(Debug, Clone, Serialize, Default)]
pub struct LegacySpreadsheetAnalysis {
    pub sheet_names: Vec<String>,
    pub sheets: Vec<LegacySheetAnalysis>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LegacySheetAnalysis {
    pub name: String,
    pub row_count: usize,
    pub col_count: usize,
    pub headers: Vec<String>,
}

// =============================================================================
// Word-Processor Document
// =============================================================================

#[derive(Debug, Clone, Serialize, Default)]
pub struct DocumentAnalysis {
    /// Non-empty paragraphs only.
    pub paragraph_count: usize,
    pub word_count: usize,
    pub char_count: usize,
    pub table_count: usize,
    pub section_count: usize,
    pub headings: Vec<Heading>,
    /// First `DOC_TABLES_SHOWN` tables; `table_count` is exact.
    pub tables: Vec<DocTable>,
    pub image_count: usize,
    pub header_snippets: Vec<String>,
    pub footer_snippets: Vec<String>,
    pub preview: String,
    pub preview_truncated: bool,
    pub notes: Vec<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Heading {
    pub level: u8,
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DocTable {
    pub rows_total: usize,
    pub header: Vec<String>,
    /// Up to `DOC_TABLE_ROWS` rows after the header.
    pub data: Vec<Vec<String>>,
}

// =============================================================================
// PDF
// =============================================================================

#[derive(Debug, Clone, Serialize, Default)]
pub struct PdfAnalysis {
    pub page_count: usize,
    pub metadata: PdfMetadata,
    /// Per-page stats for the first `PDF_STAT_PAGES` pages.
    pub pages: Vec<PageStats>,
    pub total_tables: usize,
    pub total_images: usize,
    /// Word count across all sampled pages' extracted text.
    pub total_words: usize,
    /// Tables from the first `PDF_TABLE_PAGES` pages, up to
    /// `PDF_TABLES_PER_PAGE` each.
    pub sampled_tables: Vec<PdfTable>,
    pub preview: String,
    pub preview_truncated: bool,
    pub notes: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct PdfMetadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub creator: Option<String>,
    pub creation_date: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PageStats {
    /// 1-based page number.
    pub page: usize,
    pub words: usize,
    pub tables: usize,
    pub images: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct PdfTable {
    pub page: usize,
    /// 1-based index of the table on its page.
    pub index: usize,
    pub header: Vec<String>,
    /// Rows padded to the header width.
    pub data: Vec<Vec<String>>,
    /// Rows beyond the rendered sample.
    pub remaining_rows: usize,
}
