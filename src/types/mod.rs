//! Core Types
//!
//! Error types, filesystem snapshot types, and the analysis result model.

pub mod analysis;
pub mod entry;
pub mod error;

pub use analysis::{
    CellComment, CellDependencies, DocTable, DocumentAnalysis, FileAnalysis, FormulaCell, Heading,
    LegacySheetAnalysis, LegacySpreadsheetAnalysis, PageStats, PdfAnalysis, PdfMetadata, PdfTable,
    SheetAnalysis, SpreadsheetAnalysis, TableInfo, ValidationRule,
};
pub use entry::{Category, FileEntry, FolderNode, TreeChild, file_glyph, normalized_extension};
pub use error::{AnalysisError, Result, ScopeError};
