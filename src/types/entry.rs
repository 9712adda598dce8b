//! Filesystem Snapshot Types
//!
//! Immutable, per-invocation snapshots of what the scanner saw: single files
//! ([`FileEntry`]), the format taxonomy ([`Category`]), and the filtered,
//! depth-bounded directory tree ([`FolderNode`]).

use chrono::{DateTime, Local};
use serde::Serialize;
use std::fs::Metadata;
use std::path::{Path, PathBuf};

use crate::constants::extensions;

// =============================================================================
// Category
// =============================================================================

/// Exhaustive partition of regular files by format.
///
/// Every non-ignored file maps to exactly one category; unmatched extensions
/// fall into [`Category::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Excel,
    Word,
    Pdf,
    Code,
    Image,
    Archive,
    Other,
}

impl Category {
    /// All categories in report order.
    pub const ALL: [Category; 7] = [
        Category::Excel,
        Category::Word,
        Category::Pdf,
        Category::Code,
        Category::Image,
        Category::Archive,
        Category::Other,
    ];

    /// Classify a lowercase extension (without the leading dot).
    pub fn from_extension(ext: &str) -> Self {
        if extensions::EXCEL.contains(&ext) || extensions::EXCEL_LEGACY.contains(&ext) {
            Category::Excel
        } else if extensions::WORD.contains(&ext) {
            Category::Word
        } else if extensions::PDF.contains(&ext) {
            Category::Pdf
        } else if extensions::CODE.contains(&ext) {
            Category::Code
        } else if extensions::IMAGE.contains(&ext) {
            Category::Image
        } else if extensions::ARCHIVE.contains(&ext) {
            Category::Archive
        } else {
            Category::Other
        }
    }

    /// Human label used in summary tables.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Excel => "Excel files",
            Category::Word => "Word files",
            Category::Pdf => "PDF files",
            Category::Code => "Code files",
            Category::Image => "Image files",
            Category::Archive => "Archive files",
            Category::Other => "Other files",
        }
    }

    /// Glyph used in summary tables and the extension histogram.
    pub fn glyph(&self) -> &'static str {
        match self {
            Category::Excel => "📊",
            Category::Word => "📝",
            Category::Pdf => "📕",
            Category::Code => "💻",
            Category::Image => "🖼️",
            Category::Archive => "📦",
            Category::Other => "📄",
        }
    }
}

/// Glyph for a single file, by extension.
///
/// Media files get their own glyph even though they classify as `other`.
pub fn file_glyph(ext: &str) -> &'static str {
    if extensions::VIDEO.contains(&ext) {
        "🎬"
    } else if extensions::AUDIO.contains(&ext) {
        "🎵"
    } else {
        Category::from_extension(ext).glyph()
    }
}

// =============================================================================
// FileEntry
// =============================================================================

/// Snapshot of one regular file, taken at analysis time.
#[derive(Debug, Clone, Serialize)]
pub struct FileEntry {
    pub path: PathBuf,
    pub name: String,
    /// Lowercase extension without the dot; empty when the file has none.
    pub extension: String,
    pub size: u64,
    pub modified: Option<DateTime<Local>>,
}

impl FileEntry {
    /// Snapshot a path. Metadata failures leave size 0 / no timestamp rather
    /// than failing the listing.
    pub fn snapshot(path: &Path) -> Self {
        let metadata = path.metadata().ok();
        Self::from_parts(path, metadata.as_ref())
    }

    pub fn from_parts(path: &Path, metadata: Option<&Metadata>) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let extension = normalized_extension(path);
        let size = metadata.map(|m| m.len()).unwrap_or(0);
        let modified = metadata
            .and_then(|m| m.modified().ok())
            .map(DateTime::<Local>::from);
        Self {
            path: path.to_path_buf(),
            name,
            extension,
            size,
            modified,
        }
    }

    pub fn category(&self) -> Category {
        Category::from_extension(&self.extension)
    }

    pub fn glyph(&self) -> &'static str {
        file_glyph(&self.extension)
    }
}

/// Lowercase extension without the dot, empty string when absent.
pub fn normalized_extension(path: &Path) -> String {
    path.extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

// =============================================================================
// FolderNode
// =============================================================================

/// One directory in the filtered tree. Children are ordered directories-first
/// then case-insensitive by name, and never include ignored, hidden, or
/// report-artifact entries.
#[derive(Debug, Clone, Serialize)]
pub struct FolderNode {
    pub path: PathBuf,
    pub name: String,
    pub children: Vec<TreeChild>,
    /// Set when the depth cap replaced this directory's contents.
    pub truncated: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum TreeChild {
    Dir(FolderNode),
    File(FileEntry),
}

impl FolderNode {
    /// Count files in this subtree (directories excluded, truncation ignored).
    pub fn file_count(&self) -> usize {
        self.children
            .iter()
            .map(|c| match c {
                TreeChild::Dir(d) => d.file_count(),
                TreeChild::File(_) => 1,
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categorization_covers_known_extensions() {
        assert_eq!(Category::from_extension("xlsx"), Category::Excel);
        assert_eq!(Category::from_extension("xls"), Category::Excel);
        assert_eq!(Category::from_extension("docx"), Category::Word);
        assert_eq!(Category::from_extension("pdf"), Category::Pdf);
        assert_eq!(Category::from_extension("rs"), Category::Code);
        assert_eq!(Category::from_extension("png"), Category::Image);
        assert_eq!(Category::from_extension("zip"), Category::Archive);
        assert_eq!(Category::from_extension("xyz"), Category::Other);
        assert_eq!(Category::from_extension(""), Category::Other);
    }

    #[test]
    fn media_files_get_their_own_glyph_but_stay_other() {
        assert_eq!(file_glyph("mp4"), "🎬");
        assert_eq!(file_glyph("mp3"), "🎵");
        assert_eq!(Category::from_extension("mp4"), Category::Other);
    }

    #[test]
    fn extension_is_lowercased_and_dotless() {
        assert_eq!(normalized_extension(Path::new("Report.XLSX")), "xlsx");
        assert_eq!(normalized_extension(Path::new("README")), "");
    }
}
