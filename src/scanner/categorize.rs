//! File Categorizer
//!
//! Partitions one directory's regular files (non-recursive) into the seven
//! format categories. The partition is exhaustive: every file the
//! [`PathFilter`] admits lands in exactly one list.

use std::fs;
use std::path::Path;

use crate::scanner::PathFilter;
use crate::types::{Category, FileEntry};

/// Per-folder category partition.
#[derive(Debug, Clone, Default)]
pub struct CategoryMap {
    pub excel: Vec<FileEntry>,
    pub word: Vec<FileEntry>,
    pub pdf: Vec<FileEntry>,
    pub code: Vec<FileEntry>,
    pub image: Vec<FileEntry>,
    pub archive: Vec<FileEntry>,
    pub other: Vec<FileEntry>,
}

impl CategoryMap {
    pub fn push(&mut self, entry: FileEntry) {
        match entry.category() {
            Category::Excel => self.excel.push(entry),
            Category::Word => self.word.push(entry),
            Category::Pdf => self.pdf.push(entry),
            Category::Code => self.code.push(entry),
            Category::Image => self.image.push(entry),
            Category::Archive => self.archive.push(entry),
            Category::Other => self.other.push(entry),
        }
    }

    pub fn get(&self, category: Category) -> &[FileEntry] {
        match category {
            Category::Excel => &self.excel,
            Category::Word => &self.word,
            Category::Pdf => &self.pdf,
            Category::Code => &self.code,
            Category::Image => &self.image,
            Category::Archive => &self.archive,
            Category::Other => &self.other,
        }
    }

    /// Categories in report order with their file lists.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &[FileEntry])> {
        Category::ALL.iter().map(|c| (*c, self.get(*c)))
    }

    pub fn total_files(&self) -> usize {
        self.iter().map(|(_, files)| files.len()).sum()
    }

    /// Files with a deep format analyzer (excel/word/pdf).
    pub fn analyzable_files(&self) -> usize {
        self.excel.len() + self.word.len() + self.pdf.len()
    }

    /// All files across categories, sorted case-insensitively by name.
    pub fn all_files_sorted(&self) -> Vec<&FileEntry> {
        let mut all: Vec<&FileEntry> = self.iter().flat_map(|(_, files)| files.iter()).collect();
        all.sort_by_key(|f| f.name.to_lowercase());
        all
    }
}

/// Categorize the regular files directly inside `folder`.
///
/// An unreadable folder yields an empty map, matching the traversal's
/// permission-tolerance.
pub fn categorize_folder(folder: &Path, filter: &PathFilter) -> CategoryMap {
    let mut map = CategoryMap::default();
    let Ok(entries) = fs::read_dir(folder) else {
        return map;
    };

    let mut files: Vec<FileEntry> = entries
        .flatten()
        .filter(|e| filter.allows_os_name(&e.file_name()))
        .filter(|e| e.file_type().map(|t| t.is_file()).unwrap_or(false))
        .map(|e| FileEntry::snapshot(&e.path()))
        .collect();
    files.sort_by_key(|f| f.name.to_lowercase());

    for file in files {
        map.push(file);
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    #[test]
    fn partition_is_exhaustive_and_exclusive() {
        let dir = tempfile::tempdir().unwrap();
        for name in [
            "a.xlsx", "b.xls", "c.docx", "d.pdf", "e.rs", "f.png", "g.zip", "h.unknown", "noext",
        ] {
            File::create(dir.path().join(name)).unwrap();
        }
        File::create(dir.path().join(".hidden")).unwrap();

        let map = categorize_folder(dir.path(), &PathFilter::default());
        assert_eq!(map.excel.len(), 2);
        assert_eq!(map.word.len(), 1);
        assert_eq!(map.pdf.len(), 1);
        assert_eq!(map.code.len(), 1);
        assert_eq!(map.image.len(), 1);
        assert_eq!(map.archive.len(), 1);
        assert_eq!(map.other.len(), 2);
        // hidden file does not count anywhere
        assert_eq!(map.total_files(), 9);
        assert_eq!(map.analyzable_files(), 4);
    }

    #[test]
    fn directories_are_not_categorized() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        File::create(dir.path().join("x.txt")).unwrap();

        let map = categorize_folder(dir.path(), &PathFilter::default());
        assert_eq!(map.total_files(), 1);
    }

    #[test]
    fn unreadable_folder_is_empty() {
        let map = categorize_folder(
            Path::new("/nonexistent/bundlescope-folder"),
            &PathFilter::default(),
        );
        assert_eq!(map.total_files(), 0);
    }
}
