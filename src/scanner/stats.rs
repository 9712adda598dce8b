//! Whole-Tree Statistics
//!
//! Filtered, deterministic walks over the analyzed root: global counters for
//! the master report, recursive file counts for subfolder listings, and the
//! list of folders that get their own report. All three apply the same
//! [`PathFilter`] the tree builder and categorizer use.

use ignore::WalkBuilder;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::scanner::PathFilter;
use crate::types::normalized_extension;

/// Global statistics for one master-report build.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct TreeStats {
    pub dir_count: usize,
    pub file_count: usize,
    pub total_bytes: u64,
    /// Extension (with dot) → occurrence count; extensionless files are
    /// counted in the totals but not in the histogram.
    pub extensions: BTreeMap<String, usize>,
}

impl TreeStats {
    /// Histogram entries sorted by descending count, then extension.
    pub fn extensions_by_count(&self) -> Vec<(&str, usize)> {
        let mut entries: Vec<(&str, usize)> = self
            .extensions
            .iter()
            .map(|(ext, count)| (ext.as_str(), *count))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        entries
    }
}

fn walk(root: &Path, filter: &PathFilter) -> ignore::Walk {
    let filter = filter.clone();
    WalkBuilder::new(root)
        .standard_filters(false)
        .follow_links(false)
        .sort_by_file_path(|a, b| a.cmp(b))
        // the root itself is exempt; it may be hidden (".project") and
        // still be a legitimate analysis target
        .filter_entry(move |entry| entry.depth() == 0 || filter.allows_path(entry.path()))
        .build()
}

/// Gather global statistics below `root`.
pub fn gather_stats(root: &Path, filter: &PathFilter) -> TreeStats {
    let mut stats = TreeStats::default();
    for entry in walk(root, filter).flatten() {
        if entry.depth() == 0 {
            continue;
        }
        let is_dir = entry
            .file_type()
            .map(|t| t.is_dir())
            .unwrap_or(false);
        if is_dir {
            stats.dir_count += 1;
            continue;
        }
        stats.file_count += 1;
        if let Ok(metadata) = entry.metadata() {
            stats.total_bytes += metadata.len();
        }
        let ext = normalized_extension(entry.path());
        if !ext.is_empty() {
            *stats.extensions.entry(format!(".{ext}")).or_insert(0) += 1;
        }
    }
    stats
}

/// Count files anywhere below `dir` (recursive), filtered.
pub fn count_files_recursive(dir: &Path, filter: &PathFilter) -> usize {
    walk(dir, filter)
        .flatten()
        .filter(|e| e.depth() > 0)
        .filter(|e| e.file_type().map(|t| t.is_file()).unwrap_or(false))
        .count()
}

/// Count files directly inside `dir` (non-recursive), filtered.
pub fn count_files_flat(dir: &Path, filter: &PathFilter) -> usize {
    std::fs::read_dir(dir)
        .map(|entries| {
            entries
                .flatten()
                .filter(|e| filter.allows_os_name(&e.file_name()))
                .filter(|e| e.file_type().map(|t| t.is_file()).unwrap_or(false))
                .count()
        })
        .unwrap_or(0)
}

/// Folders that get their own report: the root always, plus every directory
/// that directly contains at least one counted file. Path-sorted.
pub fn folders_to_analyze(root: &Path, filter: &PathFilter) -> Vec<PathBuf> {
    let mut folders: Vec<PathBuf> = walk(root, filter)
        .flatten()
        .filter(|e| e.file_type().map(|t| t.is_dir()).unwrap_or(false))
        .map(|e| e.into_path())
        .filter(|p| p == root || count_files_flat(p, filter) > 0)
        .collect();
    folders.sort();
    folders
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::io::Write;

    fn fixture() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("docs")).unwrap();
        fs::create_dir(dir.path().join("empty")).unwrap();
        fs::create_dir(dir.path().join("node_modules")).unwrap();
        File::create(dir.path().join("node_modules/dep.js")).unwrap();
        let mut f = File::create(dir.path().join("a.txt")).unwrap();
        f.write_all(b"12345").unwrap();
        let mut f = File::create(dir.path().join("docs/b.txt")).unwrap();
        f.write_all(b"123").unwrap();
        File::create(dir.path().join("docs/c.pdf")).unwrap();
        File::create(dir.path().join(".hidden")).unwrap();
        dir
    }

    #[test]
    fn stats_ignore_filtered_entries_at_any_depth() {
        let dir = fixture();
        let stats = gather_stats(dir.path(), &PathFilter::default());
        assert_eq!(stats.dir_count, 2); // docs, empty
        assert_eq!(stats.file_count, 3);
        assert_eq!(stats.total_bytes, 8);
        assert_eq!(stats.extensions.get(".txt"), Some(&2));
        assert_eq!(stats.extensions.get(".pdf"), Some(&1));
        assert!(!stats.extensions.contains_key(".js"));
    }

    #[test]
    fn recursive_count_matches_flat_sum() {
        let dir = fixture();
        let filter = PathFilter::default();
        assert_eq!(count_files_recursive(dir.path(), &filter), 3);
        assert_eq!(count_files_flat(dir.path(), &filter), 1);
        assert_eq!(count_files_flat(&dir.path().join("docs"), &filter), 2);
        assert_eq!(count_files_flat(&dir.path().join("empty"), &filter), 0);
    }

    #[test]
    fn folder_list_is_root_plus_nonempty_dirs_sorted() {
        let dir = fixture();
        let folders = folders_to_analyze(dir.path(), &PathFilter::default());
        assert_eq!(folders.len(), 2);
        assert_eq!(folders[0], dir.path());
        assert_eq!(folders[1], dir.path().join("docs"));
    }

    #[test]
    fn histogram_sorts_by_count_then_extension() {
        let dir = fixture();
        let stats = gather_stats(dir.path(), &PathFilter::default());
        let ranked = stats.extensions_by_count();
        assert_eq!(ranked[0], (".txt", 2));
        assert_eq!(ranked[1], (".pdf", 1));
    }
}
