//! Tree Builder
//!
//! Builds the filtered, depth-bounded [`FolderNode`] tree and renders it as
//! indented text. Building is read-only and re-entrant; ordering is
//! directories-first then case-insensitive name, so two runs over an
//! unmodified directory produce byte-identical output.
//!
//! The depth cap is carried as an explicit parameter all the way down; at the
//! cap a single truncation line replaces further recursion. A directory we
//! cannot read renders as empty instead of failing the traversal.

use std::fs;
use std::path::Path;
use tracing::debug;

use crate::constants::limits;
use crate::report::format_size;
use crate::scanner::PathFilter;
use crate::types::{FileEntry, FolderNode, Result, ScopeError, TreeChild};

pub struct TreeBuilder<'a> {
    filter: &'a PathFilter,
    max_depth: usize,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(filter: &'a PathFilter) -> Self {
        Self {
            filter,
            max_depth: limits::TREE_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Build the tree rooted at `root`. The root must exist and be a
    /// directory; everything below degrades instead of failing.
    pub fn build(&self, root: &Path) -> Result<FolderNode> {
        if !root.exists() {
            return Err(ScopeError::RootNotFound(root.to_path_buf()));
        }
        if !root.is_dir() {
            return Err(ScopeError::NotADirectory(root.to_path_buf()));
        }
        Ok(self.build_node(root, 0))
    }

    fn build_node(&self, path: &Path, depth: usize) -> FolderNode {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());

        if depth >= self.max_depth {
            return FolderNode {
                path: path.to_path_buf(),
                name,
                children: Vec::new(),
                truncated: true,
            };
        }

        let mut dirs: Vec<(String, std::path::PathBuf)> = Vec::new();
        let mut files: Vec<(String, std::path::PathBuf)> = Vec::new();

        match fs::read_dir(path) {
            Ok(entries) => {
                for entry in entries.flatten() {
                    let entry_name = entry.file_name().to_string_lossy().into_owned();
                    if !self.filter.allows_name(&entry_name) {
                        continue;
                    }
                    let entry_path = entry.path();
                    if entry_path.is_dir() {
                        dirs.push((entry_name, entry_path));
                    } else {
                        files.push((entry_name, entry_path));
                    }
                }
            }
            Err(err) => {
                // Permission failure: empty subtree, keep walking siblings.
                debug!("skipping unreadable directory {}: {err}", path.display());
            }
        }

        dirs.sort_by_key(|(name, _)| name.to_lowercase());
        files.sort_by_key(|(name, _)| name.to_lowercase());

        let mut children: Vec<TreeChild> = Vec::with_capacity(dirs.len() + files.len());
        for (_, dir_path) in dirs {
            children.push(TreeChild::Dir(self.build_node(&dir_path, depth + 1)));
        }
        for (_, file_path) in files {
            children.push(TreeChild::File(FileEntry::snapshot(&file_path)));
        }

        FolderNode {
            path: path.to_path_buf(),
            name,
            children,
            truncated: false,
        }
    }
}

// =============================================================================
// Rendering
// =============================================================================

/// Render the tree as indented text with box-drawing connectors.
pub fn render_tree(root: &FolderNode) -> String {
    let mut lines = vec![format!("📁 {}/", root.name)];
    render_children(root, "", &mut lines);
    lines.join("\n")
}

fn render_children(node: &FolderNode, prefix: &str, lines: &mut Vec<String>) {
    if node.truncated {
        lines.push(format!("{prefix}└── ... (depth limit reached)"));
        return;
    }
    let count = node.children.len();
    for (i, child) in node.children.iter().enumerate() {
        let last = i == count - 1;
        let connector = if last { "└── " } else { "├── " };
        let extension = if last { "    " } else { "│   " };
        match child {
            TreeChild::Dir(dir) => {
                lines.push(format!("{prefix}{connector}📁 {}/", dir.name));
                render_children(dir, &format!("{prefix}{extension}"), lines);
            }
            TreeChild::File(file) => {
                lines.push(format!(
                    "{prefix}{connector}{} {} ({})",
                    file.glyph(),
                    file.name,
                    format_size(file.size)
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::io::Write;

    fn touch(path: &Path, bytes: &[u8]) {
        let mut f = File::create(path).unwrap();
        f.write_all(bytes).unwrap();
    }

    #[test]
    fn tree_is_sorted_dirs_first_and_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("zeta")).unwrap();
        fs::create_dir(dir.path().join("Alpha")).unwrap();
        touch(&dir.path().join("b.txt"), b"hi");
        touch(&dir.path().join("a.txt"), b"hello");

        let filter = PathFilter::default();
        let builder = TreeBuilder::new(&filter);
        let first = render_tree(&builder.build(dir.path()).unwrap());
        let second = render_tree(&builder.build(dir.path()).unwrap());
        assert_eq!(first, second);

        let lines: Vec<&str> = first.lines().collect();
        assert!(lines[1].contains("Alpha/"));
        assert!(lines[2].contains("zeta/"));
        assert!(lines[3].contains("a.txt"));
        assert!(lines[4].contains("b.txt"));
    }

    #[test]
    fn ignored_and_hidden_entries_never_appear() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("node_modules")).unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        touch(&dir.path().join(".hidden"), b"x");
        touch(&dir.path().join("_FOLDER_REPORT.md"), b"x");
        touch(&dir.path().join("keep.txt"), b"x");

        let filter = PathFilter::default();
        let rendered = render_tree(&TreeBuilder::new(&filter).build(dir.path()).unwrap());
        assert!(!rendered.contains("node_modules"));
        assert!(!rendered.contains(".git"));
        assert!(!rendered.contains(".hidden"));
        assert!(!rendered.contains("_FOLDER_REPORT.md"));
        assert!(rendered.contains("keep.txt"));
    }

    #[test]
    fn depth_cap_replaces_recursion_with_one_line() {
        let dir = tempfile::tempdir().unwrap();
        let mut path = dir.path().to_path_buf();
        for name in ["a", "b", "c"] {
            path.push(name);
            fs::create_dir(&path).unwrap();
        }
        touch(&path.join("deep.txt"), b"x");

        let filter = PathFilter::default();
        let rendered = render_tree(
            &TreeBuilder::new(&filter)
                .with_max_depth(2)
                .build(dir.path())
                .unwrap(),
        );
        assert!(rendered.contains("depth limit reached"));
        assert!(!rendered.contains("deep.txt"));
    }

    #[test]
    fn missing_root_is_fatal() {
        let filter = PathFilter::default();
        let err = TreeBuilder::new(&filter)
            .build(Path::new("/nonexistent/bundlescope-root"))
            .unwrap_err();
        assert!(matches!(err, ScopeError::RootNotFound(_)));
    }
}
