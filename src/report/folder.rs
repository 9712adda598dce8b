//! Per-Folder Report Composer
//!
//! One folder in, one Markdown document out. The composer only looks at the
//! folder's direct children; subfolders appear as a navigation list with
//! recursive file counts and get their own report.

use std::fmt::Write;
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::debug;

use crate::analyzer::FileAnalyzer;
use crate::constants::limits;
use crate::report::render::render_analysis;
use crate::report::size::format_size;
use crate::scanner::{CategoryMap, PathFilter, categorize_folder, count_files_recursive};
use crate::types::{Category, FileAnalysis, FileEntry};

/// A composed folder report, ready to persist.
#[derive(Debug, Clone)]
pub struct FolderReport {
    pub folder: PathBuf,
    /// Relative to the analyzed root; `.` for the root itself.
    pub relative: PathBuf,
    pub file_count: usize,
    /// Files that went through a format analyzer, placeholders included.
    pub analyses: Vec<AnalyzedFile>,
    pub markdown: String,
}

impl FolderReport {
    pub fn analyzed_count(&self) -> usize {
        self.analyses.len()
    }
}

/// One analyzed file's result, kept for the JSON surface.
#[derive(Debug, Clone, serde::Serialize)]
pub struct AnalyzedFile {
    pub name: String,
    pub analysis: FileAnalysis,
}

/// Compose the report for one folder.
pub fn compose_folder_report(
    root: &Path,
    folder: &Path,
    filter: &PathFilter,
    analyzer: &FileAnalyzer,
) -> FolderReport {
    let relative = folder.strip_prefix(root).unwrap_or(folder);
    let relative = if relative.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        relative.to_path_buf()
    };
    debug!(folder = %relative.display(), "composing folder report");

    let categories = categorize_folder(folder, filter);
    let subfolders = direct_subfolders(folder, filter);

    let name = folder
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| folder.display().to_string());

    let mut out = String::new();
    let _ = writeln!(out, "# 📂 Folder Report: {name}\n");
    let _ = writeln!(out, "**Path:** `{}`", relative.display());
    let _ = writeln!(
        out,
        "**Generated:** {}\n",
        Local::now().format("%Y-%m-%d %H:%M")
    );

    write_summary(&mut out, &categories, subfolders.len());
    write_subfolders(&mut out, folder, &subfolders, filter);
    write_file_listing(&mut out, &categories);

    let mut analyses = Vec::new();
    for (category, entries) in categories.iter() {
        if entries.is_empty() {
            continue;
        }
        match category {
            Category::Excel | Category::Word | Category::Pdf => {
                let _ = writeln!(out, "## {} {}\n", category.glyph(), category.label());
                for entry in entries {
                    let _ = writeln!(out, "### {} {}\n", entry.glyph(), entry.name);
                    let analysis = analyzer.analyze(&entry.path);
                    out.push_str(&render_analysis(&analysis));
                    out.push('\n');
                    analyses.push(AnalyzedFile {
                        name: entry.name.clone(),
                        analysis,
                    });
                }
            }
            Category::Code => {
                let _ = writeln!(out, "## {} {}\n", category.glyph(), category.label());
                for entry in entries {
                    match code_description(&entry.path) {
                        Some(line) => {
                            let _ = writeln!(out, "- **{}**: {}", entry.name, line);
                        }
                        None => {
                            let _ = writeln!(out, "- **{}**", entry.name);
                        }
                    }
                }
                out.push('\n');
            }
            // No structure to extract; a name and size bullet per file.
            Category::Image | Category::Archive | Category::Other => {
                let _ = writeln!(out, "## {} {}\n", category.glyph(), category.label());
                for entry in entries {
                    let _ = writeln!(
                        out,
                        "- {} {} ({})",
                        entry.glyph(),
                        entry.name,
                        format_size(entry.size)
                    );
                }
                out.push('\n');
            }
        }
    }

    FolderReport {
        folder: folder.to_path_buf(),
        relative,
        file_count: categories.total_files(),
        analyses,
        markdown: out,
    }
}

// =============================================================================
// Sections
// =============================================================================

fn write_summary(out: &mut String, categories: &CategoryMap, subfolder_count: usize) {
    let _ = writeln!(out, "## 📋 Summary\n");
    if categories.total_files() == 0 && subfolder_count == 0 {
        out.push_str("*This folder is empty.*\n\n");
        return;
    }
    out.push_str("| Kind | Count |\n| --- | --- |\n");
    let _ = writeln!(out, "| Subfolders | {subfolder_count} |");
    let _ = writeln!(out, "| Files | {} |", categories.total_files());
    for (category, entries) in categories.iter() {
        if !entries.is_empty() {
            let _ = writeln!(
                out,
                "| {} {} | {} |",
                category.glyph(),
                category.label(),
                entries.len()
            );
        }
    }
    out.push('\n');
}

fn write_subfolders(out: &mut String, folder: &Path, subfolders: &[String], filter: &PathFilter) {
    if subfolders.is_empty() {
        return;
    }
    let _ = writeln!(out, "## 📁 Subfolders\n");
    for name in subfolders {
        let count = count_files_recursive(&folder.join(name), filter);
        let _ = writeln!(out, "- **{name}/** ({count} files)");
    }
    out.push('\n');
}

fn write_file_listing(out: &mut String, categories: &CategoryMap) {
    let files = categories.all_files_sorted();
    if files.is_empty() {
        return;
    }
    let _ = writeln!(out, "## 🗂️ Files\n");
    out.push_str("| File | Type | Size | Modified |\n| --- | --- | --- | --- |\n");
    for entry in files {
        let _ = writeln!(
            out,
            "| {} {} | {} | {} | {} |",
            entry.glyph(),
            entry.name,
            file_type_label(entry),
            format_size(entry.size),
            entry
                .modified
                .map(|m| m.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "-".to_string()),
        );
    }
    out.push('\n');
}

fn file_type_label(entry: &FileEntry) -> String {
    if entry.extension.is_empty() {
        "-".to_string()
    } else {
        format!(".{}", entry.extension)
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn direct_subfolders(folder: &Path, filter: &PathFilter) -> Vec<String> {
    let Ok(entries) = std::fs::read_dir(folder) else {
        return Vec::new();
    };
    let mut names: Vec<String> = entries
        .flatten()
        .filter(|e| e.file_type().map(|t| t.is_dir()).unwrap_or(false))
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|name| filter.allows_name(name))
        .collect();
    names.sort_by_key(|n| n.to_lowercase());
    names
}

/// One-line description of a code file: the first comment line among the
/// first few lines, shebangs excluded.
fn code_description(path: &Path) -> Option<String> {
    let content = std::fs::read_to_string(path).ok()?;
    for line in content.lines().take(limits::CODE_PREVIEW_LINES) {
        let line = line.trim();
        if line.starts_with("#!") {
            continue;
        }
        let stripped = ["#", "//", "/*", "\"\"\"", "'''", "*"]
            .iter()
            .find_map(|prefix| line.strip_prefix(prefix));
        if let Some(text) = stripped {
            let text = text.trim().trim_end_matches("*/").trim();
            if !text.is_empty() {
                let (line, _) = crate::analyzer::truncate_chars(text, limits::CODE_PREVIEW_CHARS);
                return Some(line);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::Capabilities;

    fn compose(root: &Path) -> FolderReport {
        let filter = PathFilter::default();
        let analyzer = FileAnalyzer::new(Capabilities::detect());
        compose_folder_report(root, root, &filter, &analyzer)
    }

    #[test]
    fn empty_folder_says_so() {
        let dir = tempfile::tempdir().unwrap();
        let report = compose(dir.path());
        assert_eq!(report.file_count, 0);
        assert_eq!(report.analyzed_count(), 0);
        assert!(report.markdown.contains("*This folder is empty.*"));
        assert!(!report.markdown.contains("## 🗂️ Files"));
    }

    #[test]
    fn code_files_get_a_comment_one_liner() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("tool.py"),
            "#!/usr/bin/env python\n# Ingests nightly exports\nprint('hi')\n",
        )
        .unwrap();
        let report = compose(dir.path());
        assert!(report.markdown.contains("**tool.py**: Ingests nightly exports"));
    }

    #[test]
    fn listing_table_includes_sizes() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("data.zip"), vec![0u8; 2048]).unwrap();
        let report = compose(dir.path());
        assert_eq!(report.file_count, 1);
        assert!(report.markdown.contains("| 📦 data.zip | .zip | 2.0 KB |"));
    }

    #[test]
    fn disabled_capability_renders_a_placeholder_section() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("legacy.xls"), b"not a real workbook").unwrap();

        let caps = Capabilities {
            xls: false,
            ..Capabilities::detect()
        };
        let filter = PathFilter::default();
        let analyzer = FileAnalyzer::new(caps);
        let report = compose_folder_report(dir.path(), dir.path(), &filter, &analyzer);

        assert_eq!(report.analyzed_count(), 1);
        assert!(report.markdown.contains("### 📊 legacy.xls"));
        assert!(report.markdown.contains("`xls` capability is missing"));
        assert!(report.markdown.contains("Rebuild with the `xls` feature"));
        // The rest of the report still renders normally.
        assert!(report.markdown.contains("## 🗂️ Files"));
    }

    #[test]
    fn image_archive_and_other_files_get_listing_sections() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("logo.png"), vec![0u8; 1024]).unwrap();
        std::fs::write(dir.path().join("bundle.zip"), vec![0u8; 2048]).unwrap();
        std::fs::write(dir.path().join("clip.mp4"), vec![0u8; 4096]).unwrap();

        let report = compose(dir.path());
        assert!(report.markdown.contains("## 🖼️ Image files\n"));
        assert!(report.markdown.contains("- 🖼️ logo.png (1.0 KB)"));
        assert!(report.markdown.contains("## 📦 Archive files\n"));
        assert!(report.markdown.contains("- 📦 bundle.zip (2.0 KB)"));
        assert!(report.markdown.contains("## 📄 Other files\n"));
        assert!(report.markdown.contains("- 🎬 clip.mp4 (4.0 KB)"));
    }

    #[test]
    fn subfolders_are_listed_with_counts() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("inner")).unwrap();
        std::fs::write(dir.path().join("inner/a.txt"), "x").unwrap();
        let report = compose(dir.path());
        assert!(report.markdown.contains("- **inner/** (1 files)"));
    }
}
