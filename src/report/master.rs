//! Whole-Tree Orchestration
//!
//! Walks every folder worth reporting on, composes their reports, and
//! aggregates them into the master document: tree snapshot, statistics,
//! extension histogram, folder index, and the concatenated folder bodies.

use std::fmt::Write;
use std::path::{Path, PathBuf};

use chrono::Local;
use serde::Serialize;
use tracing::info;

use crate::analyzer::{Capabilities, FileAnalyzer};
use crate::config::Config;
use crate::report::folder::{AnalyzedFile, FolderReport, compose_folder_report};
use crate::report::size::format_size;
use crate::report::writer::artifact_name;
use crate::scanner::{PathFilter, TreeBuilder, TreeStats, folders_to_analyze, gather_stats, render_tree};
use crate::types::{Category, FolderNode, Result, ScopeError};

/// Everything one analysis run produced, independent of persistence.
#[derive(Debug, Clone)]
pub struct MasterRun {
    pub root: PathBuf,
    pub stats: TreeStats,
    pub tree: FolderNode,
    pub folders: Vec<FolderReport>,
    pub master_markdown: String,
}

impl MasterRun {
    /// Flat summary for the JSON surface; the Markdown bodies stay out.
    pub fn summary(&self) -> RunSummary<'_> {
        RunSummary {
            root: &self.root,
            stats: &self.stats,
            tree: &self.tree,
            folders: self
                .folders
                .iter()
                .map(|f| FolderSummary {
                    path: &f.relative,
                    file_count: f.file_count,
                    analyzed_count: f.analyzed_count(),
                    files: &f.analyses,
                })
                .collect(),
        }
    }

    pub fn total_analyzed(&self) -> usize {
        self.folders.iter().map(|f| f.analyzed_count()).sum()
    }
}

#[derive(Debug, Serialize)]
pub struct RunSummary<'a> {
    pub root: &'a Path,
    pub stats: &'a TreeStats,
    pub tree: &'a FolderNode,
    pub folders: Vec<FolderSummary<'a>>,
}

#[derive(Debug, Serialize)]
pub struct FolderSummary<'a> {
    pub path: &'a Path,
    pub file_count: usize,
    pub analyzed_count: usize,
    pub files: &'a [AnalyzedFile],
}

// =============================================================================
// Analyzer
// =============================================================================

/// Runs a whole analysis pass over one root directory.
pub struct ProjectAnalyzer {
    config: Config,
    filter: PathFilter,
    analyzer: FileAnalyzer,
}

impl ProjectAnalyzer {
    pub fn new(config: Config, caps: Capabilities) -> Self {
        let filter = PathFilter::new(&config.report);
        Self {
            config,
            filter,
            analyzer: FileAnalyzer::new(caps),
        }
    }

    pub fn capabilities(&self) -> Capabilities {
        self.analyzer.capabilities()
    }

    /// Analyze the tree under `root` and compose every report in memory.
    ///
    /// Fails only on a missing or non-directory root; per-folder and
    /// per-file problems degrade to placeholders inside the reports.
    pub fn run(&self, root: &Path) -> Result<MasterRun> {
        if !root.exists() {
            return Err(ScopeError::RootNotFound(root.to_path_buf()));
        }
        if !root.is_dir() {
            return Err(ScopeError::NotADirectory(root.to_path_buf()));
        }
        let root = root.canonicalize()?;
        info!(root = %root.display(), "starting analysis run");

        let stats = gather_stats(&root, &self.filter);
        let tree = TreeBuilder::new(&self.filter)
            .with_max_depth(self.config.scan.max_depth)
            .build(&root)?;

        let mut folders = Vec::new();
        for folder in folders_to_analyze(&root, &self.filter) {
            folders.push(compose_folder_report(
                &root,
                &folder,
                &self.filter,
                &self.analyzer,
            ));
        }
        info!(folders = folders.len(), files = stats.file_count, "composition done");

        let master_markdown = self.compose_master(&root, &stats, &tree, &folders);
        Ok(MasterRun {
            root,
            stats,
            tree,
            folders,
            master_markdown,
        })
    }

    // =========================================================================
    // Master Document
    // =========================================================================

    fn compose_master(
        &self,
        root: &Path,
        stats: &TreeStats,
        tree: &FolderNode,
        folders: &[FolderReport],
    ) -> String {
        let mut out = String::new();
        let root_name = root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| root.display().to_string());

        let _ = writeln!(out, "# 📊 Project Analysis: {root_name}\n");
        let _ = writeln!(out, "**Root:** `{}`", root.display());
        let _ = writeln!(
            out,
            "**Generated:** {}\n",
            Local::now().format("%Y-%m-%d %H:%M")
        );

        out.push_str("## 📈 Statistics\n\n");
        out.push_str("| Metric | Value |\n| --- | --- |\n");
        let _ = writeln!(out, "| Folders | {} |", stats.dir_count);
        let _ = writeln!(out, "| Files | {} |", stats.file_count);
        let _ = writeln!(out, "| Total size | {} |", format_size(stats.total_bytes));
        let _ = writeln!(
            out,
            "| Analyzed documents | {} |\n",
            folders.iter().map(|f| f.analyzed_count()).sum::<usize>()
        );

        let histogram = stats.extensions_by_count();
        if !histogram.is_empty() {
            out.push_str("## 🧩 File Types\n\n");
            out.push_str("| Extension | Count | Category |\n| --- | --- | --- |\n");
            for (ext, count) in histogram {
                let category = Category::from_extension(ext.trim_start_matches('.'));
                let _ = writeln!(
                    out,
                    "| `{ext}` | {count} | {} {} |",
                    category.glyph(),
                    category.label()
                );
            }
            out.push('\n');
        }

        out.push_str("## 🌳 Structure\n\n```\n");
        out.push_str(&render_tree(tree));
        out.push_str("\n```\n\n");

        if !folders.is_empty() {
            out.push_str("## 📑 Folder Index\n\n");
            out.push_str("| Folder | Files | Analyzed | Report |\n| --- | --- | --- | --- |\n");
            for report in folders {
                let _ = writeln!(
                    out,
                    "| `{}` | {} | {} | [{}]({}) |",
                    report.relative.display(),
                    report.file_count,
                    report.analyzed_count(),
                    artifact_name(&report.relative),
                    artifact_name(&report.relative),
                );
            }
            out.push('\n');
        }

        out.push_str("---\n");
        for report in folders {
            let _ = writeln!(out, "\n{}\n---", report.markdown.trim_end());
        }
        out
    }
}
