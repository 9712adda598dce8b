//! Path Filter
//!
//! One filtering rule applied identically during tree building,
//! categorization, and statistics gathering, so the three views always agree
//! on which entries count. Excluded: hidden entries (leading `.`), the fixed
//! ignore-name set, and the tool's own report artifacts.

use std::ffi::OsStr;
use std::path::Path;

use crate::config::ReportConfig;
use crate::constants::{IGNORED_DIRS, artifacts};

#[derive(Debug, Clone)]
pub struct PathFilter {
    report_dir: String,
    folder_report: String,
}

impl Default for PathFilter {
    fn default() -> Self {
        Self {
            report_dir: artifacts::REPORT_DIR.to_string(),
            folder_report: artifacts::FOLDER_REPORT.to_string(),
        }
    }
}

impl PathFilter {
    pub fn new(report: &ReportConfig) -> Self {
        Self {
            report_dir: report.dir_name.clone(),
            folder_report: report.folder_report_name.clone(),
        }
    }

    /// Whether an entry with this name counts at all.
    pub fn allows_name(&self, name: &str) -> bool {
        !name.starts_with('.')
            && !IGNORED_DIRS.contains(&name)
            && name != self.report_dir
            && name != self.folder_report
            && name != artifacts::MASTER_REPORT
            && name != artifacts::ROOT_SUMMARY
    }

    pub fn allows_os_name(&self, name: &OsStr) -> bool {
        self.allows_name(&name.to_string_lossy())
    }

    /// Filter by the final component of a path.
    pub fn allows_path(&self, path: &Path) -> bool {
        path.file_name().is_none_or(|n| self.allows_os_name(n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_and_ignored_names_are_rejected() {
        let filter = PathFilter::default();
        assert!(!filter.allows_name(".gitignore"));
        assert!(!filter.allows_name("node_modules"));
        assert!(!filter.allows_name("__pycache__"));
        assert!(!filter.allows_name("target"));
        assert!(filter.allows_name("docs"));
        assert!(filter.allows_name("budget.xlsx"));
    }

    #[test]
    fn own_artifacts_are_rejected() {
        let filter = PathFilter::default();
        assert!(!filter.allows_name("_ANALYSIS_REPORTS"));
        assert!(!filter.allows_name("_FOLDER_REPORT.md"));
        assert!(!filter.allows_name("PROJECT_ANALYSIS_REPORT.md"));
        assert!(!filter.allows_name("MASTER_REPORT.md"));
    }

    #[test]
    fn path_without_file_name_is_allowed() {
        let filter = PathFilter::default();
        assert!(filter.allows_path(Path::new("/")));
        assert!(!filter.allows_path(Path::new("/project/.git")));
    }
}
