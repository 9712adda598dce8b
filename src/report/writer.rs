//! Report Persistence
//!
//! Writes the composed reports to disk: one report inside each analyzed
//! folder, a flat renamed copy of each in the report directory, the master
//! document, and a root-level copy of the master. A failed write is logged
//! and skipped; one read-only folder must not sink the run.

use std::path::{Component, Path, PathBuf};

use tracing::warn;

use crate::config::ReportConfig;
use crate::constants::artifacts;
use crate::report::master::MasterRun;
use crate::types::Result;

/// Persists one run's artifacts under its root.
pub struct ReportWriter<'a> {
    config: &'a ReportConfig,
}

impl<'a> ReportWriter<'a> {
    pub fn new(config: &'a ReportConfig) -> Self {
        Self { config }
    }

    /// Write every artifact, returning the paths that were written.
    ///
    /// Only creating the report directory is fatal; individual file writes
    /// degrade to a warning.
    pub fn persist(&self, run: &MasterRun) -> Result<Vec<PathBuf>> {
        let report_dir = run.root.join(&self.config.dir_name);
        std::fs::create_dir_all(&report_dir)?;

        let mut written = Vec::new();

        for report in &run.folders {
            let in_place = report.folder.join(&self.config.folder_report_name);
            self.write_file(&in_place, &report.markdown, &mut written);

            let flat = report_dir.join(artifact_name(&report.relative));
            self.write_file(&flat, &report.markdown, &mut written);
        }

        let master = report_dir.join(artifacts::MASTER_REPORT);
        self.write_file(&master, &run.master_markdown, &mut written);

        let root_copy = run.root.join(artifacts::ROOT_SUMMARY);
        self.write_file(&root_copy, &run.master_markdown, &mut written);

        Ok(written)
    }

    fn write_file(&self, path: &Path, content: &str, written: &mut Vec<PathBuf>) {
        match std::fs::write(path, content) {
            Ok(()) => written.push(path.to_path_buf()),
            Err(err) => {
                warn!(path = %path.display(), %err, "skipping unwritable report");
            }
        }
    }
}

/// Flat file name of a folder's report inside the report directory.
///
/// The root report keeps a fixed name; everything else flattens its
/// relative path with underscores.
pub fn artifact_name(relative: &Path) -> String {
    if relative.as_os_str() == "." || relative.as_os_str().is_empty() {
        return artifacts::ROOT_FOLDER_REPORT.to_string();
    }
    let flattened: Vec<String> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    format!("{}_REPORT.md", flattened.join("_"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::Capabilities;
    use crate::config::Config;
    use crate::report::master::ProjectAnalyzer;

    #[test]
    fn artifact_names_flatten_paths() {
        assert_eq!(artifact_name(Path::new(".")), artifacts::ROOT_FOLDER_REPORT);
        assert_eq!(artifact_name(Path::new("sub")), "sub_REPORT.md");
        assert_eq!(
            artifact_name(Path::new("sub/inner")),
            "sub_inner_REPORT.md"
        );
    }

    #[test]
    fn persist_writes_the_full_artifact_set() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("readme.md"), "# hi\n").unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        std::fs::write(dir.path().join("sub/notes.txt"), "x").unwrap();

        let config = Config::default();
        let run = ProjectAnalyzer::new(config.clone(), Capabilities::detect())
            .run(dir.path())
            .unwrap();
        let written = ReportWriter::new(&config.report).persist(&run).unwrap();

        let report_dir = run.root.join(&config.report.dir_name);
        assert!(report_dir.join(artifacts::MASTER_REPORT).exists());
        assert!(report_dir.join(artifacts::ROOT_FOLDER_REPORT).exists());
        assert!(report_dir.join("sub_REPORT.md").exists());
        assert!(run.root.join(artifacts::ROOT_SUMMARY).exists());
        assert!(run.root.join(&config.report.folder_report_name).exists());
        assert!(run.root.join("sub").join(&config.report.folder_report_name).exists());
        // Two per folder, the master, and the root copy.
        assert_eq!(written.len(), 2 * run.folders.len() + 2);
    }

    #[test]
    fn a_second_run_does_not_count_its_own_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("data.txt"), "x").unwrap();

        let config = Config::default();
        let analyzer = ProjectAnalyzer::new(config.clone(), Capabilities::detect());

        let first = analyzer.run(dir.path()).unwrap();
        ReportWriter::new(&config.report).persist(&first).unwrap();

        let second = analyzer.run(dir.path()).unwrap();
        assert_eq!(second.stats.file_count, first.stats.file_count);
    }
}
