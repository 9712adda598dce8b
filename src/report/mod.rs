//! Report Composition and Persistence
//!
//! Rendering is split from extraction: `render` turns analysis data into
//! Markdown fragments, `folder` and `master` compose whole documents, and
//! `writer` is the only module that touches the output filesystem.

pub mod folder;
pub mod master;
pub mod render;
pub mod size;
pub mod writer;

pub use folder::{AnalyzedFile, FolderReport, compose_folder_report};
pub use master::{MasterRun, ProjectAnalyzer, RunSummary};
pub use render::render_analysis;
pub use size::format_size;
pub use writer::{ReportWriter, artifact_name};
