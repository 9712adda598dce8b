//! BundleScope - Office Document Tree Analyzer
//!
//! Walks a directory tree, extracts the *structure* of the office documents
//! it finds (spreadsheets, word-processor documents, PDFs), and composes
//! hierarchical Markdown reports: one per folder plus an aggregated master
//! document. Content stays where it is; BundleScope reports shape, formulas,
//! dependencies, and metadata.
//!
//! ## Core Features
//!
//! - **Structural extraction**: sheets, formulas, cell dependency maps,
//!   merged ranges, validations, headings, tables, page statistics
//! - **Feature-gated formats**: each analyzer is a cargo feature; a build
//!   without one still runs and marks affected files with a placeholder
//! - **Bounded scans**: hard ceilings on rows, columns, pages, and depth so
//!   pathological inputs cannot sink a run
//! - **Pure rendering**: extraction produces data, Markdown is rendered from
//!   it separately, and both halves are testable on their own
//!
//! ## Quick Start
//!
//! ```ignore
//! use bundlescope::analyzer::Capabilities;
//! use bundlescope::config::Config;
//! use bundlescope::report::{ProjectAnalyzer, ReportWriter};
//!
//! let config = Config::default();
//! let analyzer = ProjectAnalyzer::new(config.clone(), Capabilities::detect());
//! let run = analyzer.run(&project_path)?;
//! ReportWriter::new(&config.report).persist(&run)?;
//! ```
//!
//! ## Modules
//!
//! - [`scanner`]: filtered traversal, tree building, categorization, stats
//! - [`analyzer`]: per-format structural analyzers and the capability model
//! - [`report`]: Markdown rendering, composition, and persistence
//! - [`config`]: defaults, project file, environment overrides
//! - [`types`]: errors, filesystem snapshots, the analysis result model

pub mod analyzer;
pub mod config;
pub mod constants;
pub mod report;
pub mod scanner;
pub mod types;

pub use analyzer::{Capabilities, FileAnalyzer};
pub use config::{Config, ConfigLoader};
pub use report::{MasterRun, ProjectAnalyzer, ReportWriter};
pub use types::{FileAnalysis, Result, ScopeError};
