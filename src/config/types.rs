//! Configuration Types
//!
//! Runtime-tunable settings with sensible defaults. Scan ceilings are *not*
//! configurable; they are invariants in [`crate::constants::limits`]. What is
//! configurable here: the tree depth cap and where report artifacts go.

use serde::{Deserialize, Serialize};

use crate::constants::{artifacts, limits};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Traversal settings
    pub scan: ScanConfig,

    /// Report artifact settings
    pub report: ReportConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scan: ScanConfig::default(),
            report: ReportConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration values are within acceptable ranges.
    /// Returns `ScopeError::Config` on validation failure.
    pub fn validate(&self) -> crate::types::Result<()> {
        if self.scan.max_depth == 0 {
            return Err(crate::types::ScopeError::Config(
                "scan.max_depth must be greater than 0".to_string(),
            ));
        }
        for (field, value) in [
            ("report.dir_name", &self.report.dir_name),
            ("report.folder_report_name", &self.report.folder_report_name),
        ] {
            if value.is_empty() || value.contains('/') || value.contains('\\') {
                return Err(crate::types::ScopeError::Config(format!(
                    "{field} must be a plain file name, got {value:?}"
                )));
            }
        }
        Ok(())
    }
}

// =============================================================================
// Scan Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Maximum tree depth before the truncation line
    pub max_depth: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_depth: limits::TREE_MAX_DEPTH,
        }
    }
}

// =============================================================================
// Report Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Report directory created at the analyzed root
    pub dir_name: String,

    /// Report file written inside each analyzed folder
    pub folder_report_name: String,

    /// Whether artifacts are persisted at all (reports are always returned
    /// in memory)
    pub write_artifacts: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            dir_name: artifacts::REPORT_DIR.to_string(),
            folder_report_name: artifacts::FOLDER_REPORT.to_string(),
            write_artifacts: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(Config::default().validate().is_ok());
        assert_eq!(Config::default().scan.max_depth, 6);
    }

    #[test]
    fn zero_depth_is_rejected() {
        let mut config = Config::default();
        config.scan.max_depth = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn artifact_names_must_be_plain() {
        let mut config = Config::default();
        config.report.dir_name = "a/b".to_string();
        assert!(config.validate().is_err());
    }
}
