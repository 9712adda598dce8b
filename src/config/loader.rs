//! Configuration Loader (Figment-based)
//!
//! Loads and merges configuration from multiple sources:
//! 1. Built-in defaults (Serialized)
//! 2. Project config (`bundlescope.toml` in the working directory)
//! 3. Environment variables (`BUNDLESCOPE_*` prefix)

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::Path;
use tracing::debug;

use super::types::Config;
use crate::types::{Result, ScopeError};

/// Project config file name
pub const CONFIG_FILE: &str = "bundlescope.toml";

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with the full resolution chain:
    /// defaults → project file → env vars.
    pub fn load() -> Result<Config> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        let project_path = Path::new(CONFIG_FILE);
        if project_path.exists() {
            debug!("Loading project config from: {}", project_path.display());
            figment = figment.merge(Toml::file(project_path));
        }

        // e.g. BUNDLESCOPE_SCAN_MAX_DEPTH -> scan.max_depth
        figment = figment.merge(Env::prefixed("BUNDLESCOPE_").split('_').lowercase(true));

        let config: Config = figment
            .extract()
            .map_err(|e| ScopeError::Config(format!("configuration error: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file only (plus defaults).
    pub fn load_from_file(path: &Path) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(path))
            .extract()
            .map_err(|e| ScopeError::Config(format!("configuration error: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bundlescope.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[scan]\nmax_depth = 3").unwrap();

        let config = ConfigLoader::load_from_file(&path).unwrap();
        assert_eq!(config.scan.max_depth, 3);
        // untouched section keeps its default
        assert!(config.report.write_artifacts);
    }

    #[test]
    fn invalid_file_values_fail_validation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bundlescope.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[scan]\nmax_depth = 0").unwrap();

        assert!(ConfigLoader::load_from_file(&path).is_err());
    }
}
