//! Configuration
//!
//! Defaults → project `bundlescope.toml` → `BUNDLESCOPE_*` environment.

mod loader;
mod types;

pub use loader::{CONFIG_FILE, ConfigLoader};
pub use types::{Config, ReportConfig, ScanConfig};
