//! TOML configuration for the geo tooling.
//!
//! The codec itself has no settings: encoded points always carry SRID 4326.
//!
//! ```toml
//! [logging]
//! level = "debug"
//! show_target = true
//! ```

use crate::{GeoError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_CANDIDATES: [&str; 3] = [
    ".bustrack-geo.toml",
    "bustrack-geo.toml",
    ".config/bustrack-geo.toml",
];

/// Root configuration. Unknown sections are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeoConfig {
    pub logging: LoggingConfig,
}

/// Log output settings, applied by binaries when they install a subscriber.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by `RUST_LOG`
    pub level: String,
    pub show_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            show_target: false,
        }
    }
}

impl GeoConfig {
    /// Load configuration from `path`, a standard location, or defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path.map(Path::to_path_buf).or_else(find_config_file) {
            Some(p) => Self::from_file(&p),
            None => Ok(Self::default()),
        }
    }

    /// Load and parse a TOML configuration file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            GeoError::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;

        Self::from_toml(&content).map_err(|e| match e {
            GeoError::Config(msg) => {
                GeoError::Config(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| GeoError::Config(format!("Failed to parse config: {}", e)))
    }
}

/// Find configuration file in standard locations
fn find_config_file() -> Option<PathBuf> {
    CONFIG_CANDIDATES
        .into_iter()
        .map(PathBuf::from)
        .find(|candidate| candidate.exists())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_config_default() {
        let config = GeoConfig::default();
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.show_target);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = GeoConfig::from_toml("[logging]\nlevel = \"debug\"\n").unwrap();
        assert_eq!(config.logging.level, "debug");
        assert!(!config.logging.show_target);
    }

    #[test]
    fn test_srid_section_rejected() {
        let err = GeoConfig::from_toml("[codec]\nsrid = 3857\n").unwrap_err();
        assert!(matches!(err, GeoError::Config(_)));
    }

    #[test]
    fn test_invalid_toml() {
        let err = GeoConfig::from_toml("[logging]\nshow_target = \"yes\"\n").unwrap_err();
        assert!(matches!(err, GeoError::Config(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[logging]\nlevel = \"warn\"\nshow_target = true").unwrap();

        let config = GeoConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.logging.level, "warn");
        assert!(config.logging.show_target);
    }

    #[test]
    fn test_load_missing_file() {
        let err = GeoConfig::load(Some(Path::new("/nonexistent/bustrack-geo.toml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
