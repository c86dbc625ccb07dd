//! Tool configuration
//!
//! Optional `edgelint.toml` at the project root; every field has a
//! default so a project with no config file scans sensibly.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name of the configuration file looked for at the project root
pub const CONFIG_FILE: &str = "edgelint.toml";

/// Configuration for a project being analyzed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Source file extensions included in lexical scans (no leading dot)
    #[serde(default = "default_source_extensions")]
    pub source_extensions: Vec<String>,

    /// Directory names never descended into
    #[serde(default = "default_skip_dirs")]
    pub skip_dirs: Vec<String>,

    /// Directory holding the DDL files for schema analysis
    #[serde(default = "default_schema_dir")]
    pub schema_dir: String,

    /// Worker manifest path, relative to the project root
    #[serde(default = "default_manifest_path")]
    pub manifest_path: String,
}

fn default_source_extensions() -> Vec<String> {
    vec![
        "ts".to_string(),
        "tsx".to_string(),
        "js".to_string(),
        "jsx".to_string(),
        "mjs".to_string(),
    ]
}

fn default_skip_dirs() -> Vec<String> {
    vec![
        "node_modules".to_string(),
        "target".to_string(),
        "dist".to_string(),
        "build".to_string(),
        "coverage".to_string(),
    ]
}

fn default_schema_dir() -> String {
    "migrations".to_string()
}

fn default_manifest_path() -> String {
    "wrangler.toml".to_string()
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            source_extensions: default_source_extensions(),
            skip_dirs: default_skip_dirs(),
            schema_dir: default_schema_dir(),
            manifest_path: default_manifest_path(),
        }
    }
}

impl ProjectConfig {
    /// Load configuration from the project root or return defaults
    pub fn load_or_default(root: &Path) -> Result<Self> {
        let config_path = root.join(CONFIG_FILE);
        if !config_path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;
        let config: ProjectConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", config_path))?;
        Ok(config)
    }

    /// Save configuration to the project root
    pub fn save(&self, root: &Path) -> Result<()> {
        let config_path = root.join(CONFIG_FILE);
        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        std::fs::write(&config_path, content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;
        Ok(())
    }

    /// Extension list in the borrowed form the walker takes
    pub fn extensions(&self) -> Vec<&str> {
        self.source_extensions.iter().map(|s| s.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ProjectConfig::default();
        assert!(config.source_extensions.contains(&"ts".to_string()));
        assert!(config.skip_dirs.contains(&"node_modules".to_string()));
        assert_eq!(config.schema_dir, "migrations");
        assert_eq!(config.manifest_path, "wrangler.toml");
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ProjectConfig::load_or_default(dir.path()).unwrap();
        assert_eq!(config.schema_dir, ProjectConfig::default().schema_dir);
    }

    #[test]
    fn test_save_and_reload_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = ProjectConfig::default();
        config.schema_dir = "db/schema".to_string();
        config.save(dir.path()).unwrap();

        let reloaded = ProjectConfig::load_or_default(dir.path()).unwrap();
        assert_eq!(reloaded.schema_dir, "db/schema");
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "schema_dir = \"sql\"\n").unwrap();
        let config = ProjectConfig::load_or_default(dir.path()).unwrap();
        assert_eq!(config.schema_dir, "sql");
        assert!(!config.source_extensions.is_empty());
    }
}
