//! Content-root configuration.
//!
//! A content root may carry `casefile.json` naming where its cases live and
//! where progress is kept. The file is optional; every field has a default.
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "casefile.json";
pub const CONFIG_SCHEMA_VERSION: u32 = 1;
const DEFAULT_CASES_DIR: &str = "cases";

fn default_cases_dir() -> String {
    DEFAULT_CASES_DIR.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContentConfig {
    pub schema_version: u32,
    /// Directory of case documents, relative to the content root.
    #[serde(default = "default_cases_dir")]
    pub cases_dir: String,
    /// Progress file relative to the content root; `None` uses the per-user
    /// data directory.
    #[serde(default)]
    pub progress_path: Option<String>,
}

impl Default for ContentConfig {
    fn default() -> Self {
        ContentConfig {
            schema_version: CONFIG_SCHEMA_VERSION,
            cases_dir: default_cases_dir(),
            progress_path: None,
        }
    }
}

/// Load `casefile.json` from `content_root`, falling back to defaults when
/// the file does not exist.
pub fn load_config(content_root: &Path) -> Result<ContentConfig> {
    let path = content_root.join(CONFIG_FILE_NAME);
    if !path.exists() {
        tracing::debug!(root = %content_root.display(), "no {CONFIG_FILE_NAME}; using defaults");
        return Ok(ContentConfig::default());
    }
    let bytes = fs::read(&path).with_context(|| format!("read config {}", path.display()))?;
    let config: ContentConfig = serde_json::from_slice(&bytes)
        .with_context(|| format!("parse config JSON {}", path.display()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Validate schema version and path fields.
pub fn validate_config(config: &ContentConfig) -> Result<()> {
    if config.schema_version != CONFIG_SCHEMA_VERSION {
        return Err(anyhow!(
            "unsupported casefile config schema_version {}",
            config.schema_version
        ));
    }
    if config.cases_dir.trim().is_empty() {
        return Err(anyhow!("cases_dir must be non-empty"));
    }
    validate_relative_path(&config.cases_dir, "cases_dir")?;
    if let Some(progress) = config.progress_path.as_deref() {
        validate_relative_path(progress, "progress_path")?;
    }
    Ok(())
}

fn validate_relative_path(rel: &str, label: &str) -> Result<()> {
    let path = Path::new(rel);
    if path.is_absolute() || has_parent_components(path) {
        return Err(anyhow!("{label} must be a relative path without '..' (got {rel:?})"));
    }
    Ok(())
}

fn has_parent_components(path: &Path) -> bool {
    path.components()
        .any(|component| matches!(component, Component::ParentDir))
}

impl ContentConfig {
    pub fn cases_dir(&self, content_root: &Path) -> PathBuf {
        content_root.join(&self.cases_dir)
    }

    /// Where progress is read and written: the explicit override first, then
    /// the configured path under the content root, then the user data dir.
    pub fn progress_path(&self, content_root: &Path, explicit: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = explicit {
            return Ok(path.to_path_buf());
        }
        if let Some(rel) = self.progress_path.as_deref() {
            return Ok(content_root.join(rel));
        }
        default_progress_path()
    }
}

/// `<data dir>/casefile/progress.json` for the current user.
pub fn default_progress_path() -> Result<PathBuf> {
    let base = dirs::data_dir().ok_or_else(|| anyhow!("no user data directory; pass --progress"))?;
    Ok(base.join("casefile").join("progress.json"))
}
