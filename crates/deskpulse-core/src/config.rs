use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Project configuration, read from `deskpulse.toml` at the project root.
/// A missing file yields the defaults; a malformed file is an error.
///
/// Sentiment class thresholds are deliberately *not* configurable here —
/// they are compiled-in scorer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            limits: LimitsConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Maximum comment body length in characters.
    #[serde(default = "default_max_comment_chars")]
    pub max_comment_chars: usize,
    /// Maximum ticket title length in characters.
    #[serde(default = "default_max_title_chars")]
    pub max_title_chars: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_comment_chars: default_max_comment_chars(),
            max_title_chars: default_max_title_chars(),
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("deskpulse.db")
}

const fn default_max_comment_chars() -> usize {
    8_192
}

const fn default_max_title_chars() -> usize {
    200
}

/// Load project configuration from `<root>/deskpulse.toml`.
pub fn load_project_config(project_root: &Path) -> Result<ProjectConfig> {
    let path = project_root.join("deskpulse.toml");
    if !path.exists() {
        return Ok(ProjectConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<ProjectConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::{ProjectConfig, load_project_config};

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = load_project_config(dir.path()).expect("load config");
        assert_eq!(config.limits.max_comment_chars, 8_192);
        assert_eq!(config.store.path.to_str(), Some("deskpulse.db"));
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        std::fs::write(
            dir.path().join("deskpulse.toml"),
            "[limits]\nmax_comment_chars = 512\n",
        )
        .expect("write config");

        let config = load_project_config(dir.path()).expect("load config");
        assert_eq!(config.limits.max_comment_chars, 512);
        assert_eq!(config.limits.max_title_chars, 200);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        std::fs::write(dir.path().join("deskpulse.toml"), "[limits\n").expect("write config");
        assert!(load_project_config(dir.path()).is_err());
    }

    #[test]
    fn defaults_roundtrip_through_toml() {
        let config = ProjectConfig::default();
        let rendered = toml::to_string(&config).expect("serialize");
        let reparsed: ProjectConfig = toml::from_str(&rendered).expect("reparse");
        assert_eq!(
            reparsed.limits.max_comment_chars,
            config.limits.max_comment_chars
        );
    }
}
