use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::context::DEFAULT_MAX_BYTES;
use crate::error::{Result, SteeringError};

pub const DEFAULT_STEERING_DIR: &str = ".kiro/steering";
pub const CONFIG_FILE: &str = ".kiro/steering.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SteeringConfig {
    pub steering: DirectoryConfig,
    pub context: ContextConfig,
}

impl SteeringConfig {
    /// Read `path` if it exists, otherwise fall back to defaults.
    pub async fn load(path: &Path) -> Result<Self> {
        let config = if fs::try_exists(path).await? {
            let content = fs::read_to_string(path).await?;
            toml::from_str(&content)?
        } else {
            Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub async fn save(&self, path: &Path) -> Result<()> {
        self.validate()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(path, self.to_toml()?).await?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| SteeringError::Config(e.to_string()))
    }

    /// Validate configuration values, reporting every problem at once.
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();

        if self.steering.dir.trim().is_empty() {
            errors.push("steering.dir must not be empty");
        }
        if self.context.max_bytes == 0 {
            errors.push("context.max_bytes must be greater than 0");
        }
        if self.context.max_documents == Some(0) {
            errors.push("context.max_documents must be greater than 0 when set");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SteeringError::Config(errors.join("; ")))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectoryConfig {
    /// Steering directory, relative to the project root.
    pub dir: String,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            dir: DEFAULT_STEERING_DIR.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextConfig {
    /// Upper bound on assembled context size in bytes.
    pub max_bytes: usize,
    /// Optional cap on the number of documents in the assembled context.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_documents: Option<usize>,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_BYTES,
            max_documents: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPaths {
    pub root: PathBuf,
    pub config_file: PathBuf,
    pub steering_dir: PathBuf,
}

impl ProjectPaths {
    pub fn new(root: PathBuf, config_file: Option<PathBuf>, config: &SteeringConfig) -> Self {
        Self {
            config_file: config_file.unwrap_or_else(|| Self::default_config_file(&root)),
            steering_dir: root.join(&config.steering.dir),
            root,
        }
    }

    pub fn default_config_file(root: &Path) -> PathBuf {
        root.join(CONFIG_FILE)
    }

    /// Express `path` relative to the project root when it lies inside it.
    pub fn relativize(&self, path: &Path) -> PathBuf {
        path.strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.to_path_buf())
    }
}
