//! Temporary project fixtures with a steering directory.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

pub const STEERING_DIR: &str = ".kiro/steering";

#[derive(Debug, Clone)]
pub struct SteeringFile {
    pub name: String,
    pub content: String,
}

impl SteeringFile {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    pub fn always(name: impl Into<String>, body: &str) -> Self {
        Self::new(name, format!("---\ninclusion: always\n---\n{}\n", body))
    }

    pub fn manual(name: impl Into<String>, body: &str) -> Self {
        Self::new(name, format!("---\ninclusion: manual\n---\n{}\n", body))
    }

    pub fn file_match(name: impl Into<String>, patterns: &[&str], body: &str) -> Self {
        let list = patterns
            .iter()
            .map(|p| format!("  - \"{}\"", p))
            .collect::<Vec<_>>()
            .join("\n");
        Self::new(
            name,
            format!(
                "---\ninclusion: fileMatch\nfileMatchPattern:\n{}\n---\n{}\n",
                list, body
            ),
        )
    }
}

pub struct SteeringProjectFixture {
    pub root: TempDir,
    pub files: Vec<SteeringFile>,
}

impl SteeringProjectFixture {
    /// product (always), python (fileMatch), testing (fileMatch), release (manual).
    pub fn python_project() -> Self {
        SteeringProjectBuilder::new()
            .steering(SteeringFile::always("product", "# Product\nA task tracker."))
            .steering(SteeringFile::file_match(
                "python",
                &["*.py"],
                "# Python\nUse type hints.",
            ))
            .steering(SteeringFile::file_match(
                "testing",
                &["tests/**/*.py"],
                "# Testing\nUse pytest fixtures.",
            ))
            .steering(SteeringFile::manual("release", "# Release\nTag and publish."))
            .build()
            .expect("Failed to create steering project fixture")
    }

    pub fn path(&self) -> &Path {
        self.root.path()
    }

    pub fn steering_dir(&self) -> PathBuf {
        self.root.path().join(STEERING_DIR)
    }
}

pub struct SteeringProjectBuilder {
    files: Vec<SteeringFile>,
    config: Option<String>,
}

impl SteeringProjectBuilder {
    pub fn new() -> Self {
        Self {
            files: Vec::new(),
            config: None,
        }
    }

    pub fn steering(mut self, file: SteeringFile) -> Self {
        self.files.push(file);
        self
    }

    pub fn config(mut self, toml: impl Into<String>) -> Self {
        self.config = Some(toml.into());
        self
    }

    pub fn build(self) -> std::io::Result<SteeringProjectFixture> {
        let root = TempDir::new()?;
        let dir = root.path().join(STEERING_DIR);
        fs::create_dir_all(&dir)?;

        for file in &self.files {
            let path = dir.join(format!("{}.md", file.name));
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, &file.content)?;
        }

        if let Some(config) = &self.config {
            fs::write(root.path().join(".kiro/steering.toml"), config)?;
        }

        Ok(SteeringProjectFixture {
            root,
            files: self.files,
        })
    }
}

impl Default for SteeringProjectBuilder {
    fn default() -> Self {
        Self::new()
    }
}
