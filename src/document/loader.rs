//! Loads steering documents from the filesystem.

use std::path::{Component, Path, PathBuf};

use tokio::fs;
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use super::frontmatter::parse_document;
use super::store::DocumentStore;
use super::types::DocumentDescriptor;
use crate::error::Result;

const EXTENSION: &str = "md";

/// Reads `*.md` steering files from a directory tree.
///
/// Expected layout:
/// ```text
/// .kiro/steering/
/// ├── product.md               # inclusion: always (or no front matter)
/// ├── python.md                # inclusion: fileMatch, fileMatchPattern: "*.py"
/// ├── release.md               # inclusion: manual
/// └── api/
///     └── rest.md              # identity "api/rest"
/// ```
///
/// Records come back sorted by identity so the store's load ordinal does not
/// depend on directory iteration order.
pub struct SteeringLoader {
    dir: PathBuf,
}

impl SteeringLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Read and parse every steering file. A missing directory yields no records.
    pub async fn load(&self) -> Result<Vec<DocumentDescriptor>> {
        if !fs::try_exists(&self.dir).await? {
            debug!(path = %self.dir.display(), "Steering directory not found, skipping");
            return Ok(Vec::new());
        }

        let mut files = self.collect_files()?;
        files.sort();

        let mut descriptors = Vec::with_capacity(files.len());
        for (id, path) in files {
            let content = fs::read_to_string(&path).await?;
            let descriptor = parse_document(&id, &content)?.with_source_path(path);
            debug!(id = %descriptor.id, inclusion = %descriptor.inclusion, "Parsed steering file");
            descriptors.push(descriptor);
        }

        Ok(descriptors)
    }

    /// Load and validate in one step.
    pub async fn load_store(&self) -> Result<DocumentStore> {
        DocumentStore::load(self.load().await?)
    }

    /// Regular `*.md` files under the steering dir, following symlinks and
    /// skipping hidden entries below the root.
    fn collect_files(&self) -> Result<Vec<(String, PathBuf)>> {
        let mut files = Vec::new();

        for entry in WalkDir::new(&self.dir)
            .follow_links(true)
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden(e))
        {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            if path.extension().is_some_and(|e| e == EXTENSION)
                && let Some(id) = self.identity(path)
            {
                files.push((id, path.to_path_buf()));
            }
        }

        Ok(files)
    }

    /// Path relative to the steering directory, `/`-separated, without `.md`.
    fn identity(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.dir).ok()?.with_extension("");
        let parts: Vec<String> = relative
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();

        (!parts.is_empty()).then(|| parts.join("/"))
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}
