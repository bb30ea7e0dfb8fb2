use std::collections::HashSet;
use std::path::Path;

use crate::error::{Result, SteeringError};

/// Ordered, deduplicated set of normalized target paths for one resolution.
///
/// Paths are normalized to `/`-separated form: backslashes become `/`, and
/// empty and `.` segments are dropped, so `./src//main.rs` and `src\main.rs`
/// both become `src/main.rs`. The first occurrence wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetSet {
    paths: Vec<String>,
}

impl TargetSet {
    pub fn new<I, S>(paths: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut normalized = Vec::new();

        for raw in paths {
            let path = normalize(raw.as_ref())?;
            if seen.insert(path.clone()) {
                normalized.push(path);
            }
        }

        Ok(Self { paths: normalized })
    }

    pub fn from_paths<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        let paths = paths
            .iter()
            .map(|p| {
                let p = p.as_ref();
                p.to_str().ok_or_else(|| {
                    SteeringError::InvalidInput(format!("not valid UTF-8: {}", p.display()))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(paths)
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + Clone {
        self.paths.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }
}

fn normalize(raw: &str) -> Result<String> {
    if raw.trim().is_empty() {
        return Err(SteeringError::InvalidInput("empty path".into()));
    }
    if raw.contains('\0') {
        return Err(SteeringError::InvalidInput(format!(
            "path contains a NUL byte: {:?}",
            raw
        )));
    }

    let unified = raw.replace('\\', "/");
    if is_absolute(&unified) {
        return Err(SteeringError::InvalidInput(format!(
            "path must be relative to the project root: {:?}",
            raw
        )));
    }

    let path = unified
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect::<Vec<_>>()
        .join("/");

    if path.is_empty() {
        return Err(SteeringError::InvalidInput(format!(
            "path has no file segments: {:?}",
            raw
        )));
    }
    Ok(path)
}

/// Leading `/` or a drive prefix such as `C:`.
fn is_absolute(path: &str) -> bool {
    let bytes = path.as_bytes();
    path.starts_with('/')
        || (bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':')
}
