//! Mapping between in-container destinations and host staging paths.
//!
//! Destinations are POSIX paths as seen inside the container, independent of
//! the host platform. A destination is mirrored under the staging root by
//! stripping its root marker: `/workspace/app` stages to
//! `<root>/workspace/app`, so the staged leaf always carries the
//! destination's own leaf name.

use std::path::{Path, PathBuf};

use crate::Error;

/// Segments of `destination` that remain after stripping the root.
///
/// Rejects destinations that have no segments left (`/`, `""`, `/./`) and
/// destinations containing `..`, which could escape the staging root.
pub fn relative_segments(destination: &str) -> crate::Result<Vec<&str>> {
    let mut segments = Vec::new();
    for segment in destination.split('/') {
        match segment {
            "" | "." => continue,
            ".." => return Err(Error::InvalidDestination(destination.to_owned())),
            other => segments.push(other),
        }
    }

    if segments.is_empty() {
        return Err(Error::InvalidDestination(destination.to_owned()));
    }
    Ok(segments)
}

/// Host path under `root` that mirrors `destination`.
///
/// ```
/// use devc_core::paths::staging_path;
/// use std::path::Path;
///
/// let staged = staging_path(Path::new("/tmp/run"), "/workspace/app").unwrap();
/// assert_eq!(staged, Path::new("/tmp/run/workspace/app"));
/// assert!(staging_path(Path::new("/tmp/run"), "/").is_err());
/// ```
pub fn staging_path(root: &Path, destination: &str) -> crate::Result<PathBuf> {
    let mut path = root.to_path_buf();
    for segment in relative_segments(destination)? {
        path.push(segment);
    }
    Ok(path)
}

pub fn is_absolute(destination: &str) -> bool {
    destination.starts_with('/')
}

/// Parent directory of `destination` inside the container.
///
/// Top-level absolute destinations have `/` as parent; a single relative
/// segment resolves against the container's working directory (`.`).
pub fn container_parent(destination: &str) -> String {
    let trimmed = destination.trim_end_matches('/');
    match trimmed.rsplit_once('/') {
        Some(("", _)) => "/".to_owned(),
        Some((parent, _)) => parent.to_owned(),
        None if is_absolute(destination) => "/".to_owned(),
        None => ".".to_owned(),
    }
}
