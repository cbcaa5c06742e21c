use devc_core::paths;
use devc_core::{BindMount, CopySpec};
use std::fs;
use std::path::{Path, PathBuf};

/// Prefix of every staging directory.
pub const STAGING_PREFIX: &str = "devc_to_docker_";

/// Create a fresh staging directory under `temp_root`, or under the platform
/// temp directory when no root is given.
///
/// The root is created if missing and canonicalized first. The returned
/// directory is owned by the caller, who is responsible for removing it.
pub fn create_staging_dir(temp_root: Option<&Path>) -> Result<PathBuf, StageError> {
    let root = temp_root.map_or_else(std::env::temp_dir, Path::to_path_buf);

    fs::create_dir_all(&root).map_err(|e| StageError::CreateRoot {
        path: root.clone(),
        source: e,
    })?;
    let root = fs::canonicalize(&root).map_err(|e| StageError::CreateRoot {
        path: root.clone(),
        source: e,
    })?;

    let dir = tempfile::Builder::new()
        .prefix(STAGING_PREFIX)
        .tempdir_in(&root)
        .map_err(|e| StageError::CreateRoot {
            path: root.clone(),
            source: e,
        })?;

    Ok(dir.keep())
}

/// Snapshot every bind mount source into `staging_dir`.
///
/// Each mount is mirrored at the path derived from its destination (see
/// [`paths::staging_path`]). All destinations are validated before the
/// first copy. Stale entries at a staging path are removed first, so the
/// copy is always a full transfer onto a clean surface. Returns one
/// [`CopySpec`] per mount, in mount order.
pub fn stage_mounts(mounts: &[BindMount], staging_dir: &Path) -> Result<Vec<CopySpec>, StageError> {
    let targets = mounts
        .iter()
        .map(|m| paths::staging_path(staging_dir, &m.destination))
        .collect::<devc_core::Result<Vec<_>>>()
        .map_err(|e| StageError::InvalidDestination { source: e })?;

    let mut copies = Vec::with_capacity(mounts.len());
    for (mount, host_path) in mounts.iter().zip(targets) {
        if !mount.source.exists() {
            return Err(StageError::SourceMissing {
                path: mount.source.clone(),
            });
        }

        if let Some(parent) = host_path.parent() {
            fs::create_dir_all(parent).map_err(|e| StageError::Create {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        remove_stale(&host_path)?;
        copy_tree(&mount.source, &host_path)?;

        println!(
            "Copied bind mount {} → {}",
            mount.source.display(),
            host_path.display()
        );
        copies.push(CopySpec {
            destination: mount.destination.clone(),
            host_path,
        });
    }

    Ok(copies)
}

fn remove_stale(path: &Path) -> Result<(), StageError> {
    let meta = match fs::symlink_metadata(path) {
        Ok(meta) => meta,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => {
            return Err(StageError::Metadata {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };

    let removed = if meta.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };
    removed.map_err(|e| StageError::Cleanup {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Copy `src` to `dst`, recursing into directories.
///
/// `src` itself is followed if it is a symlink; links found inside the tree
/// are recreated verbatim. Permissions and timestamps are carried over.
/// Sockets, FIFOs and device nodes inside the tree are skipped.
pub fn copy_tree(src: &Path, dst: &Path) -> Result<(), StageError> {
    let meta = fs::metadata(src).map_err(|e| StageError::Metadata {
        path: src.to_path_buf(),
        source: e,
    })?;

    if meta.is_dir() {
        copy_dir(src, dst, &meta)
    } else if meta.is_file() {
        copy_file(src, dst, &meta)
    } else {
        Err(StageError::Unsupported {
            path: src.to_path_buf(),
        })
    }
}

fn copy_dir(src: &Path, dst: &Path, meta: &fs::Metadata) -> Result<(), StageError> {
    fs::create_dir(dst).map_err(|e| StageError::Create {
        path: dst.to_path_buf(),
        source: e,
    })?;

    let entries = fs::read_dir(src).map_err(|e| StageError::Metadata {
        path: src.to_path_buf(),
        source: e,
    })?;
    for entry in entries {
        let entry = entry.map_err(|e| StageError::Metadata {
            path: src.to_path_buf(),
            source: e,
        })?;
        let from = entry.path();
        let to = dst.join(entry.file_name());
        let entry_meta = fs::symlink_metadata(&from).map_err(|e| StageError::Metadata {
            path: from.clone(),
            source: e,
        })?;
        let kind = entry_meta.file_type();

        if kind.is_symlink() {
            copy_symlink(&from, &to)?;
        } else if kind.is_dir() {
            copy_dir(&from, &to, &entry_meta)?;
        } else if kind.is_file() {
            copy_file(&from, &to, &entry_meta)?;
        } else {
            tracing::warn!(path = %from.display(), "skipping special file");
        }
    }

    // Children are in place; restrictive modes would have blocked them.
    fs::set_permissions(dst, meta.permissions()).map_err(|e| StageError::CopyFile {
        path: src.to_path_buf(),
        source: e,
    })?;
    preserve_times(dst, meta).map_err(|e| StageError::CopyFile {
        path: src.to_path_buf(),
        source: e,
    })
}

fn copy_file(src: &Path, dst: &Path, meta: &fs::Metadata) -> Result<(), StageError> {
    fs::copy(src, dst).map_err(|e| StageError::CopyFile {
        path: src.to_path_buf(),
        source: e,
    })?;
    preserve_times(dst, meta).map_err(|e| StageError::CopyFile {
        path: src.to_path_buf(),
        source: e,
    })
}

fn copy_symlink(src: &Path, dst: &Path) -> Result<(), StageError> {
    let target = fs::read_link(src).map_err(|e| StageError::Symlink {
        path: src.to_path_buf(),
        source: e,
    })?;

    create_symlink(&target, src, dst).map_err(|e| StageError::Symlink {
        path: src.to_path_buf(),
        source: e,
    })
}

#[cfg(unix)]
fn create_symlink(target: &Path, _src: &Path, dst: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(target, dst)
}

#[cfg(windows)]
fn create_symlink(target: &Path, src: &Path, dst: &Path) -> std::io::Result<()> {
    if fs::metadata(src).is_ok_and(|m| m.is_dir()) {
        std::os::windows::fs::symlink_dir(target, dst)
    } else {
        std::os::windows::fs::symlink_file(target, dst)
    }
}

fn preserve_times(path: &Path, meta: &fs::Metadata) -> std::io::Result<()> {
    // Directories can only be opened for this on unix.
    if meta.is_dir() && cfg!(not(unix)) {
        return Ok(());
    }

    let times = fs::FileTimes::new()
        .set_accessed(meta.accessed()?)
        .set_modified(meta.modified()?);
    fs::File::open(path)?.set_times(times)
}

#[derive(Debug, thiserror::Error)]
pub enum StageError {
    #[error("bind mount source does not exist on host: {path}")]
    SourceMissing { path: PathBuf },
    #[error(transparent)]
    InvalidDestination { source: devc_core::Error },
    #[error("failed to create staging directory under {path}")]
    CreateRoot { path: PathBuf, source: std::io::Error },
    #[error("failed to create directory {path}")]
    Create { path: PathBuf, source: std::io::Error },
    #[error("failed to remove stale staging entry {path}")]
    Cleanup { path: PathBuf, source: std::io::Error },
    #[error("failed to copy {path}")]
    CopyFile { path: PathBuf, source: std::io::Error },
    #[error("failed to copy symlink {path}")]
    Symlink { path: PathBuf, source: std::io::Error },
    #[error("failed to read {path}")]
    Metadata { path: PathBuf, source: std::io::Error },
    #[error("unsupported bind mount source (not a file or directory): {path}")]
    Unsupported { path: PathBuf },
}
