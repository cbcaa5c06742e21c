use std::path::PathBuf;

use crate::inspect::MountPoint;

/// A host bind mount of the source container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindMount {
    /// Host path backing the mount.
    pub source: PathBuf,
    /// Mount point as seen from inside the container.
    pub destination: String,
}

/// A staged copy of one bind mount, ready to be pushed back into a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopySpec {
    pub destination: String,
    /// Location inside the run's staging directory holding the copied content.
    pub host_path: PathBuf,
}

/// Select the bind mounts from an inspected mount list.
///
/// Engine order is preserved. Non-bind mounts (volumes, tmpfs) and bind
/// mounts with an empty source are skipped. An empty result is an error:
/// folding a container without bind mounts would produce a misleading
/// copy of the intermediate image.
pub fn extract_bind_mounts(container: &str, mounts: &[MountPoint]) -> crate::Result<Vec<BindMount>> {
    let binds: Vec<BindMount> = mounts
        .iter()
        .filter(|m| m.kind == "bind" && !m.source.is_empty())
        .map(|m| BindMount {
            source: PathBuf::from(&m.source),
            destination: m.destination.clone(),
        })
        .collect();

    tracing::debug!(
        container,
        total = mounts.len(),
        bind = binds.len(),
        "extracted bind mounts"
    );

    if binds.is_empty() {
        return Err(crate::Error::NoBindMounts(container.to_owned()));
    }
    Ok(binds)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mount(kind: &str, source: &str, destination: &str) -> MountPoint {
        MountPoint {
            kind: kind.to_owned(),
            source: source.to_owned(),
            destination: destination.to_owned(),
        }
    }

    #[test]
    fn keeps_only_bind_mounts_in_order() {
        let mounts = [
            mount("bind", "/host/b", "/b"),
            mount("volume", "/var/lib/docker/volumes/v/_data", "/v"),
            mount("tmpfs", "", "/run"),
            mount("bind", "/host/a", "/a"),
        ];
        let binds = extract_bind_mounts("c1", &mounts).unwrap();
        assert_eq!(
            binds,
            vec![
                BindMount {
                    source: PathBuf::from("/host/b"),
                    destination: "/b".to_owned()
                },
                BindMount {
                    source: PathBuf::from("/host/a"),
                    destination: "/a".to_owned()
                },
            ]
        );
    }

    #[test]
    fn skips_empty_sources() {
        let mounts = [mount("bind", "", "/x"), mount("bind", "/host/y", "/y")];
        let binds = extract_bind_mounts("c1", &mounts).unwrap();
        assert_eq!(binds.len(), 1);
        assert_eq!(binds[0].destination, "/y");
    }

    #[test]
    fn no_bind_mounts_is_an_error() {
        let mounts = [mount("volume", "/data", "/data")];
        let err = extract_bind_mounts("c1", &mounts).unwrap_err();
        assert!(matches!(err, crate::Error::NoBindMounts(ref c) if c == "c1"));

        let err = extract_bind_mounts("c1", &[]).unwrap_err();
        assert!(matches!(err, crate::Error::NoBindMounts(_)));
    }
}
