//! Typed records for the subset of `docker inspect` output the pipeline reads.
//!
//! The engine returns a JSON array; the first element describes the
//! container and an empty array means the container does not exist.

use serde::Deserialize;

/// Container metadata as reported by `inspect`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContainerInspect {
    /// Engine-assigned name, usually with a leading `/`.
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub mounts: Vec<MountPoint>,
    pub config: ContainerConfig,
}

/// One entry of the `Mounts` array.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MountPoint {
    /// `bind`, `volume`, `tmpfs`, ...
    #[serde(rename = "Type", default)]
    pub kind: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub destination: String,
}

/// The `Config` object; every field may be absent or `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContainerConfig {
    #[serde(default)]
    pub entrypoint: Option<Vec<String>>,
    #[serde(default)]
    pub cmd: Option<Vec<String>>,
    #[serde(default)]
    pub working_dir: Option<String>,
    #[serde(default)]
    pub user: Option<String>,
}

impl ContainerInspect {
    /// Parse the raw stdout of `inspect <container>`.
    pub fn parse(container: &str, raw: &str) -> crate::Result<Self> {
        let entries: Vec<ContainerInspect> =
            serde_json::from_str(raw).map_err(|e| crate::Error::InspectDecode {
                container: container.to_owned(),
                source: e,
            })?;

        entries
            .into_iter()
            .next()
            .ok_or_else(|| crate::Error::ContainerNotFound(container.to_owned()))
    }

    /// Human-assigned name without the engine's leading `/`, falling back to
    /// the id the operator passed in.
    pub fn display_name<'a>(&'a self, container: &'a str) -> &'a str {
        let name = self.name.trim_start_matches('/');
        if name.is_empty() { container } else { name }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<MountPoint>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<MountPoint>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[
      {
        "Id": "abc123def",
        "Name": "/vsc-proj-1234",
        "Mounts": [
          {"Type": "bind", "Source": "/host/proj", "Destination": "/workspace", "RW": true},
          {"Type": "volume", "Name": "vscode", "Source": "/var/lib/docker/volumes/vscode/_data", "Destination": "/vscode"}
        ],
        "Config": {
          "Entrypoint": ["/bin/bash"],
          "Cmd": null,
          "WorkingDir": "/workspace",
          "User": ""
        }
      }
    ]"#;

    #[test]
    fn parses_first_element() {
        let info = ContainerInspect::parse("abc123", SAMPLE).unwrap();
        assert_eq!(info.name, "/vsc-proj-1234");
        assert_eq!(info.mounts.len(), 2);
        assert_eq!(info.mounts[0].kind, "bind");
        assert_eq!(info.mounts[1].destination, "/vscode");
        assert_eq!(info.config.entrypoint, Some(vec!["/bin/bash".to_owned()]));
        assert_eq!(info.config.cmd, None);
        assert_eq!(info.config.working_dir.as_deref(), Some("/workspace"));
    }

    #[test]
    fn empty_array_is_not_found() {
        let err = ContainerInspect::parse("ghost", "[]").unwrap_err();
        assert!(matches!(err, crate::Error::ContainerNotFound(ref c) if c == "ghost"));
    }

    #[test]
    fn missing_config_is_decode_error() {
        let err = ContainerInspect::parse("abc", r#"[{"Name": "/x"}]"#).unwrap_err();
        assert!(matches!(err, crate::Error::InspectDecode { .. }));
    }

    #[test]
    fn null_mounts_become_empty() {
        let raw = r#"[{"Name": "/x", "Mounts": null, "Config": {}}]"#;
        let info = ContainerInspect::parse("abc", raw).unwrap();
        assert!(info.mounts.is_empty());
        assert_eq!(info.config, ContainerConfig::default());
    }

    #[test]
    fn display_name_strips_slash_and_falls_back() {
        let info = ContainerInspect::parse("abc123", SAMPLE).unwrap();
        assert_eq!(info.display_name("abc123"), "vsc-proj-1234");

        let raw = r#"[{"Name": "/", "Config": {}}]"#;
        let unnamed = ContainerInspect::parse("abc123", raw).unwrap();
        assert_eq!(unnamed.display_name("abc123"), "abc123");
    }
}
