use devc_core::{
    ChangeDirective, ContainerInspect, Error, RunIdentity, commit_changes, extract_bind_mounts,
};
use std::path::PathBuf;

/// Trimmed-down `docker inspect` output of a VS Code dev container.
const DEVCONTAINER: &str = r#"[
  {
    "Id": "abc123",
    "Name": "/vsc-proj-5f3c",
    "Mounts": [
      {"Type": "bind", "Source": "/host/proj", "Destination": "/workspace", "Mode": "", "RW": true, "Propagation": "rprivate"},
      {"Type": "volume", "Name": "vscode", "Source": "/var/lib/docker/volumes/vscode/_data", "Destination": "/vscode", "Driver": "local"},
      {"Type": "bind", "Source": "/run/host-services/ssh-auth.sock", "Destination": "/tmp/ssh-agent.sock"}
    ],
    "Config": {
      "Hostname": "abc123",
      "Entrypoint": ["/bin/bash"],
      "Cmd": null,
      "WorkingDir": "/workspace",
      "User": "",
      "Env": ["PATH=/usr/bin"]
    }
  }
]"#;

#[test]
fn inspect_to_mounts_and_directives() {
    let info = ContainerInspect::parse("abc123", DEVCONTAINER).unwrap();

    let mounts = extract_bind_mounts("abc123", &info.mounts).unwrap();
    assert_eq!(mounts.len(), 2);
    assert_eq!(mounts[0].source, PathBuf::from("/host/proj"));
    assert_eq!(mounts[0].destination, "/workspace");
    assert_eq!(mounts[1].destination, "/tmp/ssh-agent.sock");

    let changes = commit_changes(&info.config);
    assert_eq!(
        changes,
        vec![
            ChangeDirective::Entrypoint(vec!["/bin/bash".to_owned()]),
            ChangeDirective::Cmd(vec![]),
            ChangeDirective::WorkDir("/workspace".to_owned()),
        ]
    );
}

#[test]
fn identity_from_inspected_name() {
    let info = ContainerInspect::parse("abc123", DEVCONTAINER).unwrap();
    let identity = RunIdentity::new(info.display_name("abc123"), chrono::Utc::now());

    assert_eq!(identity.slug, "vsc-proj-5f3c");
    assert!(
        identity
            .disposable_container_name()
            .starts_with("devc-to-docker-vsc-proj-5f3c-")
    );
}

#[test]
fn volume_only_container_has_nothing_to_fold() {
    let raw = r#"[{"Name": "/db", "Mounts": [{"Type": "volume", "Source": "/v", "Destination": "/var/lib/db"}], "Config": {}}]"#;
    let info = ContainerInspect::parse("db", raw).unwrap();

    let err = extract_bind_mounts("db", &info.mounts).unwrap_err();
    assert!(matches!(err, Error::NoBindMounts(_)));
    assert!(err.to_string().contains("no bind mounts"));
}

#[test]
fn garbage_output_reports_container() {
    let err = ContainerInspect::parse("abc123", "not json").unwrap_err();
    assert!(matches!(err, Error::InspectDecode { ref container, .. } if container == "abc123"));
}
