//! Translation of the source container's runtime configuration into
//! `commit --change` directives for the final image.

use std::fmt;

use crate::inspect::ContainerConfig;

/// A Dockerfile-style instruction applied at commit time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeDirective {
    /// Exec-form entrypoint; an empty list clears any inherited entrypoint.
    Entrypoint(Vec<String>),
    /// Exec-form command; an empty list clears any inherited command.
    Cmd(Vec<String>),
    WorkDir(String),
    User(String),
}

impl fmt::Display for ChangeDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Entrypoint(argv) => write!(f, "ENTRYPOINT {}", exec_form(argv)),
            Self::Cmd(argv) => write!(f, "CMD {}", exec_form(argv)),
            Self::WorkDir(dir) => write!(f, "WORKDIR {dir}"),
            Self::User(user) => write!(f, "USER {user}"),
        }
    }
}

/// JSON array form, e.g. `["/bin/bash","-l"]`.
fn exec_form(argv: &[String]) -> String {
    let quoted: Vec<String> = argv.iter().map(|a| json_string(a)).collect();
    format!("[{}]", quoted.join(","))
}

fn json_string(s: &str) -> String {
    serde_json::Value::String(s.to_owned()).to_string()
}

/// Build the change directives for the final commit.
///
/// Entrypoint and command are always emitted, empty when the source
/// container had none, so the disposable container's idle-loop override
/// never reaches the final image. Working directory and user follow only
/// when set. Order is fixed: entrypoint, cmd, workdir, user.
///
/// ```
/// use devc_core::{ContainerConfig, commit_changes};
///
/// let config = ContainerConfig {
///     working_dir: Some("/app".to_owned()),
///     ..ContainerConfig::default()
/// };
/// let rendered: Vec<String> = commit_changes(&config).iter().map(ToString::to_string).collect();
/// assert_eq!(rendered, ["ENTRYPOINT []", "CMD []", "WORKDIR /app"]);
/// ```
pub fn commit_changes(config: &ContainerConfig) -> Vec<ChangeDirective> {
    let mut changes = vec![
        ChangeDirective::Entrypoint(config.entrypoint.clone().unwrap_or_default()),
        ChangeDirective::Cmd(config.cmd.clone().unwrap_or_default()),
    ];

    if let Some(dir) = config.working_dir.as_deref().filter(|d| !d.is_empty()) {
        changes.push(ChangeDirective::WorkDir(dir.to_owned()));
    }
    if let Some(user) = config.user.as_deref().filter(|u| !u.is_empty()) {
        changes.push(ChangeDirective::User(user.to_owned()));
    }

    changes
}
