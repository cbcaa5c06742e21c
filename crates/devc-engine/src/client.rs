use crate::engine::EngineError;
use crate::executor::{EngineExecutor, RealExecutor};
use devc_core::{ChangeDirective, ContainerInspect};
use std::path::Path;

/// Container engine operations, parameterized over the executor for testability.
pub struct EngineClient<E: EngineExecutor = RealExecutor> {
    executor: E,
}

impl EngineClient<RealExecutor> {
    /// Client driving the given engine CLI, e.g. `docker` or `podman`.
    pub fn new(program: &str) -> Self {
        Self {
            executor: RealExecutor::new(program),
        }
    }
}

impl Default for EngineClient<RealExecutor> {
    fn default() -> Self {
        Self {
            executor: RealExecutor::default(),
        }
    }
}

impl<E: EngineExecutor> EngineClient<E> {
    pub fn with_executor(executor: E) -> Self {
        Self { executor }
    }

    // ── Preflight ──

    /// Report the engine CLI version; fails when the CLI cannot be run.
    pub fn version(&self) -> Result<String, EngineError> {
        let out = self.executor.exec(&args(["--version"]))?;
        Ok(out.trim().to_owned())
    }

    // ── Containers ──

    pub fn inspect(&self, container: &str) -> Result<ContainerInspect, InspectError> {
        let raw = match self.executor.exec(&args(["inspect", container])) {
            Ok(raw) => raw,
            Err(e) if e.is_no_such_object() => {
                return Err(InspectError::NotFound(container.to_owned()));
            }
            Err(e) => return Err(InspectError::Engine { source: e }),
        };

        ContainerInspect::parse(container, &raw).map_err(|e| match e {
            devc_core::Error::ContainerNotFound(c) => InspectError::NotFound(c),
            other => InspectError::Decode { source: other },
        })
    }

    /// Start a detached container from `image` with its entrypoint replaced.
    pub fn run_detached(
        &self,
        image: &str,
        name: &str,
        entrypoint: &str,
        command: &[String],
    ) -> Result<(), EngineError> {
        let mut cmd = args(["run", "-d", "--name", name, "--entrypoint", entrypoint, image]);
        cmd.extend(command.iter().cloned());

        self.executor.exec_streaming(&cmd)
    }

    /// Run `argv` inside a running container; a non-zero exit is an error.
    pub fn exec(&self, container: &str, argv: &[&str]) -> Result<(), EngineError> {
        let mut cmd = args(["exec", container]);
        cmd.extend(argv.iter().map(|a| (*a).to_owned()));

        self.executor.exec_streaming(&cmd)
    }

    /// Copy a host file or directory into `container` under `dest_dir`.
    ///
    /// The copied entry keeps the leaf name of `host_path`.
    pub fn copy_in(&self, host_path: &Path, container: &str, dest_dir: &str) -> Result<(), EngineError> {
        let host = host_path
            .to_str()
            .ok_or_else(|| EngineError::NonUtf8Path(host_path.to_path_buf()))?;
        let target = format!("{container}:{dest_dir}");

        self.executor.exec_streaming(&args(["cp", host, &target]))
    }

    pub fn stop(&self, container: &str) -> Result<(), EngineError> {
        self.executor.exec_streaming(&args(["stop", container]))
    }

    pub fn remove(&self, container: &str) -> Result<(), EngineError> {
        self.executor.exec_streaming(&args(["rm", container]))
    }

    // ── Images ──

    /// Commit `container` to `tag`, applying `changes` atomically.
    /// Returns the new image id.
    pub fn commit(
        &self,
        container: &str,
        tag: &str,
        changes: &[ChangeDirective],
    ) -> Result<String, EngineError> {
        let mut cmd = args(["commit"]);
        for change in changes {
            cmd.push("--change".to_owned());
            cmd.push(change.to_string());
        }
        cmd.push(container.to_owned());
        cmd.push(tag.to_owned());

        let out = self.executor.exec(&cmd)?;
        Ok(out.trim().to_owned())
    }

    pub fn remove_image(&self, tag: &str) -> Result<(), EngineError> {
        self.executor.exec_streaming(&args(["rmi", tag]))
    }
}

// ── Helper ──

fn args<const N: usize>(a: [&str; N]) -> Vec<String> {
    a.iter().map(|s| (*s).to_owned()).collect()
}

// ── Error types ──

#[derive(Debug, thiserror::Error)]
pub enum InspectError {
    #[error("container {0:?} not found")]
    NotFound(String),

    #[error("container inspection failed")]
    Engine { source: EngineError },

    #[error(transparent)]
    Decode { source: devc_core::Error },
}
