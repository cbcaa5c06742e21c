use std::path::{Path, PathBuf};

use devc_engine::{EngineClient, EngineExecutor};

use crate::policy::Operation;

/// Scoped owner of a run's transient resources.
///
/// Releasing stops and removes the disposable container (once one has been
/// tracked) and removes the staging directory unless it is retained. Release
/// happens exactly once: explicitly via [`Teardown::finish`], or on drop for
/// early returns and propagated failures. Every step is best-effort.
pub(crate) struct Teardown<'a, E: EngineExecutor> {
    client: &'a EngineClient<E>,
    container: Option<String>,
    staging_dir: PathBuf,
    keep_staging: bool,
    released: bool,
}

impl<'a, E: EngineExecutor> Teardown<'a, E> {
    pub(crate) fn new(client: &'a EngineClient<E>, staging_dir: PathBuf, keep_staging: bool) -> Self {
        Self {
            client,
            container: None,
            staging_dir,
            keep_staging,
            released: false,
        }
    }

    /// Register the disposable container. Called before it is started so a
    /// half-created container is cleaned up too.
    pub(crate) fn track_container(&mut self, name: &str) {
        self.container = Some(name.to_owned());
    }

    pub(crate) fn staging_dir(&self) -> &Path {
        &self.staging_dir
    }

    /// Release now. Returns whether the staging directory was removed.
    pub(crate) fn finish(mut self) -> bool {
        self.release()
    }

    fn release(&mut self) -> bool {
        if self.released {
            return false;
        }
        self.released = true;

        if let Some(container) = self.container.take() {
            Operation::StopDisposable.tolerate(&container, self.client.stop(&container));
            Operation::RemoveDisposable.tolerate(&container, self.client.remove(&container));
        }

        if self.keep_staging {
            println!(
                "Temporary snapshot retained at {}",
                self.staging_dir.display()
            );
            return false;
        }

        let target = self.staging_dir.display().to_string();
        let removed = Operation::RemoveStagingDir
            .tolerate(&target, std::fs::remove_dir_all(&self.staging_dir));
        if removed {
            println!("Temporary snapshot directory {target} removed");
        }
        removed
    }
}

impl<E: EngineExecutor> Drop for Teardown<'_, E> {
    fn drop(&mut self) {
        if !self.released {
            tracing::debug!(staging_dir = %self.staging_dir.display(), "tearing down after failure");
            self.release();
        }
    }
}
