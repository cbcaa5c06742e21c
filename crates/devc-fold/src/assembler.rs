use std::path::PathBuf;

use chrono::{DateTime, Utc};
use devc_core::{CopySpec, FoldOptions, RunIdentity, commit_changes, extract_bind_mounts};
use devc_engine::{EngineClient, EngineExecutor, RealExecutor};

use crate::error::FoldError;
use crate::policy::Operation;
use crate::restore::restore_mount;
use crate::stage;
use crate::teardown::Teardown;

/// Entrypoint of the disposable container.
pub const KEEPALIVE_ENTRYPOINT: &str = "/bin/sh";

/// Idle loop keeping the disposable container alive for `exec` and `cp`.
pub const KEEPALIVE_SCRIPT: &str = "while true; do sleep 3600; done";

/// Summary of a successful fold run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineResult {
    pub source_container_id: String,
    pub final_image_tag: String,
    /// Image id printed by the final commit.
    pub final_image_id: String,
    pub intermediate_image_tag: String,
    pub intermediate_removed: bool,
    pub temp_dir: PathBuf,
    pub temp_dir_removed: bool,
    pub copies: Vec<CopySpec>,
}

/// Drives the capture-and-fold pipeline against one container engine.
pub struct ImageAssembler<E: EngineExecutor = RealExecutor> {
    client: EngineClient<E>,
}

impl ImageAssembler<RealExecutor> {
    /// Assembler driving the given engine CLI.
    pub fn new(engine: &str) -> Self {
        Self {
            client: EngineClient::new(engine),
        }
    }
}

impl<E: EngineExecutor> ImageAssembler<E> {
    pub fn with_client(client: EngineClient<E>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &EngineClient<E> {
        &self.client
    }

    /// Fold `container_id` and its bind mounts into a single image.
    pub fn fold(&self, container_id: &str, options: &FoldOptions) -> Result<PipelineResult, FoldError> {
        self.fold_at(container_id, options, Utc::now())
    }

    /// [`fold`](Self::fold) with an explicit run timestamp.
    ///
    /// Nothing is mutated before the intermediate commit. From the staging
    /// directory onward every exit path tears down the disposable container
    /// and the staging directory. The intermediate image is removed only
    /// after a fully successful run without `keep_intermediate`.
    pub fn fold_at(
        &self,
        container_id: &str,
        options: &FoldOptions,
        now: DateTime<Utc>,
    ) -> Result<PipelineResult, FoldError> {
        // 1. Preflight and inspect
        let version = self
            .client
            .version()
            .map_err(|source| FoldError::EngineUnavailable { source })?;
        tracing::info!(engine = %options.engine, %version, "engine available");

        let info = self.client.inspect(container_id)?;

        // 2. Identifiers
        let identity = RunIdentity::new(info.display_name(container_id), now);
        let (final_tag, intermediate_tag) = options.resolve_tags(&identity);

        // 3. Bind mounts
        let mounts = extract_bind_mounts(container_id, &info.mounts)?;

        println!("Using intermediate image tag: {intermediate_tag}");
        println!("Final image will be stored as: {final_tag}");

        // 4. Intermediate commit of the live container
        let stage_id = Operation::CommitIntermediate.check(self.client.commit(
            container_id,
            &intermediate_tag,
            &[],
        ))?;
        println!("Committed running container to intermediate image {stage_id}");

        // 5. Snapshot
        let staging_dir = stage::create_staging_dir(options.temp_root.as_deref())?;
        let mut teardown = Teardown::new(&self.client, staging_dir, options.keep_temp);
        println!(
            "Temporary snapshot directory: {}",
            teardown.staging_dir().display()
        );
        let copies = stage::stage_mounts(&mounts, teardown.staging_dir())?;

        // 6. Disposable container
        let disposable = identity.disposable_container_name();
        teardown.track_container(&disposable);
        Operation::StartDisposable.check(self.client.run_detached(
            &intermediate_tag,
            &disposable,
            KEEPALIVE_ENTRYPOINT,
            &["-lc".to_owned(), KEEPALIVE_SCRIPT.to_owned()],
        ))?;

        // 7. Restore
        for spec in &copies {
            restore_mount(&self.client, &disposable, spec)?;
        }

        // 8-9. Final commit with the source container's metadata
        let changes = commit_changes(&info.config);
        let final_image_id =
            Operation::CommitFinal.check(self.client.commit(&disposable, &final_tag, &changes))?;
        println!("Final image committed as {final_tag} ({final_image_id})");

        // 10. Teardown
        let temp_dir = teardown.staging_dir().to_path_buf();
        let temp_dir_removed = teardown.finish();

        // 11. Intermediate image
        let intermediate_removed = !options.keep_intermediate
            && Operation::RemoveIntermediate
                .tolerate(&intermediate_tag, self.client.remove_image(&intermediate_tag));

        Ok(PipelineResult {
            source_container_id: container_id.to_owned(),
            final_image_tag: final_tag,
            final_image_id,
            intermediate_image_tag: intermediate_tag,
            intermediate_removed,
            temp_dir,
            temp_dir_removed,
            copies,
        })
    }
}
