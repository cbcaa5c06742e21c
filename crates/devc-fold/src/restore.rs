use devc_core::CopySpec;
use devc_core::paths::container_parent;
use devc_engine::{EngineClient, EngineExecutor};

use crate::error::FoldError;
use crate::policy::Operation;

/// Push one staged mount back into `container` at its mount destination.
///
/// Existing content at the destination is removed first (best-effort, the
/// path may not exist yet), so repeating a restore yields the same result.
/// The parent directory must be creatable. The staged entry is copied into
/// the parent and keeps its leaf name, which mirrors the destination's.
pub fn restore_mount<E: EngineExecutor>(
    client: &EngineClient<E>,
    container: &str,
    spec: &CopySpec,
) -> Result<(), FoldError> {
    let parent = container_parent(&spec.destination);

    Operation::ClearDestination.tolerate(
        &spec.destination,
        client.exec(container, &["rm", "-rf", &spec.destination]),
    );

    client
        .exec(container, &["mkdir", "-p", &parent])
        .map_err(|source| FoldError::RestoreFailed {
            container: container.to_owned(),
            parent: parent.clone(),
            source,
        })?;

    Operation::CopyIn.check(client.copy_in(&spec.host_path, container, &parent))?;

    println!(
        "Restored {} → {container}:{}",
        spec.host_path.display(),
        spec.destination
    );
    Ok(())
}
