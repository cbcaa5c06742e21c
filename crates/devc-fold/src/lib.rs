//! Capture-and-fold pipeline for devc_to_docker.
//!
//! # Pipeline
//!
//! ```text
//! devc_to_docker <container>
//!   1. Inspect      ── <engine> inspect <container>
//!   2. Identify     ── slug + UTC timestamp → default tags
//!   3. Mounts       ── bind mounts only; none → abort
//!   4. Stage image  ── <engine> commit <container> <final>-stage
//!   5. Snapshot     ── copy mount sources → <temp-root>/devc_to_docker_*/
//!   6. Disposable   ── <engine> run -d --entrypoint /bin/sh <stage> -lc <idle loop>
//!   7. Restore      ── rm -rf / mkdir -p / cp per mount
//!   8. Metadata     ── ENTRYPOINT, CMD, WORKDIR, USER of the source container
//!   9. Final image  ── <engine> commit --change ... <disposable> <final>
//!  10. Teardown     ── stop + rm disposable, remove snapshot (always)
//!  11. Cleanup      ── rmi <final>-stage (success only)
//! ```
//!
//! Steps 1-3 perform no mutation. From step 5 on, a teardown guard
//! owns the disposable container and the snapshot directory and releases
//! them on every exit path. A failed run keeps the intermediate image.

pub mod assembler;
pub mod error;
pub mod policy;
pub mod restore;
pub mod stage;
mod teardown;

pub use assembler::{ImageAssembler, PipelineResult};
pub use error::FoldError;
pub use policy::{FailurePolicy, Operation};
pub use stage::StageError;
