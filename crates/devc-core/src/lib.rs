//! Core types and policies for devc_to_docker.
//!
//! This crate defines the typed view of `docker inspect` output
//! ([`ContainerInspect`]), bind mount extraction ([`extract_bind_mounts`]),
//! commit metadata translation ([`commit_changes`]), the naming policy for
//! every artifact a run produces ([`RunIdentity`]), and the run options
//! ([`FoldOptions`]). Nothing here talks to the container engine.

pub mod config;
pub mod error;
pub mod inspect;
pub mod metadata;
pub mod mounts;
pub mod naming;
pub mod paths;

pub use config::{DEFAULT_ENGINE, FoldOptions};
pub use error::{Error, Result};
pub use inspect::{ContainerConfig, ContainerInspect, MountPoint};
pub use metadata::{ChangeDirective, commit_changes};
pub use mounts::{BindMount, CopySpec, extract_bind_mounts};
pub use naming::{RunIdentity, sanitize_slug};
