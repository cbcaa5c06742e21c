use std::path::PathBuf;

use devc_engine::{EngineError, InspectError};

use crate::policy::Operation;
use crate::stage::StageError;

#[derive(Debug, thiserror::Error)]
pub enum FoldError {
    #[error("container engine is not available")]
    EngineUnavailable { source: EngineError },

    #[error("container {0:?} not found")]
    NotFound(String),

    #[error(transparent)]
    InspectDecode { source: devc_core::Error },

    #[error("container {0} has no bind mounts, nothing to copy")]
    NoBindMounts(String),

    #[error("bind mount source does not exist on host: {0}")]
    SourceMissing(PathBuf),

    #[error("cannot mirror bind mount destination {0:?} into the staging directory")]
    InvalidDestination(String),

    #[error("unable to create parent directory {parent} inside {container}")]
    RestoreFailed {
        container: String,
        parent: String,
        source: EngineError,
    },

    #[error("{operation} failed")]
    EngineOperationFailed {
        operation: Operation,
        source: EngineError,
    },

    #[error("staging bind mount content failed")]
    Staging { source: StageError },
}

impl From<devc_core::Error> for FoldError {
    fn from(e: devc_core::Error) -> Self {
        match e {
            devc_core::Error::ContainerNotFound(c) => Self::NotFound(c),
            devc_core::Error::NoBindMounts(c) => Self::NoBindMounts(c),
            devc_core::Error::InvalidDestination(d) => Self::InvalidDestination(d),
            other @ devc_core::Error::InspectDecode { .. } => Self::InspectDecode { source: other },
        }
    }
}

impl From<InspectError> for FoldError {
    fn from(e: InspectError) -> Self {
        match e {
            InspectError::NotFound(c) => Self::NotFound(c),
            InspectError::Engine { source } => Self::EngineOperationFailed {
                operation: Operation::Inspect,
                source,
            },
            InspectError::Decode { source } => source.into(),
        }
    }
}

impl From<StageError> for FoldError {
    fn from(e: StageError) -> Self {
        match e {
            StageError::SourceMissing { path } => Self::SourceMissing(path),
            StageError::InvalidDestination { source } => source.into(),
            other => Self::Staging { source: other },
        }
    }
}
