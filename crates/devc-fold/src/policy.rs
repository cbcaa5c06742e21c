//! Failure policy of every side-effecting step of a fold run.
//!
//! Fatal operations abort the run (teardown still executes). Best-effort
//! operations log a warning and the run continues.

use std::fmt;

use devc_engine::EngineError;

use crate::error::FoldError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    Fatal,
    BestEffortWarn,
}

/// A side-effecting step of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Preflight,
    Inspect,
    CommitIntermediate,
    StartDisposable,
    ClearDestination,
    PrepareParent,
    CopyIn,
    CommitFinal,
    StopDisposable,
    RemoveDisposable,
    RemoveStagingDir,
    RemoveIntermediate,
}

impl Operation {
    pub const ALL: [Operation; 12] = [
        Self::Preflight,
        Self::Inspect,
        Self::CommitIntermediate,
        Self::StartDisposable,
        Self::ClearDestination,
        Self::PrepareParent,
        Self::CopyIn,
        Self::CommitFinal,
        Self::StopDisposable,
        Self::RemoveDisposable,
        Self::RemoveStagingDir,
        Self::RemoveIntermediate,
    ];

    pub fn policy(self) -> FailurePolicy {
        match self {
            Self::ClearDestination
            | Self::StopDisposable
            | Self::RemoveDisposable
            | Self::RemoveStagingDir
            | Self::RemoveIntermediate => FailurePolicy::BestEffortWarn,
            Self::Preflight
            | Self::Inspect
            | Self::CommitIntermediate
            | Self::StartDisposable
            | Self::PrepareParent
            | Self::CopyIn
            | Self::CommitFinal => FailurePolicy::Fatal,
        }
    }

    /// Lift an engine failure of a fatal operation into [`FoldError`].
    pub(crate) fn check<T>(self, result: Result<T, EngineError>) -> Result<T, FoldError> {
        debug_assert_eq!(self.policy(), FailurePolicy::Fatal, "{} is best-effort", self);
        result.map_err(|source| FoldError::EngineOperationFailed {
            operation: self,
            source,
        })
    }

    /// Log the failure of a best-effort operation and carry on.
    /// Returns whether the operation succeeded.
    pub(crate) fn tolerate<T, Er: fmt::Display>(self, target: &str, result: Result<T, Er>) -> bool {
        debug_assert_eq!(self.policy(), FailurePolicy::BestEffortWarn, "{} is fatal", self);
        match result {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(operation = %self, target, error = %e, "could not {}, continuing", self);
                false
            }
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Preflight => "check engine availability",
            Self::Inspect => "inspect source container",
            Self::CommitIntermediate => "commit intermediate image",
            Self::StartDisposable => "start disposable container",
            Self::ClearDestination => "remove existing destination content",
            Self::PrepareParent => "create destination parent directory",
            Self::CopyIn => "copy staged content into container",
            Self::CommitFinal => "commit final image",
            Self::StopDisposable => "stop disposable container",
            Self::RemoveDisposable => "remove disposable container",
            Self::RemoveStagingDir => "remove staging directory",
            Self::RemoveIntermediate => "remove intermediate image",
        };
        f.write_str(label)
    }
}
