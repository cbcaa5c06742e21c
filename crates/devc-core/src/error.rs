pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("container {0:?} not found")]
    ContainerNotFound(String),

    #[error("unexpected inspect output for container {container:?}")]
    InspectDecode {
        container: String,
        source: serde_json::Error,
    },

    #[error("container {0} has no bind mounts, nothing to copy")]
    NoBindMounts(String),

    #[error("cannot mirror bind mount destination {0:?} into the staging directory")]
    InvalidDestination(String),
}
