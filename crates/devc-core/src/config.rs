use std::path::PathBuf;

/// Engine CLI used when none is configured.
pub const DEFAULT_ENGINE: &str = "docker";

/// Options for one fold run.
///
/// Unset tags are derived from the source container's name and the run's
/// timestamp (see [`crate::naming`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoldOptions {
    /// Tag of the final image.
    pub output_image: Option<String>,
    /// Tag of the intermediate commit (defaults to `<output>-stage`).
    pub intermediate_image: Option<String>,
    /// Directory under which the staging directory is created
    /// (defaults to the platform temp directory).
    pub temp_root: Option<PathBuf>,
    /// Leave the staging directory on disk.
    pub keep_temp: bool,
    /// Leave the intermediate image in the engine's image store.
    pub keep_intermediate: bool,
    /// Docker-compatible engine CLI to drive.
    pub engine: String,
}

impl Default for FoldOptions {
    fn default() -> Self {
        Self {
            output_image: None,
            intermediate_image: None,
            temp_root: None,
            keep_temp: false,
            keep_intermediate: false,
            engine: DEFAULT_ENGINE.to_owned(),
        }
    }
}

impl FoldOptions {
    /// Resolve the final and intermediate tags, filling defaults from
    /// `identity`.
    pub fn resolve_tags(&self, identity: &crate::RunIdentity) -> (String, String) {
        let final_tag = self
            .output_image
            .clone()
            .unwrap_or_else(|| identity.default_final_tag());
        let intermediate_tag = self
            .intermediate_image
            .clone()
            .unwrap_or_else(|| crate::RunIdentity::intermediate_tag_for(&final_tag));
        (final_tag, intermediate_tag)
    }
}
