use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("{program} CLI not found on PATH, install it or adjust PATH before running this tool")]
    NotFound {
        program: String,
        source: std::io::Error,
    },

    #[error("failed to run {program}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("command {args:?} failed ({status}){}", stderr_suffix(.stderr))]
    CommandFailed {
        args: Vec<String>,
        status: String,
        stderr: String,
    },

    #[error("engine output was not valid UTF-8")]
    InvalidUtf8 { source: std::string::FromUtf8Error },

    #[error("path is not valid UTF-8: {0}")]
    NonUtf8Path(PathBuf),
}

impl EngineError {
    /// Whether the engine reported that the target object does not exist.
    pub fn is_no_such_object(&self) -> bool {
        match self {
            Self::CommandFailed { stderr, .. } => stderr.to_ascii_lowercase().contains("no such"),
            _ => false,
        }
    }
}

fn stderr_suffix(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {trimmed}")
    }
}
