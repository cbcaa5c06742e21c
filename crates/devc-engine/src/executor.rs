use std::process::{Command, Stdio};

use devc_core::DEFAULT_ENGINE;

use crate::engine::EngineError;

/// Abstraction over engine CLI execution for testability.
///
/// Production code uses [`RealExecutor`], tests use mockall-generated mocks.
/// Every call blocks until the engine process exits.
pub trait EngineExecutor {
    /// Execute an engine command and capture stdout.
    fn exec(&self, args: &[String]) -> Result<String, EngineError>;

    /// Execute an engine command, streaming output to the terminal.
    fn exec_streaming(&self, args: &[String]) -> Result<(), EngineError>;
}

/// Runs the engine CLI (`docker`, `podman`, ...) as a child process.
///
/// Each command is echoed to stdout as `$ <program> <args>` before it runs.
#[derive(Debug, Clone)]
pub struct RealExecutor {
    program: String,
}

impl RealExecutor {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn command(&self, args: &[String]) -> Command {
        println!("$ {}", render_command(&self.program, args));
        tracing::debug!(program = %self.program, ?args, "spawning engine command");

        let mut cmd = Command::new(&self.program);
        cmd.args(args);
        cmd
    }

    fn spawn_error(&self, e: std::io::Error) -> EngineError {
        if e.kind() == std::io::ErrorKind::NotFound {
            EngineError::NotFound {
                program: self.program.clone(),
                source: e,
            }
        } else {
            EngineError::Spawn {
                program: self.program.clone(),
                source: e,
            }
        }
    }

    fn full_args(&self, args: &[String]) -> Vec<String> {
        std::iter::once(self.program.clone())
            .chain(args.iter().cloned())
            .collect()
    }
}

impl Default for RealExecutor {
    fn default() -> Self {
        Self::new(DEFAULT_ENGINE)
    }
}

impl EngineExecutor for RealExecutor {
    fn exec(&self, args: &[String]) -> Result<String, EngineError> {
        let output = self
            .command(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| self.spawn_error(e))?;

        if output.status.success() {
            String::from_utf8(output.stdout).map_err(|e| EngineError::InvalidUtf8 { source: e })
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            Err(EngineError::CommandFailed {
                args: self.full_args(args),
                status: output.status.to_string(),
                stderr,
            })
        }
    }

    fn exec_streaming(&self, args: &[String]) -> Result<(), EngineError> {
        let status = self
            .command(args)
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| self.spawn_error(e))?;

        if status.success() {
            Ok(())
        } else {
            Err(EngineError::CommandFailed {
                args: self.full_args(args),
                status: status.to_string(),
                stderr: String::new(),
            })
        }
    }
}

/// Render a command line the way a POSIX shell would need it typed.
pub fn render_command(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .map(shell_quote)
        .collect::<Vec<_>>()
        .join(" ")
}

fn shell_quote(word: &str) -> String {
    let safe = !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "@%+=:,./_-".contains(c));
    if safe {
        word.to_owned()
    } else {
        format!("'{}'", word.replace('\'', r#"'"'"'"#))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn plain_words_are_not_quoted() {
        let rendered = render_command("docker", &owned(&["commit", "abc123", "devc_to_docker/x:1"]));
        assert_eq!(rendered, "docker commit abc123 devc_to_docker/x:1");
    }

    #[test]
    fn words_with_spaces_and_quotes_are_quoted() {
        let rendered = render_command(
            "docker",
            &owned(&["--change", r#"CMD ["a"]"#, "", "it's"]),
        );
        assert_eq!(
            rendered,
            r#"docker --change 'CMD ["a"]' '' 'it'"'"'s'"#
        );
    }

    #[test]
    fn missing_program_maps_to_not_found() {
        let executor = RealExecutor::new("devc-to-docker-no-such-engine");
        let err = executor.exec(&owned(&["--version"])).unwrap_err();
        assert!(matches!(err, EngineError::NotFound { ref program, .. } if program == "devc-to-docker-no-such-engine"));
    }
}
