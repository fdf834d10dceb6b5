//! Subprocess execution utilities.

use std::io;
use std::path::{Path, PathBuf};
use std::process::Output;
use std::thread;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Failure of a single subprocess invocation.
#[derive(Debug, Error)]
pub enum SubprocessError {
    #[error("failed to start {}: {source}", .program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} exited {}: {stderr}", .program.display(), display_code(.code))]
    Failed {
        program: PathBuf,
        /// Exit code (None if killed by signal)
        code: Option<i32>,
        stderr: String,
    },

    #[error("{} timed out after {after:?}", .program.display())]
    TimedOut { program: PathBuf, after: Duration },

    #[error("failed to wait for subprocess: {0}")]
    Wait(#[source] io::Error),
}

fn display_code(code: &Option<i32>) -> String {
    code.map_or_else(|| "by signal".to_string(), |c| c.to_string())
}

/// Runs an executable with arguments and returns its standard output.
///
/// Implementations must capture stdout and stderr, must not forward stdin,
/// and must treat any non-zero exit as a failure.
pub trait CommandRunner {
    fn run(&self, program: &Path, args: &[String]) -> Result<String, SubprocessError>;
}

impl<T: CommandRunner + ?Sized> CommandRunner for &T {
    fn run(&self, program: &Path, args: &[String]) -> Result<String, SubprocessError> {
        (**self).run(program, args)
    }
}

/// [`CommandRunner`] backed by `duct`.
#[derive(Debug, Clone, Default)]
pub struct DuctRunner {
    /// Kill the child after this long; `None` waits for the natural exit.
    timeout: Option<Duration>,
}

impl DuctRunner {
    /// Create a runner that waits for the child without a deadline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a runner that kills the child after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
        }
    }

    fn expression(program: &Path, args: &[String]) -> duct::Expression {
        // A `Path` program gets a `./` prefix from duct; `OsStr` keeps PATH lookup.
        duct::cmd(program.as_os_str(), args)
            .stdin_null()
            .stdout_capture()
            .stderr_capture()
            .unchecked()
    }

    fn finish(program: &Path, output: Output) -> Result<String, SubprocessError> {
        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).to_string())
        } else {
            Err(SubprocessError::Failed {
                program: program.to_path_buf(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }

    fn run_with_deadline(
        program: &Path,
        args: &[String],
        timeout: Duration,
    ) -> Result<String, SubprocessError> {
        let handle = Self::expression(program, args)
            .start()
            .map_err(|source| SubprocessError::Spawn {
                program: program.to_path_buf(),
                source,
            })?;

        let start = Instant::now();
        loop {
            match handle.try_wait() {
                Ok(Some(output)) => return Self::finish(program, output.clone()),
                Ok(None) => {
                    if start.elapsed() > timeout {
                        if let Err(e) = handle.kill() {
                            eprintln!("Warning: Failed to kill {}: {}", program.display(), e);
                        }
                        return Err(SubprocessError::TimedOut {
                            program: program.to_path_buf(),
                            after: timeout,
                        });
                    }
                    thread::sleep(Duration::from_millis(10));
                }
                Err(e) => return Err(SubprocessError::Wait(e)),
            }
        }
    }
}

impl CommandRunner for DuctRunner {
    fn run(&self, program: &Path, args: &[String]) -> Result<String, SubprocessError> {
        if let Some(timeout) = self.timeout {
            return Self::run_with_deadline(program, args, timeout);
        }

        let output = Self::expression(program, args)
            .run()
            .map_err(|source| SubprocessError::Spawn {
                program: program.to_path_buf(),
                source,
            })?;
        Self::finish(program, output)
    }
}
