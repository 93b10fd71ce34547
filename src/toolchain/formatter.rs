//! External schema formatter invocation.

use super::errors::FormatError;
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Formats a written schema file in place
pub trait SchemaFormatter {
    fn format(&self, schema_path: &Path) -> Result<(), FormatError>;
}

/// Runs a command line with the schema path appended as the last argument,
/// e.g. `npx prisma format --schema <path>`
#[derive(Debug, Clone)]
pub struct CommandFormatter {
    command: String,
    timeout: Option<Duration>,
}

impl CommandFormatter {
    pub fn new(command: impl Into<String>, timeout: Option<Duration>) -> Self {
        CommandFormatter {
            command: command.into(),
            timeout,
        }
    }

    fn spawn_error(&self, error: impl ToString) -> FormatError {
        FormatError::Spawn {
            command: self.command.clone(),
            error: error.to_string(),
        }
    }
}

impl SchemaFormatter for CommandFormatter {
    fn format(&self, schema_path: &Path) -> Result<(), FormatError> {
        let mut parts = self.command.split_whitespace();
        let program = parts.next().ok_or_else(|| self.spawn_error("empty command"))?;

        log::debug!("Running formatter: {} {}", self.command, schema_path.display());
        let mut child = Command::new(program)
            .args(parts)
            .arg(schema_path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| self.spawn_error(e))?;

        let status = match self.timeout {
            None => child.wait().map_err(|e| self.spawn_error(e))?,
            Some(timeout) => {
                let started = Instant::now();
                loop {
                    if let Some(status) = child.try_wait().map_err(|e| self.spawn_error(e))? {
                        break status;
                    }
                    if started.elapsed() >= timeout {
                        // best effort, the process may have exited meanwhile
                        let _ = child.kill();
                        let _ = child.wait();
                        return Err(FormatError::TimedOut {
                            command: self.command.clone(),
                            timeout_secs: timeout.as_secs(),
                        });
                    }
                    thread::sleep(POLL_INTERVAL);
                }
            }
        };

        if status.success() {
            Ok(())
        } else {
            Err(FormatError::Failed {
                command: self.command.clone(),
                status: status.to_string(),
            })
        }
    }
}
