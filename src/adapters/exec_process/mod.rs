//! Blocking subprocess runner
//!
//! Children are owned by a guard that kills and reaps them if the runner
//! returns before the process has been waited on.

use std::io::{self, Read};
use std::process::{Child, Command, ExitStatus, Output, Stdio};
use std::thread;

use tracing::{debug, warn};

use crate::error::{HoneypotError, HoneypotResult};
use crate::ports::{ProcessOutcome, ProcessRunner};

/// What happens to the child's stdout and stderr
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Inherit this process's streams
    Forward,
    /// Buffer both streams into the outcome
    Capture,
}

/// Owns a spawned child until it has been reaped
struct ChildGuard {
    child: Option<Child>,
}

impl ChildGuard {
    fn new(child: Child) -> Self {
        Self { child: Some(child) }
    }

    fn wait(mut self) -> io::Result<ExitStatus> {
        let status = match self.child.as_mut() {
            Some(child) => child.wait()?,
            None => return Err(io::Error::new(io::ErrorKind::Other, "child already reaped")),
        };
        self.child = None;
        Ok(status)
    }

    /// Drain both pipes, then reap. The child stays guarded until `wait` succeeds.
    fn wait_with_output(mut self) -> io::Result<Output> {
        let child = match self.child.as_mut() {
            Some(child) => child,
            None => return Err(io::Error::new(io::ErrorKind::Other, "child already reaped")),
        };
        let mut stdout_pipe = child.stdout.take().ok_or_else(|| not_piped("stdout"))?;
        let stderr_pipe = child.stderr.take().ok_or_else(|| not_piped("stderr"))?;

        // stderr drains on its own thread so a full pipe cannot stall the child.
        let stderr_reader = thread::spawn(move || read_all(stderr_pipe));
        let mut stdout = Vec::new();
        stdout_pipe.read_to_end(&mut stdout)?;
        let stderr = stderr_reader
            .join()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "stderr reader panicked"))??;

        let status = child.wait()?;
        self.child = None;
        Ok(Output {
            status,
            stdout,
            stderr,
        })
    }
}

fn not_piped(stream: &str) -> io::Error {
    io::Error::new(io::ErrorKind::Other, format!("child {} is not piped", stream))
}

fn read_all(mut pipe: impl Read) -> io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    pipe.read_to_end(&mut buf)?;
    Ok(buf)
}

impl Drop for ChildGuard {
    fn drop(&mut self) {
        if let Some(child) = self.child.as_mut() {
            warn!(pid = child.id(), "Killing unfinished child process");
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

/// Runs programs through `std::process`
#[derive(Debug, Clone)]
pub struct SystemProcessRunner {
    mode: OutputMode,
}

impl SystemProcessRunner {
    pub fn new(mode: OutputMode) -> Self {
        Self { mode }
    }

    /// Runner whose children write straight to the terminal
    pub fn forwarding() -> Self {
        Self::new(OutputMode::Forward)
    }

    /// Runner that buffers child output
    pub fn capturing() -> Self {
        Self::new(OutputMode::Capture)
    }
}

impl Default for SystemProcessRunner {
    fn default() -> Self {
        Self::forwarding()
    }
}

impl ProcessRunner for SystemProcessRunner {
    fn run(&self, program: &str, args: &[String]) -> HoneypotResult<ProcessOutcome> {
        let mut command = Command::new(program);
        command.args(args).stdin(Stdio::null());
        match self.mode {
            OutputMode::Forward => command.stdout(Stdio::inherit()).stderr(Stdio::inherit()),
            OutputMode::Capture => command.stdout(Stdio::piped()).stderr(Stdio::piped()),
        };

        debug!(program, mode = ?self.mode, "Spawning process");
        let child = command.spawn().map_err(|source| HoneypotError::ProcessSpawn {
            program: program.to_string(),
            source,
        })?;
        let guard = ChildGuard::new(child);

        let outcome = match self.mode {
            OutputMode::Forward => {
                let status = guard.wait()?;
                ProcessOutcome {
                    code: status.code(),
                    success: status.success(),
                    stdout: Vec::new(),
                    stderr: Vec::new(),
                }
            }
            OutputMode::Capture => {
                let output = guard.wait_with_output()?;
                ProcessOutcome {
                    code: output.status.code(),
                    success: output.status.success(),
                    stdout: output.stdout,
                    stderr: output.stderr,
                }
            }
        };

        debug!(program, code = ?outcome.code, "Process finished");
        Ok(outcome)
    }
}
