// Ports - Interface definitions (contracts)

use std::path::Path;

use crate::domain::model::{ProbeResult, SegmentPlan};
use crate::error::HoneypotResult;

/// Port for media file probing
pub trait ProbePort {
    /// Read format duration and stream list of `path`
    fn probe(&self, path: &Path) -> HoneypotResult<ProbeResult>;
}

/// Result of one finished external process
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessOutcome {
    /// Exit code, `None` when the process was killed by a signal
    pub code: Option<i32>,
    pub success: bool,
    /// Captured output, empty when streams were forwarded
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl ProcessOutcome {
    /// Human readable exit status for error messages
    pub fn status_text(&self) -> String {
        match self.code {
            Some(code) => format!("exit code {}", code),
            None => "termination by signal".to_string(),
        }
    }
}

/// Port for running external programs to completion
pub trait ProcessRunner {
    /// Run `program` with `args`, blocking until it exits.
    ///
    /// A non-zero exit is reported through [`ProcessOutcome::success`], not as
    /// an error; errors mean the process could not be run at all.
    fn run(&self, program: &str, args: &[String]) -> HoneypotResult<ProcessOutcome>;
}

/// Port for rendering a built segment
pub trait ExecutePort {
    /// Render `plan`, failing when the media tool does not exit cleanly
    fn execute(&self, plan: &SegmentPlan) -> HoneypotResult<()>;
}
