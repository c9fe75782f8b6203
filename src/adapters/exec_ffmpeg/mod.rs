//! FFmpeg execution adapter
//!
//! Runs a built [`SegmentPlan`] through the ffmpeg binary.

use std::sync::Arc;

use tracing::info;

use crate::domain::model::SegmentPlan;
use crate::error::{HoneypotError, HoneypotResult};
use crate::ffmpeg::CommandLine;
use crate::ports::{ExecutePort, ProcessRunner};

/// Default ffmpeg program looked up on `PATH`
pub const DEFAULT_FFMPEG: &str = "ffmpeg";

/// FFmpeg-based execution adapter
pub struct FFmpegAdapter {
    program: String,
    runner: Arc<dyn ProcessRunner>,
    dry_run: bool,
}

impl FFmpegAdapter {
    /// Create new FFmpeg adapter
    pub fn new(program: impl Into<String>, runner: Arc<dyn ProcessRunner>) -> Self {
        Self {
            program: program.into(),
            runner,
            dry_run: false,
        }
    }

    /// Log commands instead of running them
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

impl ExecutePort for FFmpegAdapter {
    fn execute(&self, plan: &SegmentPlan) -> HoneypotResult<()> {
        let line = CommandLine {
            program: &self.program,
            args: &plan.args,
        };

        if self.dry_run {
            info!(kind = %plan.kind, command = %line, "Dry run, skipping ffmpeg");
            return Ok(());
        }

        info!(kind = %plan.kind, command = %line, "Running ffmpeg");
        let outcome = self.runner.run(&self.program, &plan.args)?;
        if !outcome.success {
            return Err(HoneypotError::ProcessFailed {
                program: self.program.clone(),
                status: outcome.status_text(),
            });
        }

        info!(output = %plan.output_path.display(), "Segment written");
        Ok(())
    }
}
