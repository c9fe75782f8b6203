//! FFprobe adapter for media file probing
//!
//! Runs `ffprobe` with JSON output and decodes the format and stream blocks.

use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;

use crate::adapters::exec_process::SystemProcessRunner;
use crate::domain::model::{CodecType, ProbeResult, StreamInfo};
use crate::error::{HoneypotError, HoneypotResult};
use crate::ports::{ProbePort, ProcessRunner};

/// Default ffprobe program looked up on `PATH`
pub const DEFAULT_FFPROBE: &str = "ffprobe";

#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    #[serde(default)]
    streams: Vec<FfprobeStream>,
    format: FfprobeFormat,
}

#[derive(Debug, Deserialize)]
struct FfprobeFormat {
    #[serde(default)]
    filename: String,
    duration: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    index: usize,
    #[serde(default)]
    codec_type: String,
    #[serde(default)]
    disposition: FfprobeDisposition,
    #[serde(default)]
    tags: FfprobeTags,
}

#[derive(Debug, Default, Deserialize)]
struct FfprobeDisposition {
    #[serde(rename = "default", default)]
    is_default: u8,
}

#[derive(Debug, Default, Deserialize)]
struct FfprobeTags {
    #[serde(default)]
    language: String,
    #[serde(default)]
    handler_name: String,
}

/// Decode `ffprobe -print_format json -show_format -show_streams` output
pub fn parse_probe_output(path: &Path, json: &[u8]) -> HoneypotResult<ProbeResult> {
    let output: FfprobeOutput =
        serde_json::from_slice(json).map_err(|source| HoneypotError::ProbeDecode {
            path: path.display().to_string(),
            source,
        })?;

    let raw_duration = output.format.duration.unwrap_or_default();
    let duration = raw_duration
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|d| d.is_finite())
        .ok_or_else(|| HoneypotError::InvalidDuration {
            path: path.display().to_string(),
            value: raw_duration.clone(),
        })?;

    let streams = output
        .streams
        .into_iter()
        .map(|s| StreamInfo {
            index: s.index,
            codec_type: CodecType::parse(&s.codec_type),
            language: s.tags.language,
            handler_name: s.tags.handler_name,
            is_default: s.disposition.is_default == 1,
        })
        .collect();

    Ok(ProbeResult {
        path: path.to_path_buf(),
        filename: output.format.filename,
        duration,
        streams,
    })
}

/// FFprobe-based probe adapter
pub struct FFprobeAdapter {
    program: String,
    runner: Arc<dyn ProcessRunner>,
}

impl FFprobeAdapter {
    /// Create a new adapter that buffers ffprobe output
    pub fn new(program: impl Into<String>) -> Self {
        Self::with_runner(program, Arc::new(SystemProcessRunner::capturing()))
    }

    /// Create a new adapter on top of a given runner; the runner must capture stdout
    pub fn with_runner(program: impl Into<String>, runner: Arc<dyn ProcessRunner>) -> Self {
        Self {
            program: program.into(),
            runner,
        }
    }

    fn probe_args(path: &Path) -> Vec<String> {
        [
            "-v",
            "quiet",
            "-print_format",
            "json",
            "-show_format",
            "-show_streams",
        ]
        .iter()
        .map(|a| a.to_string())
        .chain(std::iter::once(path.to_string_lossy().to_string()))
        .collect()
    }
}

impl ProbePort for FFprobeAdapter {
    fn probe(&self, path: &Path) -> HoneypotResult<ProbeResult> {
        debug!(path = %path.display(), program = %self.program, "Probing media file");

        let outcome = self
            .runner
            .run(&self.program, &Self::probe_args(path))
            .map_err(|e| HoneypotError::ProbeFailed {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        if !outcome.success {
            let stderr = String::from_utf8_lossy(&outcome.stderr);
            let message = match stderr.trim() {
                "" => format!("{} exited with {}", self.program, outcome.status_text()),
                details => details.to_string(),
            };
            return Err(HoneypotError::ProbeFailed {
                path: path.display().to_string(),
                message,
            });
        }

        let probe = parse_probe_output(path, &outcome.stdout)?;
        debug!(
            duration = probe.duration,
            streams = probe.streams.len(),
            "Probe completed"
        );
        Ok(probe)
    }
}
