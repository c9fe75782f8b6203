// Honeypot interactor - Orchestrates probe, build and render per input file

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, info_span};

use crate::config::RunSettings;
use crate::domain::model::{DefectKind, ProbeResult, SegmentPlan};
use crate::error::HoneypotResult;
use crate::ports::{ExecutePort, ProbePort};
use crate::segments::{builder_for, BuildContext};

/// Segments produced for one input
#[derive(Debug, Clone, PartialEq)]
pub struct FileReport {
    pub input: PathBuf,
    pub duration: f64,
    pub segments: Vec<SegmentPlan>,
}

/// Outcome of a whole run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunReport {
    pub files: Vec<FileReport>,
}

impl RunReport {
    /// All output paths in production order
    pub fn outputs(&self) -> Vec<&Path> {
        self.files
            .iter()
            .flat_map(|f| f.segments.iter().map(|s| s.output_path.as_path()))
            .collect()
    }
}

/// Interactor for the honeypot generation use case
pub struct HoneypotInteractor {
    probe_port: Arc<dyn ProbePort>,
    execute_port: Arc<dyn ExecutePort>,
    settings: RunSettings,
    rng: StdRng,
}

impl HoneypotInteractor {
    /// Create new interactor; the generator is seeded from settings or OS entropy
    pub fn new(
        probe_port: Arc<dyn ProbePort>,
        execute_port: Arc<dyn ExecutePort>,
        settings: RunSettings,
    ) -> Self {
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(probe_port, execute_port, settings, rng)
    }

    /// Create new interactor with an explicit generator
    pub fn with_rng(
        probe_port: Arc<dyn ProbePort>,
        execute_port: Arc<dyn ExecutePort>,
        settings: RunSettings,
        rng: StdRng,
    ) -> Self {
        Self {
            probe_port,
            execute_port,
            settings,
            rng,
        }
    }

    /// Process every file in order; the first error aborts the run
    pub fn run(&mut self, files: &[PathBuf]) -> HoneypotResult<RunReport> {
        let kinds = self.settings.segment.toggles.enabled();
        info!(
            files = files.len(),
            segment_duration = self.settings.segment.segment_duration,
            defects = ?kinds,
            dry_run = self.settings.dry_run,
            "Starting honeypot run"
        );

        let mut report = RunReport::default();
        for file in files {
            report.files.push(self.process_file(file, &kinds)?);
        }

        info!(outputs = report.outputs().len(), "Honeypot run completed");
        Ok(report)
    }

    /// Probe one file and render every enabled defect for it
    pub fn process_file(&mut self, path: &Path, kinds: &[DefectKind]) -> HoneypotResult<FileReport> {
        let span = info_span!("file", path = %path.display());
        let _enter = span.enter();

        let probe = self.probe_input(path)?;

        let mut segments = Vec::with_capacity(kinds.len());
        for kind in kinds {
            let plan = self.build_segment(&probe, *kind)?;
            self.execute_port.execute(&plan)?;
            segments.push(plan);
        }

        Ok(FileReport {
            input: path.to_path_buf(),
            duration: probe.duration,
            segments,
        })
    }

    /// Probe `path` and make sure it can hold one segment
    fn probe_input(&self, path: &Path) -> HoneypotResult<ProbeResult> {
        let probe = self.probe_port.probe(path)?;
        probe.ensure_covers(self.settings.segment.segment_duration)?;
        info!(
            duration = probe.duration,
            streams = probe.streams.len(),
            audio_streams = probe.audio_streams().count(),
            "Media file probed"
        );
        Ok(probe)
    }

    fn build_segment(&mut self, probe: &ProbeResult, kind: DefectKind) -> HoneypotResult<SegmentPlan> {
        let ctx = BuildContext {
            probe,
            config: &self.settings.segment,
            assets: &self.settings.assets,
            profile: &self.settings.profile,
        };
        builder_for(kind).build(&ctx, &mut self.rng)
    }
}
