use std::sync::Arc;

use crate::adapters::{FFmpegAdapter, FFprobeAdapter, SystemProcessRunner};
use crate::app::honeypot_interactor::HoneypotInteractor;
use crate::config::RunSettings;
use crate::ports::{ExecutePort, ProbePort};

/// Wires the production adapters into the interactor
pub struct AppContainer {
    probe_port: Arc<dyn ProbePort>,
    execute_port: Arc<dyn ExecutePort>,
}

impl AppContainer {
    pub fn new(settings: &RunSettings) -> Self {
        let probe_port: Arc<dyn ProbePort> = Arc::new(FFprobeAdapter::new(settings.ffprobe.clone()));
        let execute_port: Arc<dyn ExecutePort> = Arc::new(
            FFmpegAdapter::new(
                settings.ffmpeg.clone(),
                Arc::new(SystemProcessRunner::forwarding()),
            )
            .with_dry_run(settings.dry_run),
        );

        Self {
            probe_port,
            execute_port,
        }
    }

    pub fn honeypot_interactor(&self, settings: RunSettings) -> HoneypotInteractor {
        HoneypotInteractor::new(
            Arc::clone(&self.probe_port),
            Arc::clone(&self.execute_port),
            settings,
        )
    }
}
