use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

use honeypot_cli::adapters::FFmpegAdapter;
use honeypot_cli::cli::{normalize_args, Cli};
use honeypot_cli::config::FileConfig;
use honeypot_cli::ports::{ExecutePort, ProbePort, ProcessOutcome, ProcessRunner};
use honeypot_cli::*;

/// Test doubles for the probe and execute ports
mod test_utils {
    use super::*;

    /// Serves canned probe results and records every probed path
    pub struct FakeProbe {
        results: HashMap<PathBuf, ProbeResult>,
        pub calls: Mutex<Vec<PathBuf>>,
    }

    impl FakeProbe {
        pub fn new(results: Vec<ProbeResult>) -> Self {
            Self {
                results: results.into_iter().map(|r| (r.path.clone(), r)).collect(),
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    impl ProbePort for FakeProbe {
        fn probe(&self, path: &Path) -> HoneypotResult<ProbeResult> {
            self.calls.lock().unwrap().push(path.to_path_buf());
            self.results
                .get(path)
                .cloned()
                .ok_or_else(|| HoneypotError::ProbeFailed {
                    path: path.display().to_string(),
                    message: "No such file or directory".to_string(),
                })
        }
    }

    /// Records executed plans; fails on the call with index `fail_at`
    pub struct RecordingExecutor {
        pub plans: Mutex<Vec<SegmentPlan>>,
        fail_at: Option<usize>,
    }

    impl RecordingExecutor {
        pub fn new() -> Self {
            Self {
                plans: Mutex::new(Vec::new()),
                fail_at: None,
            }
        }

        pub fn failing_at(index: usize) -> Self {
            Self {
                plans: Mutex::new(Vec::new()),
                fail_at: Some(index),
            }
        }

        pub fn outputs(&self) -> Vec<PathBuf> {
            self.plans
                .lock()
                .unwrap()
                .iter()
                .map(|p| p.output_path.clone())
                .collect()
        }
    }

    impl ExecutePort for RecordingExecutor {
        fn execute(&self, plan: &SegmentPlan) -> HoneypotResult<()> {
            let mut plans = self.plans.lock().unwrap();
            if self.fail_at == Some(plans.len()) {
                return Err(HoneypotError::ProcessFailed {
                    program: "ffmpeg".to_string(),
                    status: "exit code 1".to_string(),
                });
            }
            plans.push(plan.clone());
            Ok(())
        }
    }

    /// Records raw process invocations
    pub struct RecordingRunner {
        pub calls: Mutex<Vec<(String, Vec<String>)>>,
    }

    impl ProcessRunner for RecordingRunner {
        fn run(&self, program: &str, args: &[String]) -> HoneypotResult<ProcessOutcome> {
            self.calls
                .lock()
                .unwrap()
                .push((program.to_string(), args.to_vec()));
            Ok(ProcessOutcome {
                code: Some(0),
                success: true,
                ..Default::default()
            })
        }
    }

    pub fn source(path: &str, duration: f64) -> ProbeResult {
        ProbeResult {
            path: PathBuf::from(path),
            filename: path.to_string(),
            duration,
            streams: vec![
                StreamInfo {
                    index: 0,
                    codec_type: CodecType::Video,
                    language: "und".to_string(),
                    handler_name: "VideoHandler".to_string(),
                    is_default: true,
                },
                StreamInfo {
                    index: 1,
                    codec_type: CodecType::Audio,
                    language: "eng".to_string(),
                    handler_name: "SoundHandler".to_string(),
                    is_default: true,
                },
            ],
        }
    }

    pub fn settings(args: &[&str]) -> RunSettings {
        let cli = Cli::try_parse_from(normalize_args(args.iter().copied())).unwrap();
        RunSettings::merge(&cli, FileConfig::default()).unwrap()
    }
}

use test_utils::*;

fn interactor(
    probe: Arc<FakeProbe>,
    executor: Arc<RecordingExecutor>,
    settings: RunSettings,
    seed: u64,
) -> HoneypotInteractor {
    HoneypotInteractor::with_rng(probe, executor, settings, StdRng::seed_from_u64(seed))
}

#[test]
fn test_visual_ad_only_produces_single_output() {
    let probe = Arc::new(FakeProbe::new(vec![source("clip.mov", 300.0)]));
    let executor = Arc::new(RecordingExecutor::new());
    let settings = settings(&[
        "honeypot",
        "-skip_audio_ad",
        "-skip_silence",
        "-skip_desync",
    ]);

    let report = interactor(probe, executor.clone(), settings, 1)
        .run(&[PathBuf::from("clip.mov")])
        .unwrap();

    assert_eq!(executor.outputs(), vec![PathBuf::from("clip_visual_ad.mp4")]);
    assert_eq!(report.outputs(), vec![Path::new("clip_visual_ad.mp4")]);
}

#[test]
fn test_all_defects_in_order_for_every_file() {
    let probe = Arc::new(FakeProbe::new(vec![
        source("/in/a.mp4", 300.0),
        source("/in/b.mkv", 900.0),
    ]));
    let executor = Arc::new(RecordingExecutor::new());

    let report = interactor(probe.clone(), executor.clone(), settings(&["honeypot"]), 2)
        .run(&[PathBuf::from("/in/a.mp4"), PathBuf::from("/in/b.mkv")])
        .unwrap();

    assert_eq!(
        executor.outputs(),
        vec![
            PathBuf::from("/in/a_visual_ad.mp4"),
            PathBuf::from("/in/a_audio_ad.mp4"),
            PathBuf::from("/in/a_silence.mp4"),
            PathBuf::from("/in/a_desync.mp4"),
            PathBuf::from("/in/b_visual_ad.mp4"),
            PathBuf::from("/in/b_audio_ad.mp4"),
            PathBuf::from("/in/b_silence.mp4"),
            PathBuf::from("/in/b_desync.mp4"),
        ]
    );
    assert_eq!(probe.calls.lock().unwrap().len(), 2);
    assert_eq!(report.files.len(), 2);
    assert_eq!(report.files[1].duration, 900.0);
}

#[test]
fn test_short_file_aborts_before_any_render() {
    let probe = Arc::new(FakeProbe::new(vec![
        source("short.mp4", 60.0),
        source("long.mp4", 600.0),
    ]));
    let executor = Arc::new(RecordingExecutor::new());

    let err = interactor(probe.clone(), executor.clone(), settings(&["honeypot"]), 3)
        .run(&[PathBuf::from("short.mp4"), PathBuf::from("long.mp4")])
        .unwrap_err();

    assert!(matches!(err, HoneypotError::InputTooShort { .. }));
    assert!(executor.outputs().is_empty());
    assert_eq!(*probe.calls.lock().unwrap(), vec![PathBuf::from("short.mp4")]);
}

#[test]
fn test_probe_failure_aborts_run() {
    let probe = Arc::new(FakeProbe::new(vec![source("b.mp4", 600.0)]));
    let executor = Arc::new(RecordingExecutor::new());

    let err = interactor(probe, executor.clone(), settings(&["honeypot"]), 4)
        .run(&[PathBuf::from("missing.mp4"), PathBuf::from("b.mp4")])
        .unwrap_err();

    assert!(matches!(err, HoneypotError::ProbeFailed { .. }));
    assert!(executor.outputs().is_empty());
}

#[test]
fn test_render_failure_halts_remaining_work() {
    let probe = Arc::new(FakeProbe::new(vec![
        source("a.mp4", 600.0),
        source("b.mp4", 600.0),
    ]));
    let executor = Arc::new(RecordingExecutor::failing_at(1));

    let err = interactor(probe.clone(), executor.clone(), settings(&["honeypot"]), 5)
        .run(&[PathBuf::from("a.mp4"), PathBuf::from("b.mp4")])
        .unwrap_err();

    assert!(matches!(err, HoneypotError::ProcessFailed { .. }));
    assert_eq!(executor.outputs(), vec![PathBuf::from("a_visual_ad.mp4")]);
    assert_eq!(probe.calls.lock().unwrap().len(), 1);
}

#[test]
fn test_segment_starts_avoid_edges() {
    let probe = Arc::new(FakeProbe::new(vec![source("clip.mov", 600.0)]));
    let executor = Arc::new(RecordingExecutor::new());
    let mut interactor = interactor(probe, executor.clone(), settings(&["honeypot"]), 6);

    for _ in 0..10 {
        interactor.run(&[PathBuf::from("clip.mov")]).unwrap();
    }

    for plan in executor.plans.lock().unwrap().iter() {
        assert!(
            [120.0, 240.0, 360.0].contains(&plan.segment_start),
            "{:?} starts at {}",
            plan.kind,
            plan.segment_start
        );
        if let Some(offset) = plan.defect_offset {
            assert!(offset as f64 <= 120.0 - 10.0);
        }
    }
}

#[test]
fn test_same_seed_same_plans() {
    let files = [PathBuf::from("clip.mov")];
    let run = |seed| {
        let probe = Arc::new(FakeProbe::new(vec![source("clip.mov", 1800.0)]));
        let executor = Arc::new(RecordingExecutor::new());
        let mut settings = settings(&["honeypot", "-d", "60"]);
        settings.seed = Some(seed);
        HoneypotInteractor::new(probe, executor, settings)
            .run(&files)
            .unwrap()
    };

    assert_eq!(run(1234), run(1234));
}

#[test]
fn test_full_stack_invokes_configured_ffmpeg() {
    let probe = Arc::new(FakeProbe::new(vec![source("/in/clip.mov", 300.0)]));
    let runner = Arc::new(RecordingRunner {
        calls: Mutex::new(Vec::new()),
    });
    let executor = Arc::new(FFmpegAdapter::new("/opt/bin/ffmpeg", runner.clone()));
    let settings = settings(&["honeypot", "-skip_visual_ad", "-skip_audio_ad", "-skip_silence"]);

    HoneypotInteractor::with_rng(probe, executor, settings, StdRng::seed_from_u64(9))
        .run(&[PathBuf::from("/in/clip.mov")])
        .unwrap();

    let calls = runner.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    let (program, args) = &calls[0];
    assert_eq!(program, "/opt/bin/ffmpeg");
    assert_eq!(
        args.iter().filter(|a| a.as_str() == "-itsoffset").count(),
        1
    );
    assert_eq!(args.last().map(String::as_str), Some("/in/clip_desync.mp4"));
}

#[test]
fn test_dry_run_skips_processes() {
    let probe = Arc::new(FakeProbe::new(vec![source("clip.mov", 300.0)]));
    let runner = Arc::new(RecordingRunner {
        calls: Mutex::new(Vec::new()),
    });
    let executor = Arc::new(FFmpegAdapter::new("ffmpeg", runner.clone()).with_dry_run(true));

    let report = HoneypotInteractor::with_rng(
        probe,
        executor,
        settings(&["honeypot", "--dry-run"]),
        StdRng::seed_from_u64(10),
    )
    .run(&[PathBuf::from("clip.mov")])
    .unwrap();

    assert_eq!(report.outputs().len(), 4);
    assert!(runner.calls.lock().unwrap().is_empty());
}
