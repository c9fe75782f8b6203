//! Honeypot segment generator library
//!
//! Builds QA test clips from source videos by driving ffmpeg: a random
//! segment of every input is re-encoded with one injected defect (visual ad
//! overlay, audio ad mix, silence window, or audio/video desync).

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod ffmpeg;
pub mod filter;
pub mod ports;
pub mod segments;
pub mod utils;

// Re-export commonly used types
pub use app::{AppContainer, HoneypotInteractor, RunReport};
pub use config::RunSettings;
pub use domain::model::{
    CodecType, DefectAsset, DefectAssets, DefectKind, DefectToggles, ProbeResult, SegmentConfig,
    SegmentPlan, StreamInfo,
};
pub use error::{HoneypotError, HoneypotResult};
