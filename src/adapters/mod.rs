// Adapters - External system implementations

pub mod exec_ffmpeg;
pub mod exec_process;
pub mod probe_ffprobe;

// Re-export adapters
pub use exec_ffmpeg::FFmpegAdapter;
pub use exec_process::{OutputMode, SystemProcessRunner};
pub use probe_ffprobe::FFprobeAdapter;
