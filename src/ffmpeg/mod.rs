//! ffmpeg argument-vector builder and the fixed encoding profile

use std::fmt;
use std::path::Path;

use crate::filter::{timestamp, FilterChain, FilterGraph};

/// Encoding settings shared by every honeypot segment
#[derive(Debug, Clone, PartialEq)]
pub struct EncodingProfile {
    pub video_codec: String,
    pub pixel_format: String,
    pub preset: String,
    /// Constant Rate Factor (0-51)
    pub crf: u8,
    pub audio_codec: String,
    pub audio_bitrate: String,
    pub audio_sample_rate: u32,
}

impl Default for EncodingProfile {
    fn default() -> Self {
        Self {
            video_codec: "libx264".to_string(),
            pixel_format: "yuv420p".to_string(),
            preset: "medium".to_string(),
            crf: 18,
            audio_codec: "aac".to_string(),
            audio_bitrate: "256k".to_string(),
            audio_sample_rate: 48000,
        }
    }
}

/// Metadata carried over to one output audio track
#[derive(Debug, Clone, PartialEq)]
pub struct AudioTrackMetadata {
    pub language: String,
    pub is_default: bool,
    /// Written only when set
    pub handler_name: Option<String>,
}

/// Accumulates an ffmpeg argument list in invocation order
#[derive(Debug, Clone)]
pub struct FfmpegCommand<'a> {
    profile: &'a EncodingProfile,
    args: Vec<String>,
}

impl<'a> FfmpegCommand<'a> {
    pub fn new(profile: &'a EncodingProfile) -> Self {
        Self {
            profile,
            args: Vec::new(),
        }
    }

    /// Append a raw argument
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Seek the next input to `seconds`
    pub fn seek(self, seconds: f64) -> Self {
        self.arg("-ss").arg(timestamp(seconds))
    }

    /// Shift timestamps of the next input by `seconds`
    pub fn input_offset(self, seconds: f64) -> Self {
        self.arg("-itsoffset").arg(timestamp(seconds))
    }

    pub fn input(self, path: &Path) -> Self {
        self.arg("-i").arg(path.to_string_lossy())
    }

    pub fn filter_complex(self, graph: &FilterGraph) -> Self {
        self.arg("-filter_complex").arg(graph.to_string())
    }

    /// Simple audio filter applied to every mapped audio stream
    pub fn audio_filter(self, chain: &FilterChain) -> Self {
        self.arg("-af").arg(chain.to_string())
    }

    /// Map an input stream specifier or a filter output label
    pub fn map(self, spec: impl Into<String>) -> Self {
        self.arg("-map").arg(spec)
    }

    /// Video encoder settings from the profile
    pub fn video_profile(self) -> Self {
        let profile = self.profile;
        self.arg("-vcodec")
            .arg(profile.video_codec.clone())
            .arg("-pix_fmt")
            .arg(profile.pixel_format.clone())
            .arg("-preset")
            .arg(profile.preset.clone())
            .arg("-crf")
            .arg(profile.crf.to_string())
    }

    /// Audio encoder codec from the profile
    pub fn audio_codec(self) -> Self {
        let profile = self.profile;
        self.arg("-acodec").arg(profile.audio_codec.clone())
    }

    /// Audio bitrate and sample rate from the profile
    pub fn audio_rate(self) -> Self {
        let profile = self.profile;
        self.arg("-ab")
            .arg(profile.audio_bitrate.clone())
            .arg("-ar")
            .arg(profile.audio_sample_rate.to_string())
    }

    /// Per-track metadata and disposition for output audio stream `track`
    pub fn audio_track_metadata(self, track: usize, metadata: &AudioTrackMetadata) -> Self {
        let disposition = if metadata.is_default { "default" } else { "none" };
        let cmd = self
            .arg(format!("-metadata:s:a:{}", track))
            .arg(format!("language={}", metadata.language))
            .arg(format!("-disposition:a:{}", track))
            .arg(disposition);

        match &metadata.handler_name {
            Some(handler) => cmd
                .arg(format!("-metadata:s:a:{}", track))
                .arg(format!("handler_name={}", handler)),
            None => cmd,
        }
    }

    /// Limit output to `seconds`
    pub fn duration(self, seconds: f64) -> Self {
        self.arg("-t").arg(timestamp(seconds))
    }

    /// Append the quiet/overwrite trailer and the output path
    pub fn output(self, path: &Path) -> Vec<String> {
        self.arg("-loglevel")
            .arg("error")
            .arg("-stats")
            .arg("-y")
            .arg("-hide_banner")
            .arg(path.to_string_lossy())
            .args
    }
}

/// Shell-like rendering of an invocation for logs
pub struct CommandLine<'a> {
    pub program: &'a str,
    pub args: &'a [String],
}

impl fmt::Display for CommandLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::Filter;

    #[test]
    fn test_video_profile_args() {
        let profile = EncodingProfile::default();
        let args = FfmpegCommand::new(&profile)
            .video_profile()
            .output(Path::new("out.mp4"));
        assert_eq!(
            args,
            vec![
                "-vcodec", "libx264", "-pix_fmt", "yuv420p", "-preset", "medium", "-crf", "18",
                "-loglevel", "error", "-stats", "-y", "-hide_banner", "out.mp4",
            ]
        );
    }

    #[test]
    fn test_seek_input_and_duration() {
        let profile = EncodingProfile::default();
        let args = FfmpegCommand::new(&profile)
            .seek(240.0)
            .input(Path::new("/in/clip.mov"))
            .input_offset(1.0)
            .input(Path::new("/in/clip.mov"))
            .duration(120.0)
            .output(Path::new("/in/clip_desync.mp4"));
        assert_eq!(&args[..8], &["-ss", "240", "-i", "/in/clip.mov", "-itsoffset", "1", "-i", "/in/clip.mov"]);
        assert_eq!(&args[8..10], &["-t", "120"]);
        assert_eq!(args.last().map(String::as_str), Some("/in/clip_desync.mp4"));
    }

    #[test]
    fn test_audio_track_metadata() {
        let profile = EncodingProfile::default();
        let plain = AudioTrackMetadata {
            language: "eng".to_string(),
            is_default: true,
            handler_name: None,
        };
        let custom = AudioTrackMetadata {
            language: "rus".to_string(),
            is_default: false,
            handler_name: Some("Commentary".to_string()),
        };
        let args = FfmpegCommand::new(&profile)
            .audio_track_metadata(0, &plain)
            .audio_track_metadata(1, &custom)
            .args;
        assert_eq!(
            args,
            vec![
                "-metadata:s:a:0", "language=eng", "-disposition:a:0", "default",
                "-metadata:s:a:1", "language=rus", "-disposition:a:1", "none",
                "-metadata:s:a:1", "handler_name=Commentary",
            ]
        );
    }

    #[test]
    fn test_audio_filter_rendering() {
        let profile = EncodingProfile::default();
        let chain = FilterChain::new().filter(Filter::new("volume").arg("0"));
        let args = FfmpegCommand::new(&profile).audio_filter(&chain).args;
        assert_eq!(args, vec!["-af", "volume=0"]);
    }

    #[test]
    fn test_command_line_display() {
        let args = vec!["-i".to_string(), "a.mp4".to_string()];
        let line = CommandLine {
            program: "ffmpeg",
            args: &args,
        };
        assert_eq!(line.to_string(), "ffmpeg -i a.mp4");
    }
}
