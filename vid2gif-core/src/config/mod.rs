//! Configuration structures and constants for the vid2gif-core library.
//!
//! A [`ConversionConfig`] is built once from user input (usually by the CLI)
//! and is never mutated afterwards. Everything derived from it lives in
//! [`crate::reconcile::EncodingParams`].

mod builder;

use crate::decimal::Decimal;
use crate::error::{CoreError, CoreResult};
use crate::external::Tool;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

pub use builder::ConversionConfigBuilder;

// Default constants

/// Default output frame rate.
pub const DEFAULT_FPS: Decimal = Decimal::from_int(10);

/// Default playback speed multiplier.
pub const DEFAULT_SPEED: Decimal = Decimal::from_int(1);

/// Default palette size for the palette pipeline.
pub const DEFAULT_COLORS: u32 = 80;

/// Default lossy compression level for the palette pipeline.
pub const DEFAULT_LOSSY: u32 = 80;

/// Highest accepted high-quality encoder quality level.
pub const MAX_QUALITY: u8 = 100;

/// Largest palette gifsicle can produce.
pub const MAX_COLORS: u32 = 256;

/// Prefix for scratch directory names.
pub const SCRATCH_DIR_PREFIX: &str = "vid2gif";

/// Which encoding pipeline the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PipelineChoice {
    /// Use the high-quality encoder unless an option requires the palette pipeline.
    #[default]
    Auto,
    /// Never use the high-quality encoder.
    Never,
    /// Always use the high-quality encoder.
    Always,
}

impl FromStr for PipelineChoice {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(PipelineChoice::Auto),
            "never" => Ok(PipelineChoice::Never),
            "always" => Ok(PipelineChoice::Always),
            other => Err(CoreError::Usage(format!(
                "pipeline must be one of auto, never, always (got '{other}')"
            ))),
        }
    }
}

impl fmt::Display for PipelineChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PipelineChoice::Auto => "auto",
            PipelineChoice::Never => "never",
            PipelineChoice::Always => "always",
        })
    }
}

/// Where the video comes from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MediaSource {
    #[default]
    Stdin,
    Path(PathBuf),
}

impl MediaSource {
    /// The value handed to the decoder's input flag.
    #[must_use]
    pub fn to_arg(&self) -> OsString {
        match self {
            MediaSource::Stdin => OsString::from("-"),
            MediaSource::Path(path) => path.clone().into_os_string(),
        }
    }
}

/// Where the GIF goes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MediaSink {
    #[default]
    Stdout,
    Path(PathBuf),
}

impl MediaSink {
    /// The value handed to the encoder's output flag.
    #[must_use]
    pub fn to_arg(&self) -> OsString {
        match self {
            MediaSink::Stdout => OsString::from("-"),
            MediaSink::Path(path) => path.clone().into_os_string(),
        }
    }
}

/// Program names (or paths) used to invoke each external tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolPaths {
    pub ffmpeg: PathBuf,
    pub convert: PathBuf,
    pub gifsicle: PathBuf,
    pub gifski: PathBuf,
}

impl Default for ToolPaths {
    fn default() -> Self {
        Self {
            ffmpeg: PathBuf::from(Tool::Ffmpeg.default_program()),
            convert: PathBuf::from(Tool::Convert.default_program()),
            gifsicle: PathBuf::from(Tool::Gifsicle.default_program()),
            gifski: PathBuf::from(Tool::Gifski.default_program()),
        }
    }
}

impl ToolPaths {
    /// Returns the configured program for `tool`.
    #[must_use]
    pub fn get(&self, tool: Tool) -> &OsStr {
        match tool {
            Tool::Ffmpeg => self.ffmpeg.as_os_str(),
            Tool::Convert => self.convert.as_os_str(),
            Tool::Gifsicle => self.gifsicle.as_os_str(),
            Tool::Gifski => self.gifski.as_os_str(),
        }
    }
}

/// Options for a single conversion run.
///
/// Use [`ConversionConfigBuilder`] to create one; only the defaults of
/// unset options are filled in, no derived values are computed here.
#[derive(Debug, Clone)]
pub struct ConversionConfig {
    pub input: MediaSource,
    pub output: MediaSink,

    /// Requested output frame rate.
    pub fps: Decimal,

    /// Explicit frame delay in hundredths of a second.
    pub delay: Option<u32>,

    /// Playback speed multiplier.
    pub speed: Decimal,

    pub pipeline: PipelineChoice,

    /// Palette size (palette pipeline only).
    pub colors: u32,
    /// Whether `colors` was given explicitly.
    pub colors_set: bool,

    /// Lossy level (palette pipeline only).
    pub lossy: u32,
    /// Whether `lossy` was given explicitly.
    pub lossy_set: bool,

    /// Quality level for the high-quality encoder (1-100).
    pub quality: Option<u8>,

    /// Play the animation once instead of looping.
    pub once: bool,

    /// Play frames in reverse order.
    pub reverse: bool,

    /// Caption drawn at the bottom of every frame.
    pub text: Option<String>,

    /// Subtitle file burned in by the decoder.
    pub subtitles: Option<PathBuf>,

    /// Output size as `w:h`.
    pub resize: Option<String>,

    /// Crop rectangle as `w:h:x:y`.
    pub crop: Option<String>,

    pub start: Option<String>,
    pub end: Option<String>,
    pub duration: Option<String>,

    /// Decoder frame-sync mode.
    pub vsync: Option<String>,

    /// Trade quality for speed in the high-quality encoder.
    pub fast: bool,

    pub verbose: bool,

    /// Print the plan instead of running it.
    pub dry_run: bool,

    pub tools: ToolPaths,

    /// Base directory for the scratch directory (defaults to the system temp dir).
    pub temp_dir: Option<PathBuf>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            input: MediaSource::Stdin,
            output: MediaSink::Stdout,
            fps: DEFAULT_FPS,
            delay: None,
            speed: DEFAULT_SPEED,
            pipeline: PipelineChoice::Auto,
            colors: DEFAULT_COLORS,
            colors_set: false,
            lossy: DEFAULT_LOSSY,
            lossy_set: false,
            quality: None,
            once: false,
            reverse: false,
            text: None,
            subtitles: None,
            resize: None,
            crop: None,
            start: None,
            end: None,
            duration: None,
            vsync: None,
            fast: false,
            verbose: false,
            dry_run: false,
            tools: ToolPaths::default(),
            temp_dir: None,
        }
    }
}

impl ConversionConfig {
    /// Checks option ranges that cannot be expressed in the type system.
    pub fn validate(&self) -> CoreResult<()> {
        if !self.fps.is_positive() {
            return Err(CoreError::Usage(format!(
                "fps must be greater than zero (got {})",
                self.fps
            )));
        }
        if !self.speed.is_positive() {
            return Err(CoreError::Usage(format!(
                "speed must be greater than zero (got {})",
                self.speed
            )));
        }
        if self.delay == Some(0) {
            return Err(CoreError::Usage(
                "delay must be at least 1 hundredth of a second".to_string(),
            ));
        }
        if self.colors == 0 || self.colors > MAX_COLORS {
            return Err(CoreError::Usage(format!(
                "colors must be between 1 and {MAX_COLORS} (got {})",
                self.colors
            )));
        }
        if let Some(quality) = self.quality {
            if quality == 0 || quality > MAX_QUALITY {
                return Err(CoreError::Usage(format!(
                    "quality must be between 1 and {MAX_QUALITY} (got {quality})"
                )));
            }
        }
        Ok(())
    }

    /// True when the user tuned the palette encoder explicitly.
    #[must_use]
    pub fn palette_options_set(&self) -> bool {
        self.colors_set || self.lossy_set
    }
}
