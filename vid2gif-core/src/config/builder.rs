// ============================================================================
// vid2gif-core/src/config/builder.rs
// ============================================================================
//
// CONFIGURATION BUILDER: Builder Pattern for ConversionConfig
//
// This module implements the builder pattern for ConversionConfig, providing
// a fluent API for assembling a configuration from parsed user input. Setting
// colors or lossy through the builder records that they were explicit, which
// the reconciler uses to pick the palette pipeline.

use std::path::PathBuf;

use super::{ConversionConfig, MediaSink, MediaSource, PipelineChoice, ToolPaths};
use crate::decimal::Decimal;

/// Builder for creating [`ConversionConfig`] instances.
///
/// # Examples
///
/// ```rust
/// use vid2gif_core::config::{ConversionConfigBuilder, PipelineChoice};
/// use std::path::PathBuf;
///
/// let config = ConversionConfigBuilder::new()
///     .input_path(PathBuf::from("clip.mp4"))
///     .output_path(PathBuf::from("clip.gif"))
///     .fps("15".parse().unwrap())
///     .pipeline(PipelineChoice::Never)
///     .colors(128)
///     .build();
///
/// assert!(config.colors_set);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    /// Creates a builder holding the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn input(mut self, input: MediaSource) -> Self {
        self.config.input = input;
        self
    }

    #[must_use]
    pub fn input_path(self, path: PathBuf) -> Self {
        self.input(MediaSource::Path(path))
    }

    #[must_use]
    pub fn output(mut self, output: MediaSink) -> Self {
        self.config.output = output;
        self
    }

    #[must_use]
    pub fn output_path(self, path: PathBuf) -> Self {
        self.output(MediaSink::Path(path))
    }

    #[must_use]
    pub fn fps(mut self, fps: Decimal) -> Self {
        self.config.fps = fps;
        self
    }

    #[must_use]
    pub fn delay(mut self, delay: u32) -> Self {
        self.config.delay = Some(delay);
        self
    }

    #[must_use]
    pub fn speed(mut self, speed: Decimal) -> Self {
        self.config.speed = speed;
        self
    }

    #[must_use]
    pub fn pipeline(mut self, choice: PipelineChoice) -> Self {
        self.config.pipeline = choice;
        self
    }

    /// Sets the palette size and marks it as explicitly chosen.
    #[must_use]
    pub fn colors(mut self, colors: u32) -> Self {
        self.config.colors = colors;
        self.config.colors_set = true;
        self
    }

    /// Sets the lossy level and marks it as explicitly chosen.
    #[must_use]
    pub fn lossy(mut self, lossy: u32) -> Self {
        self.config.lossy = lossy;
        self.config.lossy_set = true;
        self
    }

    #[must_use]
    pub fn quality(mut self, quality: u8) -> Self {
        self.config.quality = Some(quality);
        self
    }

    #[must_use]
    pub fn once(mut self, once: bool) -> Self {
        self.config.once = once;
        self
    }

    #[must_use]
    pub fn reverse(mut self, reverse: bool) -> Self {
        self.config.reverse = reverse;
        self
    }

    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.config.text = Some(text.into());
        self
    }

    #[must_use]
    pub fn subtitles(mut self, path: PathBuf) -> Self {
        self.config.subtitles = Some(path);
        self
    }

    #[must_use]
    pub fn resize(mut self, size: impl Into<String>) -> Self {
        self.config.resize = Some(size.into());
        self
    }

    #[must_use]
    pub fn crop(mut self, rect: impl Into<String>) -> Self {
        self.config.crop = Some(rect.into());
        self
    }

    #[must_use]
    pub fn start(mut self, start: impl Into<String>) -> Self {
        self.config.start = Some(start.into());
        self
    }

    #[must_use]
    pub fn end(mut self, end: impl Into<String>) -> Self {
        self.config.end = Some(end.into());
        self
    }

    #[must_use]
    pub fn duration(mut self, duration: impl Into<String>) -> Self {
        self.config.duration = Some(duration.into());
        self
    }

    #[must_use]
    pub fn vsync(mut self, mode: impl Into<String>) -> Self {
        self.config.vsync = Some(mode.into());
        self
    }

    #[must_use]
    pub fn fast(mut self, fast: bool) -> Self {
        self.config.fast = fast;
        self
    }

    #[must_use]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.config.verbose = verbose;
        self
    }

    /// Enables dry-run mode, which also turns on verbose output.
    #[must_use]
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.config.dry_run = dry_run;
        if dry_run {
            self.config.verbose = true;
        }
        self
    }

    #[must_use]
    pub fn tools(mut self, tools: ToolPaths) -> Self {
        self.config.tools = tools;
        self
    }

    #[must_use]
    pub fn temp_dir(mut self, dir: PathBuf) -> Self {
        self.config.temp_dir = Some(dir);
        self
    }

    /// Returns the assembled configuration. Call
    /// [`ConversionConfig::validate`] before using it.
    #[must_use]
    pub fn build(self) -> ConversionConfig {
        self.config
    }
}
