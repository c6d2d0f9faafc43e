//! FFmpeg argument building for the decode stage.
//!
//! The decoder samples the input at the reconciled framerate, applies the
//! optional filter chain and writes either numbered PNG frames into the
//! scratch directory (high-quality pipeline) or a PPM stream to stdout
//! (palette pipeline).
//!
//! Argument order matters to ffmpeg: `-ss` before `-i` selects fast input
//! seeking, while `-t` and `-to` after `-i` limit the output.

use super::{ArgList, Tool};
use crate::config::ConversionConfig;
use crate::reconcile::EncodingParams;
use log::debug;
use std::path::Path;

/// File name pattern for frames written to the scratch directory.
pub const FRAME_PATTERN: &str = "frame%06d.png";

/// Where decoded frames are written.
#[derive(Debug, Clone, Copy)]
pub enum DecoderOutput<'a> {
    /// Numbered PNG files in the given directory.
    FrameDirectory(&'a Path),
    /// Raw PPM frames on stdout.
    RawStream,
}

/// Builder for constructing video filter chains
#[derive(Default)]
pub struct VideoFilterChain {
    filters: Vec<String>,
}

impl VideoFilterChain {
    /// Creates a new empty filter chain
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a crop filter (`w:h:x:y`) to the chain
    #[must_use]
    pub fn add_crop(mut self, rect: Option<&str>) -> Self {
        if let Some(rect) = rect.filter(|r| !r.is_empty()) {
            self.filters.push(format!("crop={rect}"));
        }
        self
    }

    /// Adds a scale filter (`w:h`) to the chain
    #[must_use]
    pub fn add_scale(mut self, size: Option<&str>) -> Self {
        if let Some(size) = size.filter(|s| !s.is_empty()) {
            self.filters.push(format!("scale={size}"));
        }
        self
    }

    /// Adds a subtitle burn-in filter to the chain
    #[must_use]
    pub fn add_subtitles(mut self, path: Option<&Path>) -> Self {
        if let Some(path) = path {
            self.filters.push(format!(
                "subtitles={}",
                escape_filter_value(&path.to_string_lossy())
            ));
        }
        self
    }

    /// Adds the frame reversal filter when `enabled`
    #[must_use]
    pub fn add_reverse(mut self, enabled: bool) -> Self {
        if enabled {
            self.filters.push("reverse".to_string());
        }
        self
    }

    /// Builds the filter chain into a single filter string
    #[must_use]
    pub fn build(self) -> Option<String> {
        if self.filters.is_empty() {
            None
        } else {
            Some(self.filters.join(","))
        }
    }
}

/// Escapes characters with special meaning inside a filtergraph value.
fn escape_filter_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '\'' | ':' | ',' | ';' | '[' | ']') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Builds the decoder's arguments.
#[must_use]
pub fn build_decoder_args(
    config: &ConversionConfig,
    params: &EncodingParams,
    output: DecoderOutput<'_>,
) -> ArgList {
    let mut args = ArgList::new(Tool::Ffmpeg);
    args.pair("-loglevel", "quiet");

    if let Some(start) = &config.start {
        args.pair("-ss", start);
    }

    args.pair("-i", config.input.to_arg());

    if let Some(duration) = &config.duration {
        args.pair("-t", duration);
    }
    if let Some(end) = &config.end {
        args.pair("-to", end);
    }

    args.pair("-r", params.framerate.to_string());

    // The high-quality encoder reverses by reordering frame files instead.
    let filters = VideoFilterChain::new()
        .add_crop(config.crop.as_deref())
        .add_scale(config.resize.as_deref())
        .add_subtitles(config.subtitles.as_deref())
        .add_reverse(config.reverse && !params.uses_high_quality_encoder)
        .build();

    if let Some(filters) = filters {
        debug!("Applying video filters: {filters}");
        args.pair("-vf", filters);
    }

    if let Some(mode) = &config.vsync {
        args.pair("-vsync", mode);
    }

    match output {
        DecoderOutput::FrameDirectory(dir) => {
            args.value(dir.join(FRAME_PATTERN));
        }
        DecoderOutput::RawStream => {
            args.pair("-pix_fmt", "rgb24")
                .pair("-f", "image2pipe")
                .pair("-vcodec", "ppm")
                .value("-");
        }
    }

    args
}
