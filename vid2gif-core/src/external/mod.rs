// ============================================================================
// vid2gif-core/src/external/mod.rs
// ============================================================================
//
// EXTERNAL TOOLS: Argument Assembly and Discovery for External CLI Tools
//
// This module encapsulates everything vid2gif knows about the programs it
// drives: ffmpeg (decode/filter), ImageMagick convert (palette conversion and
// annotation), gifsicle (palette optimization) and gifski (high-quality GIF
// encoding).
//
// KEY COMPONENTS:
// - Tool: Identifies each external program
// - ArgList: Typed argument list, serialized only at the process boundary
// - Per-tool argument builders (ffmpeg, magick, gifsicle, gifski)
// - ToolProbe / discover_tools: Installation and capability checks
//
// DESIGN PHILOSOPHY:
// Probing the host goes through the ToolProbe trait so tests can provide
// their own implementation instead of touching PATH.

use std::fmt;

// ============================================================================
// SUBMODULES
// ============================================================================

/// Typed argument lists
pub mod command;

/// Decoder (ffmpeg) arguments and filter chains
pub mod ffmpeg;

/// Palette converter (ImageMagick) arguments
pub mod magick;

/// Palette optimizer (gifsicle) arguments
pub mod gifsicle;

/// High-quality encoder (gifski) arguments and frame ordering
pub mod gifski;

/// Installation and capability checks
pub mod tools;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use command::{Arg, ArgList};
pub use tools::{
    Capability, Requirements, SystemProbe, ToolProbe, Toolchain, discover_tools,
    requirements_for,
};

/// External programs driven by vid2gif.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tool {
    /// Video decoder and filter engine.
    Ffmpeg,
    /// Palette-based image converter.
    Convert,
    /// Palette-optimizing GIF encoder.
    Gifsicle,
    /// High-quality GIF encoder.
    Gifski,
}

impl Tool {
    /// Program name looked up on PATH when no override is configured.
    #[must_use]
    pub fn default_program(self) -> &'static str {
        match self {
            Tool::Ffmpeg => "ffmpeg",
            Tool::Convert => "convert",
            Tool::Gifsicle => "gifsicle",
            Tool::Gifski => "gifski",
        }
    }

    /// Human readable role of the tool in a conversion.
    #[must_use]
    pub fn role(self) -> &'static str {
        match self {
            Tool::Ffmpeg => "video decoder",
            Tool::Convert => "palette converter",
            Tool::Gifsicle => "GIF optimizer",
            Tool::Gifski => "high-quality GIF encoder",
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.default_program())
    }
}
