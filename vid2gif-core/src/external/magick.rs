//! ImageMagick `convert` arguments for the palette pipeline.
//!
//! Reads the decoder's PPM stream from stdin, quantizes each frame without
//! dithering, optionally draws the caption and writes a multi-frame GIF to
//! stdout.

use super::{ArgList, Tool};
use crate::config::ConversionConfig;

/// Caption placement and styling.
const TEXT_GRAVITY: &str = "south";
const TEXT_FILL: &str = "white";
const TEXT_STROKE: &str = "black";
const TEXT_STROKE_WIDTH: &str = "1";
const TEXT_POINT_SIZE: &str = "40";
const TEXT_OFFSET: &str = "+0+10";

/// Builds the palette converter's arguments.
#[must_use]
pub fn build_converter_args(config: &ConversionConfig) -> ArgList {
    let mut args = ArgList::new(Tool::Convert);
    args.value("-").flag("+dither").pair("-layers", "Optimize");

    if let Some(text) = &config.text {
        args.pair("-gravity", TEXT_GRAVITY)
            .pair("-fill", TEXT_FILL)
            .pair("-stroke", TEXT_STROKE)
            .pair("-strokewidth", TEXT_STROKE_WIDTH)
            .pair("-pointsize", TEXT_POINT_SIZE)
            .pair("-annotate", TEXT_OFFSET)
            .value(text);
    }

    args.value("gif:-");
    args
}
