//! gifski arguments and frame ordering for the high-quality pipeline.
//!
//! gifski would otherwise sort its inputs alphabetically, so frames are sorted
//! numerically here and passed with `--nosort`.

use super::{ArgList, Tool};
use crate::config::ConversionConfig;
use crate::error::CoreResult;
use crate::reconcile::EncodingParams;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// Extension of frames written by the decoder.
const FRAME_EXTENSION: &str = "png";

/// Builds the high-quality encoder's arguments, without the frame list.
#[must_use]
pub fn build_encoder_args(config: &ConversionConfig, params: &EncodingParams) -> ArgList {
    let mut args = ArgList::new(Tool::Gifski);
    args.pair("-o", config.output.to_arg())
        .pair("--fps", params.fps.to_string());

    if let Some(quality) = config.quality {
        args.pair("--quality", quality.to_string());
    }
    if config.once {
        args.pair("--repeat", "-1");
    }
    if !config.verbose {
        args.flag("--quiet");
    }
    if config.fast {
        args.flag("--fast");
    }
    args.flag("--nosort");
    args
}

/// Appends the ordered frame list to the encoder arguments.
#[must_use]
pub fn with_frames(mut args: ArgList, frames: &[PathBuf]) -> ArgList {
    args.values(frames.iter().cloned());
    args
}

/// Numeric part of a frame file name (`frame000042.png` -> 42).
#[must_use]
pub fn frame_number(path: &Path) -> Option<u64> {
    let stem = path.file_stem()?.to_str()?;
    let digits: String = stem.chars().filter(char::is_ascii_digit).collect();
    digits.parse().ok()
}

/// Lists the decoded frames in `dir` in numeric order, or reversed.
pub fn collect_frames(dir: &Path, reverse: bool) -> CoreResult<Vec<PathBuf>> {
    let mut frames: Vec<(u64, PathBuf)> = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_frame = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(FRAME_EXTENSION));
        if !is_frame {
            continue;
        }
        if let Some(number) = frame_number(&path) {
            frames.push((number, path));
        }
    }

    frames.sort_by_key(|(number, _)| *number);
    if reverse {
        frames.reverse();
    }

    debug!("Collected {} frame(s) from {}", frames.len(), dir.display());
    Ok(frames.into_iter().map(|(_, path)| path).collect())
}
