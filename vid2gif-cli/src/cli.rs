// vid2gif-cli/src/cli.rs
//
// Defines the command-line argument structure using clap.
//
// Short flags follow the classic single-letter interface (`-f 15 -r 480:-1`),
// so clap's own `-h`/`-V` handling is replaced: `-h` and `-?` print help,
// `-V` selects the vsync mode and the version is only available as
// `--version`.

use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;
use vid2gif_core::PipelineChoice;

/// Pipeline selection as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PipelineArg {
    /// gifski unless text or palette options need the palette pipeline
    Auto,
    /// Always use convert + gifsicle
    Never,
    /// Always use gifski
    Always,
}

impl From<PipelineArg> for PipelineChoice {
    fn from(arg: PipelineArg) -> Self {
        match arg {
            PipelineArg::Auto => PipelineChoice::Auto,
            PipelineArg::Never => PipelineChoice::Never,
            PipelineArg::Always => PipelineChoice::Always,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "vid2gif",
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "vid2gif: Convert video clips to animated GIFs",
    long_about = "Converts video to GIF with ffmpeg and either gifski (high quality) \
                  or ImageMagick convert + gifsicle (palette, supports captions).",
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct Cli {
    /// Input video file (same as -i)
    #[arg(value_name = "INPUT", conflicts_with = "input")]
    pub input_file: Option<PathBuf>,

    /// Input video file (defaults to standard input)
    #[arg(short = 'i', long = "input", value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Output GIF file (defaults to standard output)
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    // --- Timing ---
    /// Output frames per second (decimals allowed)
    #[arg(short = 'f', long = "fps", value_name = "FPS", default_value = "10")]
    pub fps: String,

    /// Frame delay in hundredths of a second (overrides fps)
    #[arg(short = 'd', long = "delay", value_name = "DELAY")]
    pub delay: Option<u32>,

    /// Playback speed multiplier
    #[arg(short = 'S', long = "speed", value_name = "SPEED", default_value = "1")]
    pub speed: String,

    /// Start time, passed to ffmpeg before the input
    #[arg(short = 'F', long = "from", value_name = "TIME")]
    pub start: Option<String>,

    /// End time
    #[arg(short = 'T', long = "to", value_name = "TIME")]
    pub end: Option<String>,

    /// Duration
    #[arg(short = 'D', long = "duration", value_name = "TIME")]
    pub duration: Option<String>,

    /// ffmpeg frame-sync mode (e.g. cfr, vfr, passthrough)
    #[arg(short = 'V', long = "vsync", value_name = "MODE")]
    pub vsync: Option<String>,

    // --- Picture ---
    /// Resize to WIDTH:HEIGHT (-1 keeps the aspect ratio)
    #[arg(short = 'r', long = "resize", value_name = "W:H")]
    pub resize: Option<String>,

    /// Crop to WIDTH:HEIGHT:X:Y before resizing
    #[arg(short = 'C', long = "crop", value_name = "W:H:X:Y")]
    pub crop: Option<String>,

    /// Burn in subtitles from this file
    #[arg(short = 's', long = "subtitles", value_name = "FILE")]
    pub subtitles: Option<PathBuf>,

    /// Caption drawn at the bottom of every frame (palette pipeline)
    #[arg(short = 't', long = "text", value_name = "TEXT")]
    pub text: Option<String>,

    /// Play frames in reverse
    #[arg(short = 'R', long = "reverse")]
    pub reverse: bool,

    /// Play the animation once instead of looping
    #[arg(short = 'l', long = "once")]
    pub once: bool,

    // --- Encoder ---
    /// Which encoder pipeline to use
    #[arg(short = 'g', long = "pipeline", value_enum, value_name = "WHEN", default_value = "auto")]
    pub pipeline: PipelineArg,

    /// Palette size for the palette pipeline (default: 80)
    #[arg(short = 'c', long = "colors", value_name = "COLORS")]
    pub colors: Option<u32>,

    /// Lossy compression level for the palette pipeline (default: 80)
    #[arg(short = 'z', long = "lossy", value_name = "LOSSY")]
    pub lossy: Option<u32>,

    /// gifski quality level
    #[arg(short = 'q', long = "quality", value_name = "1-100",
          value_parser = clap::value_parser!(u8).range(1..=100))]
    pub quality: Option<u8>,

    /// gifski fast mode (lower quality)
    #[arg(short = 'b', long = "fast")]
    pub fast: bool,

    // --- Output control ---
    /// Show tool output and debug logging
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Print the commands that would run without running them (implies -v)
    #[arg(short = 'p', long = "dry-run")]
    pub dry_run: bool,

    // --- External tools ---
    /// ffmpeg program to use
    #[arg(long, value_name = "PATH", env = "VID2GIF_FFMPEG")]
    pub ffmpeg: Option<PathBuf>,

    /// ImageMagick convert program to use
    #[arg(long, value_name = "PATH", env = "VID2GIF_CONVERT")]
    pub convert: Option<PathBuf>,

    /// gifsicle program to use
    #[arg(long, value_name = "PATH", env = "VID2GIF_GIFSICLE")]
    pub gifsicle: Option<PathBuf>,

    /// gifski program to use
    #[arg(long, value_name = "PATH", env = "VID2GIF_GIFSKI")]
    pub gifski: Option<PathBuf>,

    /// Directory for the scratch directory (defaults to the system temp dir)
    #[arg(long, value_name = "DIR", env = "VID2GIF_TEMP_DIR")]
    pub temp_dir: Option<PathBuf>,

    /// Print help
    #[arg(short = 'h', short_alias = '?', long = "help", action = ArgAction::Help)]
    pub help: Option<bool>,

    /// Print version
    #[arg(long = "version", action = ArgAction::Version)]
    pub version: Option<bool>,
}
