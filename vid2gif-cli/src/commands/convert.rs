//! Implementation of the conversion command.
//!
//! Maps parsed arguments onto a [`ConversionConfig`], refuses to read video
//! from or write a GIF to an interactive terminal, and hands the config to
//! vid2gif-core.

use crate::cli::Cli;
use crate::error::CliResult;
use crate::terminal;

use vid2gif_core::config::{ConversionConfigBuilder, ToolPaths};
use vid2gif_core::{
    ConversionConfig, ConversionReport, CoreError, Decimal, MediaSink, MediaSource, SystemProbe,
    run_conversion,
};

use log::debug;
use std::io::{self, IsTerminal};
use std::path::PathBuf;

/// Path that stands for standard input or output.
const STDIO_PATH: &str = "-";

fn parse_decimal(flag: &str, value: &str) -> CliResult<Decimal> {
    value
        .parse::<Decimal>()
        .inspect_err(|_| debug!("Rejected {flag} value '{value}'"))
}

fn media_source(path: Option<PathBuf>) -> MediaSource {
    match path {
        Some(path) if path.as_os_str() != STDIO_PATH => MediaSource::Path(path),
        _ => MediaSource::Stdin,
    }
}

fn media_sink(path: Option<PathBuf>) -> MediaSink {
    match path {
        Some(path) if path.as_os_str() != STDIO_PATH => MediaSink::Path(path),
        _ => MediaSink::Stdout,
    }
}

/// Creates the conversion config from CLI arguments.
pub fn build_config(args: &Cli) -> CliResult<ConversionConfig> {
    let fps = parse_decimal("--fps", &args.fps)?;
    let speed = parse_decimal("--speed", &args.speed)?;

    let defaults = ToolPaths::default();
    let tools = ToolPaths {
        ffmpeg: args.ffmpeg.clone().unwrap_or(defaults.ffmpeg),
        convert: args.convert.clone().unwrap_or(defaults.convert),
        gifsicle: args.gifsicle.clone().unwrap_or(defaults.gifsicle),
        gifski: args.gifski.clone().unwrap_or(defaults.gifski),
    };

    let mut builder = ConversionConfigBuilder::new()
        .input(media_source(args.input.clone().or_else(|| args.input_file.clone())))
        .output(media_sink(args.output.clone()))
        .fps(fps)
        .speed(speed)
        .pipeline(args.pipeline.into())
        .once(args.once)
        .reverse(args.reverse)
        .fast(args.fast)
        .verbose(args.verbose)
        .dry_run(args.dry_run)
        .tools(tools);

    if let Some(delay) = args.delay {
        builder = builder.delay(delay);
    }
    if let Some(colors) = args.colors {
        builder = builder.colors(colors);
    }
    if let Some(lossy) = args.lossy {
        builder = builder.lossy(lossy);
    }
    if let Some(quality) = args.quality {
        builder = builder.quality(quality);
    }
    if let Some(text) = &args.text {
        builder = builder.text(text.clone());
    }
    if let Some(subtitles) = &args.subtitles {
        builder = builder.subtitles(subtitles.clone());
    }
    if let Some(resize) = &args.resize {
        builder = builder.resize(resize.clone());
    }
    if let Some(crop) = &args.crop {
        builder = builder.crop(crop.clone());
    }
    if let Some(start) = &args.start {
        builder = builder.start(start.clone());
    }
    if let Some(end) = &args.end {
        builder = builder.end(end.clone());
    }
    if let Some(duration) = &args.duration {
        builder = builder.duration(duration.clone());
    }
    if let Some(vsync) = &args.vsync {
        builder = builder.vsync(vsync.clone());
    }
    if let Some(dir) = &args.temp_dir {
        builder = builder.temp_dir(dir.clone());
    }

    Ok(builder.build())
}

/// Rejects standard streams that are attached to a terminal.
pub fn check_streams(
    config: &ConversionConfig,
    stdin_is_terminal: bool,
    stdout_is_terminal: bool,
) -> CliResult<()> {
    if config.input == MediaSource::Stdin && stdin_is_terminal {
        return Err(CoreError::InteractiveTerminal {
            action: "read video from",
            hint: "pass an input file or pipe video into vid2gif",
        });
    }
    if config.output == MediaSink::Stdout && stdout_is_terminal {
        return Err(CoreError::InteractiveTerminal {
            action: "write GIF data to",
            hint: "pass -o <file> or redirect the output",
        });
    }
    Ok(())
}

/// Runs one conversion for the parsed arguments.
pub fn run_convert(args: &Cli) -> CliResult<ConversionReport> {
    let config = build_config(args)?;

    // A dry run neither reads nor writes the streams.
    if !config.dry_run {
        check_streams(&config, io::stdin().is_terminal(), io::stdout().is_terminal())?;
    }

    let report = run_conversion(&config, &SystemProbe)?;
    terminal::print_report(&config, &report);
    Ok(report)
}
