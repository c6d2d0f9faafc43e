//! Pipeline selection and conversion planning.
//!
//! A [`ConversionPlan`] holds the complete, typed argument lists for every
//! process of one conversion. It is built before anything runs so that a dry
//! run can print exactly what would be executed.

use crate::config::ConversionConfig;
use crate::error::{CoreError, CoreResult};
use crate::external::ffmpeg::{self, DecoderOutput};
use crate::external::{ArgList, Tool, Toolchain, gifsicle, gifski, magick};
use crate::reconcile::EncodingParams;
use std::fmt;
use std::path::{Path, PathBuf};

/// The two encoding pipelines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineKind {
    /// Decoder writes PNG frames; gifski encodes them afterwards.
    HighQuality,
    /// Decoder, convert and gifsicle connected by pipes.
    Palette,
}

impl fmt::Display for PipelineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PipelineKind::HighQuality => "high-quality (ffmpeg -> gifski)",
            PipelineKind::Palette => "palette (ffmpeg | convert | gifsicle)",
        })
    }
}

/// How the stages of a plan are run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    /// One after another, each to completion.
    Sequential,
    /// Concurrently, stdout of each stage feeding stdin of the next.
    Piped,
}

/// Everything needed to run one conversion.
#[derive(Debug, Clone)]
pub enum ConversionPlan {
    HighQuality {
        decoder: ArgList,
        /// Encoder arguments without the frame list, which is only known
        /// once the decoder has finished.
        encoder: ArgList,
        frames_dir: PathBuf,
        reverse: bool,
    },
    Palette {
        decoder: ArgList,
        converter: ArgList,
        optimizer: ArgList,
    },
}

impl ConversionPlan {
    #[must_use]
    pub fn kind(&self) -> PipelineKind {
        match self {
            ConversionPlan::HighQuality { .. } => PipelineKind::HighQuality,
            ConversionPlan::Palette { .. } => PipelineKind::Palette,
        }
    }

    #[must_use]
    pub fn mode(&self) -> ExecutionMode {
        match self {
            ConversionPlan::HighQuality { .. } => ExecutionMode::Sequential,
            ConversionPlan::Palette { .. } => ExecutionMode::Piped,
        }
    }

    /// Argument lists in execution order.
    #[must_use]
    pub fn stages(&self) -> Vec<&ArgList> {
        match self {
            ConversionPlan::HighQuality {
                decoder, encoder, ..
            } => vec![decoder, encoder],
            ConversionPlan::Palette {
                decoder,
                converter,
                optimizer,
            } => vec![decoder, converter, optimizer],
        }
    }

    /// Human-readable command lines, one per stage.
    #[must_use]
    pub fn describe(&self, toolchain: &Toolchain) -> Vec<String> {
        let program = |tool: Tool| {
            toolchain
                .get(tool)
                .map_or_else(|| tool.default_program().into(), |p| p.as_os_str().to_os_string())
        };

        match self {
            ConversionPlan::HighQuality {
                decoder,
                encoder,
                frames_dir,
                reverse,
            } => {
                let order = if *reverse {
                    "sorted numerically, reversed"
                } else {
                    "sorted numerically"
                };
                vec![
                    decoder.display_with(&program(decoder.tool())),
                    format!(
                        "{} {}/frame*.png ({order})",
                        encoder.display_with(&program(encoder.tool())),
                        frames_dir.display()
                    ),
                ]
            }
            ConversionPlan::Palette { .. } => {
                let joined = self
                    .stages()
                    .into_iter()
                    .map(|stage| stage.display_with(&program(stage.tool())))
                    .collect::<Vec<_>>()
                    .join(" | ");
                vec![joined]
            }
        }
    }
}

/// Builds the plan for the pipeline chosen during reconciliation.
///
/// `scratch` is where the high-quality pipeline keeps its frames; the
/// palette pipeline does not touch it.
pub fn plan_conversion(
    config: &ConversionConfig,
    params: &EncodingParams,
    scratch: &Path,
) -> CoreResult<ConversionPlan> {
    if params.uses_high_quality_encoder {
        return Ok(ConversionPlan::HighQuality {
            decoder: ffmpeg::build_decoder_args(
                config,
                params,
                DecoderOutput::FrameDirectory(scratch),
            ),
            encoder: gifski::build_encoder_args(config, params),
            frames_dir: scratch.to_path_buf(),
            reverse: config.reverse,
        });
    }

    let delay = params.delay.ok_or_else(|| {
        CoreError::Usage("the palette pipeline needs a whole-number frame delay".to_string())
    })?;

    Ok(ConversionPlan::Palette {
        decoder: ffmpeg::build_decoder_args(config, params, DecoderOutput::RawStream),
        converter: magick::build_converter_args(config),
        optimizer: gifsicle::build_optimizer_args(config, delay),
    })
}
