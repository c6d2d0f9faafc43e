//! Parameter reconciliation.
//!
//! Turns the user's fps, delay, speed and pipeline choice into one coherent
//! set of encoding parameters. The palette encoder only understands integer
//! frame delays in hundredths of a second, so whenever it is involved (or a
//! delay was requested explicitly) the fps is snapped to `100 / delay`.

use crate::config::{ConversionConfig, PipelineChoice};
use crate::decimal::{Decimal, MAX_SCALE};
use crate::error::{CoreError, CoreResult};
use log::{debug, warn};
use std::fmt;

/// Hundredths of a second per second.
const DELAY_UNITS_PER_SECOND: Decimal = Decimal::from_int(100);

/// Factor applied to both sides of the framerate ratio.
const FRAMERATE_SCALE: Decimal = Decimal::from_int(1000);

/// Frame sampling rate handed to the decoder, kept as an unreduced ratio.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FramerateExpr {
    pub numerator: String,
    pub denominator: String,
}

impl fmt::Display for FramerateExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

/// Values derived from a [`ConversionConfig`]. Computed once, then read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodingParams {
    pub uses_high_quality_encoder: bool,
    /// Frame rate actually produced.
    pub fps: Decimal,
    /// Frame delay in hundredths of a second. Always set for the palette pipeline.
    pub delay: Option<u32>,
    pub framerate: FramerateExpr,
    /// Non-fatal adjustments made while reconciling.
    pub warnings: Vec<String>,
}

/// Decides whether the high-quality encoder handles this conversion.
#[must_use]
pub fn select_high_quality_encoder(config: &ConversionConfig) -> bool {
    let chosen = match config.pipeline {
        PipelineChoice::Never => false,
        PipelineChoice::Always => true,
        // Annotation is only supported by the palette pipeline.
        PipelineChoice::Auto => config.text.is_none(),
    };

    if config.palette_options_set() && config.pipeline != PipelineChoice::Always {
        return false;
    }
    chosen
}

/// Reconciles fps, delay and speed for the selected pipeline.
pub fn reconcile(config: &ConversionConfig) -> CoreResult<EncodingParams> {
    let uses_high_quality_encoder = select_high_quality_encoder(config);
    let mut warnings = Vec::new();
    let mut fps = config.fps;
    let mut delay = None;

    if uses_high_quality_encoder && config.text.is_some() {
        let message =
            "Text annotation is not supported by the high-quality encoder and will be ignored"
                .to_string();
        warn!("{message}");
        warnings.push(message);
    }

    if !uses_high_quality_encoder || config.delay.is_some() {
        let effective_delay = match config.delay {
            Some(explicit) => Decimal::from(explicit),
            None => DELAY_UNITS_PER_SECOND.div(fps, 0, "frame delay from fps")?,
        };

        let recomputed = DELAY_UNITS_PER_SECOND.div(effective_delay, MAX_SCALE, "fps from frame delay")?;
        if !recomputed.is_positive() {
            return Err(CoreError::NonPositive {
                what: "fps".to_string(),
                detail: format!("a delay of {effective_delay}/100 s rounds to {recomputed} fps"),
            });
        }

        if recomputed != fps {
            let message = if config.delay.is_some() {
                format!(
                    "Frame delay of {effective_delay}/100 s overrides the frame rate; using {recomputed} fps"
                )
            } else {
                format!(
                    "Requested {fps} fps cannot be represented with a whole-number frame delay; using {recomputed} fps ({effective_delay}/100 s per frame)"
                )
            };
            warn!("{message}");
            warnings.push(message);
            fps = recomputed;
        }

        delay = effective_delay.to_u32();
    }

    let numerator = fps.mul(FRAMERATE_SCALE, 0);
    let denominator = config.speed.mul(FRAMERATE_SCALE, 0);
    if !denominator.is_positive() {
        return Err(CoreError::DivisionByZero("framerate from speed".to_string()));
    }

    let framerate = FramerateExpr {
        numerator: numerator.to_string(),
        denominator: denominator.to_string(),
    };

    debug!(
        "Reconciled parameters: high_quality={uses_high_quality_encoder}, fps={fps}, delay={delay:?}, framerate={framerate}"
    );

    Ok(EncodingParams {
        uses_high_quality_encoder,
        fps,
        delay,
        framerate,
        warnings,
    })
}
