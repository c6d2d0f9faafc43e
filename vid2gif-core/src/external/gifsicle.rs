//! gifsicle arguments for the palette pipeline's final stage.

use super::{ArgList, Tool};
use crate::config::ConversionConfig;

/// Builds the palette optimizer's arguments. `delay` is in hundredths of a
/// second per frame.
#[must_use]
pub fn build_optimizer_args(config: &ConversionConfig, delay: u32) -> ArgList {
    let mut args = ArgList::new(Tool::Gifsicle);
    args.pair("-o", config.output.to_arg())
        .flag("-O3")
        .assign("--lossy", config.lossy)
        .pair("--colors", config.colors.to_string())
        .assign("--delay", delay)
        .flag("--no-warnings");

    if config.once {
        args.flag("--no-loopcount");
    }
    args
}
