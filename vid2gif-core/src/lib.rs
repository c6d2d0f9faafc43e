//! Core library for turning video clips into animated GIFs using ffmpeg,
//! gifski, ImageMagick and gifsicle.
//!
//! This crate reconciles frame rate, delay and speed options, chooses between
//! the high-quality (gifski) and palette (convert + gifsicle) pipelines,
//! checks that the required tools are installed and runs them.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use vid2gif_core::config::ConversionConfigBuilder;
//! use vid2gif_core::external::SystemProbe;
//! use vid2gif_core::run_conversion;
//! use std::path::PathBuf;
//!
//! let config = ConversionConfigBuilder::new()
//!     .input_path(PathBuf::from("clip.mp4"))
//!     .output_path(PathBuf::from("clip.gif"))
//!     .fps("12.5".parse().unwrap())
//!     .resize("480:-1")
//!     .build();
//!
//! let report = run_conversion(&config, &SystemProbe).unwrap();
//! println!("{} pipeline, {} fps", report.pipeline, report.params.fps);
//! ```

pub mod config;
pub mod convert;
pub mod decimal;
pub mod error;
pub mod external;
pub mod pipeline;
pub mod reconcile;
pub mod runner;
pub mod temp_files;

// Re-exports for public API
pub use config::{
    ConversionConfig, ConversionConfigBuilder, MediaSink, MediaSource, PipelineChoice, ToolPaths,
};
pub use convert::{ConversionReport, run_conversion};
pub use decimal::{Decimal, canonicalize};
pub use error::{CoreError, CoreResult, ErrorKind};
pub use external::{SystemProbe, Tool, ToolProbe};
pub use pipeline::{ConversionPlan, PipelineKind, plan_conversion};
pub use reconcile::{EncodingParams, FramerateExpr, reconcile};
