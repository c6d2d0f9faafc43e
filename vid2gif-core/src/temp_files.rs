//! Scratch directory management.
//!
//! Each conversion gets its own directory, created with the tempfile crate so
//! that dropping (or closing) the returned [`TempDir`] removes it together with
//! any frames left inside, whatever path the run took.

use crate::config::{ConversionConfig, SCRATCH_DIR_PREFIX};
use crate::error::CoreResult;
use log::debug;
use std::path::PathBuf;
use tempfile::{Builder as TempFileBuilder, TempDir};

/// Local time formatted for use in file names.
#[must_use]
pub fn get_timestamp() -> String {
    chrono::Local::now().format("%Y%m%d_%H%M%S").to_string()
}

/// Directory scratch directories are created in.
#[must_use]
pub fn scratch_base_dir(config: &ConversionConfig) -> PathBuf {
    config.temp_dir.clone().unwrap_or_else(std::env::temp_dir)
}

/// Creates a uniquely named scratch directory, `vid2gif_<timestamp>_<random>`.
pub fn create_scratch_dir(config: &ConversionConfig) -> CoreResult<TempDir> {
    let base = scratch_base_dir(config);
    std::fs::create_dir_all(&base)?;

    let dir = TempFileBuilder::new()
        .prefix(&format!("{SCRATCH_DIR_PREFIX}_{}_", get_timestamp()))
        .tempdir_in(&base)?;
    debug!("Created scratch directory {}", dir.path().display());
    Ok(dir)
}

/// Stand-in path shown by dry runs, which never create a directory.
#[must_use]
pub fn scratch_dir_placeholder(config: &ConversionConfig) -> PathBuf {
    scratch_base_dir(config).join(format!("{SCRATCH_DIR_PREFIX}_<timestamp>_<random>"))
}
