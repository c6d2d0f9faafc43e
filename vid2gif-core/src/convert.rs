// ============================================================================
// vid2gif-core/src/convert.rs
// ============================================================================
//
// CONVERSION DRIVER: Video to GIF From Options to Finished File
//
// Ties the pieces of a conversion together:
//   validate -> reconcile -> plan -> discover tools -> scratch dir -> execute
//
// A dry run stops after planning: the plan is logged, no tool is probed and
// no scratch directory is created. Otherwise the scratch directory is owned by
// a TempDir and removed whether the tools succeed or fail.
//
// KEY COMPONENTS:
// - run_conversion: Entry point used by the CLI
// - ConversionReport: What was planned and what happened

use crate::config::{ConversionConfig, MediaSink, MediaSource};
use crate::error::{CoreError, CoreResult};
use crate::external::{
    Tool, ToolProbe, Toolchain, discover_tools, gifski, requirements_for,
};
use crate::pipeline::{ConversionPlan, PipelineKind, plan_conversion};
use crate::reconcile::{EncodingParams, reconcile};
use crate::runner::{ProcessGroup, StageCommand, StageFailure, run_command};
use crate::temp_files::{create_scratch_dir, scratch_dir_placeholder};
use log::{debug, info, warn};
use std::time::{Duration, Instant};

/// Summary of one conversion.
#[derive(Debug, Clone)]
pub struct ConversionReport {
    pub pipeline: PipelineKind,
    pub params: EncodingParams,
    /// Planned command lines, in execution order.
    pub commands: Vec<String>,
    pub dry_run: bool,
    /// Frames handed to the high-quality encoder.
    pub frame_count: Option<usize>,
    /// Upstream palette stages that failed while the optimizer succeeded.
    pub secondary_failures: Vec<StageFailure>,
    pub elapsed: Duration,
}

#[derive(Debug, Default)]
struct ExecutionOutcome {
    frame_count: Option<usize>,
    secondary_failures: Vec<StageFailure>,
}

fn describe_source(source: &MediaSource) -> String {
    match source {
        MediaSource::Stdin => "standard input".to_string(),
        MediaSource::Path(path) => path.display().to_string(),
    }
}

fn describe_sink(sink: &MediaSink) -> String {
    match sink {
        MediaSink::Stdout => "standard output".to_string(),
        MediaSink::Path(path) => path.display().to_string(),
    }
}

/// Converts the configured input into a GIF.
///
/// `probe` locates the external tools; pass [`crate::external::SystemProbe`]
/// outside of tests.
pub fn run_conversion(
    config: &ConversionConfig,
    probe: &dyn ToolProbe,
) -> CoreResult<ConversionReport> {
    let started = Instant::now();

    config.validate()?;
    let params = reconcile(config)?;
    let pipeline = if params.uses_high_quality_encoder {
        PipelineKind::HighQuality
    } else {
        PipelineKind::Palette
    };

    info!(
        "Converting {} to {} using the {} pipeline at {} fps",
        describe_source(&config.input),
        describe_sink(&config.output),
        pipeline,
        params.fps
    );

    if config.dry_run {
        let plan = plan_conversion(config, &params, &scratch_dir_placeholder(config))?;
        let commands = plan.describe(&Toolchain::unresolved(&config.tools));
        info!("Dry run; nothing will be executed:");
        for line in &commands {
            info!("  {line}");
        }
        return Ok(ConversionReport {
            pipeline,
            params,
            commands,
            dry_run: true,
            frame_count: None,
            secondary_failures: Vec::new(),
            elapsed: started.elapsed(),
        });
    }

    let requirements = requirements_for(config, &params);
    let toolchain = discover_tools(&requirements, &config.tools, probe)?;

    let scratch = create_scratch_dir(config)?;
    let planned = plan_conversion(config, &params, scratch.path());
    let result = planned.and_then(|plan| {
        let commands = plan.describe(&toolchain);
        for line in &commands {
            debug!("Planned: {line}");
        }
        execute_plan(&plan, &toolchain).map(|outcome| (commands, outcome))
    });

    let scratch_path = scratch.path().to_path_buf();
    if let Err(e) = scratch.close() {
        warn!(
            "Failed to remove scratch directory {}: {e}",
            scratch_path.display()
        );
    } else {
        debug!("Removed scratch directory {}", scratch_path.display());
    }

    let (commands, outcome) = result?;
    let elapsed = started.elapsed();
    info!("Finished in {:.1}s", elapsed.as_secs_f64());

    Ok(ConversionReport {
        pipeline,
        params,
        commands,
        dry_run: false,
        frame_count: outcome.frame_count,
        secondary_failures: outcome.secondary_failures,
        elapsed,
    })
}

fn execute_plan(plan: &ConversionPlan, toolchain: &Toolchain) -> CoreResult<ExecutionOutcome> {
    match plan {
        ConversionPlan::HighQuality {
            decoder,
            encoder,
            frames_dir,
            reverse,
        } => {
            info!("Extracting frames");
            run_command(StageCommand::from_args(
                toolchain.require(Tool::Ffmpeg)?,
                decoder,
            ))?;

            let frames = gifski::collect_frames(frames_dir, *reverse)?;
            if frames.is_empty() {
                return Err(CoreError::NoFrames(frames_dir.clone()));
            }

            info!("Encoding {} frames", frames.len());
            let encoder = gifski::with_frames(encoder.clone(), &frames);
            run_command(StageCommand::from_args(
                toolchain.require(Tool::Gifski)?,
                &encoder,
            ))?;

            Ok(ExecutionOutcome {
                frame_count: Some(frames.len()),
                secondary_failures: Vec::new(),
            })
        }
        ConversionPlan::Palette {
            decoder,
            converter,
            optimizer,
        } => {
            info!("Encoding with palette pipeline");
            let mut group = ProcessGroup::new();
            group
                .push(StageCommand::from_args(
                    toolchain.require(Tool::Ffmpeg)?,
                    decoder,
                ))
                .push(StageCommand::from_args(
                    toolchain.require(Tool::Convert)?,
                    converter,
                ))
                .push(StageCommand::from_args(
                    toolchain.require(Tool::Gifsicle)?,
                    optimizer,
                ));
            let outcome = group.run()?;

            Ok(ExecutionOutcome {
                frame_count: None,
                secondary_failures: outcome.secondary_failures,
            })
        }
    }
}
