// ============================================================================
// vid2gif-core/src/runner.rs
// ============================================================================
//
// PROCESS RUNNER: Sequential Stages and Piped Process Groups
//
// Runs the external tools of a conversion plan. Stdin of the first stage and
// stdout of the last stage are inherited so that `-` input and output work;
// stderr of every stage is drained on its own thread, logged at debug level
// and attached to failure errors.
//
// KEY COMPONENTS:
// - StageCommand: A ready-to-spawn command with a printable description
// - run_command: One stage run to completion
// - ProcessGroup: Stages connected stdout -> stdin and run concurrently
// - GroupOutcome: Secondary diagnostics from a successful group

use crate::error::{
    CoreError, CoreResult, command_failed_error, command_start_error, command_wait_error,
};
use crate::external::ArgList;
use log::{debug, warn};
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::process::{Child, ChildStderr, ChildStdout, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};

// ============================================================================
// STAGE COMMANDS
// ============================================================================

/// A command plus the names used to report on it.
#[derive(Debug)]
pub struct StageCommand {
    name: String,
    display: String,
    command: Command,
}

impl StageCommand {
    /// Wraps an already configured [`Command`].
    #[must_use]
    pub fn new(name: impl Into<String>, command: Command) -> Self {
        let name = name.into();
        Self {
            display: name.clone(),
            name,
            command,
        }
    }

    /// Builds the command for `args` run by `program`.
    #[must_use]
    pub fn from_args(program: &Path, args: &ArgList) -> Self {
        Self {
            name: program.display().to_string(),
            display: args.display_with(program.as_os_str()),
            command: args.to_command(program.as_os_str()),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Exit status and stderr of a stage that failed without failing its group.
#[derive(Debug, Clone)]
pub struct StageFailure {
    pub name: String,
    pub status: ExitStatus,
    pub stderr: String,
}

/// Result of a process group whose last stage succeeded.
#[derive(Debug, Clone, Default)]
pub struct GroupOutcome {
    /// Upstream stages that exited unsuccessfully.
    pub secondary_failures: Vec<StageFailure>,
}

// ============================================================================
// STDERR DRAINING
// ============================================================================

fn drain_stderr(name: &str, stderr: Option<ChildStderr>) -> Option<JoinHandle<String>> {
    let name = name.to_string();
    stderr.map(|pipe| {
        thread::spawn(move || {
            let mut reader = BufReader::new(pipe);
            let mut buf = Vec::new();
            let mut lines = Vec::new();
            // Drain to EOF whatever the bytes are; the pipe must stay open
            // until the tool exits.
            loop {
                buf.clear();
                match reader.read_until(b'\n', &mut buf) {
                    Ok(0) => break,
                    Ok(_) => {
                        let line = String::from_utf8_lossy(&buf).trim_end().to_string();
                        debug!("{name}: {line}");
                        lines.push(line);
                    }
                    Err(e) => {
                        debug!("{name}: stopped reading stderr: {e}");
                        break;
                    }
                }
            }
            lines.join("\n")
        })
    })
}

fn collect_stderr(handle: Option<JoinHandle<String>>) -> String {
    handle
        .and_then(|h| h.join().ok())
        .unwrap_or_default()
        .trim()
        .to_string()
}

// ============================================================================
// SEQUENTIAL EXECUTION
// ============================================================================

/// Runs one stage to completion.
pub fn run_command(stage: StageCommand) -> CoreResult<()> {
    let StageCommand {
        name,
        display,
        mut command,
    } = stage;

    debug!("Running: {display}");
    let mut child = command
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| command_start_error(name.clone(), e))?;
    drop(command);

    let stderr = drain_stderr(&name, child.stderr.take());
    let status = child
        .wait()
        .map_err(|e| command_wait_error(name.clone(), e))?;
    let stderr = collect_stderr(stderr);

    if status.success() {
        debug!("{name} finished successfully");
        Ok(())
    } else {
        Err(command_failed_error(name, status, stderr))
    }
}

// ============================================================================
// PROCESS GROUP
// ============================================================================

struct RunningStage {
    name: String,
    child: Child,
    stderr: Option<JoinHandle<String>>,
}

/// Stages connected by pipes, stdout of each feeding stdin of the next.
///
/// All stages run concurrently and are always waited on. The last stage's
/// exit status decides the outcome; failures of earlier stages are logged and
/// reported in [`GroupOutcome::secondary_failures`].
#[derive(Debug, Default)]
pub struct ProcessGroup {
    stages: Vec<StageCommand>,
}

impl ProcessGroup {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, stage: StageCommand) -> &mut Self {
        self.stages.push(stage);
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Spawns every stage, waits for all of them and reports the outcome.
    pub fn run(self) -> CoreResult<GroupOutcome> {
        let count = self.stages.len();
        if count == 0 {
            return Err(CoreError::Usage("process group has no stages".to_string()));
        }

        let mut running: Vec<RunningStage> = Vec::with_capacity(count);
        let mut upstream: Option<ChildStdout> = None;

        for (index, stage) in self.stages.into_iter().enumerate() {
            let StageCommand {
                name,
                display,
                mut command,
            } = stage;

            if let Some(pipe) = upstream.take() {
                command.stdin(Stdio::from(pipe));
            }
            if index + 1 < count {
                command.stdout(Stdio::piped());
            }
            command.stderr(Stdio::piped());

            debug!("Starting stage {}/{}: {display}", index + 1, count);
            let spawned = command.spawn();
            // Releases the parent's copies of the pipe ends.
            drop(command);

            let mut child = match spawned {
                Ok(child) => child,
                Err(e) => {
                    abort_stages(running);
                    return Err(command_start_error(name, e));
                }
            };

            upstream = child.stdout.take();
            let stderr = drain_stderr(&name, child.stderr.take());
            running.push(RunningStage {
                name,
                child,
                stderr,
            });
        }
        drop(upstream);

        let mut results = Vec::with_capacity(count);
        let mut wait_error = None;
        for mut stage in running {
            match stage.child.wait() {
                Ok(status) => {
                    let stderr = collect_stderr(stage.stderr);
                    results.push(StageFailure {
                        name: stage.name,
                        status,
                        stderr,
                    });
                }
                Err(e) => {
                    if wait_error.is_none() {
                        wait_error = Some(command_wait_error(stage.name, e));
                    }
                }
            }
        }
        if let Some(error) = wait_error {
            return Err(error);
        }

        let Some(last) = results.pop() else {
            return Err(CoreError::Usage("process group has no stages".to_string()));
        };

        let secondary_failures: Vec<StageFailure> = results
            .into_iter()
            .filter(|result| !result.status.success())
            .collect();
        for failure in &secondary_failures {
            warn!(
                "{} exited with {} while {} continued{}",
                failure.name,
                failure.status,
                last.name,
                if failure.stderr.is_empty() {
                    String::new()
                } else {
                    format!(": {}", failure.stderr)
                }
            );
        }

        if last.status.success() {
            debug!("Process group finished; final stage {} succeeded", last.name);
            Ok(GroupOutcome { secondary_failures })
        } else {
            Err(command_failed_error(last.name, last.status, last.stderr))
        }
    }
}

/// Kills and reaps stages that were started before a later one failed to spawn.
fn abort_stages(running: Vec<RunningStage>) {
    for mut stage in running {
        if let Err(e) = stage.child.kill() {
            debug!("Could not kill {}: {e}", stage.name);
        }
        let _ = stage.child.wait();
        let _ = collect_stderr(stage.stderr);
    }
}
