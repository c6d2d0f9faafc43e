// ============================================================================
// vid2gif-cli/src/terminal.rs
// ============================================================================
//
// TERMINAL OUTPUT: Summary lines for finished conversions
//
// Output is routed through the `log` macros so that it lands on stderr with
// the rest of the diagnostics and respects the configured level.

use console::style;
use log::info;
use vid2gif_core::runner::StageFailure;
use vid2gif_core::{ConversionConfig, ConversionReport, MediaSink};

/// Formats a key/value status line with a bold value.
#[must_use]
pub fn status_line(label: &str, value: &str) -> String {
    format!("  {:<10} {}", format!("{label}:"), style(value).for_stderr().bold())
}

/// Prints a section header.
pub fn print_section(title: &str) {
    info!("{}", style(title).for_stderr().cyan().bold());
}

/// Prints a key/value status line.
pub fn print_status(label: &str, value: &str) {
    info!("{}", status_line(label, value));
}

/// Prints what a conversion did.
pub fn print_report(config: &ConversionConfig, report: &ConversionReport) {
    if report.dry_run {
        return;
    }

    print_section("Done");
    print_status("Pipeline", &report.pipeline.to_string());
    print_status("Frame rate", &format!("{} fps", report.params.fps));
    if let Some(delay) = report.params.delay {
        print_status("Delay", &format!("{delay}/100 s"));
    }
    if let Some(frames) = report.frame_count {
        print_status("Frames", &frames.to_string());
    }
    if let MediaSink::Path(path) = &config.output {
        print_status("Output", &path.display().to_string());
    }
    print_status("Time", &format!("{:.1}s", report.elapsed.as_secs_f64()));
    // Each failure was already logged as a warning by the process group.
    if let Some(summary) = secondary_summary(&report.secondary_failures) {
        print_status("Stages", &summary);
    }
}

/// One status value naming the upstream stages that failed, if any.
#[must_use]
pub fn secondary_summary(failures: &[StageFailure]) -> Option<String> {
    if failures.is_empty() {
        return None;
    }
    let names: Vec<&str> = failures.iter().map(|f| f.name.as_str()).collect();
    Some(format!("{} failed upstream", names.join(", ")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_line_alignment() {
        console::set_colors_enabled_stderr(false);
        assert_eq!(status_line("Frames", "42"), "  Frames:    42");
    }

    #[cfg(unix)]
    #[test]
    fn test_secondary_summary_lists_each_stage_once() {
        use std::os::unix::process::ExitStatusExt;
        use std::process::ExitStatus;

        assert_eq!(secondary_summary(&[]), None);

        let failures = [StageFailure {
            name: "/usr/bin/convert".to_string(),
            status: ExitStatus::from_raw(1 << 8),
            stderr: "no delegate".to_string(),
        }];
        assert_eq!(
            secondary_summary(&failures).as_deref(),
            Some("/usr/bin/convert failed upstream")
        );
    }
}
