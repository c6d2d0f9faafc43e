// ============================================================================
// vid2gif-core/src/external/tools.rs
// ============================================================================
//
// TOOL DISCOVERY: Installation and Capability Checks
//
// Before any scratch directory is created, every tool the selected pipeline
// needs is located and, where a feature depends on how the tool was built,
// asked for its capabilities.
//
// KEY COMPONENTS:
// - ToolProbe: Host access used for discovery (PATH lookup, output capture)
// - SystemProbe: ToolProbe backed by the `which` crate and std::process
// - Requirements / requirements_for: What a conversion needs
// - Toolchain: Resolved program paths handed to the runner

use super::Tool;
use crate::config::{ConversionConfig, ToolPaths};
use crate::error::{CoreError, CoreResult, command_start_error};
use crate::reconcile::EncodingParams;
use log::{debug, warn};
use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

// ============================================================================
// PROBING
// ============================================================================

/// Access to the host for locating and interrogating tools.
pub trait ToolProbe {
    /// Resolves `program` (a bare name or a path) to an executable.
    fn locate(&self, program: &OsStr) -> Option<PathBuf>;

    /// Runs `program` with `args` and returns its stdout and stderr combined.
    fn capture_output(&self, program: &Path, args: &[&str]) -> CoreResult<String>;
}

/// Probes the real system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProbe;

impl ToolProbe for SystemProbe {
    fn locate(&self, program: &OsStr) -> Option<PathBuf> {
        which::which(program).ok()
    }

    fn capture_output(&self, program: &Path, args: &[&str]) -> CoreResult<String> {
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| command_start_error(program.display().to_string(), e))?;

        // Exit status is ignored; some builds exit nonzero after printing help.
        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));
        Ok(text)
    }
}

// ============================================================================
// CAPABILITIES
// ============================================================================

/// A build-dependent feature of a tool, detected from its own output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capability {
    pub tool: Tool,
    pub name: &'static str,
    /// Arguments that make the tool list its features.
    pub probe_args: &'static [&'static str],
    /// Text that must appear in the probe output.
    pub marker: &'static str,
}

impl Capability {
    /// The decoder's subtitle burn-in filter (needs libass).
    pub const SUBTITLES_FILTER: Capability = Capability {
        tool: Tool::Ffmpeg,
        name: "subtitles filter",
        probe_args: &["-hide_banner", "-filters"],
        marker: "subtitles",
    };

    /// Lossy compression in the optimizer (a gifsicle 1.92+ feature).
    pub const LOSSY_COMPRESSION: Capability = Capability {
        tool: Tool::Gifsicle,
        name: "lossy compression (--lossy)",
        probe_args: &["--help"],
        marker: "--lossy",
    };
}

/// Tools and capabilities needed by one conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirements {
    pub tools: Vec<Tool>,
    pub capabilities: Vec<Capability>,
}

/// Works out what the conversion described by `config` and `params` needs.
#[must_use]
pub fn requirements_for(config: &ConversionConfig, params: &EncodingParams) -> Requirements {
    let mut tools = vec![Tool::Ffmpeg];
    let mut capabilities = Vec::new();

    if params.uses_high_quality_encoder {
        tools.push(Tool::Gifski);
    } else {
        tools.extend([Tool::Convert, Tool::Gifsicle]);
        capabilities.push(Capability::LOSSY_COMPRESSION);
    }

    if config.subtitles.is_some() {
        capabilities.insert(0, Capability::SUBTITLES_FILTER);
    }

    Requirements {
        tools,
        capabilities,
    }
}

// ============================================================================
// TOOLCHAIN
// ============================================================================

/// Programs used to run a conversion, keyed by tool.
#[derive(Debug, Clone, Default)]
pub struct Toolchain {
    programs: BTreeMap<Tool, PathBuf>,
}

impl Toolchain {
    /// A toolchain that uses the configured names as-is, without probing.
    #[must_use]
    pub fn unresolved(paths: &ToolPaths) -> Self {
        let programs = [Tool::Ffmpeg, Tool::Convert, Tool::Gifsicle, Tool::Gifski]
            .into_iter()
            .map(|tool| (tool, PathBuf::from(paths.get(tool))))
            .collect();
        Self { programs }
    }

    /// Program for `tool`, if it was resolved.
    #[must_use]
    pub fn get(&self, tool: Tool) -> Option<&Path> {
        self.programs.get(&tool).map(PathBuf::as_path)
    }

    /// Program for `tool`, or a dependency error.
    pub fn require(&self, tool: Tool) -> CoreResult<&Path> {
        self.get(tool)
            .ok_or_else(|| CoreError::DependencyNotFound(tool.to_string()))
    }
}

/// Locates every required tool and checks its capabilities.
pub fn discover_tools(
    requirements: &Requirements,
    paths: &ToolPaths,
    probe: &dyn ToolProbe,
) -> CoreResult<Toolchain> {
    let mut programs = BTreeMap::new();

    for &tool in &requirements.tools {
        let configured = paths.get(tool);
        match probe.locate(configured) {
            Some(found) => {
                debug!("Found {} ({}): {}", tool, tool.role(), found.display());
                programs.insert(tool, found);
            }
            None => {
                warn!("Dependency '{}' not found.", configured.to_string_lossy());
                return Err(CoreError::DependencyNotFound(
                    configured.to_string_lossy().into_owned(),
                ));
            }
        }
    }

    for capability in &requirements.capabilities {
        let program = programs
            .get(&capability.tool)
            .ok_or_else(|| CoreError::DependencyNotFound(capability.tool.to_string()))?;
        let output = probe.capture_output(program, capability.probe_args)?;
        if !output.contains(capability.marker) {
            warn!(
                "{} does not provide the {}",
                program.display(),
                capability.name
            );
            return Err(CoreError::MissingCapability {
                tool: program.display().to_string(),
                capability: capability.name.to_string(),
            });
        }
        debug!("{} provides the {}", capability.tool, capability.name);
    }

    Ok(Toolchain { programs })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConversionConfigBuilder, PipelineChoice};
    use crate::reconcile::reconcile;
    use std::collections::HashMap;

    /// Probe with a fixed set of installed programs and canned outputs.
    #[derive(Default)]
    struct FakeProbe {
        installed: Vec<&'static str>,
        outputs: HashMap<&'static str, &'static str>,
    }

    impl ToolProbe for FakeProbe {
        fn locate(&self, program: &OsStr) -> Option<PathBuf> {
            let name = program.to_str()?;
            self.installed
                .iter()
                .any(|&installed| installed == name)
                .then(|| PathBuf::from("/usr/bin").join(name))
        }

        fn capture_output(&self, program: &Path, _args: &[&str]) -> CoreResult<String> {
            let name = program.file_name().and_then(OsStr::to_str).unwrap_or("");
            Ok(self.outputs.get(name).copied().unwrap_or("").to_string())
        }
    }

    fn full_probe() -> FakeProbe {
        FakeProbe {
            installed: vec!["ffmpeg", "convert", "gifsicle", "gifski"],
            outputs: HashMap::from([
                ("ffmpeg", " ... subtitles         V->V       Render text subtitles"),
                ("gifsicle", "  --lossy[=LOSSINESS]   Alter image colors"),
            ]),
        }
    }

    #[test]
    fn test_requirements_for_high_quality() {
        let config = ConversionConfigBuilder::new().build();
        let params = reconcile(&config).unwrap();
        let reqs = requirements_for(&config, &params);
        assert_eq!(reqs.tools, vec![Tool::Ffmpeg, Tool::Gifski]);
        assert!(reqs.capabilities.is_empty());
    }

    #[test]
    fn test_requirements_for_palette_with_subtitles() {
        let config = ConversionConfigBuilder::new()
            .pipeline(PipelineChoice::Never)
            .subtitles(PathBuf::from("subs.srt"))
            .build();
        let params = reconcile(&config).unwrap();
        let reqs = requirements_for(&config, &params);
        assert_eq!(reqs.tools, vec![Tool::Ffmpeg, Tool::Convert, Tool::Gifsicle]);
        assert_eq!(
            reqs.capabilities,
            vec![Capability::SUBTITLES_FILTER, Capability::LOSSY_COMPRESSION]
        );
    }

    #[test]
    fn test_discover_resolves_paths() {
        let config = ConversionConfigBuilder::new().text("hi").build();
        let params = reconcile(&config).unwrap();
        let reqs = requirements_for(&config, &params);
        let toolchain = discover_tools(&reqs, &config.tools, &full_probe()).unwrap();
        assert_eq!(
            toolchain.get(Tool::Gifsicle),
            Some(Path::new("/usr/bin/gifsicle"))
        );
        assert_eq!(toolchain.get(Tool::Gifski), None);
        assert!(toolchain.require(Tool::Gifski).is_err());
    }

    #[test]
    fn test_missing_tool() {
        let probe = FakeProbe {
            installed: vec!["ffmpeg"],
            ..FakeProbe::default()
        };
        let config = ConversionConfigBuilder::new().build();
        let params = reconcile(&config).unwrap();
        let err = discover_tools(&requirements_for(&config, &params), &config.tools, &probe)
            .unwrap_err();
        assert!(matches!(err, CoreError::DependencyNotFound(ref name) if name == "gifski"));
    }

    #[test]
    fn test_missing_subtitles_filter() {
        let mut probe = full_probe();
        probe.outputs.insert("ffmpeg", "scale  V->V  Scale the input video size.");
        let config = ConversionConfigBuilder::new()
            .subtitles(PathBuf::from("subs.srt"))
            .build();
        let params = reconcile(&config).unwrap();
        let err = discover_tools(&requirements_for(&config, &params), &config.tools, &probe)
            .unwrap_err();
        match err {
            CoreError::MissingCapability { tool, capability } => {
                assert!(tool.ends_with("ffmpeg"));
                assert_eq!(capability, "subtitles filter");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_old_gifsicle_without_lossy() {
        let mut probe = full_probe();
        probe.outputs.insert("gifsicle", "Usage: gifsicle [OPTION | FILE | FRAME]...");
        let config = ConversionConfigBuilder::new()
            .pipeline(PipelineChoice::Never)
            .build();
        let params = reconcile(&config).unwrap();
        let err = discover_tools(&requirements_for(&config, &params), &config.tools, &probe)
            .unwrap_err();
        assert!(matches!(err, CoreError::MissingCapability { .. }));
    }

    #[test]
    fn test_unresolved_toolchain_uses_configured_names() {
        let toolchain = Toolchain::unresolved(&ToolPaths::default());
        assert_eq!(toolchain.get(Tool::Convert), Some(Path::new("convert")));
    }
}
