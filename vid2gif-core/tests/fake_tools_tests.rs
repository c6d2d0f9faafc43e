// vid2gif-core/tests/fake_tools_tests.rs
//
// Runs whole conversions against small shell scripts standing in for ffmpeg,
// gifski, convert and gifsicle.

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::{TempDir, tempdir};
use vid2gif_core::config::{ConversionConfigBuilder, PipelineChoice, ToolPaths};
use vid2gif_core::{CoreError, ErrorKind, PipelineKind, SystemProbe, run_conversion};

// Writing an executable while another test thread forks can leave the file
// busy, so these tests run one at a time.
static SERIAL: Mutex<()> = Mutex::new(());

const FAKE_FFMPEG: &str = r#"#!/bin/sh
if [ "$1" = "-hide_banner" ]; then
    echo " ... subtitles         V->V       Render text subtitles"
    exit 0
fi
for last; do :; done
if [ "$last" = "-" ]; then
    printf 'P6 fake frames'
    exit 0
fi
dir=$(dirname "$last")
for n in 1 2 10; do
    : > "$dir/$(printf 'frame%06d.png' "$n")"
done
"#;

const FAKE_GIFSICLE: &str = r#"#!/bin/sh
if [ "$1" = "--help" ]; then
    echo "  --lossy[=LOSSINESS]   Alter image colors to shrink output file size"
    exit 0
fi
printf '%s\n' "$@" > "$(dirname "$0")/gifsicle.args"
cat > "$2"
"#;

struct FakeTools {
    dir: TempDir,
}

impl FakeTools {
    fn new() -> Self {
        let tools = Self {
            dir: tempdir().expect("tool dir"),
        };
        tools.install("ffmpeg", FAKE_FFMPEG);
        tools.install(
            "gifski",
            "#!/bin/sh\nprintf '%s\\n' \"$@\" > \"$(dirname \"$0\")/gifski.args\"\nprintf 'GIF89a' > \"$2\"\n",
        );
        tools.install("convert", "#!/bin/sh\ncat\n");
        tools.install("gifsicle", FAKE_GIFSICLE);
        tools
    }

    fn install(&self, name: &str, script: &str) {
        let path = self.dir.path().join(name);
        fs::write(&path, script).expect("write fake tool");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).expect("chmod fake tool");
    }

    fn paths(&self) -> ToolPaths {
        ToolPaths {
            ffmpeg: self.dir.path().join("ffmpeg"),
            convert: self.dir.path().join("convert"),
            gifsicle: self.dir.path().join("gifsicle"),
            gifski: self.dir.path().join("gifski"),
        }
    }

    fn recorded_args(&self, tool: &str) -> Vec<String> {
        fs::read_to_string(self.dir.path().join(format!("{tool}.args")))
            .expect("recorded arguments")
            .lines()
            .map(str::to_string)
            .collect()
    }
}

fn is_empty_dir(path: &Path) -> bool {
    fs::read_dir(path).map(|mut entries| entries.next().is_none()).unwrap_or(false)
}

#[test]
fn test_high_quality_conversion_orders_frames_and_cleans_up() -> Result<(), Box<dyn std::error::Error>> {
    let _guard = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
    let tools = FakeTools::new();
    let work = tempdir()?;
    let scratch_base = work.path().join("scratch");
    let output = work.path().join("out.gif");

    let config = ConversionConfigBuilder::new()
        .input_path(PathBuf::from("in.mp4"))
        .output_path(output.clone())
        .reverse(true)
        .tools(tools.paths())
        .temp_dir(scratch_base.clone())
        .build();

    let report = run_conversion(&config, &SystemProbe)?;
    assert_eq!(report.pipeline, PipelineKind::HighQuality);
    assert_eq!(report.frame_count, Some(3));
    assert_eq!(fs::read(&output)?, b"GIF89a");

    let args = tools.recorded_args("gifski");
    let nosort = args.iter().position(|a| a == "--nosort").expect("--nosort");
    let frames: Vec<String> = args[nosort + 1..]
        .iter()
        .map(|f| Path::new(f).file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        frames,
        ["frame000010.png", "frame000002.png", "frame000001.png"]
    );

    // Frames lived in the scratch directory, which is gone now.
    assert!(!Path::new(&args[nosort + 1]).exists());
    assert!(is_empty_dir(&scratch_base));
    Ok(())
}

#[test]
fn test_encoder_failure_still_removes_scratch_dir() -> Result<(), Box<dyn std::error::Error>> {
    let _guard = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
    let tools = FakeTools::new();
    tools.install("gifski", "#!/bin/sh\necho 'encoder exploded' >&2\nexit 1\n");
    let work = tempdir()?;
    let scratch_base = work.path().join("scratch");

    let config = ConversionConfigBuilder::new()
        .input_path(PathBuf::from("in.mp4"))
        .output_path(work.path().join("out.gif"))
        .tools(tools.paths())
        .temp_dir(scratch_base.clone())
        .build();

    let err = run_conversion(&config, &SystemProbe).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Execution);
    assert!(err.to_string().contains("encoder exploded"));
    assert!(is_empty_dir(&scratch_base));
    Ok(())
}

#[test]
fn test_missing_tool_fails_before_scratch_dir() -> Result<(), Box<dyn std::error::Error>> {
    let _guard = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
    let tools = FakeTools::new();
    let work = tempdir()?;
    let scratch_base = work.path().join("scratch");

    let mut paths = tools.paths();
    paths.gifski = work.path().join("no-such-gifski");
    let config = ConversionConfigBuilder::new()
        .tools(paths)
        .temp_dir(scratch_base.clone())
        .build();

    let err = run_conversion(&config, &SystemProbe).unwrap_err();
    assert!(matches!(err, CoreError::DependencyNotFound(ref name) if name.contains("no-such-gifski")));
    assert!(!scratch_base.exists());
    Ok(())
}

#[test]
fn test_palette_conversion_pipes_stages() -> Result<(), Box<dyn std::error::Error>> {
    let _guard = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
    let tools = FakeTools::new();
    let work = tempdir()?;
    let output = work.path().join("out.gif");

    let config = ConversionConfigBuilder::new()
        .input_path(PathBuf::from("in.mp4"))
        .output_path(output.clone())
        .pipeline(PipelineChoice::Never)
        .fps("20".parse()?)
        .subtitles(PathBuf::from("subs.srt"))
        .tools(tools.paths())
        .temp_dir(work.path().join("scratch"))
        .build();

    let report = run_conversion(&config, &SystemProbe)?;
    assert_eq!(report.pipeline, PipelineKind::Palette);
    assert!(report.secondary_failures.is_empty());
    assert_eq!(fs::read_to_string(&output)?, "P6 fake frames");
    assert!(tools.recorded_args("gifsicle").contains(&"--delay=5".to_string()));
    assert!(is_empty_dir(&work.path().join("scratch")));
    Ok(())
}

#[test]
fn test_palette_middle_failure_is_secondary() -> Result<(), Box<dyn std::error::Error>> {
    let _guard = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
    let tools = FakeTools::new();
    tools.install("convert", "#!/bin/sh\ncat > /dev/null\necho 'no delegate' >&2\nexit 1\n");
    let work = tempdir()?;

    let config = ConversionConfigBuilder::new()
        .input_path(PathBuf::from("in.mp4"))
        .output_path(work.path().join("out.gif"))
        .text("caption")
        .tools(tools.paths())
        .temp_dir(work.path().join("scratch"))
        .build();

    let report = run_conversion(&config, &SystemProbe)?;
    assert_eq!(report.secondary_failures.len(), 1);
    assert!(report.secondary_failures[0].name.ends_with("convert"));
    assert_eq!(report.secondary_failures[0].stderr, "no delegate");
    Ok(())
}

#[test]
fn test_palette_final_stage_failure_removes_scratch_dir() -> Result<(), Box<dyn std::error::Error>> {
    let _guard = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
    let tools = FakeTools::new();
    tools.install(
        "gifsicle",
        "#!/bin/sh\nif [ \"$1\" = \"--help\" ]; then\n    echo '  --lossy[=LOSSINESS]'\n    exit 0\nfi\ncat > /dev/null\necho 'gifsicle: read error' >&2\nexit 1\n",
    );
    let work = tempdir()?;
    let scratch_base = work.path().join("scratch");

    let config = ConversionConfigBuilder::new()
        .input_path(PathBuf::from("in.mp4"))
        .output_path(work.path().join("out.gif"))
        .pipeline(PipelineChoice::Never)
        .tools(tools.paths())
        .temp_dir(scratch_base.clone())
        .build();

    let err = run_conversion(&config, &SystemProbe).unwrap_err();
    assert!(matches!(err, CoreError::CommandFailed { ref cmd, .. } if cmd.ends_with("gifsicle")));
    assert!(err.to_string().contains("read error"));
    assert!(is_empty_dir(&scratch_base));
    Ok(())
}

#[test]
fn test_gifsicle_without_lossy_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let _guard = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
    let tools = FakeTools::new();
    tools.install("gifsicle", "#!/bin/sh\necho 'Usage: gifsicle [OPTION | FILE | FRAME]...'\n");
    let work = tempdir()?;

    let config = ConversionConfigBuilder::new()
        .colors(16)
        .tools(tools.paths())
        .temp_dir(work.path().join("scratch"))
        .build();

    let err = run_conversion(&config, &SystemProbe).unwrap_err();
    assert!(matches!(err, CoreError::MissingCapability { .. }));
    assert_eq!(err.kind(), ErrorKind::Environment);
    Ok(())
}
