// vid2gif-core/tests/argument_order_tests.rs

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use vid2gif_core::config::{ConversionConfigBuilder, PipelineChoice};
use vid2gif_core::{ConversionPlan, plan_conversion, reconcile};

fn os_strings(args: &[&str]) -> Vec<OsString> {
    args.iter().map(OsString::from).collect()
}

fn position(args: &[OsString], flag: &str) -> Option<usize> {
    args.iter().position(|arg| arg == flag)
}

#[test]
fn test_start_before_input_and_end_after() -> Result<(), Box<dyn std::error::Error>> {
    let config = ConversionConfigBuilder::new()
        .input_path(PathBuf::from("movie.mkv"))
        .start("5")
        .end("10")
        .build();
    let params = reconcile(&config)?;
    let plan = plan_conversion(&config, &params, Path::new("/scratch"))?;
    let decoder = plan.stages()[0].to_os_args();

    let ss = position(&decoder, "-ss").expect("-ss present");
    let input = position(&decoder, "-i").expect("-i present");
    let to = position(&decoder, "-to").expect("-to present");
    assert!(ss < input);
    assert!(input < to);
    assert_eq!(position(&decoder, "-t"), None);
    assert_eq!(decoder[ss + 1], OsString::from("5"));
    assert_eq!(decoder[to + 1], OsString::from("10"));
    Ok(())
}

#[test]
fn test_full_palette_invocations() -> Result<(), Box<dyn std::error::Error>> {
    let config = ConversionConfigBuilder::new()
        .input_path(PathBuf::from("in.mp4"))
        .output_path(PathBuf::from("out.gif"))
        .fps("25".parse()?)
        .speed("2".parse()?)
        .duration("3")
        .crop("100:100:0:0")
        .resize("50:50")
        .reverse(true)
        .vsync("cfr")
        .text("Hi there")
        .colors(128)
        .once(true)
        .build();
    let params = reconcile(&config)?;
    let plan = plan_conversion(&config, &params, Path::new("/unused"))?;

    let ConversionPlan::Palette {
        decoder,
        converter,
        optimizer,
    } = plan
    else {
        panic!("expected the palette pipeline");
    };

    assert_eq!(
        decoder.to_os_args(),
        os_strings(&[
            "-loglevel",
            "quiet",
            "-i",
            "in.mp4",
            "-t",
            "3",
            "-r",
            "25000/2000",
            "-vf",
            "crop=100:100:0:0,scale=50:50,reverse",
            "-vsync",
            "cfr",
            "-pix_fmt",
            "rgb24",
            "-f",
            "image2pipe",
            "-vcodec",
            "ppm",
            "-",
        ])
    );
    assert_eq!(
        converter.to_os_args(),
        os_strings(&[
            "-",
            "+dither",
            "-layers",
            "Optimize",
            "-gravity",
            "south",
            "-fill",
            "white",
            "-stroke",
            "black",
            "-strokewidth",
            "1",
            "-pointsize",
            "40",
            "-annotate",
            "+0+10",
            "Hi there",
            "gif:-",
        ])
    );
    assert_eq!(
        optimizer.to_os_args(),
        os_strings(&[
            "-o",
            "out.gif",
            "-O3",
            "--lossy=80",
            "--colors",
            "128",
            "--delay=4",
            "--no-warnings",
            "--no-loopcount",
        ])
    );
    Ok(())
}

#[test]
fn test_high_quality_decoder_writes_numbered_frames() -> Result<(), Box<dyn std::error::Error>> {
    let config = ConversionConfigBuilder::new()
        .pipeline(PipelineChoice::Always)
        .reverse(true)
        .quality(70)
        .build();
    let params = reconcile(&config)?;
    let plan = plan_conversion(&config, &params, Path::new("/scratch"))?;

    let ConversionPlan::HighQuality {
        decoder, encoder, ..
    } = plan
    else {
        panic!("expected the high-quality pipeline");
    };

    let decoder = decoder.to_os_args();
    assert_eq!(position(&decoder, "-vf"), None, "reverse is done by frame order");
    assert_eq!(
        decoder.last(),
        Some(&Path::new("/scratch").join("frame%06d.png").into_os_string())
    );

    assert_eq!(
        encoder.to_os_args(),
        os_strings(&[
            "-o", "-", "--fps", "10", "--quality", "70", "--quiet", "--nosort",
        ])
    );
    Ok(())
}
