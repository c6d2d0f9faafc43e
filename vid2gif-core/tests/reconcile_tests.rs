// vid2gif-core/tests/reconcile_tests.rs

use vid2gif_core::config::{ConversionConfigBuilder, PipelineChoice};
use vid2gif_core::{CoreError, Decimal, ErrorKind, canonicalize, reconcile};

fn dec(text: &str) -> Decimal {
    text.parse().expect("valid decimal")
}

#[test]
fn test_palette_delay_and_fps_are_consistent() -> Result<(), Box<dyn std::error::Error>> {
    // delay = floor(100 / fps) and the reported fps is 100 / delay.
    let cases = [
        ("10", 10, "10"),
        ("15", 6, "16.666"),
        ("24", 4, "25"),
        ("29.97", 3, "33.333"),
        ("50", 2, "50"),
        ("0.5", 200, "0.5"),
        ("100", 1, "100"),
    ];

    for (fps, expected_delay, expected_fps) in cases {
        let config = ConversionConfigBuilder::new()
            .fps(dec(fps))
            .pipeline(PipelineChoice::Never)
            .build();
        let params = reconcile(&config)?;

        assert!(!params.uses_high_quality_encoder);
        assert_eq!(params.delay, Some(expected_delay), "delay for {fps} fps");
        assert_eq!(params.fps.to_string(), expected_fps, "fps for {fps} fps");
        assert_eq!(
            params.warnings.is_empty(),
            canonicalize(fps) == expected_fps,
            "warning for {fps} fps"
        );
    }
    Ok(())
}

#[test]
fn test_framerate_ratio_is_never_reduced() -> Result<(), Box<dyn std::error::Error>> {
    let config = ConversionConfigBuilder::new()
        .fps(dec("20"))
        .speed(dec("2"))
        .build();
    let params = reconcile(&config)?;
    assert_eq!(params.framerate.to_string(), "20000/2000");

    let config = ConversionConfigBuilder::new()
        .fps(dec("10"))
        .speed(dec("1.5"))
        .build();
    let params = reconcile(&config)?;
    assert_eq!(params.framerate.to_string(), "10000/1500");
    Ok(())
}

#[test]
fn test_pipeline_selection_rules() -> Result<(), Box<dyn std::error::Error>> {
    let uses_hq = |builder: ConversionConfigBuilder| -> Result<bool, CoreError> {
        Ok(reconcile(&builder.build())?.uses_high_quality_encoder)
    };

    assert!(uses_hq(ConversionConfigBuilder::new())?);
    assert!(!uses_hq(ConversionConfigBuilder::new().text("caption"))?);
    assert!(!uses_hq(
        ConversionConfigBuilder::new().pipeline(PipelineChoice::Never)
    )?);
    assert!(!uses_hq(ConversionConfigBuilder::new().lossy(40))?);
    assert!(uses_hq(
        ConversionConfigBuilder::new()
            .colors(32)
            .pipeline(PipelineChoice::Always)
    )?);
    assert!(uses_hq(
        ConversionConfigBuilder::new()
            .text("caption")
            .pipeline(PipelineChoice::Always)
    )?);
    Ok(())
}

#[test]
fn test_high_quality_fps_is_untouched_without_delay() -> Result<(), Box<dyn std::error::Error>> {
    let config = ConversionConfigBuilder::new().fps(dec("30")).build();
    let params = reconcile(&config)?;
    assert!(params.uses_high_quality_encoder);
    assert_eq!(params.delay, None);
    assert_eq!(params.fps.to_string(), "30");
    assert!(params.warnings.is_empty());
    Ok(())
}

#[test]
fn test_arithmetic_errors() {
    let config = ConversionConfigBuilder::new()
        .fps(dec("101"))
        .pipeline(PipelineChoice::Never)
        .build();
    let err = reconcile(&config).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Arithmetic);

    let err = "twelve".parse::<Decimal>().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Arithmetic);
}

#[test]
fn test_canonical_output_is_stable() {
    for text in ["0.500", ".5", "12.000", "-.75", "3", "33.333"] {
        let once = canonicalize(text);
        assert_eq!(canonicalize(&once), once);
        assert_eq!(dec(text).to_string(), once);
    }
}
