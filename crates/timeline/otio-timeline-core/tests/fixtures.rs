use anyhow::{Context, Result};
use otio_test_fixtures::{legacy, stacks};
use otio_timeline_core::{
    Composable, Composition, Config, ErrorKind, MediaReference, SerializableObject, Stack,
    TimeRange,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ExpectedRanges {
    #[serde(default)]
    available_range: Option<TimeRange>,
    #[serde(default)]
    error: Option<ErrorKind>,
    #[serde(default)]
    child_ranges: Vec<TimeRange>,
    #[serde(default)]
    trimmed_child_ranges: Vec<TimeRange>,
}

#[test]
fn every_stack_fixture_reports_its_expected_ranges() -> Result<()> {
    for name in stacks::keys() {
        let json = stacks::json(&name)?;
        let stack = Stack::from_json_string(&json).with_context(|| format!("parse {name}"))?;
        let expected: ExpectedRanges = stacks::expected(&name)?
            .with_context(|| format!("fixture {name} has no expectations"))?;

        match (expected.error, stack.available_range()) {
            (Some(kind), Err(err)) => assert_eq!(err.kind, kind, "{name}"),
            (None, Ok(range)) => assert_eq!(Some(range), expected.available_range, "{name}"),
            (want, got) => panic!("{name}: expected {want:?}, got {got:?}"),
        }

        if expected.error.is_some() {
            continue;
        }
        assert_eq!(stack.len(), expected.child_ranges.len(), "{name}");
        for (i, want) in expected.child_ranges.iter().enumerate() {
            assert_eq!(&stack.range_of_child_at_index(i)?, want, "{name} child {i}");
        }
        for (i, want) in expected.trimmed_child_ranges.iter().enumerate() {
            assert_eq!(
                &stack.trimmed_range_of_child_at_index(i)?,
                want,
                "{name} trimmed child {i}"
            );
        }
    }
    Ok(())
}

#[test]
fn fixtures_survive_a_write_read_cycle() -> Result<()> {
    for name in stacks::keys() {
        let original: serde_json::Value = stacks::load(&name)?;
        let stack = Stack::from_json_string(&stacks::json(&name)?)?;
        let written = stack.to_json_value()?;
        assert_eq!(written, original, "{name} changed on rewrite");

        let reread = Stack::from_json_string(&stack.to_json_string(2)?)?;
        assert!(reread.is_equivalent_to(&stack), "{name}");
        assert_ne!(reread.id(), stack.id());
    }
    Ok(())
}

#[test]
fn strict_mode_rejects_unmodelled_children() -> Result<()> {
    let json = stacks::json("unknown-child")?;
    let strict = Config {
        strict_schemas: true,
        ..Config::default()
    };
    let err = Stack::from_json_with(&json, &strict).unwrap_err();
    assert_eq!(err.kind, ErrorKind::SchemaNotRegistered);
    assert!(err.message.contains("Transition.1"));

    let lenient = Stack::from_json_with(&json, &Config::default())?;
    let preserved = lenient.children()[1]
        .first_unknown_schema()
        .context("transition should be kept")?;
    assert_eq!(preserved, "Transition.1");
    Ok(())
}

#[test]
fn metadata_keeps_nested_values_and_order() -> Result<()> {
    let stack = Stack::from_json_string(&stacks::json("superimposed")?)?;
    let keys: Vec<&str> = stack.base.metadata.keys().collect();
    assert_eq!(keys, ["show", "shot"]);
    let shot = stack
        .base
        .metadata
        .get("shot")
        .and_then(|v| v.as_dictionary())
        .context("shot should be a dictionary")?;
    assert_eq!(shot.get_int("id")?, 10);
    assert_eq!(
        shot.get_double("frame_in").unwrap_err().kind,
        ErrorKind::TypeMismatch
    );
    assert_eq!(stack.base.effects[0].effect_name, "ColorCorrect");
    assert_eq!(stack.base.markers[0].comment, "check edge");
    Ok(())
}

#[test]
fn nested_track_is_concatenated_inside_the_stack() -> Result<()> {
    let stack = Stack::from_json_string(&stacks::json("nested")?)?;
    let track = stack.children()[0].as_track().context("first child is a track")?;
    assert_eq!(track.len(), 2);
    assert_eq!(
        track.range_of_child_at_index(1)?.start_time,
        track.range_of_child_at_index(0)?.duration
    );
    Ok(())
}

#[test]
fn legacy_clip_documents_are_upgraded() -> Result<()> {
    let clip = Composable::from_json_string(&legacy::json("clip-v1")?)?;
    let clip = clip.as_clip().context("legacy document is a clip")?;
    assert!(matches!(clip.media_reference(), Some(MediaReference::Missing(_))));
    assert_eq!(clip.to_json_value()?["OTIO_SCHEMA"], "Clip.2");
    Ok(())
}

#[test]
fn every_legacy_document_loads_without_unknown_schemas() -> Result<()> {
    let keys = legacy::keys();
    assert!(!keys.is_empty());
    for name in keys {
        let item = Composable::from_json_string(&legacy::json(&name)?)
            .with_context(|| format!("legacy fixture {name}"))?;
        assert!(
            item.first_unknown_schema().is_none(),
            "{name} kept an unknown schema"
        );
    }
    Ok(())
}
