//! Golden Tests for Grave Plot Classification
//!
//! Runs the full load → classify → color → style/locate/report pipeline over
//! the fixture layer and over small hand-built collections.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use grave_plots::{
    assign_colors, frame, locate, most_unassigned_group, resolve_style, Classifier, Color,
    FeatureCollection, FillSource, GraveyardDirectory, LoadOptions, Palette, PlotError, PlotLayer,
    Projection, StatsReporter,
};
use serde_json::{json, Value};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

fn wgs84() -> LoadOptions {
    LoadOptions { projection: Projection::Wgs84, ..Default::default() }
}

fn load_fixture() -> FeatureCollection {
    FeatureCollection::from_path(fixture("graves.geojson"), &wgs84()).unwrap()
}

/// Collection of geometry-less features with the given properties
fn collection(props: Vec<Value>) -> FeatureCollection {
    let features: Vec<Value> = props
        .into_iter()
        .map(|p| json!({ "type": "Feature", "geometry": null, "properties": p }))
        .collect();
    let doc = json!({ "type": "FeatureCollection", "features": features });
    FeatureCollection::from_value(doc, &wgs84()).unwrap()
}

fn rgb() -> Palette {
    Palette::new(vec![Color::Red, Color::Green, Color::Blue]).unwrap()
}

// =============================================================================
// Fixture Layer
// =============================================================================

#[test]
fn test_fixture_statistics() {
    let fc = load_fixture();
    let result = Classifier::default().classify(&fc);
    let stats = StatsReporter::new(&result);

    assert_eq!(result.feature_count, 9);
    assert_eq!(stats.graveyard_count(), 3);
    assert_eq!(stats.target_group_plot_count(), 3);
    assert_eq!(
        stats.sample_attribute_keys(),
        &["friedhof", "grabId", "verstorbene", "grabstatus", "grabstelle"]
    );

    let top = stats.most_unassigned_group().unwrap();
    // Buschhoven and Heimerzheim both have 2; Buschhoven was seen first
    assert_eq!(top.group.as_deref(), Some("Buschhoven"));
    assert_eq!(top.count, 2);

    assert_eq!(result.statuses.as_slice(), &["belegt", "frei", "reserviert", "gesperrt"]);
    assert_eq!(result.plot_codes.len(), 4);
}

#[test]
fn test_fixture_status_colors_and_styles() {
    let fc = load_fixture();
    let result = Classifier::default().classify(&fc);
    let colors = assign_colors(result.statuses.iter(), &Palette::default());

    assert_eq!(colors.get("belegt"), Some(Color::Red));
    assert_eq!(colors.get("frei"), Some(Color::Green));
    assert_eq!(colors.get("reserviert"), Some(Color::Blue));
    assert_eq!(colors.get("gesperrt"), Some(Color::Yellow));

    for feature in &fc {
        let style = resolve_style(feature, &colors);
        assert_eq!(style.stroke.color, Color::Black);
        assert_eq!(style.stroke.width, 1.0);
        match feature.status() {
            Some(status) => assert_eq!(Some(style.fill), colors.get(status)),
            None => {
                assert_eq!(style.fill, Color::Gray);
                assert_eq!(style.fill_source, FillSource::Fallback);
            }
        }
    }
}

#[test]
fn test_fixture_locate_and_frame() {
    let fc = load_fixture();
    let first = locate("Heimerzheim", &fc).unwrap();
    assert_eq!(first.plot_id(), Some("H-1"));

    // multipolygon extent spans both parts
    let region = frame(first).unwrap();
    assert!((region.min_x - 6.9300).abs() < 1e-9);
    assert!((region.max_x - 6.9312).abs() < 1e-9);
    assert!((region.min_y - 50.7000).abs() < 1e-9);
    assert!((region.max_y - 50.7006).abs() < 1e-9);
}

#[test]
fn test_fixture_web_mercator_extent() {
    let fc =
        FeatureCollection::from_path(fixture("graves.geojson"), &LoadOptions::default()).unwrap();
    let region = frame(locate("Buschhoven", &fc).unwrap()).unwrap();
    // ~22 m wide at this latitude, in projected metres
    assert!(region.width() > 15.0 && region.width() < 30.0);
    assert!(region.min_x > 778_000.0 && region.min_x < 779_000.0);
    assert!(region.min_y > 6_560_000.0 && region.min_y < 6_570_000.0);
}

#[test]
fn test_fixture_directory_names() {
    let raw = std::fs::read_to_string(fixture("friedhof_directory.json")).unwrap();
    let dir = GraveyardDirectory::from_str(&raw).unwrap();
    assert_eq!(dir.names().as_slice(), &["Buschhoven", "3", "Ollheim", "7", "Heimerzheim", "11"]);
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_scenario_unassigned_tie_break() {
    let fc = collection(vec![
        json!({"friedhof": "X"}),
        json!({"friedhof": "X", "verstorbene": "1"}),
        json!({"friedhof": "Y"}),
    ]);
    let result = Classifier::default().classify(&fc);
    let entries: Vec<(Option<&str>, usize)> = result.unassigned.iter().collect();
    assert_eq!(entries, vec![(Some("X"), 1), (Some("Y"), 1)]);
    assert_eq!(most_unassigned_group(&result.unassigned).unwrap().group.as_deref(), Some("X"));
}

#[test]
fn test_scenario_status_colors() {
    let map = assign_colors(["active", "reserved", "active", "closed"], &rgb());
    assert_eq!(map.len(), 3);
    assert_eq!(map.get("active"), Some(Color::Red));
    assert_eq!(map.get("reserved"), Some(Color::Green));
    assert_eq!(map.get("closed"), Some(Color::Blue));
}

#[test]
fn test_scenario_locate_nowhere() {
    let fc = load_fixture();
    match locate("Nowhere", &fc) {
        Err(PlotError::NotFound { name }) => assert_eq!(name, "Nowhere"),
        other => panic!("Expected NotFound, got {:?}", other.map(|f| f.group())),
    }
}

#[test]
fn test_scenario_missing_status_style() {
    let fc = collection(vec![json!({"friedhof": "X"}), json!({"grabstatus": "unknown"})]);
    let without_unknown = assign_colors(["belegt"], &rgb());
    let with_unknown = assign_colors(["belegt", "unknown"], &rgb());
    let feature = &fc.features()[0];

    assert_eq!(resolve_style(feature, &with_unknown).fill, Color::Green);
    assert_eq!(resolve_style(feature, &without_unknown).fill, Color::Gray);

    // a literal "unknown" status is classified like any other
    let result = Classifier::default().classify(&fc);
    assert_eq!(result.statuses.as_slice(), &["unknown"]);
}

// =============================================================================
// Properties
// =============================================================================

#[test]
fn test_group_count_matches_distinct_present_groups() {
    let fc = load_fixture();
    let result = Classifier::default().classify(&fc);
    let expected: HashSet<&str> = fc.iter().filter_map(|f| f.group()).collect();
    assert_eq!(result.groups.len(), expected.len());
}

#[test]
fn test_unassigned_sum_matches_missing_occupants() {
    let fc = load_fixture();
    let result = Classifier::default().classify(&fc);
    let missing = fc
        .iter()
        .filter(|f| match f.property("verstorbene") {
            None | Some(Value::Null) => true,
            Some(Value::String(s)) => s.is_empty(),
            Some(_) => false,
        })
        .count();
    assert_eq!(result.unassigned.total(), missing);
    assert_eq!(missing, 6);
}

#[test]
fn test_color_reuse_starts_at_palette_size() {
    let palette = Palette::default();
    let statuses: Vec<String> = (0..palette.len() + 3).map(|i| format!("status-{}", i)).collect();
    let map = assign_colors(statuses.iter().map(String::as_str), &palette);

    let mut seen = HashSet::new();
    for (i, entry) in map.legend().iter().enumerate() {
        let fresh = seen.insert(entry.color);
        assert_eq!(fresh, i < palette.len(), "status {} reused too early or too late", i);
        assert_eq!(entry.color, palette.colors()[i % palette.len()]);
    }
}

#[test]
fn test_color_assignment_is_pure() {
    let statuses = ["belegt", "frei", "reserviert"];
    assert_eq!(assign_colors(statuses, &rgb()), assign_colors(statuses, &rgb()));
}

#[test]
fn test_empty_collection_reports_no_data() {
    let fc = collection(Vec::new());
    let result = Classifier::default().classify(&fc);
    let stats = StatsReporter::new(&result);
    assert_eq!(stats.graveyard_count(), 0);
    assert!(stats.sample_attribute_keys().is_empty());
    assert!(matches!(stats.most_unassigned_group(), Err(PlotError::EmptyData(_))));
    assert!(stats.report(&Default::default()).most_unassigned.is_none());
}

#[test]
fn test_reload_is_deterministic() {
    let raw = std::fs::read_to_string(fixture("graves.geojson")).unwrap();

    let mut first = PlotLayer::default();
    let mut second = PlotLayer::default();
    let a = first.reload(&raw).unwrap().clone();
    let b = second.reload(&raw).unwrap().clone();

    assert_eq!(a.classification, b.classification);
    assert_eq!(a.colors, b.colors);
    assert_eq!(a.digest, b.digest);
    assert_eq!(first.report().unwrap(), second.report().unwrap());

    // reloading in place replaces the snapshot with an identical one
    let again = first.reload(&raw).unwrap().clone();
    assert_eq!(again, a);
}

#[test]
fn test_decode_failure_is_reported() {
    let mut layer = PlotLayer::default();
    let err = layer.reload(r#"{"type": "Point", "coordinates": [0, 0]}"#).unwrap_err();
    assert!(matches!(err, PlotError::Decode(_)));
    assert!(!layer.is_loaded());
}
