use std::collections::BTreeMap;

use enum_map::Enum;
use strum::{AsRefStr, Display, EnumIter};
use tagswitch::prelude::*;
use tagswitch::{DispatchError, TableManifest};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Enum, EnumIter, AsRefStr, Display, Variant)]
#[strum(serialize_all = "snake_case")]
enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
}

const OPENING_HOURS: &str = r#"
name = "opening-hours"

[cases]
monday = 8
tuesday = 8
wednesday = 4
"#;

const WITHOUT_WEDNESDAY: &str = r#"
name = "opening-hours"
allow_partial = true

[cases]
monday = 8
tuesday = 8
"#;

#[test]
fn complete_manifest_builds_a_total_table() {
    let manifest = TableManifest::<u32>::from_toml_str(OPENING_HOURS, "opening-hours.toml")
        .expect("manifest should parse");
    assert_eq!(manifest.name, "opening-hours");
    assert!(!manifest.allow_partial);

    let table = manifest
        .into_table::<Weekday>()
        .expect("every weekday is listed");
    assert_eq!(table.name(), "opening-hours");
    assert_eq!(table.dispatch(Weekday::Monday), 8);
    assert_eq!(table.dispatch(Weekday::Wednesday), 4);
}

#[test]
fn missing_case_fails_at_load_time() {
    let manifest = TableManifest::<u32>::from_toml_str(WITHOUT_WEDNESDAY, "inline")
        .expect("manifest should parse");

    match manifest.into_table::<Weekday>() {
        Err(DispatchError::IncompleteTable { table, missing }) => {
            assert_eq!(table, "opening-hours");
            assert_eq!(missing, vec!["wednesday".to_string()]);
        }
        other => panic!("expected an incomplete table, got {other:?}"),
    }
}

#[test]
fn partial_manifest_requires_opt_in() {
    let allowed = TableManifest::<u32>::from_toml_str(WITHOUT_WEDNESDAY, "inline")
        .expect("manifest should parse")
        .into_partial_table::<Weekday>()
        .expect("partial tables are allowed");
    assert_eq!(allowed.missing(), vec![Weekday::Wednesday]);
    assert_eq!(allowed.try_dispatch(Weekday::Tuesday), Ok(8));
    let err = allowed
        .try_dispatch(Weekday::Wednesday)
        .expect_err("wednesday is not listed");
    assert_eq!(err.discriminant, Weekday::Wednesday);

    let mut strict = TableManifest::<u32>::from_toml_str(WITHOUT_WEDNESDAY, "inline")
        .expect("manifest should parse");
    strict.allow_partial = false;
    assert!(matches!(
        strict.into_partial_table::<Weekday>(),
        Err(DispatchError::IncompleteTable { .. })
    ));

    let complete = TableManifest::<u32>::from_toml_str(OPENING_HOURS, "inline")
        .expect("manifest should parse")
        .into_partial_table::<Weekday>()
        .expect("complete manifests are always accepted");
    assert!(complete.missing().is_empty());
}

#[test]
fn unknown_tag_is_rejected() {
    let manifest = TableManifest {
        name: "opening-hours".to_string(),
        allow_partial: true,
        cases: BTreeMap::from([("monday".to_string(), 8u32), ("sunday".to_string(), 0)]),
    };

    match manifest.into_partial_table::<Weekday>() {
        Err(DispatchError::UnknownTag { table, tag }) => {
            assert_eq!(table, "opening-hours");
            assert_eq!(tag, "sunday");
        }
        other => panic!("expected an unknown tag, got {other:?}"),
    }
}

#[test]
fn malformed_manifest_reports_its_origin() {
    let text = "name = \"broken\"\n[cases]\nmonday = \"eight\"\n";
    let err = TableManifest::<u32>::from_toml_str(text, "broken.toml")
        .expect_err("hours must be integers");
    match err {
        DispatchError::ManifestParseError { file, .. } => assert_eq!(file, "broken.toml"),
        other => panic!("expected a parse error, got {other:?}"),
    }
}

#[test]
fn manifest_roundtrips_through_a_file() {
    let dir = tempfile::tempdir().expect("temporary directory");
    let path = dir.path().join("nested").join("opening-hours.toml");

    let table = DispatchTable::<Weekday, u32>::builder("opening-hours")
        .on(Weekday::Monday, |_| 8)
        .on(Weekday::Tuesday, |_| 8)
        .on(Weekday::Wednesday, |_| 4)
        .build()
        .expect("every weekday is registered");

    let manifest = TableManifest::from_table(&table);
    manifest.save_to_toml(&path).expect("manifest should save");

    let loaded = TableManifest::<u32>::load_from_toml(&path).expect("manifest should load");
    assert_eq!(loaded, manifest);

    let reloaded = loaded.into_table::<Weekday>().expect("every weekday is listed");
    for day in Weekday::all() {
        assert_eq!(reloaded.dispatch(day), table.dispatch(day));
    }
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().expect("temporary directory");
    let result = TableManifest::<u32>::load_from_toml(&dir.path().join("absent.toml"));
    assert!(matches!(result, Err(DispatchError::IoError(_))));
}
