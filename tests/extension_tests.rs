use std::collections::BTreeMap;

use clusterform::models::{DatabaseDefinition, ExtensionBinding, ExtensionSelection};
use clusterform::services::resolve_extensions;
use clusterform::MapperError;
use serde_json::json;

fn databases(names: &[&str]) -> Vec<DatabaseDefinition> {
    names
        .iter()
        .map(|name| DatabaseDefinition {
            database_name: name.to_string(),
            user_name: format!("{}_owner", name),
            ..Default::default()
        })
        .collect()
}

fn selection(db: &[usize], is_third_party: bool) -> ExtensionSelection {
    ExtensionSelection {
        db: db.to_vec(),
        is_third_party,
    }
}

fn binding(ext: &str, db: &str) -> ExtensionBinding {
    ExtensionBinding {
        ext: ext.to_string(),
        db: db.to_string(),
    }
}

#[test]
fn test_resolve_extensions_bindings_and_flags() {
    let mut extensions = BTreeMap::new();
    extensions.insert("pg_cron".to_string(), selection(&[0], false));
    extensions.insert("postgis".to_string(), selection(&[], false));
    extensions.insert("timescaledb".to_string(), selection(&[0, 1], true));

    let resolved = resolve_extensions(&extensions, &databases(&["app", "reports"])).unwrap();

    assert_eq!(
        resolved.db,
        vec![
            binding("pg_cron", "app"),
            binding("timescaledb", "app"),
            binding("timescaledb", "reports"),
        ]
    );
    assert_eq!(resolved.extra_vars.len(), 1);
    assert_eq!(resolved.extra_vars.get("enable_timescaledb"), Some(&json!(true)));
}

#[test]
fn test_third_party_without_databases_gets_no_flag() {
    let mut extensions = BTreeMap::new();
    extensions.insert("citus".to_string(), selection(&[], true));

    let resolved = resolve_extensions(&extensions, &databases(&["app"])).unwrap();

    assert!(resolved.db.is_empty());
    assert!(resolved.extra_vars.is_empty());
    assert!(resolved.into_extra_vars().unwrap().is_empty());
}

#[test]
fn test_out_of_range_database_index() {
    let mut extensions = BTreeMap::new();
    extensions.insert("pg_cron".to_string(), selection(&[5], false));

    let err = resolve_extensions(&extensions, &databases(&["app", "reports"])).unwrap_err();

    match err {
        MapperError::DatabaseIndexOutOfRange {
            extension,
            index,
            available,
        } => {
            assert_eq!(extension, "pg_cron");
            assert_eq!(index, 5);
            assert_eq!(available, 2);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_into_extra_vars_shape() {
    let mut extensions = BTreeMap::new();
    extensions.insert("timescaledb".to_string(), selection(&[0], true));

    let vars = resolve_extensions(&extensions, &databases(&["app"]))
        .unwrap()
        .into_extra_vars()
        .unwrap();

    assert_eq!(
        vars.get("postgresql_extensions"),
        Some(&json!([{"ext": "timescaledb", "db": "app"}]))
    );
    assert_eq!(vars.get("enable_timescaledb"), Some(&json!(true)));
}

#[test]
fn test_selection_deserializes_from_form() {
    let selection: ExtensionSelection =
        serde_json::from_value(json!({"db": [1, 2], "isThirdParty": true})).unwrap();
    assert_eq!(selection.db, vec![1, 2]);
    assert!(selection.is_third_party);

    let plain: ExtensionSelection = serde_json::from_value(json!({"db": [0]})).unwrap();
    assert!(!plain.is_third_party);
}
