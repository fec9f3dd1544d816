use compiler_panel_core::{FilterSet, PanelConfig, PanelDefaults, SourceId};
use compiler_panel_engine::{decode_state, encode_state, restore_config, StateSlotError};
use pretty_assertions::assert_eq;
use serde_json::json;

fn defaults() -> PanelDefaults {
    PanelDefaults {
        compiler: "g92".to_string(),
        options: "-O2".to_string(),
        filters: FilterSet::from_iter(["labels", "directives"]),
        source: SourceId::Number(1),
    }
}

#[test]
fn slot_layout_matches_layout_system_shape() {
    let config = PanelConfig {
        compiler: "gcc-9".to_string(),
        options: "-O2".to_string(),
        source: SourceId::Number(1),
        filters: FilterSet::from_iter(["labels"]),
    };

    assert_eq!(
        encode_state(&config).unwrap(),
        json!({
            "compiler": "gcc-9",
            "options": "-O2",
            "source": 1,
            "filters": {"labels": true},
        })
    );
}

#[test]
fn save_then_restore_yields_same_config() {
    let configs = [
        PanelConfig {
            compiler: "gcc-9".to_string(),
            options: "-O2 -Wall".to_string(),
            source: SourceId::Number(3),
            filters: FilterSet::from_iter(["labels", "intel", "commentOnly"]),
        },
        PanelConfig {
            compiler: "unknown-from-old-session".to_string(),
            options: String::new(),
            source: SourceId::from("scratch"),
            filters: FilterSet::new(),
        },
    ];

    for config in configs {
        let raw = encode_state(&config).unwrap();
        assert_eq!(restore_config(Some(&raw), &defaults()), config);
    }
}

#[test]
fn missing_slot_and_null_slot_resolve_to_defaults() {
    let expected = PanelConfig::resolve(Default::default(), &defaults());

    assert_eq!(restore_config(None, &defaults()), expected);
    assert_eq!(restore_config(Some(&serde_json::Value::Null), &defaults()), expected);
    assert_eq!(restore_config(Some(&json!({})), &defaults()), expected);
}

#[test]
fn disabled_filters_in_slot_are_dropped() {
    let restored = decode_state(&json!({"filters": {"labels": true, "binary": false}})).unwrap();
    assert_eq!(restored.filters, Some(FilterSet::from_iter(["labels"])));
    assert_eq!(restored.compiler, None);
}

#[test]
fn malformed_slot_is_an_error_but_restore_falls_back() {
    let raw = json!({"compiler": 42, "filters": "labels"});

    assert!(matches!(decode_state(&raw), Err(StateSlotError::Decode(_))));
    assert_eq!(
        restore_config(Some(&raw), &defaults()),
        PanelConfig::resolve(Default::default(), &defaults())
    );
}
