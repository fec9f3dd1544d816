use compiler_panel_core::{
    FilterSet, FilterToggle, PanelConfig, PanelDefaults, PersistedPanelState, SourceId,
};
use pretty_assertions::assert_eq;

fn toggles() -> Vec<FilterToggle> {
    vec![
        FilterToggle {
            name: "binary".to_string(),
            label: "11010".to_string(),
            enabled_by_default: false,
        },
        FilterToggle {
            name: "labels".to_string(),
            label: ".LX0:".to_string(),
            enabled_by_default: true,
        },
        FilterToggle {
            name: "directives".to_string(),
            label: ".text".to_string(),
            enabled_by_default: true,
        },
    ]
}

fn defaults() -> PanelDefaults {
    PanelDefaults::from_toggles("g92", "-O2", &toggles())
}

#[test]
fn defaults_take_filters_from_initially_enabled_toggles() {
    let defaults = defaults();
    assert_eq!(defaults.filters, FilterSet::from_iter(["directives", "labels"]));
    assert_eq!(defaults.source, SourceId::Number(1));
}

#[test]
fn empty_restored_state_resolves_to_defaults() {
    let config = PanelConfig::resolve(PersistedPanelState::default(), &defaults());

    assert_eq!(
        config,
        PanelConfig {
            compiler: "g92".to_string(),
            options: "-O2".to_string(),
            source: SourceId::Number(1),
            filters: FilterSet::from_iter(["directives", "labels"]),
        }
    );
}

#[test]
fn restored_fields_win_over_defaults_individually() {
    let restored = PersistedPanelState {
        compiler: None,
        options: Some("-O0 -g".to_string()),
        source: Some(SourceId::Number(2)),
        filters: None,
    };

    let config = PanelConfig::resolve(restored, &defaults());

    assert_eq!(config.compiler, "g92");
    assert_eq!(config.options, "-O0 -g");
    assert_eq!(config.source, SourceId::Number(2));
    assert_eq!(config.filters, defaults().filters);
}

#[test]
fn empty_compiler_falls_back_but_empty_options_are_kept() {
    let restored = PersistedPanelState {
        compiler: Some(String::new()),
        options: Some(String::new()),
        source: None,
        filters: Some(FilterSet::new()),
    };

    let config = PanelConfig::resolve(restored, &defaults());

    assert_eq!(config.compiler, "g92");
    assert_eq!(config.options, "");
    assert!(config.filters.is_empty());
}

#[test]
fn persisted_config_resolves_back_to_itself() {
    let configs = [
        PanelConfig {
            compiler: "clang-10".to_string(),
            options: "-O3 -march=native".to_string(),
            source: SourceId::Number(7),
            filters: FilterSet::from_iter(["intel", "labels"]),
        },
        PanelConfig {
            compiler: "no-such-compiler".to_string(),
            options: String::new(),
            source: SourceId::from("editor-a"),
            filters: FilterSet::new(),
        },
    ];

    for config in configs {
        assert_eq!(PanelConfig::resolve(config.to_persisted(), &defaults()), config);
    }
}
