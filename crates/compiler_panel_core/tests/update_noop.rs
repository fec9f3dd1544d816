use compiler_panel_core::{
    update, Msg, PanelConfig, PanelDefaults, PanelSettings, PanelState, PersistedPanelState,
};

#[test]
fn update_is_noop() {
    let config = PanelConfig::resolve(PersistedPanelState::default(), &PanelDefaults::default());
    let state = PanelState::new(config, PanelSettings::default());
    let (next, effects) = update(state.clone(), Msg::NoOp);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}
