//! Codec for the panel's state slot in the layout system.
//!
//! The slot holds `{ compiler, options, source, filters }`; it is written after
//! every configuration change and read once when the panel is constructed.
use compiler_panel_core::{PanelConfig, PanelDefaults, PersistedPanelState};
use panel_logging::panel_error;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StateSlotError {
    #[error("panel state could not be encoded: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("panel state is malformed: {0}")]
    Decode(#[source] serde_json::Error),
}

pub fn encode_state(config: &PanelConfig) -> Result<Value, StateSlotError> {
    serde_json::to_value(config).map_err(StateSlotError::Encode)
}

/// Decodes a raw slot. `null` is an empty slot, not an error.
pub fn decode_state(raw: &Value) -> Result<PersistedPanelState, StateSlotError> {
    if raw.is_null() {
        return Ok(PersistedPanelState::default());
    }
    PersistedPanelState::deserialize(raw).map_err(StateSlotError::Decode)
}

/// Resolves the panel configuration from whatever the slot held.
///
/// A malformed slot is logged and treated as empty so the panel still opens.
pub fn restore_config(raw: Option<&Value>, defaults: &PanelDefaults) -> PanelConfig {
    let restored = match raw.map(decode_state).transpose() {
        Ok(restored) => restored.unwrap_or_default(),
        Err(err) => {
            panel_error!("Ignoring saved panel state: {}", err);
            PersistedPanelState::default()
        }
    };
    PanelConfig::resolve(restored, defaults)
}

