//! Compiler panel core: pure state machine and view-model helpers.
mod config;
mod effect;
mod ids;
mod msg;
mod request;
mod state;
mod update;
mod view_model;

pub use config::{
    CompilerInfo, FilterSet, FilterToggle, PanelConfig, PanelDefaults, PanelSettings,
    PersistedPanelState, DEFAULT_DEBOUNCE,
};
pub use effect::Effect;
pub use ids::SourceId;
pub use msg::{Msg, SourceEvent};
pub use request::{
    AsmLine, CompileFailure, CompileOutcome, CompileRequest, CompileResult, RequestSeq, NO_OUTPUT,
};
pub use state::{Lifecycle, PanelState};
pub use update::update;
pub use view_model::{FilterToggleView, OutputArea, PanelViewModel, PANEL_TITLE, TOP_BAR_HEIGHT};
