//! Compiler panel engine: compile service client, debounce timers and effect IO.
mod client;
mod engine;
mod state_slot;
mod types;
mod wire;

pub use client::{ClientSettings, CompileClient, ReqwestCompileClient};
pub use engine::EngineHandle;
pub use state_slot::{decode_state, encode_state, restore_config, StateSlotError};
pub use types::{CompileError, EngineEvent, FailureKind, PanelId};
