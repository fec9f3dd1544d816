use std::sync::Arc;

use compiler_panel_core::Effect;
use compiler_panel_engine::{encode_state, EngineHandle, PanelId};
use panel_logging::{panel_debug, panel_error, panel_info};

use crate::{AnalyticsSink, CompileSample, LayoutHost, SourceRegistry};

pub(crate) struct EffectRunner {
    engine: EngineHandle,
    layout: Arc<dyn LayoutHost>,
    analytics: Arc<dyn AnalyticsSink>,
}

impl EffectRunner {
    pub(crate) fn new(
        engine: EngineHandle,
        layout: Arc<dyn LayoutHost>,
        analytics: Arc<dyn AnalyticsSink>,
    ) -> Self {
        Self {
            engine,
            layout,
            analytics,
        }
    }

    pub(crate) fn engine(&self) -> &EngineHandle {
        &self.engine
    }

    pub(crate) fn layout(&self) -> &dyn LayoutHost {
        self.layout.as_ref()
    }

    /// Runs `effects` for `panel` in order. Returns `true` once the panel
    /// asked to be unregistered.
    pub(crate) fn run(&self, panel: PanelId, effects: Vec<Effect>, sources: &SourceRegistry) -> bool {
        let mut unregistered = false;
        for effect in effects {
            match effect {
                Effect::AttachToSource(id) => {
                    panel_info!("{} attached to source {}", panel, id);
                    if let Some(source) = sources.get(&id) {
                        source.on_compiler_attach(panel);
                    }
                }
                Effect::DetachFromSource(id) => {
                    panel_info!("{} detached from source {}", panel, id);
                    if let Some(source) = sources.detach_target(&id) {
                        source.on_compiler_detach(panel);
                    }
                }
                Effect::ScheduleCompile { generation, delay } => {
                    self.engine.arm_debounce(panel, generation, delay);
                }
                Effect::CancelScheduledCompile => {
                    self.engine.cancel_debounce(panel);
                }
                Effect::SubmitCompile(request) => {
                    self.engine.submit(panel, request);
                }
                Effect::ForwardResult {
                    source,
                    request,
                    result,
                } => match sources.get(&source) {
                    Some(source) => source.on_compile_response(panel, &request, &result),
                    None => panel_debug!("{} result for missing source {}", panel, source),
                },
                Effect::RecordCompile {
                    compiler,
                    options,
                    code,
                    latency,
                } => {
                    self.analytics.record_compile(&CompileSample {
                        panel,
                        compiler,
                        options,
                        code,
                        latency,
                    });
                }
                Effect::PersistState(config) => match encode_state(&config) {
                    Ok(state) => self.layout.set_state(panel, state),
                    Err(err) => panel_error!("Failed to save state of {}: {}", panel, err),
                },
                Effect::Unregister => {
                    self.layout.unregister(panel);
                    unregistered = true;
                }
            }
        }
        unregistered
    }
}
