use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use compiler_panel_core::{
    update, CompileFailure, Msg, PanelDefaults, PanelSettings, PanelState, PanelViewModel,
    SourceEvent, SourceId, PANEL_TITLE,
};
use compiler_panel_engine::{restore_config, EngineEvent, EngineHandle, PanelId};
use panel_logging::{panel_debug, panel_info, panel_warn};
use serde_json::Value;

use crate::effects::EffectRunner;
use crate::{AnalyticsSink, LayoutHost, SiteOptions, SourcePanel, SourceRegistry};

/// Owns every compiler panel of one layout and drives them from a single
/// thread: layout/editor notifications come in through the methods below,
/// engine completions through [`PanelHost::pump`].
pub struct PanelHost {
    runner: EffectRunner,
    settings: PanelSettings,
    defaults: PanelDefaults,
    panels: BTreeMap<PanelId, PanelState>,
    sources: SourceRegistry,
    dirty: BTreeSet<PanelId>,
    next_panel: u64,
}

impl PanelHost {
    pub fn new(
        options: &SiteOptions,
        engine: EngineHandle,
        layout: Arc<dyn LayoutHost>,
        analytics: Arc<dyn AnalyticsSink>,
    ) -> Self {
        Self {
            runner: EffectRunner::new(engine, layout, analytics),
            settings: options.panel_settings(),
            defaults: options.panel_defaults(),
            panels: BTreeMap::new(),
            sources: SourceRegistry::new(),
            dirty: BTreeSet::new(),
            next_panel: 1,
        }
    }

    /// Constructs a compiler panel from its saved state slot (if any) and
    /// makes the first binding attempt.
    pub fn open_panel(&mut self, saved_state: Option<&Value>) -> PanelId {
        let panel = PanelId(self.next_panel);
        self.next_panel += 1;

        let config = restore_config(saved_state, &self.defaults);
        panel_info!(
            "Opening {} compiler={} source={}",
            panel,
            config.compiler,
            config.source
        );
        self.panels
            .insert(panel, PanelState::new(config, self.settings.clone()));
        self.runner.layout().set_title(panel, PANEL_TITLE);

        let open_sources = self.sources.ids();
        self.dispatch(panel, Msg::SourcesListed(open_sources));
        self.dispatch(panel, Msg::Opened);
        panel
    }

    pub fn close_panel(&mut self, panel: PanelId) {
        self.dispatch(panel, Msg::CloseRequested);
    }

    pub fn resize_panel(&mut self, panel: PanelId, width: u32, height: u32) {
        self.dispatch(panel, Msg::Resized { width, height });
    }

    pub fn add_source(&mut self, source: Arc<dyn SourcePanel>) {
        let id = source.id();
        if self.sources.get(&id).is_some() {
            // Same id registered again: the new panel takes over.
            self.replace_source(&id, source);
            return;
        }
        self.sources.insert(source);
        self.broadcast(Msg::Source(SourceEvent::Opened(id)));
    }

    pub fn remove_source(&mut self, id: &SourceId) {
        if self.sources.remove(id).is_some() {
            self.broadcast(Msg::Source(SourceEvent::Closed(id.clone())));
        }
    }

    /// Swaps the source panel registered as `previous` for `source`.
    pub fn replace_source(&mut self, previous: &SourceId, source: Arc<dyn SourcePanel>) {
        let current = source.id();
        self.sources.replace(previous, source);
        self.broadcast(Msg::Source(SourceEvent::Replaced {
            previous: previous.clone(),
            current,
        }));
        self.sources.clear_retired();
    }

    /// The text of source panel `id` changed.
    pub fn source_edited(&mut self, id: &SourceId) {
        self.broadcast(Msg::SourceEdited(id.clone()));
    }

    /// Delivers `msg` to one panel and runs the resulting effects. Messages for
    /// closed or unknown panels are dropped.
    pub fn dispatch(&mut self, panel: PanelId, msg: Msg) {
        let Some(state) = self.panels.remove(&panel) else {
            panel_debug!("Dropping message for unknown {}", panel);
            return;
        };
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        let unregistered = self.runner.run(panel, effects, &self.sources);
        if unregistered {
            self.dirty.remove(&panel);
            panel_info!("Closed {}", panel);
            return;
        }
        if was_dirty {
            self.dirty.insert(panel);
        }
        self.panels.insert(panel, state);
    }

    pub fn broadcast(&mut self, msg: Msg) {
        let panels: Vec<PanelId> = self.panels.keys().copied().collect();
        for panel in panels {
            self.dispatch(panel, msg.clone());
        }
    }

    /// Applies every engine event that has already arrived. Returns how many
    /// were handled.
    pub fn pump(&mut self) -> usize {
        let mut handled = 0;
        while let Some(event) = self.runner.engine().try_recv() {
            self.handle_engine_event(event);
            handled += 1;
        }
        handled
    }

    /// Like [`PanelHost::pump`], but first waits up to `timeout` for an event.
    pub fn pump_wait(&mut self, timeout: Duration) -> usize {
        match self.runner.engine().recv_timeout(timeout) {
            Some(event) => {
                self.handle_engine_event(event);
                1 + self.pump()
            }
            None => 0,
        }
    }

    pub fn view(&self, panel: PanelId) -> Option<PanelViewModel> {
        self.panels.get(&panel).map(PanelState::view)
    }

    pub fn panel_ids(&self) -> Vec<PanelId> {
        self.panels.keys().copied().collect()
    }

    /// Views of the panels that changed since the last call. Each view is a
    /// complete snapshot, so a renderer never shows a half-applied result.
    pub fn take_dirty_views(&mut self) -> Vec<(PanelId, PanelViewModel)> {
        let dirty = std::mem::take(&mut self.dirty);
        dirty
            .into_iter()
            .filter_map(|panel| self.view(panel).map(|view| (panel, view)))
            .collect()
    }

    fn handle_engine_event(&mut self, event: EngineEvent) {
        match event {
            EngineEvent::DebounceElapsed { panel, generation } => {
                let source_text = self
                    .panels
                    .get(&panel)
                    .and_then(PanelState::bound_source)
                    .and_then(|id| self.sources.get(id))
                    .map(|source| source.source());
                self.dispatch(
                    panel,
                    Msg::DebounceElapsed {
                        generation,
                        source_text,
                        now: Utc::now(),
                    },
                );
            }
            EngineEvent::CompileCompleted {
                panel,
                request,
                result,
                received_at,
            } => {
                let outcome = result.map_err(|err| {
                    panel_warn!("Compile request failed for {}: {}", panel, err);
                    CompileFailure::new(err.to_string())
                });
                self.dispatch(
                    panel,
                    Msg::CompileFinished {
                        request,
                        outcome,
                        received_at,
                    },
                );
            }
        }
    }
}
