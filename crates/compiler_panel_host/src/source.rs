use std::collections::BTreeMap;
use std::sync::Arc;

use compiler_panel_core::{CompileRequest, CompileResult, SourceId};
use compiler_panel_engine::PanelId;

/// What a compiler panel needs from the editor panel it compiles.
///
/// Compiler panels only read the text and register as listeners; they never
/// change the source. One source may serve many compiler panels.
pub trait SourcePanel: Send + Sync {
    fn id(&self) -> SourceId;
    fn source(&self) -> String;
    fn on_compiler_attach(&self, panel: PanelId);
    fn on_compiler_detach(&self, panel: PanelId);
    fn on_compile_response(&self, panel: PanelId, request: &CompileRequest, result: &CompileResult);
}

/// Currently open source panels, keyed by id.
#[derive(Default)]
pub struct SourceRegistry {
    sources: BTreeMap<SourceId, Arc<dyn SourcePanel>>,
    // Panels swapped out by `replace`, reachable for detach notifications
    // until `clear_retired`.
    retired: Vec<Arc<dyn SourcePanel>>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `source`, returning the panel it displaced, if any.
    pub fn insert(&mut self, source: Arc<dyn SourcePanel>) -> Option<Arc<dyn SourcePanel>> {
        self.sources.insert(source.id(), source)
    }

    pub fn remove(&mut self, id: &SourceId) -> Option<Arc<dyn SourcePanel>> {
        self.sources.remove(id)
    }

    /// Swaps the panel registered as `previous` for `source`, keeping the old
    /// one around as retired.
    pub fn replace(&mut self, previous: &SourceId, source: Arc<dyn SourcePanel>) {
        if let Some(old) = self.sources.remove(previous) {
            self.retired.push(old);
        }
        self.insert(source);
    }

    pub fn clear_retired(&mut self) {
        self.retired.clear();
    }

    pub fn get(&self, id: &SourceId) -> Option<&Arc<dyn SourcePanel>> {
        self.sources.get(id)
    }

    /// The panel a detach for `id` is meant for: a retired one first.
    pub fn detach_target(&self, id: &SourceId) -> Option<&Arc<dyn SourcePanel>> {
        self.retired
            .iter()
            .rev()
            .find(|source| source.id() == *id)
            .or_else(|| self.sources.get(id))
    }

    pub fn ids(&self) -> Vec<SourceId> {
        self.sources.keys().cloned().collect()
    }
}
