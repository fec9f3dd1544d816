use std::collections::BTreeSet;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::view_model::{FilterToggleView, OutputArea, PanelViewModel, PANEL_TITLE};
use crate::{
    AsmLine, CompileRequest, CompileResult, PanelConfig, PanelSettings, RequestSeq, SourceId,
    NO_OUTPUT,
};

/// Coarse binding lifecycle of a panel.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Lifecycle {
    #[default]
    Constructing,
    Bound(SourceId),
    Unbound,
    Closed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelState {
    config: PanelConfig,
    settings: PanelSettings,
    lifecycle: Lifecycle,
    open_sources: BTreeSet<SourceId>,
    // Debounce bookkeeping: only the timer with `pending_generation` may fire a compile.
    debounce_generation: u64,
    pending_generation: Option<u64>,
    next_seq: RequestSeq,
    latest_submitted: Option<RequestSeq>,
    awaiting: Option<RequestSeq>,
    output: Vec<AsmLine>,
    last_code: Option<i32>,
    last_error: Option<String>,
    output_area: Option<OutputArea>,
    opened: bool,
    dirty: bool,
}

impl PanelState {
    pub fn new(config: PanelConfig, settings: PanelSettings) -> Self {
        Self {
            config,
            settings,
            lifecycle: Lifecycle::Constructing,
            open_sources: BTreeSet::new(),
            debounce_generation: 0,
            pending_generation: None,
            next_seq: 1,
            latest_submitted: None,
            awaiting: None,
            output: Vec::new(),
            last_code: None,
            last_error: None,
            output_area: None,
            opened: false,
            dirty: true,
        }
    }

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    pub fn is_closed(&self) -> bool {
        self.lifecycle == Lifecycle::Closed
    }

    pub fn bound_source(&self) -> Option<&SourceId> {
        match &self.lifecycle {
            Lifecycle::Bound(id) => Some(id),
            _ => None,
        }
    }

    pub fn output(&self) -> &[AsmLine] {
        &self.output
    }

    /// Sequence number of the most recently submitted request, if any.
    pub fn latest_submitted(&self) -> Option<RequestSeq> {
        self.latest_submitted
    }

    /// Whether a submitted request has neither been applied nor discarded.
    pub fn is_awaiting_response(&self) -> bool {
        self.awaiting.is_some()
    }

    pub fn view(&self) -> PanelViewModel {
        let mut compiler_choices = self.settings.compilers.clone();
        compiler_choices.sort_by(|a, b| a.name.cmp(&b.name));
        let filters = self
            .settings
            .filter_toggles
            .iter()
            .map(|toggle| FilterToggleView {
                name: toggle.name.clone(),
                label: toggle.label.clone(),
                active: self.config.filters.contains(&toggle.name),
            })
            .collect();

        PanelViewModel {
            title: PANEL_TITLE.to_string(),
            lifecycle: self.lifecycle.clone(),
            desired_source: self.config.source.clone(),
            compiler: self.config.compiler.clone(),
            options: self.config.options.clone(),
            compiler_choices,
            filters,
            output: self.output.clone(),
            last_code: self.last_code,
            last_error: self.last_error.clone(),
            awaiting_response: self.awaiting.is_some(),
            output_area: self.output_area,
            opened: self.opened,
            dirty: self.dirty,
        }
    }

    /// Returns whether anything visible changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    // Binding.

    pub(crate) fn set_open_sources(&mut self, ids: impl IntoIterator<Item = SourceId>) {
        self.open_sources = ids.into_iter().collect();
    }

    pub(crate) fn source_opened(&mut self, id: SourceId) {
        self.open_sources.insert(id);
    }

    pub(crate) fn source_closed(&mut self, id: &SourceId) {
        self.open_sources.remove(id);
    }

    pub(crate) fn is_source_open(&self, id: &SourceId) -> bool {
        self.open_sources.contains(id)
    }

    /// Binds to `id`. A request still in flight was built from the previous
    /// binding, so its response is treated as stale.
    pub(crate) fn bind_to(&mut self, id: SourceId) {
        self.lifecycle = Lifecycle::Bound(id);
        self.latest_submitted = None;
        self.awaiting = None;
        self.mark_dirty();
    }

    /// Drops the current binding, leaving the panel unbound. The output is kept.
    pub(crate) fn unbind(&mut self) -> Option<SourceId> {
        let previous = match std::mem::replace(&mut self.lifecycle, Lifecycle::Unbound) {
            Lifecycle::Bound(id) => Some(id),
            _ => None,
        };
        self.mark_dirty();
        previous
    }

    pub(crate) fn close(&mut self) -> Option<SourceId> {
        let previous = self.unbind();
        self.lifecycle = Lifecycle::Closed;
        self.pending_generation = None;
        self.awaiting = None;
        previous
    }

    // Configuration.

    pub(crate) fn set_source(&mut self, id: SourceId) {
        self.config.source = id;
        self.mark_dirty();
    }

    pub(crate) fn set_compiler(&mut self, compiler: String) -> bool {
        if self.config.compiler == compiler {
            return false;
        }
        self.config.compiler = compiler;
        self.mark_dirty();
        true
    }

    pub(crate) fn set_options(&mut self, options: String) -> bool {
        if self.config.options == options {
            return false;
        }
        self.config.options = options;
        self.mark_dirty();
        true
    }

    pub(crate) fn set_filter(&mut self, name: &str, enabled: bool) -> bool {
        let changed = self.config.filters.set(name, enabled);
        if changed {
            self.mark_dirty();
        }
        changed
    }

    // Scheduling.

    pub(crate) fn can_compile(&self) -> bool {
        self.bound_source().is_some() && !self.config.compiler.is_empty()
    }

    pub(crate) fn debounce(&self) -> Duration {
        self.settings.debounce
    }

    /// Starts a new debounce window; timers from earlier windows become stale.
    pub(crate) fn arm_debounce(&mut self) -> u64 {
        self.debounce_generation += 1;
        self.pending_generation = Some(self.debounce_generation);
        self.debounce_generation
    }

    /// Consumes the pending window if `generation` is the latest one.
    pub(crate) fn take_debounce(&mut self, generation: u64) -> bool {
        if self.pending_generation == Some(generation) {
            self.pending_generation = None;
            true
        } else {
            false
        }
    }

    pub(crate) fn build_request(
        &mut self,
        source_id: SourceId,
        source_text: String,
        now: DateTime<Utc>,
    ) -> CompileRequest {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.latest_submitted = Some(seq);
        self.awaiting = Some(seq);
        self.mark_dirty();
        CompileRequest {
            seq,
            source_id,
            source_text,
            compiler: self.config.compiler.clone(),
            options: self.config.options.clone(),
            filters: self.config.filters.clone(),
            submitted_at: now,
        }
    }

    // Responses.

    pub(crate) fn is_current(&self, seq: RequestSeq) -> bool {
        self.latest_submitted == Some(seq)
    }

    pub(crate) fn apply_result(&mut self, result: &CompileResult) {
        self.awaiting = None;
        self.output = if result.asm.is_empty() {
            vec![AsmLine::synthetic(NO_OUTPUT)]
        } else {
            result.asm.clone()
        };
        self.last_code = Some(result.code);
        self.last_error = None;
        self.mark_dirty();
    }

    pub(crate) fn apply_failure(&mut self, message: String) {
        self.awaiting = None;
        self.last_error = Some(message);
        self.mark_dirty();
    }

    // Layout.

    pub(crate) fn mark_opened(&mut self) {
        self.opened = true;
        self.mark_dirty();
    }

    pub(crate) fn set_output_area(&mut self, area: OutputArea) {
        if self.output_area != Some(area) {
            self.output_area = Some(area);
            self.mark_dirty();
        }
    }
}
