use crate::view_model::OutputArea;
use crate::{Effect, Msg, PanelState, SourceEvent, SourceId};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: PanelState, msg: Msg) -> (PanelState, Vec<Effect>) {
    // A closed panel has no transitions; late timers and responses land here.
    if state.is_closed() {
        return (state, Vec::new());
    }

    let effects = match msg {
        Msg::SourcesListed(ids) => {
            state.set_open_sources(ids);
            resolve_binding(&mut state)
        }
        Msg::Source(SourceEvent::Opened(id)) => {
            state.source_opened(id.clone());
            if id == state.config().source {
                bind(&mut state, id)
            } else {
                Vec::new()
            }
        }
        Msg::Source(SourceEvent::Closed(id)) => {
            state.source_closed(&id);
            if state.bound_source() == Some(&id) {
                // The source is gone; there is nobody left to notify.
                state.unbind();
            }
            Vec::new()
        }
        Msg::Source(SourceEvent::Replaced { previous, current }) => {
            state.source_closed(&previous);
            state.source_opened(current.clone());
            let was_bound = state.bound_source() == Some(&previous);
            if current == state.config().source {
                bind(&mut state, current)
            } else if was_bound {
                state.unbind();
                vec![Effect::DetachFromSource(previous)]
            } else {
                Vec::new()
            }
        }
        Msg::SourceSelected(id) => {
            state.set_source(id.clone());
            let mut effects = vec![Effect::PersistState(state.config().clone())];
            if state.is_source_open(&id) {
                effects.extend(bind(&mut state, id));
            } else if let Some(previous) = state.unbind() {
                effects.push(Effect::DetachFromSource(previous));
            }
            effects
        }
        Msg::SourceEdited(id) => {
            if state.bound_source() == Some(&id) {
                request_compile(&mut state)
            } else {
                Vec::new()
            }
        }
        Msg::CompilerSelected(compiler) => {
            if state.set_compiler(compiler) {
                config_changed(&mut state)
            } else {
                Vec::new()
            }
        }
        Msg::OptionsEdited(options) => {
            if state.set_options(options) {
                config_changed(&mut state)
            } else {
                Vec::new()
            }
        }
        Msg::FilterToggled { name, enabled } => {
            if state.set_filter(&name, enabled) {
                config_changed(&mut state)
            } else {
                Vec::new()
            }
        }
        Msg::DebounceElapsed {
            generation,
            source_text,
            now,
        } => {
            if !state.take_debounce(generation) || !state.can_compile() {
                return (state, Vec::new());
            }
            match (state.bound_source().cloned(), source_text) {
                (Some(source_id), Some(text)) => {
                    vec![Effect::SubmitCompile(state.build_request(source_id, text, now))]
                }
                _ => Vec::new(),
            }
        }
        Msg::CompileFinished {
            request,
            outcome,
            received_at,
        } => {
            if !state.is_current(request.seq) {
                // Superseded by a later submission; its response must not win.
                return (state, Vec::new());
            }
            let latency = (received_at - request.submitted_at)
                .to_std()
                .unwrap_or_default();
            match outcome {
                Ok(result) => {
                    state.apply_result(&result);
                    let mut effects = vec![Effect::RecordCompile {
                        compiler: request.compiler.clone(),
                        options: request.options.clone(),
                        code: Some(result.code),
                        latency,
                    }];
                    // Line references only make sense to the source they came from.
                    if state.bound_source() == Some(&request.source_id) {
                        effects.push(Effect::ForwardResult {
                            source: request.source_id.clone(),
                            request,
                            result,
                        });
                    }
                    effects
                }
                Err(failure) => {
                    state.apply_failure(failure.message);
                    vec![Effect::RecordCompile {
                        compiler: request.compiler,
                        options: request.options,
                        code: None,
                        latency,
                    }]
                }
            }
        }
        Msg::Opened => {
            state.mark_opened();
            Vec::new()
        }
        Msg::Resized { width, height } => {
            state.set_output_area(OutputArea::for_panel(width, height));
            Vec::new()
        }
        Msg::CloseRequested => {
            let mut effects = vec![Effect::CancelScheduledCompile];
            if let Some(previous) = state.close() {
                effects.push(Effect::DetachFromSource(previous));
            }
            effects.push(Effect::Unregister);
            effects
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

/// Rebinds after the open-source list was replaced wholesale.
fn resolve_binding(state: &mut PanelState) -> Vec<Effect> {
    let desired = state.config().source.clone();
    match state.bound_source().cloned() {
        Some(bound) if state.is_source_open(&bound) => Vec::new(),
        Some(_) => {
            // Bound source vanished from the list: same as it closing.
            state.unbind();
            if state.is_source_open(&desired) {
                bind(state, desired)
            } else {
                Vec::new()
            }
        }
        None if state.is_source_open(&desired) => bind(state, desired),
        None => {
            state.unbind();
            Vec::new()
        }
    }
}

/// Detaches from the current source (if any), attaches to `id` and compiles.
fn bind(state: &mut PanelState, id: SourceId) -> Vec<Effect> {
    let mut effects = Vec::new();
    if let Some(previous) = state.unbind() {
        effects.push(Effect::DetachFromSource(previous));
    }
    state.bind_to(id.clone());
    effects.push(Effect::AttachToSource(id));
    effects.extend(request_compile(state));
    effects
}

fn config_changed(state: &mut PanelState) -> Vec<Effect> {
    let mut effects = vec![Effect::PersistState(state.config().clone())];
    effects.extend(request_compile(state));
    effects
}

/// Trailing-edge debounce: every trigger restarts the window, and only the
/// timer of the last window may submit.
fn request_compile(state: &mut PanelState) -> Vec<Effect> {
    if !state.can_compile() {
        return Vec::new();
    }
    let generation = state.arm_debounce();
    vec![Effect::ScheduleCompile {
        generation,
        delay: state.debounce(),
    }]
}
