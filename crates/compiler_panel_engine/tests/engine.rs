use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Utc;
use compiler_panel_core::{AsmLine, CompileRequest, CompileResult, FilterSet, SourceId};
use compiler_panel_engine::{CompileClient, CompileError, EngineEvent, EngineHandle, PanelId};

#[derive(Default)]
struct RecordingClient {
    seen: Arc<Mutex<Vec<String>>>,
}

#[async_trait::async_trait]
impl CompileClient for RecordingClient {
    async fn compile(&self, request: &CompileRequest) -> Result<CompileResult, CompileError> {
        self.seen.lock().unwrap().push(request.source_text.clone());
        // Later requests answer first: "slow" sleeps longer than anything else.
        let delay = if request.source_text == "slow" { 150 } else { 10 };
        tokio::time::sleep(Duration::from_millis(delay)).await;
        Ok(CompileResult {
            code: 0,
            asm: vec![AsmLine::new(request.source_text.clone(), None)],
        })
    }
}

fn request(seq: u64, text: &str) -> CompileRequest {
    CompileRequest {
        seq,
        source_id: SourceId::Number(1),
        source_text: text.to_string(),
        compiler: "gcc-9".to_string(),
        options: String::new(),
        filters: FilterSet::new(),
        submitted_at: Utc::now(),
    }
}

fn collect(engine: &EngineHandle, wait: Duration) -> Vec<EngineEvent> {
    let mut events = Vec::new();
    while let Some(event) = engine.recv_timeout(wait) {
        events.push(event);
    }
    events
}

#[test]
fn rearming_a_panel_fires_only_the_latest_timer() {
    let engine = EngineHandle::with_client(Arc::new(RecordingClient::default()));
    let panel = PanelId(1);

    for generation in 1..=4 {
        engine.arm_debounce(panel, generation, Duration::from_millis(40));
    }

    let events = collect(&engine, Duration::from_millis(200));
    assert_eq!(
        events,
        vec![EngineEvent::DebounceElapsed {
            panel,
            generation: 4
        }]
    );
}

#[test]
fn panels_have_independent_timers() {
    let engine = EngineHandle::with_client(Arc::new(RecordingClient::default()));

    engine.arm_debounce(PanelId(1), 1, Duration::from_millis(30));
    engine.arm_debounce(PanelId(2), 1, Duration::from_millis(30));
    engine.arm_debounce(PanelId(2), 2, Duration::from_millis(30));

    let mut events = collect(&engine, Duration::from_millis(200));
    events.sort_by_key(|event| match event {
        EngineEvent::DebounceElapsed { panel, .. } => panel.0,
        _ => u64::MAX,
    });
    assert_eq!(
        events,
        vec![
            EngineEvent::DebounceElapsed {
                panel: PanelId(1),
                generation: 1
            },
            EngineEvent::DebounceElapsed {
                panel: PanelId(2),
                generation: 2
            },
        ]
    );
}

#[test]
fn cancelled_timer_never_fires() {
    let engine = EngineHandle::with_client(Arc::new(RecordingClient::default()));

    engine.arm_debounce(PanelId(1), 1, Duration::from_millis(30));
    engine.cancel_debounce(PanelId(1));

    assert!(collect(&engine, Duration::from_millis(150)).is_empty());
}

#[test]
fn completions_are_reported_in_arrival_order() {
    let client = RecordingClient::default();
    let seen = client.seen.clone();
    let engine = EngineHandle::with_client(Arc::new(client));
    let panel = PanelId(7);

    engine.submit(panel, request(1, "slow"));
    engine.submit(panel, request(2, "fast"));

    let events = collect(&engine, Duration::from_millis(400));
    let seqs: Vec<_> = events
        .iter()
        .map(|event| match event {
            EngineEvent::CompileCompleted {
                panel: from,
                request,
                result,
                ..
            } => {
                assert_eq!(*from, panel);
                assert!(result.is_ok());
                request.seq
            }
            other => panic!("unexpected event {other:?}"),
        })
        .collect();

    assert_eq!(seqs, vec![2, 1]);
    assert_eq!(seen.lock().unwrap().len(), 2);
}
