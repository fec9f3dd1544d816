use std::collections::HashMap;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use chrono::Utc;
use compiler_panel_core::CompileRequest;
use panel_logging::{panel_debug, panel_trace};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::client::{ClientSettings, CompileClient, ReqwestCompileClient};
use crate::{EngineEvent, PanelId};

enum EngineCommand {
    ArmDebounce {
        panel: PanelId,
        generation: u64,
        delay: Duration,
    },
    CancelDebounce {
        panel: PanelId,
    },
    Submit {
        panel: PanelId,
        request: CompileRequest,
    },
}

/// Handle to the IO worker: one thread driving a tokio runtime.
///
/// Every panel owns its own debounce timer slot; arming a panel's timer
/// aborts only that panel's previous timer. Compile calls are never cancelled
/// on the wire; their completions are reported and the panel decides whether
/// they are still wanted.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
    shutdown: CancellationToken,
}

impl EngineHandle {
    pub fn new(settings: ClientSettings) -> Self {
        Self::with_client(Arc::new(ReqwestCompileClient::new(settings)))
    }

    pub fn with_client(client: Arc<dyn CompileClient>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let shutdown = CancellationToken::new();
        let worker_shutdown = shutdown.clone();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            let mut timers: HashMap<PanelId, JoinHandle<()>> = HashMap::new();
            while let Ok(command) = cmd_rx.recv() {
                match command {
                    EngineCommand::ArmDebounce {
                        panel,
                        generation,
                        delay,
                    } => {
                        let task = runtime.spawn(debounce_timer(
                            panel,
                            generation,
                            delay,
                            event_tx.clone(),
                            worker_shutdown.clone(),
                        ));
                        if let Some(previous) = timers.insert(panel, task) {
                            previous.abort();
                        }
                    }
                    EngineCommand::CancelDebounce { panel } => {
                        if let Some(previous) = timers.remove(&panel) {
                            previous.abort();
                        }
                    }
                    EngineCommand::Submit { panel, request } => {
                        runtime.spawn(compile_task(
                            client.clone(),
                            panel,
                            request,
                            event_tx.clone(),
                            worker_shutdown.clone(),
                        ));
                    }
                }
            }
            worker_shutdown.cancel();
        });

        Self {
            cmd_tx,
            event_rx,
            shutdown,
        }
    }

    /// (Re)arms `panel`'s debounce timer; only the latest arming fires.
    pub fn arm_debounce(&self, panel: PanelId, generation: u64, delay: Duration) {
        let _ = self.cmd_tx.send(EngineCommand::ArmDebounce {
            panel,
            generation,
            delay,
        });
    }

    pub fn cancel_debounce(&self, panel: PanelId) {
        let _ = self.cmd_tx.send(EngineCommand::CancelDebounce { panel });
    }

    pub fn submit(&self, panel: PanelId, request: CompileRequest) {
        panel_debug!(
            "Submitting {} seq={} compiler={} source_len={}",
            panel,
            request.seq,
            request.compiler,
            request.source_text.len()
        );
        let _ = self.cmd_tx.send(EngineCommand::Submit { panel, request });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn debounce_timer(
    panel: PanelId,
    generation: u64,
    delay: Duration,
    event_tx: mpsc::Sender<EngineEvent>,
    shutdown: CancellationToken,
) {
    tokio::select! {
        _ = shutdown.cancelled() => {}
        _ = tokio::time::sleep(delay) => {
            panel_trace!("Debounce elapsed for {} generation={}", panel, generation);
            let _ = event_tx.send(EngineEvent::DebounceElapsed { panel, generation });
        }
    }
}

async fn compile_task(
    client: Arc<dyn CompileClient>,
    panel: PanelId,
    request: CompileRequest,
    event_tx: mpsc::Sender<EngineEvent>,
    shutdown: CancellationToken,
) {
    let result = tokio::select! {
        _ = shutdown.cancelled() => return,
        result = client.compile(&request) => result,
    };
    let _ = event_tx.send(EngineEvent::CompileCompleted {
        panel,
        request,
        result,
        received_at: Utc::now(),
    });
}
