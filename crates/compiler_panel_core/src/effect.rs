use std::time::Duration;

use crate::{CompileRequest, CompileResult, PanelConfig, SourceId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Tell the source panel a compiler now listens to it.
    AttachToSource(SourceId),
    /// Tell the source panel this compiler no longer listens to it.
    DetachFromSource(SourceId),
    /// Arm the panel's debounce timer, replacing any armed one.
    ScheduleCompile { generation: u64, delay: Duration },
    /// Disarm the panel's debounce timer.
    CancelScheduledCompile,
    /// Send the request to the compile service.
    SubmitCompile(CompileRequest),
    /// Hand an accepted result to the bound source panel.
    ForwardResult {
        source: SourceId,
        request: CompileRequest,
        result: CompileResult,
    },
    /// Outcome and latency sample for an accepted response.
    RecordCompile {
        compiler: String,
        options: String,
        code: Option<i32>,
        latency: Duration,
    },
    /// Write the configuration to the layout system's state slot.
    PersistState(PanelConfig),
    /// Remove the panel's registrations from the host.
    Unregister,
}
