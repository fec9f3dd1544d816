use chrono::{DateTime, Utc};

use crate::{CompileOutcome, CompileRequest, SourceId};

/// Source panel lifecycle notifications from the layout system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceEvent {
    Opened(SourceId),
    Closed(SourceId),
    /// The panel hosting `previous` was swapped for one hosting `current`.
    Replaced { previous: SourceId, current: SourceId },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Full list of currently open source panels (sent once after construction
    /// and whenever the host rebuilds its panel list).
    SourcesListed(Vec<SourceId>),
    /// Incremental source panel change.
    Source(SourceEvent),
    /// User picked a different source panel to compile from.
    SourceSelected(SourceId),
    /// Text of a source panel changed.
    SourceEdited(SourceId),
    /// User picked a compiler.
    CompilerSelected(String),
    /// User edited the options box.
    OptionsEdited(String),
    /// User toggled one filter button.
    FilterToggled { name: String, enabled: bool },
    /// A debounce timer scheduled by `Effect::ScheduleCompile` fired.
    /// `source_text` is the bound source's text at that moment, if readable.
    DebounceElapsed {
        generation: u64,
        source_text: Option<String>,
        now: DateTime<Utc>,
    },
    /// The service answered (or failed to answer) a submitted request.
    CompileFinished {
        request: CompileRequest,
        outcome: CompileOutcome,
        received_at: DateTime<Utc>,
    },
    /// The layout system opened the panel.
    Opened,
    /// The layout system resized the panel.
    Resized { width: u32, height: u32 },
    /// The layout system is closing the panel.
    CloseRequested,
    /// Fallback for placeholder wiring.
    NoOp,
}
