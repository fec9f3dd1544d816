use chrono::{DateTime, Utc};

use crate::{FilterSet, SourceId};

/// Monotonic per-panel request sequence number.
pub type RequestSeq = u64;

/// Text of the synthetic line shown when the service returns no assembly.
pub const NO_OUTPUT: &str = "[no output]";

/// A compile request as submitted by one panel. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileRequest {
    pub seq: RequestSeq,
    pub source_id: SourceId,
    pub source_text: String,
    pub compiler: String,
    pub options: String,
    pub filters: FilterSet,
    /// Wall-clock submission time, only used for latency samples.
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsmLine {
    pub text: String,
    /// 1-based line in the source this instruction came from.
    pub source_line: Option<u32>,
    /// Inserted by the panel rather than produced by the compiler.
    pub synthetic: bool,
}

impl AsmLine {
    pub fn new(text: impl Into<String>, source_line: Option<u32>) -> Self {
        Self {
            text: text.into(),
            source_line,
            synthetic: false,
        }
    }

    pub fn synthetic(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source_line: None,
            synthetic: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileResult {
    pub code: i32,
    pub asm: Vec<AsmLine>,
}

/// A compile attempt that never produced a result (transport error, bad
/// status, unreadable body).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileFailure {
    pub message: String,
}

impl CompileFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

pub type CompileOutcome = Result<CompileResult, CompileFailure>;
