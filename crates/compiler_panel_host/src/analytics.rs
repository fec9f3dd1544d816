use std::time::Duration;

use compiler_panel_engine::PanelId;
use panel_logging::panel_info;

/// One accepted compile: what was asked for, how it went, how long it took.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileSample {
    pub panel: PanelId,
    pub compiler: String,
    pub options: String,
    /// Service status code; `None` when no response body was obtained.
    pub code: Option<i32>,
    pub latency: Duration,
}

pub trait AnalyticsSink: Send + Sync {
    fn record_compile(&self, sample: &CompileSample);
}

/// Writes samples to the log instead of an analytics service.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogAnalytics;

impl AnalyticsSink for LogAnalytics {
    fn record_compile(&self, sample: &CompileSample) {
        panel_info!(
            "Compile {} compiler={} options={:?} code={:?} latency_ms={}",
            sample.panel,
            sample.compiler,
            sample.options,
            sample.code,
            sample.latency.as_millis()
        );
    }
}
