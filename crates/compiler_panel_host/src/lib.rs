//! Compiler panel host: runs panel effects against the engine, the source
//! panels, the layout system and the analytics sink.
mod analytics;
mod effects;
mod host;
mod layout;
mod options;
mod source;

pub use analytics::{AnalyticsSink, CompileSample, LogAnalytics};
pub use host::PanelHost;
pub use layout::LayoutHost;
pub use options::{OptionsError, SiteOptions};
pub use source::{SourcePanel, SourceRegistry};
