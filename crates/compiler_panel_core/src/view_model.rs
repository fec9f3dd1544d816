use crate::{AsmLine, CompilerInfo, Lifecycle, SourceId};

pub const PANEL_TITLE: &str = "Compiled";

/// Height of the compiler picker / options / filters bar above the output.
pub const TOP_BAR_HEIGHT: u32 = 34;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputArea {
    pub width: u32,
    pub height: u32,
}

impl OutputArea {
    /// Output area left once the top bar is laid out in a `width` x `height` panel.
    pub fn for_panel(width: u32, height: u32) -> Self {
        Self {
            width,
            height: height.saturating_sub(TOP_BAR_HEIGHT),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterToggleView {
    pub name: String,
    pub label: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelViewModel {
    pub title: String,
    pub lifecycle: Lifecycle,
    pub desired_source: SourceId,
    pub compiler: String,
    pub options: String,
    /// Compiler catalogue sorted by display name.
    pub compiler_choices: Vec<CompilerInfo>,
    pub filters: Vec<FilterToggleView>,
    pub output: Vec<AsmLine>,
    pub last_code: Option<i32>,
    pub last_error: Option<String>,
    pub awaiting_response: bool,
    pub output_area: Option<OutputArea>,
    pub opened: bool,
    pub dirty: bool,
}

impl PanelViewModel {
    /// The output view's document, one assembly line per text line.
    pub fn output_text(&self) -> String {
        self.output
            .iter()
            .map(|line| line.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
