use compiler_panel_engine::PanelId;
use serde_json::Value;

/// The layout system hosting the panels.
pub trait LayoutHost: Send + Sync {
    fn set_title(&self, panel: PanelId, title: &str);
    /// Replaces the panel's serialized state slot.
    fn set_state(&self, panel: PanelId, state: Value);
    /// The panel is gone; drop anything registered for it.
    fn unregister(&self, panel: PanelId);
}
