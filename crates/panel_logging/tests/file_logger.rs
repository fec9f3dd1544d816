use std::fs;

use log::LevelFilter;
use panel_logging::{initialize, panel_info, panel_trace, LogDestination};
use tempfile::TempDir;

#[test]
fn file_destination_writes_enabled_levels_only() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("panel.log");

    initialize(LogDestination::File(path.clone()), LevelFilter::Info);
    panel_info!("attached {} to source {}", "panel#1", 1);
    panel_trace!("not written");
    log::logger().flush();

    let written = fs::read_to_string(&path).unwrap();
    assert!(written.contains("attached panel#1 to source 1"));
    assert!(!written.contains("not written"));
}

#[test]
fn terminal_is_the_default_destination() {
    assert_eq!(LogDestination::default(), LogDestination::Terminal);
}
