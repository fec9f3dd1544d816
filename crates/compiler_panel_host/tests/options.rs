use std::fs;
use std::time::Duration;

use compiler_panel_core::{CompilerInfo, FilterSet, SourceId};
use compiler_panel_host::{OptionsError, SiteOptions};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const SITE: &str = r#"(
    compilers: [
        (id: "g92", name: "x86-64 gcc 9.2"),
        (id: "clang900", name: "x86-64 clang 9.0.0"),
    ],
    compile_options: "-O2",
    endpoint: "http://compiler.internal:10240/compile",
    debounce_ms: 250,
)"#;

#[test]
fn loads_site_options_from_ron_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("site.ron");
    fs::write(&path, SITE).unwrap();

    let options = SiteOptions::load(&path).unwrap();

    assert_eq!(
        options.compilers[0],
        CompilerInfo {
            id: "g92".to_string(),
            name: "x86-64 gcc 9.2".to_string(),
        }
    );
    assert_eq!(options.default_compiler(), "g92");
    assert_eq!(options.panel_settings().debounce, Duration::from_millis(250));
    assert_eq!(
        options.client_settings().endpoint,
        "http://compiler.internal:10240/compile"
    );

    let defaults = options.panel_defaults();
    assert_eq!(defaults.compiler, "g92");
    assert_eq!(defaults.options, "-O2");
    assert_eq!(defaults.source, SourceId::Number(1));
    assert_eq!(
        defaults.filters,
        FilterSet::from_iter(["commentOnly", "directives", "intel", "labels"])
    );
}

#[test]
fn explicit_default_compiler_wins() {
    let options = SiteOptions::from_ron_str(
        r#"(compilers: [(id: "a", name: "A")], default_compiler: Some("b"))"#,
    )
    .unwrap();
    assert_eq!(options.default_compiler(), "b");
}

#[test]
fn empty_options_use_built_in_defaults() {
    let options = SiteOptions::from_ron_str("()").unwrap();

    assert_eq!(options, SiteOptions::default());
    assert_eq!(options.default_compiler(), "");
    assert_eq!(options.panel_settings().debounce, Duration::from_millis(500));
}

#[test]
fn missing_file_and_bad_syntax_are_errors() {
    let temp = TempDir::new().unwrap();

    let err = SiteOptions::load(&temp.path().join("absent.ron")).unwrap_err();
    assert!(matches!(err, OptionsError::Io(_)));

    let err = SiteOptions::from_ron_str("(compilers: [").unwrap_err();
    assert!(matches!(err, OptionsError::Parse(_)));
}
