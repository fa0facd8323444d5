use std::io::Write;
use std::path::Path;
use std::sync::Once;

use chatnav_app::config::{load_config, OverlayConfig};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(overlay_logging::initialize_for_tests);
}

#[test]
fn missing_file_yields_defaults() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let config = load_config(&dir.path().join("chatnav.ron"));
    assert_eq!(config, OverlayConfig::default());
}

#[test]
fn unparsable_file_yields_defaults() {
    init_logging();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "this is not ron").unwrap();

    let config = load_config(file.path());
    assert_eq!(config, OverlayConfig::default());
}

#[test]
fn partial_file_overrides_only_named_fields() {
    init_logging();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "(timings: (debounce_ms: 250))").unwrap();

    let config = load_config(file.path());
    assert_eq!(config.timings.debounce_ms, 250);
    // Everything unnamed keeps its default.
    assert_eq!(config.timings.highlight_ms, 2000);
    assert_eq!(config.selectors, OverlayConfig::default().selectors);
}

#[test]
fn selector_list_can_be_replaced_from_config() {
    init_logging();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"(selectors: (entries: [(selector: ".user-turn", purpose: "custom host page")]))"#
    )
    .unwrap();

    let config = load_config(file.path());
    assert_eq!(config.selectors.entries.len(), 1);
    assert_eq!(config.selectors.entries[0].selector, ".user-turn");
}

#[test]
fn load_config_accepts_a_plain_path() {
    init_logging();
    let config = load_config(Path::new("definitely-not-here/chatnav.ron"));
    assert_eq!(config, OverlayConfig::default());
}
