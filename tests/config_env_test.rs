//! Environment overrides for Settings.
//!
//! Kept in its own test binary: it mutates process environment variables,
//! which would race with other tests loading settings.

use std::env;
use std::fs;

use tempfile::TempDir;

use sdui::config::{local_config_path, OutputFormat, Settings};

#[test]
fn given_env_vars_when_load_then_env_overrides_local_config() {
    let dir = TempDir::new().unwrap();
    fs::write(
        local_config_path(dir.path()),
        "max_depth = 8\nformat = \"text\"\n",
    )
    .unwrap();
    let load = || Settings::load_from(None, Some(dir.path()));

    env::set_var("SDUI_MAX_DEPTH", "40");
    env::set_var("SDUI_FORMAT", "json");
    env::set_var("SDUI_WARN_DUPLICATE_IDS", "false");
    let settings = load();

    env::set_var("SDUI_MAX_DEPTH", "not-a-number");
    let not_a_number = load();

    env::set_var("SDUI_MAX_DEPTH", "64");
    let beyond_ceiling = load();

    env::remove_var("SDUI_MAX_DEPTH");
    env::set_var("SDUI_FORMAT", "html");
    let unknown_format = load();

    env::remove_var("SDUI_FORMAT");
    env::remove_var("SDUI_WARN_DUPLICATE_IDS");

    let settings = settings.expect("load settings");
    assert_eq!(settings.max_depth, 40);
    assert_eq!(settings.format, OutputFormat::Json);
    assert!(!settings.warn_duplicate_ids);

    assert!(not_a_number.is_err(), "non-numeric SDUI_MAX_DEPTH is rejected");
    assert!(beyond_ceiling.is_err(), "SDUI_MAX_DEPTH above the ceiling is rejected");
    assert!(unknown_format.is_err(), "unknown SDUI_FORMAT is rejected");

    let restored = load().expect("load settings");
    assert_eq!(restored.max_depth, 8);
    assert_eq!(restored.format, OutputFormat::Text);
}
