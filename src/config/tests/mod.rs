//! Unit tests for config module
//!
//! Tests configuration defaults and TOML parsing.
//! No filesystem dependencies - all in-memory.

#![allow(clippy::unwrap_used)]

use crate::{
    MediabarError,
    config::{Config, OutputFormat, ShiftConfig},
};

#[test]
fn config_default() {
    let config = Config::default();

    assert_eq!(config.output.format, OutputFormat::Json);
    assert_eq!(config.output.class_prefix, "custom-");
    assert!(config.output.title_fallback);
    assert!(!config.output.artist_fallback);
    assert_eq!(config.selection.player, None);
    assert_eq!(config.shift.interface, "org.mediabar.Control");
    assert_eq!(config.shift.member, "Shift");
    assert!(!config.logging.file);
    assert_eq!(config.source, None);
}

#[test]
fn config_empty_toml_is_default() {
    let config = Config::from_toml("").unwrap();

    assert_eq!(config, Config::default());
}

#[test]
fn config_partial_sections() {
    let toml_str = r#"
        [output]
        format = "text"
        artist_fallback = true

        [selection]
        player = "spotify"
        ignored_players = ["chromium", "kdeconnect"]
    "#;

    let config = Config::from_toml(toml_str).unwrap();

    assert_eq!(config.output.format, OutputFormat::Text);
    assert!(config.output.artist_fallback);
    assert!(config.output.title_fallback);
    assert_eq!(config.output.class_prefix, "custom-");
    assert_eq!(config.selection.player.as_deref(), Some("spotify"));
    assert_eq!(config.selection.ignored_players, vec!["chromium", "kdeconnect"]);
    assert_eq!(config.shift, ShiftConfig::default());
}

#[test]
fn config_shift_signal() {
    let toml_str = r#"
        [shift]
        interface = "org.example.Bar"
    "#;

    let config = Config::from_toml(toml_str).unwrap();

    assert_eq!(config.shift.interface, "org.example.Bar");
    assert_eq!(config.shift.member, "Shift");
}

#[test]
fn config_invalid_format_rejected() {
    let result = Config::from_toml("[output]\nformat = \"xml\"\n");

    assert!(matches!(
        result,
        Err(MediabarError::TomlParseError { ref location, .. }) if location == "string"
    ));
}

#[test]
fn config_serialize_roundtrip() {
    let original = Config::default();

    let toml_str = toml::to_string(&original).unwrap();
    let deserialized = Config::from_toml(&toml_str).unwrap();

    assert_eq!(original, deserialized);
}
