#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn defaults_match_stock_wall() {
    let config = WallConfig::default();
    assert_eq!(config.fonts, vec![DEFAULT_FONT.to_owned()]);
    assert_eq!(config.paper_color, "#FFFA9E");
    assert_eq!(config.animation_ms, 40.0);
    assert_eq!(config.hover_buffer, 20.0);
    assert_eq!(config.note_font(), DEFAULT_FONT);
}

#[test]
fn blank_json_is_default() {
    assert_eq!(WallConfig::from_json("").unwrap(), WallConfig::default());
    assert_eq!(WallConfig::from_json("  \n").unwrap(), WallConfig::default());
    assert_eq!(WallConfig::from_json("{}").unwrap(), WallConfig::default());
}

#[test]
fn partial_json_keeps_other_defaults() {
    let config = WallConfig::from_json(r#"{"animation_ms": 120}"#).unwrap();
    assert_eq!(config.animation_ms, 120.0);
    assert_eq!(config.hover_buffer, 20.0);
    assert_eq!(config.fonts, vec![DEFAULT_FONT.to_owned()]);
}

#[test]
fn note_font_falls_back_to_first_preloaded() {
    let config = WallConfig::from_json(r#"{"fonts": ["serif", "monospace"]}"#).unwrap();
    assert_eq!(config.note_font(), "serif");
}

#[test]
fn explicit_note_font_wins() {
    let config = WallConfig::from_json(r#"{"fonts": ["serif"], "note_font": "cursive"}"#).unwrap();
    assert_eq!(config.note_font(), "cursive");
}

#[test]
fn empty_font_list_uses_default_font() {
    let config = WallConfig::from_json(r#"{"fonts": []}"#).unwrap();
    assert_eq!(config.note_font(), DEFAULT_FONT);
}

#[test]
fn malformed_json_is_config_error() {
    let err = WallConfig::from_json("{not json").unwrap_err();
    assert!(matches!(err, WallError::Config(_)));
    assert_eq!(err.error_code(), "E_CONFIG");
}

#[test]
fn wrong_field_type_is_config_error() {
    let err = WallConfig::from_json(r#"{"animation_ms": "slow"}"#).unwrap_err();
    assert!(matches!(err, WallError::Config(_)));
}

#[test]
fn negative_values_are_rejected() {
    assert!(WallConfig::from_json(r#"{"animation_ms": -1}"#).is_err());
    assert!(WallConfig::from_json(r#"{"hover_buffer": -5}"#).is_err());
}
