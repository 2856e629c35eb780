//! Loading and applying `BridgeConfig`.

use std::path::PathBuf;

use scriptbridge::registry::OverloadError;
use scriptbridge::{
    BridgeConfig, Config, ConfigError, Dynamic, Module, ScriptError, ScriptState, TieBreak,
};

fn scratch_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("scriptbridge-{}-{}", std::process::id(), name))
}

#[test]
fn toml_round_trips_through_a_file() {
    let mut config = BridgeConfig::default();
    config.tie_break = TieBreak::Reject;
    config.globals.graphics = String::from("gfx");

    let path = scratch_path("bridge.toml");
    config.save(&path).unwrap();
    let loaded = BridgeConfig::load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(loaded, config);
}

#[test]
fn ron_round_trips_through_a_file() {
    let mut config = BridgeConfig::default();
    config.tie_break = TieBreak::Reject;
    config.globals.expose_subsystems = false;

    let path = scratch_path("bridge.ron");
    config.save(&path).unwrap();
    let loaded = BridgeConfig::load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(loaded, config);
}

#[test]
fn ron_source_is_parsed() {
    let config = BridgeConfig::from_ron_str(
        r#"(tie_break: reject, globals: (renderer: "r", expose_subsystems: true))"#,
    )
    .unwrap();
    assert_eq!(config.tie_break, TieBreak::Reject);
    assert_eq!(config.globals.renderer, "r");
    assert_eq!(config.globals.graphics, "graphics");
}

#[test]
fn malformed_sources_are_parse_errors() {
    assert!(matches!(
        BridgeConfig::from_toml_str("tie_break = 3"),
        Err(ConfigError::Parse(_))
    ));
    assert!(matches!(
        BridgeConfig::from_ron_str("(tie_break: sometimes)"),
        Err(ConfigError::Parse(_))
    ));
    assert!(matches!(
        BridgeConfig::default().save(scratch_path("bridge.json")),
        Err(ConfigError::UnsupportedFormat(_))
    ));
}

#[test]
fn loaded_tie_break_reaches_dispatch() {
    let config = BridgeConfig::from_toml_str("tie_break = \"reject\"").unwrap();
    let mut state = ScriptState::with_config(config);
    assert_eq!(state.registry().tie_break(), TieBreak::Reject);

    let module = Module::new("twice")
        .function("Twice", |x: i32| x * 2)
        .function("Twice", |x: f32| x * 2.0);
    state.install(module).unwrap();

    let err = state.call_function("Twice", vec![Dynamic::Int(2)]).unwrap_err();
    assert!(matches!(err, ScriptError::Overload(OverloadError::Ambiguous { .. })));
}
