//! Configuration layering: JSON file first, then individual variables.

use tui_pge::core::{EngineConfig, Error};

// Only test in this binary that touches the process environment.
#[test]
fn env_overrides_json_file() {
    let path = std::env::temp_dir().join(format!("tui-pge-config-{}.json", std::process::id()));
    let json = serde_json::json!({
        "target_fps": 24,
        "max_frames": 10,
        "quit_on_escape": true,
    });
    std::fs::write(&path, serde_json::to_string_pretty(&json).unwrap()).unwrap();

    std::env::set_var("PGE_CONFIG", &path);
    std::env::set_var("PGE_MAX_FRAMES", "3");
    std::env::set_var("PGE_QUIT_ON_ESCAPE", "false");
    std::env::set_var("PGE_FIXED_TIMESTEP", "0.5");
    let config = EngineConfig::from_env();

    std::env::set_var("PGE_CONFIG", path.with_extension("missing"));
    let missing = EngineConfig::from_env();

    for var in ["PGE_CONFIG", "PGE_MAX_FRAMES", "PGE_QUIT_ON_ESCAPE", "PGE_FIXED_TIMESTEP"] {
        std::env::remove_var(var);
    }
    let _ = std::fs::remove_file(&path);

    let config = config.unwrap();
    assert_eq!(config.target_fps, 24);
    assert_eq!(config.max_frames, Some(3));
    assert!(!config.quit_on_escape);
    assert_eq!(config.fixed_timestep, Some(0.5));

    assert!(matches!(missing, Err(Error::NoFile(_))));
}

#[test]
fn config_serializes_back_to_json() {
    let config = EngineConfig::default().with_max_frames(7).with_fixed_timestep(0.25);
    let value = serde_json::to_value(&config).unwrap();
    assert_eq!(value["max_frames"], 7);
    assert_eq!(value["target_fps"], 60);
    assert_eq!(value["fixed_timestep"], 0.25);
    let back: EngineConfig = serde_json::from_value(value).unwrap();
    assert_eq!(back, config);
}
