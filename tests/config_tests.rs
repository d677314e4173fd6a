use hotseat_battleship::{AnimationTiming, GameConfig, GRID_HEIGHT, GRID_WIDTH};

#[test]
fn test_defaults() {
    let config = GameConfig::default();
    assert_eq!(config.width, GRID_WIDTH);
    assert_eq!(config.height, GRID_HEIGHT);
    assert_eq!(config.ship_lengths, vec![2, 3]);
    assert!(config.validate().is_ok());
}

#[test]
fn test_partial_json_takes_defaults() -> anyhow::Result<()> {
    let config = GameConfig::from_json_str(r#"{ "width": 8, "ship_lengths": [2, 2, 4] }"#)?;
    assert_eq!(config.width, 8);
    assert_eq!(config.height, GRID_HEIGHT);
    assert_eq!(config.ship_lengths, vec![2, 2, 4]);
    assert_eq!(config.timing, AnimationTiming::default());
    Ok(())
}

#[test]
fn test_timing_json() -> anyhow::Result<()> {
    let config = GameConfig::from_json_str(r#"{ "timing": { "result_hold": 5 } }"#)?;
    assert_eq!(config.timing.result_hold, 5);
    assert_eq!(config.timing.projectile_step, AnimationTiming::default().projectile_step);
    Ok(())
}

#[test]
fn test_invalid_json_config() {
    assert!(GameConfig::from_json_str("{ not json").is_err());
    let err = GameConfig::from_json_str(r#"{ "ship_lengths": [] }"#).unwrap_err();
    assert!(err.to_string().contains("at least one ship"), "{}", err);
}

#[test]
fn test_round_trip_through_file() -> anyhow::Result<()> {
    let config = GameConfig {
        width: 9,
        pulses_per_second: 30,
        ..GameConfig::default()
    };
    let path = std::env::temp_dir().join(format!("hotseat-config-{}.json", std::process::id()));
    std::fs::write(&path, serde_json::to_string(&config)?)?;
    let loaded = GameConfig::load(&path);
    let _ = std::fs::remove_file(&path);
    assert_eq!(loaded?, config);
    Ok(())
}

#[test]
fn test_missing_file() {
    let err = GameConfig::load(std::path::Path::new("/nonexistent/hotseat.json")).unwrap_err();
    assert!(err.to_string().contains("/nonexistent/hotseat.json"));
}
