use std::path::Path;

use isle_sim::{SimConfig, load_config_from_path};

#[test]
fn empty_toml_gives_defaults() {
    let cfg = SimConfig::from_toml_str("").unwrap();
    assert_eq!(cfg, SimConfig::default());
}

#[test]
fn partial_sections_keep_other_defaults() {
    let cfg = SimConfig::from_toml_str(
        r#"
        [pirates]
        kill_bonus = 7
        spawn_interval = 1.5

        [world]
        half = 12
        "#,
    )
    .unwrap();
    assert_eq!(cfg.pirates.kill_bonus, 7);
    assert_eq!(cfg.pirates.spawn_interval, 1.5);
    assert_eq!(cfg.pirates.max, 15);
    assert_eq!(cfg.world.half, 12);
    assert_eq!(cfg.world.sea_level, 0);
    assert_eq!(cfg.beam.max_ammo, 5);
    assert_eq!(cfg.fish.layers, vec![0.2, -0.8, -1.8]);
}

#[test]
fn bad_types_are_rejected() {
    assert!(SimConfig::from_toml_str("[beam]\nmax_ammo = \"lots\"").is_err());
}

#[test]
fn shipped_config_matches_defaults() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config/isle.toml");
    let cfg = load_config_from_path(&path).unwrap();
    assert_eq!(cfg, SimConfig::default());
}
