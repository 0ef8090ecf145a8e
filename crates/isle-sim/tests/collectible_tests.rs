use isle_geom::Vec3;
use isle_sim::SpawnError;
use isle_sim::collectible::{CollectibleKind, Collectibles};
use isle_sim::config::{CollectibleConfig, SimConfig};
use isle_sim::event::IdAlloc;
use isle_world::Terrain;
use rand::SeedableRng;
use rand::rngs::SmallRng;

fn split_island() -> Terrain {
    let mut cfg = SimConfig::default().world;
    cfg.half = 16;
    Terrain::from_heights(&cfg, |x, _| if x < 0 { 3 } else { -4 })
}

#[test]
fn collectibles_fill_to_cap_over_water_only() {
    let terrain = split_island();
    let cfg = CollectibleConfig {
        max: 7,
        ..CollectibleConfig::default()
    };
    let mut rng = SmallRng::seed_from_u64(21);
    let mut ids = IdAlloc::default();
    let mut loot = Collectibles::new();
    let nobody = Vec3::new(-100.0, 0.0, -100.0);

    let mut clock = 0.0;
    for _ in 0..200 {
        clock += cfg.spawn_interval;
        let out = loot.update(cfg.spawn_interval, clock, nobody, &terrain, &cfg, &mut rng, &mut ids);
        assert!(out.picked.is_empty());
        assert!(loot.len() <= cfg.max);
    }
    assert_eq!(loot.len(), cfg.max);
    assert_eq!(
        loot.try_spawn(&terrain, &cfg, &mut rng, &mut ids),
        Err(SpawnError::AtCapacity { max: 7 })
    );

    for c in &loot.items {
        let col = terrain.column_at(c.pos.x, c.pos.z).unwrap();
        assert!(col.is_water(), "{:?} #{} on ({}, {})", c.kind, c.id.0, col.ix, col.iz);
        let lift = if c.kind == CollectibleKind::Gold { 0.12 } else { 0.0 };
        let rest = col.top_solid_y as f32 + 1.0 + cfg.rest_height + lift;
        assert!((c.base_y - rest).abs() < 1e-6);
        assert!(c.base_y > col.top_solid_y as f32 + 1.0);
        assert!((c.pos.y - c.base_y).abs() <= c.kind.bob_amp() + 1e-6);
    }
}

#[test]
fn dry_island_refuses_collectibles() {
    let mut world = SimConfig::default().world;
    world.half = 8;
    let terrain = Terrain::from_heights(&world, |_, _| 2);
    let cfg = CollectibleConfig::default();
    let mut rng = SmallRng::seed_from_u64(2);
    let mut ids = IdAlloc::default();
    let mut loot = Collectibles::new();
    assert_eq!(
        loot.try_spawn(&terrain, &cfg, &mut rng, &mut ids),
        Err(SpawnError::NoEligibleColumn {
            attempts: cfg.spawn_attempts
        })
    );
    assert!(loot.is_empty());
}

#[test]
fn chests_alone_request_a_model() {
    let terrain = split_island();
    let cfg = CollectibleConfig {
        max: 40,
        ..CollectibleConfig::default()
    };
    let mut rng = SmallRng::seed_from_u64(8);
    let mut ids = IdAlloc::default();
    let mut loot = Collectibles::new();
    for _ in 0..400 {
        let _ = loot.try_spawn(&terrain, &cfg, &mut rng, &mut ids);
    }
    assert!(!loot.is_empty());
    for c in &loot.items {
        assert_eq!(c.caps.iter().next().is_some(), c.kind == CollectibleKind::Chest);
    }
}
