use isle_geom::Vec3;
use isle_sim::beam::{beam_hits, eye_segments};
use isle_sim::config::{BeamConfig, PlayerConfig, SimConfig};
use isle_sim::pirate::{Behavior, Pirate, PirateState};
use isle_sim::player::{EyeRig, Player};
use isle_sim::{EntityId, RemovalCause};
use isle_world::Terrain;

fn player_at_origin() -> Player {
    let cfg = SimConfig::default();
    let terrain = Terrain::from_heights(&cfg.world, |_, _| 2);
    let mut p = Player::spawn(EntityId(1), &terrain, &PlayerConfig::default());
    p.pos = Vec3::ZERO;
    p.yaw = 0.0;
    p
}

fn pirate(id: u64, x: f32, y: f32, z: f32) -> Pirate {
    Pirate::new(EntityId(id), Vec3::new(x, y, z), Vec3::ZERO, Behavior::None, 0.0)
}

#[test]
fn kill_radius_boundary_is_inclusive() {
    let cfg = BeamConfig::default();
    let mut player = player_at_origin();
    player.eyes = EyeRig::Anchors([Vec3::ZERO; 2]);
    let segs = eye_segments(&player, &cfg);

    let edge = pirate(2, 0.75, 0.0, 2.0);
    let outside = pirate(3, 0.76, 0.0, 2.0);
    let hits = beam_hits(&segs, player.pos.y, [&edge, &outside], &cfg);
    assert_eq!(hits, vec![EntityId(2)]);
}

#[test]
fn synthesized_eyes_straddle_the_facing() {
    let cfg = BeamConfig::default();
    let player = player_at_origin();
    let [(l, le), (r, re)] = eye_segments(&player, &cfg);
    assert!((l.x + r.x).abs() < 1e-6);
    assert!(((l.x - r.x).abs() - 2.0 * cfg.eye_offset).abs() < 1e-6);
    assert!((le.z - l.z - cfg.length).abs() < 1e-5);
    assert!((re.z - r.z - cfg.length).abs() < 1e-5);
    assert!((l.y - player.head_position().y).abs() < 1e-6);
}

#[test]
fn vertical_band_filters_targets() {
    let cfg = BeamConfig::default();
    let player = player_at_origin();
    let segs = eye_segments(&player, &cfg);
    let below = pirate(2, 0.0, -0.5, 2.0);
    let inside = pirate(3, 0.0, 1.0, 2.0);
    let above = pirate(4, 0.0, 1.6, 2.0);
    let hits = beam_hits(&segs, player.pos.y, [&below, &inside, &above], &cfg);
    assert_eq!(hits, vec![EntityId(3)]);
}

#[test]
fn targets_past_the_tip_or_behind_are_missed() {
    let cfg = BeamConfig::default();
    let player = player_at_origin();
    let segs = eye_segments(&player, &cfg);
    let far = pirate(2, 0.0, 0.0, cfg.length + 1.0);
    let behind = pirate(3, 0.0, 0.0, -1.0);
    assert!(beam_hits(&segs, player.pos.y, [&far, &behind], &cfg).is_empty());
}

#[test]
fn dying_pirates_are_not_hit_again() {
    let cfg = BeamConfig::default();
    let player = player_at_origin();
    let segs = eye_segments(&player, &cfg);
    let mut p = pirate(2, 0.0, 0.0, 2.0);
    p.state = PirateState::Dying {
        cause: RemovalCause::AttackCompleted,
    };
    assert!(beam_hits(&segs, player.pos.y, [&p], &cfg).is_empty());
}
