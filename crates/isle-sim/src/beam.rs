use isle_geom::{Vec3, point_segment_distance_sq};

use crate::config::BeamConfig;
use crate::event::EntityId;
use crate::pirate::Pirate;
use crate::player::{EyeRig, Player};
use crate::state::RunState;

/// Ammo-gated timed weapon fired from the player's eyes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Beam {
    pub active: bool,
    /// Seconds left in the active window.
    pub timer: f32,
    /// Seconds until the beam may fire again.
    pub cooldown: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BeamTick {
    pub ended: bool,
}

impl Beam {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fires if idle, off cooldown, and ammo remains. Consumes exactly one ammo.
    pub fn try_activate(&mut self, run: &mut RunState, cfg: &BeamConfig) -> bool {
        if self.active || self.cooldown > 0.0 || run.ammo == 0 {
            return false;
        }
        if !run.spend_ammo() {
            return false;
        }
        self.active = true;
        self.timer = cfg.duration;
        true
    }

    /// Decays the cooldown and counts down the active window. On expiry the
    /// cooldown starts.
    pub fn tick(&mut self, dt: f32, cfg: &BeamConfig) -> BeamTick {
        if self.cooldown > 0.0 {
            self.cooldown = (self.cooldown - dt).max(0.0);
        }
        if !self.active {
            return BeamTick::default();
        }
        self.timer -= dt;
        if self.timer <= 0.0 {
            self.active = false;
            self.timer = 0.0;
            self.cooldown = cfg.cooldown;
            return BeamTick { ended: true };
        }
        BeamTick::default()
    }
}

/// One `(start, end)` segment per eye.
pub fn eye_segments(player: &Player, cfg: &BeamConfig) -> [(Vec3, Vec3); 2] {
    let head = player.head_position();
    let dir = player.facing();
    let right = dir.cross(Vec3::UP).normalized();
    let starts = match player.eyes {
        EyeRig::Synthesized => [
            head - right * cfg.eye_offset,
            head + right * cfg.eye_offset,
        ],
        EyeRig::Anchors(local) => {
            local.map(|l| head + right * l.x + Vec3::UP * l.y + dir * l.z)
        }
    };
    starts.map(|s| (s, s + dir * cfg.length))
}

/// Living pirates inside the body band whose XZ position lies within the
/// kill radius of any segment (boundary inclusive).
pub fn beam_hits<'a>(
    segments: &[(Vec3, Vec3)],
    player_y: f32,
    pirates: impl IntoIterator<Item = &'a Pirate>,
    cfg: &BeamConfig,
) -> Vec<EntityId> {
    let r2 = cfg.kill_radius * cfg.kill_radius;
    let lo = player_y - cfg.band_below;
    let hi = player_y + cfg.band_above;
    pirates
        .into_iter()
        .filter(|p| p.is_alive())
        .filter(|p| p.pos.y >= lo && p.pos.y <= hi)
        .filter(|p| {
            let at = p.pos.horizontal();
            segments
                .iter()
                .any(|&(s, e)| point_segment_distance_sq(at, s.horizontal(), e.horizontal()) <= r2)
        })
        .map(|p| p.id)
        .collect()
}
