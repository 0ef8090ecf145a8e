use core::f32::consts::FRAC_PI_2;

use isle_geom::{Vec3, lerp_angle};
use isle_world::Terrain;

use crate::config::PlayerConfig;
use crate::enhancement::{AssetKind, Capabilities};
use crate::event::EntityId;
use crate::input::InputIntent;

/// Where the beam originates on the head.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EyeRig {
    /// Symmetric pair offset along the facing's right vector.
    Synthesized,
    /// Eye points in the head's local frame (x right, y up, z forward).
    Anchors([Vec3; 2]),
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LimbPose {
    pub left_leg: f32,
    pub right_leg: f32,
    pub left_arm: f32,
    pub right_arm: f32,
    pub torso: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PlayerTick {
    /// Set on the tick the player first becomes submerged.
    pub splash: Option<(f32, f32)>,
}

#[derive(Debug)]
pub struct Player {
    pub id: EntityId,
    pub pos: Vec3, // body center
    pub vel: Vec3,
    pub yaw: f32, // radians, from +Z toward +X
    pub on_ground: bool,
    pub is_swimming: bool,
    pub submerged: bool,
    pub half_height: f32,
    pub walk_phase: f32,
    pub flash_timer: f32,
    pub spawn_y: f32,
    /// Center height used when no column is under the player.
    pub ground_offset: f32,
    pub eyes: EyeRig,
    pub caps: Capabilities,
}

impl Player {
    /// Places the player on the column at the origin.
    pub fn spawn(id: EntityId, terrain: &Terrain, cfg: &PlayerConfig) -> Self {
        let ground_offset = cfg.half_height + cfg.y_adjust;
        let spawn_y = terrain
            .column(0, 0)
            .map_or(ground_offset, |c| standing_y(c.top_solid_y, cfg));
        Self {
            id,
            pos: Vec3::new(0.0, spawn_y, 0.0),
            vel: Vec3::ZERO,
            yaw: 0.0,
            on_ground: true,
            is_swimming: false,
            submerged: false,
            half_height: cfg.half_height,
            walk_phase: 0.0,
            flash_timer: 0.0,
            spawn_y,
            ground_offset,
            eyes: EyeRig::Synthesized,
            caps: Capabilities::of(&[AssetKind::Hat, AssetKind::HeadModel]),
        }
    }

    pub fn head_position(&self) -> Vec3 {
        self.pos + Vec3::new(0.0, self.half_height, 0.0)
    }

    #[inline]
    pub fn facing(&self) -> Vec3 {
        Vec3::from_yaw(self.yaw)
    }

    #[inline]
    pub fn feet_y(&self) -> f32 {
        self.pos.y - self.half_height
    }

    /// One tick of movement, gravity, swimming, and ground collision.
    /// `clock` is the simulation time in seconds and drives the surface bob.
    pub fn update(
        &mut self,
        input: &InputIntent,
        terrain: &Terrain,
        cfg: &PlayerConfig,
        dt: f32,
        clock: f32,
    ) -> PlayerTick {
        let mut out = PlayerTick::default();
        let world_move = input.world_move();
        if let Some(dir) = world_move {
            self.pos += dir * (cfg.speed * dt);
        }

        if input.jump && self.on_ground {
            self.vel.y = cfg.jump_speed;
            self.on_ground = false;
        }
        self.vel.y += cfg.gravity * dt;
        self.pos.y += self.vel.y * dt;

        if let Some(plane) = terrain.water_plane_y() {
            let submerged = self.feet_y() < plane - cfg.submerge_depth;
            if submerged && !self.submerged {
                out.splash = Some((self.pos.x, self.pos.z));
            }
            self.submerged = submerged;
            if !submerged {
                self.is_swimming = false;
            } else if input.jump && self.pos.y < plane {
                self.is_swimming = true;
                self.vel.y = (self.vel.y + cfg.swim_accel * dt).min(cfg.swim_max);
            } else if input.jump {
                self.is_swimming = true;
                let bob_center = plane + self.half_height + cfg.y_adjust;
                self.pos.y = bob_center + (clock * cfg.bob_freq).sin() * cfg.bob_amp;
                self.vel.y = 0.0;
            } else {
                self.is_swimming = false;
            }
        }

        let floor = terrain
            .column_at(self.pos.x, self.pos.z)
            .map_or(self.ground_offset, |c| standing_y(c.top_solid_y, cfg));
        if self.pos.y <= floor {
            self.pos.y = floor;
            self.vel.y = 0.0;
            self.on_ground = true;
        } else {
            self.on_ground = false;
        }

        let moving = input.any_move();
        if let Some(dir) = world_move.filter(|_| moving) {
            let t = (cfg.turn_rate * dt).min(1.0);
            self.yaw = lerp_angle(self.yaw, dir.yaw(), t);
        }
        if moving {
            self.walk_phase += dt * cfg.walk_rate;
        } else {
            self.walk_phase *= (1.0 - cfg.walk_rate * dt).max(0.0);
        }
        out
    }

    /// Starts (or restarts) the damage flash.
    pub fn start_flash(&mut self, secs: f32) {
        self.flash_timer = secs;
    }

    /// Counts the flash down; `true` on the tick it expires.
    pub fn tick_flash(&mut self, dt: f32) -> bool {
        if self.flash_timer <= 0.0 {
            return false;
        }
        self.flash_timer = (self.flash_timer - dt).max(0.0);
        self.flash_timer <= 0.0
    }

    /// Limb angles derived from the walk phase. Legs and arms each swing as a
    /// counter-phase pair; swimming paddles arms around a raised pose.
    pub fn limb_pose(&self) -> LimbPose {
        let t = self.walk_phase;
        if self.is_swimming {
            const KICK_FREQ: f32 = 1.6;
            const KICK_AMP: f32 = 0.9;
            const PADDLE_AMP: f32 = 0.6;
            let s = (t * KICK_FREQ).sin();
            LimbPose {
                left_arm: -FRAC_PI_2 + s * PADDLE_AMP,
                right_arm: -FRAC_PI_2 - s * PADDLE_AMP,
                left_leg: s * KICK_AMP,
                right_leg: -s * KICK_AMP,
                torso: s * 0.06,
            }
        } else {
            const WALK_AMP: f32 = 0.6;
            const ARM_AMP: f32 = 0.35;
            let s = t.sin();
            LimbPose {
                left_leg: s * WALK_AMP,
                right_leg: -s * WALK_AMP,
                left_arm: -s * ARM_AMP,
                right_arm: s * ARM_AMP,
                torso: 0.0,
            }
        }
    }
}

/// Body-center height of something standing on a block whose top face is at
/// `top_solid_y + 1`.
#[inline]
pub fn standing_y(top_solid_y: i32, cfg: &PlayerConfig) -> f32 {
    top_solid_y as f32 + 1.0 + cfg.half_height + cfg.y_adjust
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walk_pose_pairs_are_counter_phase() {
        let mut p = Player {
            id: EntityId(1),
            pos: Vec3::ZERO,
            vel: Vec3::ZERO,
            yaw: 0.0,
            on_ground: true,
            is_swimming: false,
            submerged: false,
            half_height: 0.5,
            walk_phase: 1.0,
            flash_timer: 0.0,
            spawn_y: 0.0,
            ground_offset: 0.0,
            eyes: EyeRig::Synthesized,
            caps: Capabilities::NONE,
        };
        let pose = p.limb_pose();
        assert!((pose.left_leg + pose.right_leg).abs() < 1e-6);
        assert!((pose.left_arm + pose.right_arm).abs() < 1e-6);
        assert!(pose.left_leg * pose.left_arm < 0.0);
        p.is_swimming = true;
        let swim = p.limb_pose();
        assert!((swim.left_arm + swim.right_arm + 2.0 * FRAC_PI_2).abs() < 1e-5);
    }
}
