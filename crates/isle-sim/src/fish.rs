use core::f32::consts::TAU;

use isle_geom::{EPS_SQ, Vec3};
use isle_world::{BlockPos, Terrain};
use log::debug;
use rand::Rng;
use rand::rngs::SmallRng;

use crate::config::FishConfig;
use crate::error::SpawnError;
use crate::event::{EntityId, IdAlloc};

#[derive(Clone, Debug)]
pub struct Fish {
    pub id: EntityId,
    pub pos: Vec3,
    pub vel: Vec3,
    pub prev_pos: Vec3,
    /// Per-fish phase offset in `[0, 1)` for the tail wag.
    pub seed: f32,
}

impl Fish {
    #[inline]
    pub fn horizontal_speed(&self) -> f32 {
        self.vel.horizontal_length_sq().sqrt()
    }

    #[inline]
    pub fn heading(&self) -> f32 {
        self.vel.yaw()
    }

    pub fn tail_angle(&self, clock: f32) -> f32 {
        (clock * 12.0 + self.seed * 10.0).sin() * 0.6
    }
}

/// Owns every fish and steers them as one loose school.
#[derive(Default)]
pub struct School {
    pub fish: Vec<Fish>,
}

impl School {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.fish.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fish.is_empty()
    }

    /// Tries to place one fish on a random inset water column.
    pub fn try_spawn_one(
        &mut self,
        terrain: &Terrain,
        cfg: &FishConfig,
        rng: &mut SmallRng,
        ids: &mut IdAlloc,
    ) -> Result<EntityId, SpawnError> {
        let range = terrain
            .inset_range(cfg.margin, cfg.margin + 1)
            .ok_or(SpawnError::Degenerate)?;
        let ix = rng.random_range(range.clone());
        let iz = rng.random_range(range);
        let col = terrain
            .column(ix, iz)
            .filter(|c| c.is_water())
            .ok_or(SpawnError::NoEligibleColumn { attempts: 1 })?;
        let layer = if cfg.layers.is_empty() {
            0.0
        } else {
            cfg.layers[rng.random_range(0..cfg.layers.len())]
        };
        let y = col.surface_y as f32 + layer;
        if terrain.is_solid(ix, y.floor() as i32, iz) {
            return Err(SpawnError::NoEligibleColumn { attempts: 1 });
        }
        let pos = Vec3::new(ix as f32 + 0.5, y, iz as f32 + 0.5);
        let id = ids.alloc();
        let heading = rng.random::<f32>() * TAU;
        self.fish.push(Fish {
            id,
            pos,
            vel: Vec3::from_heading(heading) * cfg.speed,
            prev_pos: pos,
            seed: rng.random::<f32>(),
        });
        Ok(id)
    }

    /// Spawns up to `cfg.count` fish with a bounded attempt budget. Returns the
    /// ids of the fish placed.
    pub fn populate(
        &mut self,
        terrain: &Terrain,
        cfg: &FishConfig,
        rng: &mut SmallRng,
        ids: &mut IdAlloc,
    ) -> Vec<EntityId> {
        let mut placed = Vec::with_capacity(cfg.count);
        let limit = cfg.count * cfg.attempts_per_fish;
        let mut tries = 0;
        while placed.len() < cfg.count && tries < limit {
            tries += 1;
            match self.try_spawn_one(terrain, cfg, rng, ids) {
                Ok(id) => placed.push(id),
                Err(SpawnError::Degenerate) => {
                    debug!("fish spawn skipped: inset bounds empty");
                    break;
                }
                Err(_) => {}
            }
        }
        debug!("fish placed={} tries={}", placed.len(), tries);
        placed
    }

    pub fn update(&mut self, dt: f32, terrain: &Terrain, cfg: &FishConfig, rng: &mut SmallRng) {
        let r2 = cfg.cohesion_radius * cfg.cohesion_radius;
        let positions: Vec<Vec3> = self.fish.iter().map(|f| f.pos).collect();
        let occ = terrain.occupancy();
        for (i, f) in self.fish.iter_mut().enumerate() {
            let mut center = Vec3::ZERO;
            let mut count = 0usize;
            for (j, &o) in positions.iter().enumerate() {
                if i != j && f.pos.distance_sq(o) <= r2 {
                    center += o;
                    count += 1;
                }
            }
            if count > 0 {
                let center = center / count as f32;
                let to = (center - f.pos).horizontal();
                let desired = if to.length_sq() > EPS_SQ {
                    to.normalized() * cfg.speed
                } else {
                    Vec3::ZERO
                };
                let t = (cfg.cohesion_strength * dt).min(1.0);
                let blended = f.vel.lerp(desired, t).with_y(f.vel.y);
                // A head-on blend can cancel out; keep the previous heading then.
                f.vel = if blended.horizontal_length_sq() > EPS_SQ {
                    blended
                } else if desired.length_sq() > EPS_SQ {
                    desired.with_y(f.vel.y)
                } else {
                    f.vel
                };
            } else {
                let turn = (rng.random::<f32>() - 0.5) * cfg.jitter * dt;
                f.vel = f.vel.rotate_y(turn);
            }
            let h = f.vel.horizontal();
            if h.length_sq() > EPS_SQ {
                let h = h.normalized() * cfg.speed;
                f.vel.x = h.x;
                f.vel.z = h.z;
            }

            let mut next = f.pos + f.vel * dt;
            let prev = BlockPos::containing(f.prev_pos);
            let dest = BlockPos::containing(next);
            if occ.contains(dest) {
                let x_changed = dest.x != prev.x;
                let z_changed = dest.z != prev.z;
                match (x_changed, z_changed) {
                    (true, false) => f.vel.x = -f.vel.x,
                    (false, true) => f.vel.z = -f.vel.z,
                    _ => {
                        f.vel.x = -f.vel.x;
                        f.vel.z = -f.vel.z;
                    }
                }
                next = f.prev_pos + f.vel * dt;
            }
            f.prev_pos = f.pos;
            f.pos = next;
        }
    }

    pub fn clear(&mut self) -> Vec<EntityId> {
        self.fish.drain(..).map(|f| f.id).collect()
    }
}
