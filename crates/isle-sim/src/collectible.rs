use core::f32::consts::TAU;

use isle_geom::Vec3;
use isle_world::Terrain;
use log::trace;
use rand::Rng;
use rand::rngs::SmallRng;

use crate::config::CollectibleConfig;
use crate::enhancement::{AssetKind, Capabilities};
use crate::error::SpawnError;
use crate::event::{EntityId, IdAlloc};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CollectibleKind {
    Gold,
    Diamond,
    Chest,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpinAxis {
    Y,
    Z,
}

impl CollectibleKind {
    pub fn value(self) -> u32 {
        match self {
            CollectibleKind::Gold => 10,
            CollectibleKind::Diamond => 30,
            CollectibleKind::Chest => 100,
        }
    }

    pub fn bob_amp(self) -> f32 {
        match self {
            CollectibleKind::Gold => 0.09,
            CollectibleKind::Diamond => 0.07,
            CollectibleKind::Chest => 0.05,
        }
    }

    /// Spin speed in rad/s.
    pub fn spin_speed(self) -> f32 {
        match self {
            CollectibleKind::Gold => 2.2,
            CollectibleKind::Diamond => 1.8,
            CollectibleKind::Chest => 1.2,
        }
    }

    /// Coins spin about their face normal; everything else about Y.
    pub fn spin_axis(self) -> SpinAxis {
        match self {
            CollectibleKind::Gold => SpinAxis::Z,
            _ => SpinAxis::Y,
        }
    }

    /// Extra rest height so the coin never clips the block below.
    fn lift(self) -> f32 {
        match self {
            CollectibleKind::Gold => 0.12,
            _ => 0.0,
        }
    }

    /// Maps a uniform roll in `[0, 1)` onto the weighted kinds.
    pub fn from_roll(r: f32, cfg: &CollectibleConfig) -> Self {
        if r < cfg.prob_gold {
            CollectibleKind::Gold
        } else if r < cfg.prob_gold + cfg.prob_diamond {
            CollectibleKind::Diamond
        } else {
            CollectibleKind::Chest
        }
    }
}

#[derive(Clone, Debug)]
pub struct Collectible {
    pub id: EntityId,
    pub kind: CollectibleKind,
    pub pos: Vec3,
    pub base_y: f32,
    pub bob_phase: f32,
    /// Accumulated spin about [`CollectibleKind::spin_axis`].
    pub spin: f32,
    pub caps: Capabilities,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pickup {
    pub id: EntityId,
    pub kind: CollectibleKind,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CollectTick {
    pub spawned: Vec<EntityId>,
    pub picked: Vec<Pickup>,
}

#[derive(Default)]
pub struct Collectibles {
    pub items: Vec<Collectible>,
    spawn_acc: f32,
}

impl Collectibles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Places one collectible of `kind` resting on column `(ix, iz)`.
    #[allow(clippy::too_many_arguments)]
    pub fn place(
        &mut self,
        terrain: &Terrain,
        ix: i32,
        iz: i32,
        kind: CollectibleKind,
        cfg: &CollectibleConfig,
        bob_phase: f32,
        ids: &mut IdAlloc,
    ) -> Option<EntityId> {
        let col = terrain.column(ix, iz)?;
        let base_y = col.top_solid_y as f32 + 1.0 + cfg.rest_height + kind.lift();
        let id = ids.alloc();
        let caps = if kind == CollectibleKind::Chest {
            Capabilities::of(&[AssetKind::Chest])
        } else {
            Capabilities::NONE
        };
        self.items.push(Collectible {
            id,
            kind,
            pos: Vec3::new(ix as f32 + 0.5, base_y, iz as f32 + 0.5),
            base_y,
            bob_phase,
            spin: 0.0,
            caps,
        });
        Some(id)
    }

    pub fn try_spawn(
        &mut self,
        terrain: &Terrain,
        cfg: &CollectibleConfig,
        rng: &mut SmallRng,
        ids: &mut IdAlloc,
    ) -> Result<EntityId, SpawnError> {
        if self.items.len() >= cfg.max {
            return Err(SpawnError::AtCapacity { max: cfg.max });
        }
        let range = terrain.inset_range(1, 1).ok_or(SpawnError::Degenerate)?;
        for _ in 0..cfg.spawn_attempts {
            let ix = rng.random_range(range.clone());
            let iz = rng.random_range(range.clone());
            if !terrain.column(ix, iz).is_some_and(|c| c.is_water()) {
                continue;
            }
            let kind = CollectibleKind::from_roll(rng.random::<f32>(), cfg);
            let phase = rng.random::<f32>() * TAU;
            if let Some(id) = self.place(terrain, ix, iz, kind, cfg, phase, ids) {
                return Ok(id);
            }
        }
        Err(SpawnError::NoEligibleColumn {
            attempts: cfg.spawn_attempts,
        })
    }

    /// Spawn schedule, bob/spin cosmetics, then pickup against `player_pos`.
    #[allow(clippy::too_many_arguments)]
    pub fn update(
        &mut self,
        dt: f32,
        clock: f32,
        player_pos: Vec3,
        terrain: &Terrain,
        cfg: &CollectibleConfig,
        rng: &mut SmallRng,
        ids: &mut IdAlloc,
    ) -> CollectTick {
        let mut out = CollectTick::default();
        self.spawn_acc += dt;
        if cfg.spawn_interval > 0.0 {
            while self.spawn_acc >= cfg.spawn_interval {
                self.spawn_acc -= cfg.spawn_interval;
                match self.try_spawn(terrain, cfg, rng, ids) {
                    Ok(id) => out.spawned.push(id),
                    Err(e) => trace!("collectible spawn attempt abandoned: {}", e),
                }
            }
        }

        let r2 = cfg.pickup_radius * cfg.pickup_radius;
        self.items.retain_mut(|c| {
            c.pos.y = c.base_y + (c.bob_phase + clock).sin() * c.kind.bob_amp();
            c.spin += c.kind.spin_speed() * dt;
            if player_pos.distance_sq(c.pos) <= r2 {
                out.picked.push(Pickup {
                    id: c.id,
                    kind: c.kind,
                });
                false
            } else {
                true
            }
        });
        out
    }

    pub fn clear(&mut self) -> Vec<EntityId> {
        self.spawn_acc = 0.0;
        self.items.drain(..).map(|c| c.id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roll_respects_weights() {
        let cfg = CollectibleConfig::default();
        assert_eq!(CollectibleKind::from_roll(0.0, &cfg), CollectibleKind::Gold);
        assert_eq!(CollectibleKind::from_roll(0.64, &cfg), CollectibleKind::Gold);
        assert_eq!(CollectibleKind::from_roll(0.70, &cfg), CollectibleKind::Diamond);
        assert_eq!(CollectibleKind::from_roll(0.96, &cfg), CollectibleKind::Chest);
    }
}
