use core::f32::consts::{FRAC_PI_2, FRAC_PI_4, FRAC_PI_6, TAU};

use isle_geom::{EPS_SQ, Vec3};
use isle_world::Terrain;
use log::{debug, trace};
use rand::Rng;
use rand::rngs::SmallRng;

use crate::config::{PirateConfig, PlayerConfig};
use crate::enhancement::{AssetKind, Capabilities};
use crate::error::SpawnError;
use crate::event::{EntityId, IdAlloc, RemovalCause};
use crate::player::standing_y;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Behavior {
    None = 0,
    Align = 1,
    Separate = 2,
    Cohere = 3,
}

impl Behavior {
    pub const ALL: [Behavior; 4] = [
        Behavior::None,
        Behavior::Align,
        Behavior::Separate,
        Behavior::Cohere,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Averages over the neighbors inside the flock radius.
#[derive(Clone, Copy, Debug, Default)]
pub struct FlockView {
    pub count: usize,
    pub center: Vec3,
    pub align: Vec3,
    pub separation: Vec3,
}

/// Returns the steered velocity for one behavior.
pub type SteerFn = fn(vel: Vec3, pos: Vec3, view: &FlockView, speed: f32, cfg: &PirateConfig, dt: f32) -> Vec3;

/// Steering strategy per behavior, indexed by `Behavior::index`.
pub const STEERING: [SteerFn; 4] = [steer_none, steer_align, steer_separate, steer_cohere];

fn steer_toward(vel: Vec3, dir: Vec3, speed: f32, t: f32) -> Vec3 {
    let dir = dir.horizontal();
    if dir.length_sq() > EPS_SQ {
        vel.lerp(dir.normalized() * speed, t)
    } else {
        vel
    }
}

fn steer_none(vel: Vec3, _: Vec3, _: &FlockView, _: f32, _: &PirateConfig, _: f32) -> Vec3 {
    vel
}

fn steer_align(vel: Vec3, _: Vec3, view: &FlockView, speed: f32, cfg: &PirateConfig, dt: f32) -> Vec3 {
    if view.count == 0 {
        return vel;
    }
    steer_toward(vel, view.align, speed, dt * cfg.align_rate)
}

fn steer_separate(vel: Vec3, _: Vec3, view: &FlockView, speed: f32, cfg: &PirateConfig, dt: f32) -> Vec3 {
    if view.count == 0 {
        return vel;
    }
    steer_toward(vel, view.separation, speed, dt * cfg.separate_rate)
}

fn steer_cohere(vel: Vec3, pos: Vec3, view: &FlockView, speed: f32, cfg: &PirateConfig, dt: f32) -> Vec3 {
    if view.count == 0 {
        return vel;
    }
    steer_toward(vel, view.center - pos, speed, dt * cfg.cohere_rate)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttackPhase {
    Lift,
    Strike,
    Hold,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AttackTimings {
    pub lift: f32,
    pub strike: f32,
    pub hold: f32,
}

impl AttackTimings {
    pub fn from_config(cfg: &PirateConfig) -> Self {
        Self {
            lift: cfg.lift_secs,
            strike: cfg.strike_secs,
            hold: cfg.hold_secs,
        }
    }

    #[inline]
    pub fn duration(&self, phase: AttackPhase) -> f32 {
        match phase {
            AttackPhase::Lift => self.lift,
            AttackPhase::Strike => self.strike,
            AttackPhase::Hold => self.hold,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PirateState {
    Roaming,
    Attacking { phase: AttackPhase, elapsed: f32 },
    /// Terminal; the pirate leaves the world on the next flush.
    Dying { cause: RemovalCause },
}

impl PirateState {
    /// Advances an attack by `dt`, walking through phase boundaries.
    pub fn advance(self, dt: f32, timings: &AttackTimings) -> PirateState {
        let PirateState::Attacking { mut phase, mut elapsed } = self else {
            return self;
        };
        elapsed += dt;
        loop {
            let d = timings.duration(phase);
            if elapsed < d {
                return PirateState::Attacking { phase, elapsed };
            }
            elapsed -= d;
            phase = match phase {
                AttackPhase::Lift => AttackPhase::Strike,
                AttackPhase::Strike => AttackPhase::Hold,
                AttackPhase::Hold => {
                    return PirateState::Dying {
                        cause: RemovalCause::AttackCompleted,
                    };
                }
            };
        }
    }

    #[inline]
    pub fn is_dying(&self) -> bool {
        matches!(self, PirateState::Dying { .. })
    }
}

/// Shoulder and hand pivot angles (radians about X).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ArmPose {
    pub arm: f32,
    pub hand: f32,
}

const ARM_UP: f32 = -FRAC_PI_2;
const ARM_DOWN: f32 = -FRAC_PI_2 + FRAC_PI_4;
const HAND_DOWN: f32 = FRAC_PI_4 + FRAC_PI_6;

#[derive(Clone, Debug)]
pub struct Pirate {
    pub id: EntityId,
    pub pos: Vec3,
    pub vel: Vec3,
    pub yaw: f32,
    pub behavior: Behavior,
    pub spawn_time: f32,
    pub did_damage: bool,
    pub state: PirateState,
    pub caps: Capabilities,
}

impl Pirate {
    pub fn new(id: EntityId, pos: Vec3, vel: Vec3, behavior: Behavior, spawn_time: f32) -> Self {
        Self {
            id,
            pos,
            vel,
            yaw: vel.yaw(),
            behavior,
            spawn_time,
            did_damage: false,
            state: PirateState::Roaming,
            caps: Capabilities::of(&[AssetKind::Hat, AssetKind::Weapon]),
        }
    }

    /// Max speed after ramping linearly with age.
    pub fn effective_speed(&self, clock: f32, cfg: &PirateConfig) -> f32 {
        let age = (clock - self.spawn_time).max(0.0);
        let grow = if cfg.grow_time > 0.0 {
            (age / cfg.grow_time).clamp(0.0, 1.0)
        } else {
            1.0
        };
        cfg.base_speed + (cfg.max_speed - cfg.base_speed) * grow
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        !self.state.is_dying()
    }

    /// Arm pose follows the attack phase, not velocity.
    pub fn arm_pose(&self, timings: &AttackTimings) -> ArmPose {
        match self.state {
            PirateState::Attacking { phase, elapsed } => {
                let d = timings.duration(phase);
                let u = if d > 0.0 { (elapsed / d).clamp(0.0, 1.0) } else { 1.0 };
                match phase {
                    AttackPhase::Lift => ArmPose {
                        arm: ARM_UP * u,
                        hand: 0.0,
                    },
                    AttackPhase::Strike => ArmPose {
                        arm: ARM_UP + (ARM_DOWN - ARM_UP) * u,
                        hand: HAND_DOWN * u,
                    },
                    AttackPhase::Hold => ArmPose {
                        arm: ARM_DOWN,
                        hand: HAND_DOWN,
                    },
                }
            }
            PirateState::Dying { .. } => ArmPose {
                arm: ARM_DOWN,
                hand: HAND_DOWN,
            },
            PirateState::Roaming => ArmPose::default(),
        }
    }

    /// Counter-phase leg swing `(left, right)`.
    pub fn leg_swing(clock: f32) -> (f32, f32) {
        let s = (clock * 4.0).sin() * 0.5;
        (s, -s)
    }
}

/// A pirate that left the world this tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Removal {
    pub id: EntityId,
    pub cause: RemovalCause,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FlushOutcome {
    pub removed: Vec<Removal>,
    /// New spawn interval after each tightening step reached in this flush.
    pub tightened: Vec<f32>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CrewTick {
    pub spawned: Vec<EntityId>,
    /// Pirates whose first hit landed this tick.
    pub hits: Vec<EntityId>,
}

/// Read-only frame inputs for the pirate controller.
pub struct CrewFrame<'a> {
    pub terrain: &'a Terrain,
    pub player_pos: Vec3,
    pub clock: f32,
    pub dt: f32,
}

/// Owns the pirate population and the adaptive spawn schedule.
pub struct Crew {
    pub pirates: Vec<Pirate>,
    pub spawn_interval: f32,
    spawn_acc: f32,
    removals: u32,
    timings: AttackTimings,
}

impl Crew {
    pub fn new(cfg: &PirateConfig) -> Self {
        Self {
            pirates: Vec::new(),
            spawn_interval: cfg.spawn_interval,
            spawn_acc: 0.0,
            removals: 0,
            timings: AttackTimings::from_config(cfg),
        }
    }

    #[inline]
    pub fn removals(&self) -> u32 {
        self.removals
    }

    #[inline]
    pub fn timings(&self) -> &AttackTimings {
        &self.timings
    }

    pub fn get(&self, id: EntityId) -> Option<&Pirate> {
        self.pirates.iter().find(|p| p.id == id)
    }

    pub fn alive(&self) -> impl Iterator<Item = &Pirate> {
        self.pirates.iter().filter(|p| p.is_alive())
    }

    /// Picks a land column outside the exclusion radius around the player.
    pub fn try_spawn(
        &mut self,
        frame: &CrewFrame<'_>,
        cfg: &PirateConfig,
        body: &PlayerConfig,
        rng: &mut SmallRng,
        ids: &mut IdAlloc,
    ) -> Result<EntityId, SpawnError> {
        if self.pirates.len() >= cfg.max {
            return Err(SpawnError::AtCapacity { max: cfg.max });
        }
        let range = frame
            .terrain
            .inset_range(1, 1)
            .ok_or(SpawnError::Degenerate)?;
        let excl2 = cfg.exclusion_radius * cfg.exclusion_radius;
        for _ in 0..cfg.spawn_attempts {
            let ix = rng.random_range(range.clone());
            let iz = rng.random_range(range.clone());
            let Some(col) = frame.terrain.column(ix, iz) else {
                continue;
            };
            let (x, z) = col.center_xz();
            let dx = x - frame.player_pos.x;
            let dz = z - frame.player_pos.z;
            if dx * dx + dz * dz <= excl2 {
                continue;
            }
            if col.is_water() {
                continue;
            }
            let behavior = Behavior::ALL[rng.random_range(0..Behavior::ALL.len())];
            let y = standing_y(col.top_solid_y, body) - cfg.ride_offset;
            let heading = rng.random::<f32>() * TAU;
            let id = ids.alloc();
            let vel = Vec3::from_heading(heading) * cfg.base_speed;
            self.pirates.push(Pirate::new(
                id,
                Vec3::new(x, y, z),
                vel,
                behavior,
                frame.clock,
            ));
            debug!("pirate #{} spawned at ({}, {:.2}, {}) behavior={:?}", id.0, ix, y, iz, behavior);
            return Ok(id);
        }
        Err(SpawnError::NoEligibleColumn {
            attempts: cfg.spawn_attempts,
        })
    }

    /// Spawn schedule, steering, terrain riding, and attack triggering.
    pub fn update(
        &mut self,
        frame: &CrewFrame<'_>,
        cfg: &PirateConfig,
        body: &PlayerConfig,
        rng: &mut SmallRng,
        ids: &mut IdAlloc,
    ) -> CrewTick {
        let mut out = CrewTick::default();
        let dt = frame.dt;

        self.spawn_acc += dt;
        if self.spawn_interval > 0.0 {
            while self.spawn_acc >= self.spawn_interval {
                self.spawn_acc -= self.spawn_interval;
                match self.try_spawn(frame, cfg, body, rng, ids) {
                    Ok(id) => out.spawned.push(id),
                    Err(e) => trace!("pirate spawn attempt abandoned: {}", e),
                }
            }
        }

        let snapshot: Vec<(Vec3, Vec3)> = self.pirates.iter().map(|p| (p.pos, p.vel)).collect();
        let r2 = cfg.flock_radius * cfg.flock_radius;
        let half = frame.terrain.half() as f32;
        let attack_r2 = cfg.attack_radius * cfg.attack_radius;
        let attract_t = dt * cfg.attract_rate * cfg.attract_weight.clamp(0.0, 1.0);

        for (i, p) in self.pirates.iter_mut().enumerate() {
            p.state = p.state.advance(dt, &self.timings);
            if p.state.is_dying() {
                continue;
            }
            let speed = p.effective_speed(frame.clock, cfg);
            let view = flock_view(i, p.pos, &snapshot, r2);
            let mut v = STEERING[p.behavior.index()](p.vel, p.pos, &view, speed, cfg, dt);
            v = steer_toward(v, frame.player_pos - p.pos, speed, attract_t);
            let h = v.horizontal();
            if h.length_sq() > EPS_SQ {
                let h = h.normalized() * speed;
                v.x = h.x;
                v.z = h.z;
            }

            let mut next = p.pos + v * dt;
            let pad = cfg.edge_pad;
            if next.x < -half + pad || next.x > half - pad {
                v.x = -v.x;
                next.x = p.pos.x + v.x * dt;
            }
            if next.z < -half + pad || next.z > half - pad {
                v.z = -v.z;
                next.z = p.pos.z + v.z * dt;
            }
            if let Some(col) = frame.terrain.column_at(next.x, next.z) {
                next.y = standing_y(col.top_solid_y, body) - cfg.ride_offset;
            }
            p.pos = next;
            p.vel = v;
            if v.horizontal_length_sq() > EPS_SQ {
                p.yaw = v.yaw();
            }

            if p.pos.horizontal_distance_sq(frame.player_pos) <= attack_r2 {
                if !p.did_damage {
                    p.did_damage = true;
                    out.hits.push(p.id);
                }
                if p.state == PirateState::Roaming {
                    p.state = PirateState::Attacking {
                        phase: AttackPhase::Lift,
                        elapsed: 0.0,
                    };
                }
            }
        }
        out
    }

    /// Marks a live pirate as killed; `false` if it is unknown or already leaving.
    pub fn kill(&mut self, id: EntityId) -> bool {
        match self.pirates.iter_mut().find(|p| p.id == id) {
            Some(p) if p.is_alive() => {
                p.state = PirateState::Dying {
                    cause: RemovalCause::KilledByBeam,
                };
                true
            }
            _ => false,
        }
    }

    /// Removes dying pirates. Every `removals_per_step` removals the spawn
    /// interval shrinks by `interval_factor`, never below `min_interval`.
    pub fn flush_removals(&mut self, cfg: &PirateConfig) -> FlushOutcome {
        let mut out = FlushOutcome::default();
        self.pirates.retain(|p| match p.state {
            PirateState::Dying { cause } => {
                out.removed.push(Removal { id: p.id, cause });
                false
            }
            _ => true,
        });
        for _ in 0..out.removed.len() {
            self.removals += 1;
            if cfg.removals_per_step > 0 && self.removals % cfg.removals_per_step == 0 {
                self.spawn_interval = (self.spawn_interval * cfg.interval_factor).max(cfg.min_interval);
                out.tightened.push(self.spawn_interval);
            }
        }
        out
    }

    pub fn clear(&mut self) -> Vec<EntityId> {
        self.pirates.drain(..).map(|p| p.id).collect()
    }
}

fn flock_view(me: usize, pos: Vec3, snapshot: &[(Vec3, Vec3)], r2: f32) -> FlockView {
    let mut view = FlockView::default();
    for (j, &(opos, ovel)) in snapshot.iter().enumerate() {
        if j == me {
            continue;
        }
        let d2 = pos.distance_sq(opos);
        if d2 > r2 {
            continue;
        }
        view.count += 1;
        view.center += opos;
        view.align += ovel;
        let diff = pos - opos;
        if diff.length_sq() > EPS_SQ {
            view.separation += diff.normalized() / d2.sqrt();
        }
    }
    if view.count > 0 {
        let n = view.count as f32;
        view.center = view.center / n;
        view.align = view.align / n;
        view.separation = view.separation / n;
    }
    view
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timings() -> AttackTimings {
        AttackTimings::from_config(&PirateConfig::default())
    }

    #[test]
    fn attack_walks_all_phases_then_dies() {
        let t = timings();
        let mut s = PirateState::Attacking {
            phase: AttackPhase::Lift,
            elapsed: 0.0,
        };
        s = s.advance(0.2, &t);
        assert!(matches!(s, PirateState::Attacking { phase: AttackPhase::Lift, .. }));
        s = s.advance(0.1, &t);
        assert!(matches!(s, PirateState::Attacking { phase: AttackPhase::Strike, .. }));
        s = s.advance(0.2, &t);
        assert!(matches!(s, PirateState::Attacking { phase: AttackPhase::Hold, .. }));
        s = s.advance(0.4, &t);
        assert_eq!(
            s,
            PirateState::Dying {
                cause: RemovalCause::AttackCompleted
            }
        );
    }

    #[test]
    fn long_tick_skips_straight_to_dying() {
        let s = PirateState::Attacking {
            phase: AttackPhase::Lift,
            elapsed: 0.0,
        }
        .advance(5.0, &timings());
        assert!(s.is_dying());
    }

    #[test]
    fn roaming_does_not_advance() {
        assert_eq!(PirateState::Roaming.advance(1.0, &timings()), PirateState::Roaming);
    }

    #[test]
    fn separation_points_away_from_neighbor() {
        let snap = [(Vec3::new(0.0, 0.0, 0.0), Vec3::ZERO), (Vec3::new(1.0, 0.0, 0.0), Vec3::ZERO)];
        let v = flock_view(0, snap[0].0, &snap, 16.0);
        assert_eq!(v.count, 1);
        assert!(v.separation.x < 0.0);
        assert!((v.center.x - 1.0).abs() < 1e-6);
    }

    #[test]
    fn speed_ramps_with_age() {
        let cfg = PirateConfig::default();
        let p = Pirate::new(EntityId(1), Vec3::ZERO, Vec3::new(2.4, 0.0, 0.0), Behavior::None, 10.0);
        assert!((p.effective_speed(10.0, &cfg) - 2.4).abs() < 1e-6);
        assert!((p.effective_speed(110.0, &cfg) - 3.45).abs() < 1e-4);
        assert!((p.effective_speed(10_000.0, &cfg) - 4.5).abs() < 1e-6);
    }

    fn attacking(phase: AttackPhase, elapsed: f32) -> Pirate {
        let mut p = Pirate::new(EntityId(1), Vec3::ZERO, Vec3::new(0.0, 0.0, 1.0), Behavior::None, 0.0);
        p.state = PirateState::Attacking { phase, elapsed };
        p
    }

    #[test]
    fn arm_pose_follows_attack_phase() {
        let t = timings();
        assert_eq!(attacking(AttackPhase::Lift, 0.0).arm_pose(&t), ArmPose::default());

        let lifted = attacking(AttackPhase::Lift, t.lift).arm_pose(&t);
        assert!((lifted.arm + FRAC_PI_2).abs() < 1e-6);
        assert_eq!(lifted.hand, 0.0);

        let half = attacking(AttackPhase::Strike, t.strike * 0.5).arm_pose(&t);
        assert!((half.arm + FRAC_PI_2 * 0.75).abs() < 1e-6);

        let struck = attacking(AttackPhase::Strike, t.strike).arm_pose(&t);
        assert!((struck.arm + FRAC_PI_4).abs() < 1e-6);
        assert!((struck.hand - (FRAC_PI_4 + FRAC_PI_6)).abs() < 1e-6);

        let close = |a: ArmPose, b: ArmPose| (a.arm - b.arm).abs() < 1e-6 && (a.hand - b.hand).abs() < 1e-6;
        for elapsed in [0.0, t.hold * 0.5, t.hold] {
            assert!(close(attacking(AttackPhase::Hold, elapsed).arm_pose(&t), struck));
        }
        let mut dying = attacking(AttackPhase::Hold, 0.0);
        dying.state = PirateState::Dying {
            cause: RemovalCause::AttackCompleted,
        };
        assert!(close(dying.arm_pose(&t), struck));
    }

    #[test]
    fn legs_swing_in_counter_phase() {
        for clock in [0.0, 0.2, 0.39, 1.0, 7.5] {
            let (l, r) = Pirate::leg_swing(clock);
            assert_eq!(l, -r);
            assert!(l.abs() <= 0.5);
        }
        let (l, _) = Pirate::leg_swing(FRAC_PI_2 / 4.0);
        assert!((l - 0.5).abs() < 1e-6);
    }
}
