use isle_geom::Vec3;
use isle_mesh::{TerrainMeshes, build_terrain_meshes};
use isle_world::Terrain;
use log::info;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::beam::{Beam, beam_hits, eye_segments};
use crate::collectible::{CollectibleKind, Collectibles, SpinAxis};
use crate::config::SimConfig;
use crate::enhancement::{AssetKind, EnhancementQueue};
use crate::event::{EntityId, EntityKind, EventEnvelope, EventQueue, IdAlloc, RemovalCause, SimEvent};
use crate::fish::School;
use crate::input::InputIntent;
use crate::pirate::{Crew, CrewFrame, FlushOutcome};
use crate::player::{EyeRig, Player};
use crate::state::RunState;

/// Position and facing of one live entity, for the rendering side.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EntityTransform {
    pub id: EntityId,
    pub kind: EntityKind,
    pub pos: Vec3,
    pub yaw: f32,
    /// Idle spin of a collectible: axis and current angle.
    pub spin: Option<(SpinAxis, f32)>,
}

/// Owns the world and every controller; advanced one frame at a time.
pub struct Simulation {
    cfg: SimConfig,
    seed: u64,
    terrain: Terrain,
    meshes: TerrainMeshes,
    rng: SmallRng,
    ids: IdAlloc,
    events: EventQueue,
    enhance: EnhancementQueue,
    run: RunState,
    player: Player,
    school: School,
    crew: Crew,
    beam: Beam,
    loot: Collectibles,
    clock: f32,
    game_over_sent: bool,
}

impl Simulation {
    pub fn new(cfg: SimConfig, seed: u64) -> Self {
        let terrain = Terrain::build(noise_seed(seed), &cfg.world);
        Self::with_terrain(cfg, seed, terrain)
    }

    /// Starts a run on a prebuilt island.
    pub fn with_terrain(cfg: SimConfig, seed: u64, terrain: Terrain) -> Self {
        let mut ids = IdAlloc::default();
        let player = Player::spawn(ids.alloc(), &terrain, &cfg.player);
        let mut sim = Self {
            meshes: build_terrain_meshes(&terrain),
            rng: SmallRng::seed_from_u64(seed),
            events: EventQueue::new(),
            enhance: EnhancementQueue::new(),
            run: RunState::new(cfg.player.lives, cfg.beam.max_ammo),
            player,
            school: School::new(),
            crew: Crew::new(&cfg.pirates),
            beam: Beam::new(),
            loot: Collectibles::new(),
            clock: 0.0,
            game_over_sent: false,
            ids,
            terrain,
            seed,
            cfg,
        };
        sim.populate();
        sim
    }

    fn populate(&mut self) {
        let pid = self.player.id;
        self.announce(pid, EntityKind::Player);
        self.enhance.request(pid, self.player.caps);
        let fish = self
            .school
            .populate(&self.terrain, &self.cfg.fish, &mut self.rng, &mut self.ids);
        for id in fish {
            self.announce(id, EntityKind::Fish);
        }
        info!(
            "run ready seed={} fish={} quads={} water={}",
            self.seed,
            self.school.len(),
            self.meshes.total_quads(),
            self.terrain.has_water()
        );
    }

    fn announce(&mut self, id: EntityId, kind: EntityKind) {
        self.events.emit(SimEvent::Spawned { id, kind });
    }

    fn retire(&mut self, id: EntityId, kind: EntityKind, cause: RemovalCause) {
        self.enhance.forget(id);
        self.events.emit(SimEvent::Removed { id, kind, cause });
    }

    fn score(&mut self, delta: u32) {
        let total = self.run.add_score(delta);
        self.events.emit(SimEvent::ScoreChanged { delta, total });
    }

    /// Clears every owned entity and rebuilds the world from `seed`.
    pub fn restart(&mut self, seed: u64) {
        let old: Vec<(EntityId, EntityKind)> = std::iter::once((self.player.id, EntityKind::Player))
            .chain(self.school.clear().into_iter().map(|id| (id, EntityKind::Fish)))
            .chain(self.crew.clear().into_iter().map(|id| (id, EntityKind::Pirate)))
            .chain(self.loot.clear().into_iter().map(|id| (id, EntityKind::Collectible)))
            .collect();
        for (id, kind) in old {
            self.retire(id, kind, RemovalCause::WorldCleared);
        }
        self.enhance.clear_pending();

        self.seed = seed;
        self.terrain = Terrain::build(noise_seed(seed), &self.cfg.world);
        self.meshes = build_terrain_meshes(&self.terrain);
        self.rng = SmallRng::seed_from_u64(seed);
        self.run = RunState::new(self.cfg.player.lives, self.cfg.beam.max_ammo);
        self.player = Player::spawn(self.ids.alloc(), &self.terrain, &self.cfg.player);
        self.crew = Crew::new(&self.cfg.pirates);
        self.beam = Beam::new();
        self.clock = 0.0;
        self.game_over_sent = false;
        self.populate();
    }

    /// Advances one frame. A no-op once the run is over.
    pub fn step(&mut self, dt: f32, input: &InputIntent) {
        if self.run.game_over {
            return;
        }
        let dt = dt.max(0.0);
        self.clock += dt;
        self.events.advance_tick();
        self.enhance.drain_ready(&mut self.events);

        self.step_player(dt, input);
        self.step_collectibles(dt);
        self.school
            .update(dt, &self.terrain, &self.cfg.fish, &mut self.rng);
        self.step_pirates(dt);
        self.step_beam(dt, input);

        if self.run.game_over && !self.game_over_sent {
            self.game_over_sent = true;
            let final_score = self.run.score;
            self.events.emit(SimEvent::GameOver { final_score });
        }
    }

    fn step_player(&mut self, dt: f32, input: &InputIntent) {
        let tick = self
            .player
            .update(input, &self.terrain, &self.cfg.player, dt, self.clock);
        if let Some((x, z)) = tick.splash {
            self.events.emit(SimEvent::SplashRequested { x, z });
        }
        if self.player.tick_flash(dt) {
            self.events.emit(SimEvent::DamageFlashEnded);
        }
    }

    fn step_collectibles(&mut self, dt: f32) {
        let tick = self.loot.update(
            dt,
            self.clock,
            self.player.pos,
            &self.terrain,
            &self.cfg.collectibles,
            &mut self.rng,
            &mut self.ids,
        );
        for id in tick.spawned {
            self.announce(id, EntityKind::Collectible);
            if let Some(c) = self.loot.items.iter().find(|c| c.id == id) {
                self.enhance.request(id, c.caps);
            }
        }
        for pick in tick.picked {
            self.score(pick.kind.value());
            if pick.kind == CollectibleKind::Chest {
                self.run.refill_ammo();
                self.events.emit(SimEvent::AmmoChanged {
                    ammo: self.run.ammo,
                });
            }
            self.retire(pick.id, EntityKind::Collectible, RemovalCause::PickedUp);
        }
    }

    fn step_pirates(&mut self, dt: f32) {
        let frame = CrewFrame {
            terrain: &self.terrain,
            player_pos: self.player.pos,
            clock: self.clock,
            dt,
        };
        let tick = self.crew.update(
            &frame,
            &self.cfg.pirates,
            &self.cfg.player,
            &mut self.rng,
            &mut self.ids,
        );
        for id in tick.spawned {
            self.announce(id, EntityKind::Pirate);
            if let Some(p) = self.crew.get(id) {
                self.enhance.request(id, p.caps);
            }
        }
        for _ in tick.hits {
            let lives = self.run.lose_life();
            self.events.emit(SimEvent::LivesChanged { lives });
            self.player.start_flash(self.cfg.player.flash_secs);
            self.events.emit(SimEvent::DamageFlashStarted);
        }
        let flushed = self.crew.flush_removals(&self.cfg.pirates);
        self.settle_removals(flushed);
    }

    fn step_beam(&mut self, dt: f32, input: &InputIntent) {
        if input.attack && self.beam.try_activate(&mut self.run, &self.cfg.beam) {
            self.events.emit(SimEvent::AmmoChanged {
                ammo: self.run.ammo,
            });
            self.events.emit(SimEvent::BeamStarted);
        }
        let was_active = self.beam.active;
        let tick = self.beam.tick(dt, &self.cfg.beam);
        if was_active {
            let segments = eye_segments(&self.player, &self.cfg.beam);
            let hits = beam_hits(&segments, self.player.pos.y, &self.crew.pirates, &self.cfg.beam);
            for id in hits {
                self.crew.kill(id);
            }
            let flushed = self.crew.flush_removals(&self.cfg.pirates);
            self.settle_removals(flushed);
        }
        if tick.ended {
            self.events.emit(SimEvent::BeamEnded);
        }
    }

    fn settle_removals(&mut self, flushed: FlushOutcome) {
        for r in flushed.removed {
            if r.cause == RemovalCause::KilledByBeam {
                self.score(self.cfg.pirates.kill_bonus);
            }
            self.retire(r.id, EntityKind::Pirate, r.cause);
        }
        for interval in flushed.tightened {
            self.events.emit(SimEvent::SpawnIntervalTightened { interval });
        }
    }

    /// Ready signal from the asset loader. Matching enhancements are handed
    /// out on the next frame.
    pub fn mark_asset_ready(&mut self, kind: AssetKind) {
        self.enhance.mark_ready(kind);
    }

    /// Eye points exposed by a loaded head model, in the head's local frame.
    /// `None` reverts to the synthesized pair.
    pub fn set_eye_anchors(&mut self, anchors: Option<[Vec3; 2]>) {
        self.player.eyes = anchors.map_or(EyeRig::Synthesized, EyeRig::Anchors);
    }

    pub fn drain_events(&mut self) -> Vec<EventEnvelope> {
        self.events.drain().collect()
    }

    pub fn transforms(&self) -> Vec<EntityTransform> {
        let mut out = Vec::with_capacity(1 + self.school.len() + self.crew.pirates.len() + self.loot.len());
        out.push(EntityTransform {
            id: self.player.id,
            kind: EntityKind::Player,
            pos: self.player.pos,
            yaw: self.player.yaw,
            spin: None,
        });
        out.extend(self.school.fish.iter().map(|f| EntityTransform {
            id: f.id,
            kind: EntityKind::Fish,
            pos: f.pos,
            yaw: f.heading(),
            spin: None,
        }));
        out.extend(self.crew.pirates.iter().map(|p| EntityTransform {
            id: p.id,
            kind: EntityKind::Pirate,
            pos: p.pos,
            yaw: p.yaw,
            spin: None,
        }));
        out.extend(self.loot.items.iter().map(|c| EntityTransform {
            id: c.id,
            kind: EntityKind::Collectible,
            pos: c.pos,
            yaw: 0.0,
            spin: Some((c.kind.spin_axis(), c.spin)),
        }));
        out
    }

    pub fn config(&self) -> &SimConfig {
        &self.cfg
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn clock(&self) -> f32 {
        self.clock
    }

    pub fn tick(&self) -> u64 {
        self.events.now
    }

    pub fn terrain(&self) -> &Terrain {
        &self.terrain
    }

    pub fn meshes(&self) -> &TerrainMeshes {
        &self.meshes
    }

    pub fn run_state(&self) -> &RunState {
        &self.run
    }

    pub fn is_game_over(&self) -> bool {
        self.run.game_over
    }

    /// Final score once the run has ended.
    pub fn final_score(&self) -> Option<u32> {
        self.run.game_over.then_some(self.run.score)
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn school(&self) -> &School {
        &self.school
    }

    pub fn crew(&self) -> &Crew {
        &self.crew
    }

    pub fn crew_mut(&mut self) -> &mut Crew {
        &mut self.crew
    }

    pub fn beam(&self) -> &Beam {
        &self.beam
    }

    pub fn collectibles(&self) -> &Collectibles {
        &self.loot
    }

    pub fn collectibles_mut(&mut self) -> &mut Collectibles {
        &mut self.loot
    }

    pub fn run_state_mut(&mut self) -> &mut RunState {
        &mut self.run
    }

    /// Ids handed out for entities inserted from outside the controllers.
    pub fn alloc_id(&mut self) -> EntityId {
        self.ids.alloc()
    }
}

#[inline]
fn noise_seed(seed: u64) -> i32 {
    (seed ^ (seed >> 32)) as i32
}
