use std::collections::VecDeque;

use crate::enhancement::AssetKind;

/// Stable handle the rendering side uses to pair visuals with entities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u64);

/// Monotonic entity id source; ids are never reused within a run.
#[derive(Debug)]
pub struct IdAlloc {
    next: u64,
}

impl Default for IdAlloc {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl IdAlloc {
    pub fn alloc(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next = self.next.wrapping_add(1).max(1);
        id
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Player,
    Fish,
    Pirate,
    Collectible,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RemovalCause {
    KilledByBeam,
    AttackCompleted,
    PickedUp,
    WorldCleared,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SimEvent {
    Spawned {
        id: EntityId,
        kind: EntityKind,
    },
    Removed {
        id: EntityId,
        kind: EntityKind,
        cause: RemovalCause,
    },
    ScoreChanged {
        delta: u32,
        total: u32,
    },
    LivesChanged {
        lives: u32,
    },
    AmmoChanged {
        ammo: u32,
    },
    SplashRequested {
        x: f32,
        z: f32,
    },
    DamageFlashStarted,
    DamageFlashEnded,
    BeamStarted,
    BeamEnded,
    EnhanceVisual {
        id: EntityId,
        asset: AssetKind,
    },
    SpawnIntervalTightened {
        interval: f32,
    },
    GameOver {
        final_score: u32,
    },
}

#[derive(Clone, Debug)]
pub struct EventEnvelope {
    pub id: u64,
    pub tick: u64,
    pub kind: SimEvent,
}

/// FIFO of simulation events stamped with the tick they were emitted on.
pub struct EventQueue {
    queue: VecDeque<EventEnvelope>,
    pub now: u64,
    next_id: u64,
}

impl Default for EventQueue {
    fn default() -> Self {
        Self {
            queue: VecDeque::new(),
            now: 0,
            next_id: 1,
        }
    }
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    fn alloc_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1).max(1);
        id
    }

    pub fn emit(&mut self, kind: SimEvent) -> u64 {
        let id = self.alloc_id();
        log_event(self.now, &kind);
        self.queue.push_back(EventEnvelope {
            id,
            tick: self.now,
            kind,
        });
        id
    }

    pub fn pop(&mut self) -> Option<EventEnvelope> {
        self.queue.pop_front()
    }

    pub fn drain(&mut self) -> impl Iterator<Item = EventEnvelope> + '_ {
        self.queue.drain(..)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn advance_tick(&mut self) {
        self.now = self.now.wrapping_add(1);
    }
}

fn log_event(tick: u64, ev: &SimEvent) {
    match ev {
        SimEvent::Spawned { id, kind } => {
            log::debug!(target: "events", "[tick {}] Spawned {:?} #{}", tick, kind, id.0)
        }
        SimEvent::Removed { id, kind, cause } => {
            log::debug!(target: "events", "[tick {}] Removed {:?} #{} cause={:?}", tick, kind, id.0, cause)
        }
        SimEvent::SplashRequested { x, z } => {
            log::trace!(target: "events", "[tick {}] SplashRequested ({:.1},{:.1})", tick, x, z)
        }
        SimEvent::EnhanceVisual { id, asset } => {
            log::debug!(target: "events", "[tick {}] EnhanceVisual #{} asset={:?}", tick, id.0, asset)
        }
        SimEvent::SpawnIntervalTightened { interval } => {
            log::info!(target: "events", "[tick {}] pirate spawn interval reduced to {:.3}", tick, interval)
        }
        SimEvent::GameOver { final_score } => {
            log::info!(target: "events", "[tick {}] GameOver final_score={}", tick, final_score)
        }
        other => log::trace!(target: "events", "[tick {}] {:?}", tick, other),
    }
}
