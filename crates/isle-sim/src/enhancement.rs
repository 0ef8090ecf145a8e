//! Optional richer visuals (hat, cutlass, chest model, alien head) that load
//! out-of-band. Entities start with primitive visuals; once an asset reports
//! ready, every entity waiting on it gets one `EnhanceVisual` event.

use crate::event::{EntityId, EventQueue, SimEvent};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Hat = 0,
    Weapon = 1,
    Chest = 2,
    HeadModel = 3,
}

impl AssetKind {
    pub const ALL: [AssetKind; 4] = [
        AssetKind::Hat,
        AssetKind::Weapon,
        AssetKind::Chest,
        AssetKind::HeadModel,
    ];

    #[inline]
    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// Set of enhancement assets an entity's visual can carry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Capabilities(u8);

impl Capabilities {
    pub const NONE: Capabilities = Capabilities(0);

    pub fn of(kinds: &[AssetKind]) -> Self {
        Capabilities(kinds.iter().fold(0, |acc, k| acc | k.bit()))
    }

    #[inline]
    pub fn contains(self, kind: AssetKind) -> bool {
        self.0 & kind.bit() != 0
    }

    #[inline]
    pub fn with(self, kind: AssetKind) -> Self {
        Capabilities(self.0 | kind.bit())
    }

    pub fn iter(self) -> impl Iterator<Item = AssetKind> {
        AssetKind::ALL.into_iter().filter(move |k| self.contains(*k))
    }
}

#[derive(Default)]
pub struct EnhancementQueue {
    ready: Capabilities,
    pending: Vec<(EntityId, AssetKind)>,
}

impl EnhancementQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues every asset in `caps` for `id`. Assets already ready are
    /// delivered on the next drain.
    pub fn request(&mut self, id: EntityId, caps: Capabilities) {
        self.pending.extend(caps.iter().map(|k| (id, k)));
    }

    pub fn mark_ready(&mut self, kind: AssetKind) {
        self.ready = self.ready.with(kind);
    }

    /// Drops requests of an entity that no longer exists.
    pub fn forget(&mut self, id: EntityId) {
        self.pending.retain(|(e, _)| *e != id);
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Emits `EnhanceVisual` for each pending request whose asset is ready.
    pub fn drain_ready(&mut self, events: &mut EventQueue) -> usize {
        let ready = self.ready;
        let before = self.pending.len();
        self.pending.retain(|&(id, asset)| {
            if ready.contains(asset) {
                events.emit(SimEvent::EnhanceVisual { id, asset });
                false
            } else {
                true
            }
        });
        before - self.pending.len()
    }

    pub fn clear_pending(&mut self) {
        self.pending.clear();
    }
}
