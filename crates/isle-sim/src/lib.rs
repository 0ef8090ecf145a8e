//! Frame-stepped island simulation: player, fish, pirates, beam, collectibles.
#![forbid(unsafe_code)]

pub mod beam;
pub mod collectible;
pub mod config;
pub mod enhancement;
pub mod error;
pub mod event;
pub mod fish;
pub mod input;
pub mod pirate;
pub mod player;
pub mod simulation;
pub mod state;

pub use config::{SimConfig, load_config_from_path};
pub use enhancement::{AssetKind, Capabilities};
pub use error::SpawnError;
pub use event::{EntityId, EntityKind, EventEnvelope, RemovalCause, SimEvent};
pub use input::InputIntent;
pub use simulation::{EntityTransform, Simulation};
pub use state::RunState;
