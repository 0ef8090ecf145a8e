//! Island sizing, height sampling, voxel columns, and terrain queries.
#![forbid(unsafe_code)]

pub mod column;
pub mod heightfield;
pub mod occupancy;
pub mod terrain;
pub mod worldgen;

pub use column::{Column, TopType};
pub use heightfield::HeightField;
pub use occupancy::{BlockPos, Material, Occupancy};
pub use terrain::{Terrain, WATER_PLANE_EPS};
pub use worldgen::{WorldGenConfig, load_worldgen_from_path};
