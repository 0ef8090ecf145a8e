use std::ops::RangeInclusive;

use log::info;

use crate::column::{Column, TopType};
use crate::heightfield::HeightField;
use crate::occupancy::{BlockPos, Material, Occupancy};
use crate::worldgen::WorldGenConfig;

/// The water plane sits this far below `sea_level + 1` so it never z-fights
/// with the tops of sea-level blocks.
pub const WATER_PLANE_EPS: f32 = 0.01;

/// Immutable voxel island: per-column metadata, solid blocks per material,
/// and the global occupancy set.
#[derive(Clone, Debug)]
pub struct Terrain {
    half: i32,
    sea_level: i32,
    floor_y: i32,
    columns: Vec<Column>,
    blocks: [Vec<BlockPos>; 3],
    occupancy: Occupancy,
    has_water: bool,
}

impl Terrain {
    /// Samples the height field for `seed` and builds the island.
    pub fn build(seed: i32, cfg: &WorldGenConfig) -> Self {
        let field = HeightField::new(seed, cfg);
        let terrain = Self::from_heights(cfg, |x, z| field.sample(x, z));
        info!(
            "terrain built seed={} columns={} grass={} dirt={} stone={} water={}",
            seed,
            terrain.columns.len(),
            terrain.blocks(Material::Grass).len(),
            terrain.blocks(Material::Dirt).len(),
            terrain.blocks(Material::Stone).len(),
            terrain.has_water
        );
        terrain
    }

    /// Builds the island from an arbitrary height function over the grid.
    pub fn from_heights(cfg: &WorldGenConfig, mut height: impl FnMut(i32, i32) -> i32) -> Self {
        let half = cfg.half.max(0);
        let size = cfg.size();
        let sea = cfg.sea_level;
        let floor_y = cfg.floor_y;
        let dirt_depth = cfg.dirt_depth.max(0);

        let mut raw = vec![0i32; size * size];
        for iz in -half..half {
            for ix in -half..half {
                raw[grid_index(half, ix, iz)] = height(ix, iz);
            }
        }
        let raw_at = |ix: i32, iz: i32| -> Option<i32> {
            if ix < -half || ix >= half || iz < -half || iz >= half {
                None
            } else {
                Some(raw[grid_index(half, ix, iz)])
            }
        };
        let touches_land = |ix: i32, iz: i32| {
            [(1, 0), (-1, 0), (0, 1), (0, -1)]
                .iter()
                .any(|&(dx, dz)| raw_at(ix + dx, iz + dz).is_some_and(|h| h > sea))
        };

        let mut columns = Vec::with_capacity(size * size);
        let mut grass = Vec::new();
        let mut dirt = Vec::new();
        let mut stone = Vec::new();

        for iz in -half..half {
            for ix in -half..half {
                let h = raw[grid_index(half, ix, iz)];
                let edge = ix == -half || ix == half - 1 || iz == -half || iz == half - 1;
                let (top_type, surface_y) = if h > sea {
                    (TopType::Grass, h)
                } else if edge || touches_land(ix, iz) {
                    (TopType::Grass, sea)
                } else {
                    (TopType::Water, h)
                };
                let top_solid_y = match top_type {
                    TopType::Grass => surface_y,
                    TopType::Water => h - 1,
                };
                columns.push(Column {
                    ix,
                    iz,
                    height: h,
                    surface_y,
                    top_type,
                    top_solid_y,
                });

                let stone_top = match top_type {
                    TopType::Grass => {
                        grass.push(BlockPos::new(ix, surface_y, iz));
                        for d in 1..=dirt_depth {
                            let y = surface_y - d;
                            if y >= floor_y {
                                dirt.push(BlockPos::new(ix, y, iz));
                            }
                        }
                        surface_y - dirt_depth - 1
                    }
                    TopType::Water => h - 1,
                };
                // Every column keeps at least one stone block, even when the
                // stack would otherwise end above the floor.
                for y in floor_y.min(stone_top)..=stone_top {
                    stone.push(BlockPos::new(ix, y, iz));
                }
            }
        }

        let has_water = columns.iter().any(Column::is_water);
        let occupancy: Occupancy = grass
            .iter()
            .chain(dirt.iter())
            .chain(stone.iter())
            .copied()
            .collect();

        Self {
            half,
            sea_level: sea,
            floor_y,
            columns,
            blocks: [grass, dirt, stone],
            occupancy,
            has_water,
        }
    }

    #[inline]
    pub fn half(&self) -> i32 {
        self.half
    }

    #[inline]
    pub fn size(&self) -> usize {
        (self.half as usize) * 2
    }

    #[inline]
    pub fn sea_level(&self) -> i32 {
        self.sea_level
    }

    #[inline]
    pub fn floor_y(&self) -> i32 {
        self.floor_y
    }

    /// True if at least one column is still water after the shoreline rules.
    #[inline]
    pub fn has_water(&self) -> bool {
        self.has_water
    }

    /// Y of the global water plane, or `None` if the world has no water.
    pub fn water_plane_y(&self) -> Option<f32> {
        self.has_water
            .then(|| self.sea_level as f32 + 1.0 - WATER_PLANE_EPS)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column at integer grid coordinates, `None` outside the generated region.
    #[inline]
    pub fn column(&self, ix: i32, iz: i32) -> Option<&Column> {
        if ix < -self.half || ix >= self.half || iz < -self.half || iz >= self.half {
            return None;
        }
        self.columns.get(grid_index(self.half, ix, iz))
    }

    /// Navigation query: the column under a continuous (x, z), floored.
    #[inline]
    pub fn column_at(&self, x: f32, z: f32) -> Option<&Column> {
        if !x.is_finite() || !z.is_finite() {
            return None;
        }
        self.column(x.floor() as i32, z.floor() as i32)
    }

    /// Integer range `[-half + low, half - high]` used for inset spawn picks.
    /// `None` when the inset leaves no columns.
    pub fn inset_range(&self, low: i32, high: i32) -> Option<RangeInclusive<i32>> {
        let lo = -self.half + low;
        let hi = self.half - high;
        (lo <= hi).then_some(lo..=hi)
    }

    pub fn blocks(&self, material: Material) -> &[BlockPos] {
        &self.blocks[material.index()]
    }

    pub fn occupancy(&self) -> &Occupancy {
        &self.occupancy
    }

    #[inline]
    pub fn is_solid(&self, x: i32, y: i32, z: i32) -> bool {
        self.occupancy.is_solid(x, y, z)
    }

    /// One byte per column, row-major by Z then X starting at `(-half, -half)`:
    /// 255 over water columns, 0 elsewhere.
    pub fn water_mask(&self) -> Vec<u8> {
        self.columns
            .iter()
            .map(|c| if c.is_water() { 255 } else { 0 })
            .collect()
    }
}

#[inline]
fn grid_index(half: i32, ix: i32, iz: i32) -> usize {
    let size = (half * 2) as usize;
    ((iz + half) as usize) * size + (ix + half) as usize
}
