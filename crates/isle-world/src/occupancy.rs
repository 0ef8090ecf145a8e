use hashbrown::HashSet;
use isle_geom::Vec3;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            z: self.z + dz,
        }
    }

    /// Cell containing a continuous position.
    #[inline]
    pub fn containing(p: Vec3) -> Self {
        Self::new(p.x.floor() as i32, p.y.floor() as i32, p.z.floor() as i32)
    }
}

impl From<(i32, i32, i32)> for BlockPos {
    fn from(value: (i32, i32, i32)) -> Self {
        Self::new(value.0, value.1, value.2)
    }
}

/// Solid material classes; each gets its own combined surface mesh.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Material {
    Grass = 0,
    Dirt = 1,
    Stone = 2,
}

impl Material {
    pub const ALL: [Material; 3] = [Material::Grass, Material::Dirt, Material::Stone];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Material::Grass => "grass",
            Material::Dirt => "dirt",
            Material::Stone => "stone",
        }
    }
}

/// Sparse set of solid cells.
#[derive(Clone, Debug, Default)]
pub struct Occupancy {
    cells: HashSet<BlockPos>,
}

impl Occupancy {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn insert(&mut self, p: BlockPos) -> bool {
        self.cells.insert(p)
    }

    #[inline]
    pub fn contains(&self, p: BlockPos) -> bool {
        self.cells.contains(&p)
    }

    #[inline]
    pub fn is_solid(&self, x: i32, y: i32, z: i32) -> bool {
        self.contains(BlockPos::new(x, y, z))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = BlockPos> + '_ {
        self.cells.iter().copied()
    }
}

impl FromIterator<BlockPos> for Occupancy {
    fn from_iter<I: IntoIterator<Item = BlockPos>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}
