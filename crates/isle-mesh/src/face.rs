use isle_geom::Vec3;
use isle_world::BlockPos;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Face {
    PosY = 0,
    NegY = 1,
    PosX = 2,
    NegX = 3,
    PosZ = 4,
    NegZ = 5,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::PosY,
        Face::NegY,
        Face::PosX,
        Face::NegX,
        Face::PosZ,
        Face::NegZ,
    ];

    /// Returns the `[0..6)` index of this face.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn normal(self) -> Vec3 {
        let (dx, dy, dz) = self.delta();
        Vec3::new(dx as f32, dy as f32, dz as f32)
    }

    /// Integer grid delta `(dx,dy,dz)` when stepping out of this face.
    #[inline]
    pub fn delta(self) -> (i32, i32, i32) {
        match self {
            Face::PosY => (0, 1, 0),
            Face::NegY => (0, -1, 0),
            Face::PosX => (1, 0, 0),
            Face::NegX => (-1, 0, 0),
            Face::PosZ => (0, 0, 1),
            Face::NegZ => (0, 0, -1),
        }
    }

    /// Cell on the other side of this face of `p`.
    #[inline]
    pub fn neighbor(self, p: BlockPos) -> BlockPos {
        let (dx, dy, dz) = self.delta();
        p.offset(dx, dy, dz)
    }

    /// Unit-cube corner offsets of this face, counter-clockwise seen from outside.
    pub fn corners(self) -> [(f32, f32, f32); 4] {
        match self {
            Face::PosX => [(1., 0., 0.), (1., 1., 0.), (1., 1., 1.), (1., 0., 1.)],
            Face::NegX => [(0., 0., 1.), (0., 1., 1.), (0., 1., 0.), (0., 0., 0.)],
            Face::PosY => [(0., 1., 0.), (0., 1., 1.), (1., 1., 1.), (1., 1., 0.)],
            Face::NegY => [(0., 0., 1.), (0., 0., 0.), (1., 0., 0.), (1., 0., 1.)],
            Face::PosZ => [(1., 0., 1.), (1., 1., 1.), (0., 1., 1.), (0., 0., 1.)],
            Face::NegZ => [(0., 0., 0.), (0., 1., 0.), (1., 1., 0.), (1., 0., 0.)],
        }
    }
}
