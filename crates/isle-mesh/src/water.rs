use isle_geom::Vec3;
use isle_world::Terrain;

use crate::mesh_build::MeshBuild;

/// Single horizontal plane over the whole map, alpha-masked to water columns.
#[derive(Clone, Debug)]
pub struct WaterPlane {
    pub y: f32,
    pub half: i32,
    /// One texel per column, row-major by Z starting at `(-half, -half)`.
    pub mask: Vec<u8>,
    pub mesh: MeshBuild,
}

impl WaterPlane {
    /// `None` when the world has no water at all.
    pub fn from_terrain(terrain: &Terrain) -> Option<Self> {
        let y = terrain.water_plane_y()?;
        let half = terrain.half();
        let h = half as f32;
        let mut mesh = MeshBuild::default();
        mesh.add_quad_uv(
            [
                Vec3::new(-h, y, -h),
                Vec3::new(-h, y, h),
                Vec3::new(h, y, h),
                Vec3::new(h, y, -h),
            ],
            Vec3::UP,
            [(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)],
        );
        Some(Self {
            y,
            half,
            mask: terrain.water_mask(),
            mesh,
        })
    }

    /// Whether the plane renders above world position (x, z). Samples the
    /// texel of the column containing the point.
    pub fn is_visible_at(&self, x: f32, z: f32) -> bool {
        let size = self.half * 2;
        let sx = x.floor() as i32 + self.half;
        let sz = z.floor() as i32 + self.half;
        if sx < 0 || sz < 0 || sx >= size || sz >= size {
            return false;
        }
        self.mask
            .get((sz * size + sx) as usize)
            .is_some_and(|&a| a > 0)
    }
}
