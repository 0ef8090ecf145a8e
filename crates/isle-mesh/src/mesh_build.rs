use isle_geom::Vec3;
use isle_world::BlockPos;

use crate::face::Face;

/// Flat vertex/index buffers for one renderable surface.
#[derive(Default, Clone, Debug)]
pub struct MeshBuild {
    pub pos: Vec<f32>,
    pub norm: Vec<f32>,
    pub uv: Vec<f32>,
    pub idx: Vec<u32>,
}

impl MeshBuild {
    /// Pre-reserve capacity for approximately `n_quads` quads worth of data.
    #[inline]
    pub fn reserve_quads(&mut self, n_quads: usize) {
        self.pos.reserve(n_quads * 4 * 3);
        self.norm.reserve(n_quads * 4 * 3);
        self.uv.reserve(n_quads * 4 * 2);
        self.idx.reserve(n_quads * 6);
    }

    /// Appends a quad (two triangles) with explicit per-vertex UVs. Winding is
    /// flipped when the corners disagree with `n`.
    pub fn add_quad_uv(&mut self, corners: [Vec3; 4], n: Vec3, mut uvs: [(f32, f32); 4]) {
        let base = self.vertex_count() as u32;
        let mut vs = corners;
        let cross = (vs[1] - vs[0]).cross(vs[2] - vs[0]);
        if cross.dot(n) < 0.0 {
            vs.swap(1, 3);
            uvs.swap(1, 3);
        }
        for i in 0..4 {
            self.pos.extend_from_slice(&[vs[i].x, vs[i].y, vs[i].z]);
            self.norm.extend_from_slice(&[n.x, n.y, n.z]);
            self.uv.extend_from_slice(&[uvs[i].0, uvs[i].1]);
        }
        self.idx
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    /// Emits the unit quad on `face` of block `p`.
    pub fn add_block_face(&mut self, p: BlockPos, face: Face) {
        let o = Vec3::new(p.x as f32, p.y as f32, p.z as f32);
        let c = face.corners();
        let corners = c.map(|(x, y, z)| o + Vec3::new(x, y, z));
        let uvs = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)];
        self.add_quad_uv(corners, face.normal(), uvs);
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.pos.len() / 3
    }

    #[inline]
    pub fn quad_count(&self) -> usize {
        self.idx.len() / 6
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.idx.is_empty()
    }

    /// Interleaved vertex positions (x,y,z per vertex).
    pub fn positions(&self) -> &[f32] {
        &self.pos
    }

    pub fn normals(&self) -> &[f32] {
        &self.norm
    }
}
