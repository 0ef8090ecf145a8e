//! Boundary-face surface meshes for terrain materials plus the masked water plane.
#![forbid(unsafe_code)]

pub mod face;
pub mod mesh_build;
pub mod water;

pub use face::Face;
pub use mesh_build::MeshBuild;
pub use water::WaterPlane;

use isle_world::{BlockPos, Material, Occupancy, Terrain};
use log::debug;

/// Faces of `p` whose neighbor cell is empty.
pub fn exposed_faces(p: BlockPos, occupancy: &Occupancy) -> impl Iterator<Item = Face> + '_ {
    Face::ALL
        .into_iter()
        .filter(move |f| !occupancy.contains(f.neighbor(p)))
}

/// Combined mesh of every exposed face of `blocks`, or `None` when nothing is exposed.
pub fn build_surface_mesh(blocks: &[BlockPos], occupancy: &Occupancy) -> Option<MeshBuild> {
    let mut mb = MeshBuild::default();
    mb.reserve_quads(blocks.len());
    for &p in blocks {
        for face in exposed_faces(p, occupancy) {
            mb.add_block_face(p, face);
        }
    }
    if mb.is_empty() { None } else { Some(mb) }
}

/// Renderable output of one world build.
#[derive(Clone, Debug, Default)]
pub struct TerrainMeshes {
    /// Indexed by `Material::index()`.
    pub surfaces: [Option<MeshBuild>; 3],
    pub water: Option<WaterPlane>,
}

impl TerrainMeshes {
    pub fn surface(&self, material: Material) -> Option<&MeshBuild> {
        self.surfaces[material.index()].as_ref()
    }

    pub fn total_quads(&self) -> usize {
        self.surfaces
            .iter()
            .flatten()
            .map(MeshBuild::quad_count)
            .sum()
    }
}

pub fn build_terrain_meshes(terrain: &Terrain) -> TerrainMeshes {
    let occ = terrain.occupancy();
    let surfaces = Material::ALL.map(|m| {
        let mesh = build_surface_mesh(terrain.blocks(m), occ);
        debug!(
            "mesh {} quads={}",
            m.name(),
            mesh.as_ref().map_or(0, MeshBuild::quad_count)
        );
        mesh
    });
    TerrainMeshes {
        surfaces,
        water: WaterPlane::from_terrain(terrain),
    }
}
