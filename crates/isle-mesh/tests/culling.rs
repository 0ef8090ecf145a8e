use isle_mesh::{Face, build_surface_mesh, build_terrain_meshes, exposed_faces};
use isle_world::{BlockPos, Material, Occupancy, Terrain, WorldGenConfig};
use proptest::prelude::*;

fn occ_of(blocks: &[BlockPos]) -> Occupancy {
    blocks.iter().copied().collect()
}

#[test]
fn lone_block_emits_six_faces() {
    let b = [BlockPos::new(0, 0, 0)];
    let mesh = build_surface_mesh(&b, &occ_of(&b)).unwrap();
    assert_eq!(mesh.quad_count(), 6);
    assert_eq!(mesh.vertex_count(), 24);
}

#[test]
fn fully_enclosed_block_emits_nothing() {
    let mut blocks = Vec::new();
    for x in -1..=1 {
        for y in -1..=1 {
            for z in -1..=1 {
                blocks.push(BlockPos::new(x, y, z));
            }
        }
    }
    let occ = occ_of(&blocks);
    assert!(build_surface_mesh(&[BlockPos::new(0, 0, 0)], &occ).is_none());
    // 3x3x3 cube: 9 faces per side.
    assert_eq!(build_surface_mesh(&blocks, &occ).unwrap().quad_count(), 54);
}

#[test]
fn faces_culled_against_other_materials() {
    // Grass on top of dirt: the shared face is hidden from both meshes.
    let grass = [BlockPos::new(0, 1, 0)];
    let dirt = [BlockPos::new(0, 0, 0)];
    let occ = occ_of(&[grass[0], dirt[0]]);
    let g: Vec<Face> = exposed_faces(grass[0], &occ).collect();
    assert!(!g.contains(&Face::NegY));
    assert_eq!(g.len(), 5);
    assert_eq!(build_surface_mesh(&dirt, &occ).unwrap().quad_count(), 5);
}

#[test]
fn normals_point_out_of_the_block() {
    let b = [BlockPos::new(2, 3, 4)];
    let mesh = build_surface_mesh(&b, &occ_of(&b)).unwrap();
    let center = [2.5f32, 3.5, 4.5];
    for (v, n) in mesh.positions().chunks(3).zip(mesh.normals().chunks(3)) {
        let outward: f32 = (0..3).map(|i| (v[i] - center[i]) * n[i]).sum();
        assert!(outward > 0.0);
    }
}

#[test]
fn water_plane_masks_only_water_columns() {
    let cfg = WorldGenConfig {
        half: 4,
        ..Default::default()
    };
    let t = Terrain::from_heights(&cfg, |x, z| if x == 0 && z == 0 { 2 } else { -3 });
    let meshes = build_terrain_meshes(&t);
    let water = meshes.water.as_ref().unwrap();
    assert!((water.y - 0.99).abs() < 1e-6);
    for c in t.columns() {
        let (x, z) = c.center_xz();
        assert_eq!(water.is_visible_at(x, z), c.is_water());
    }
    assert!(!water.is_visible_at(10.0, 0.0));
    assert!(meshes.surface(Material::Grass).is_some());
    assert!(meshes.total_quads() > 0);
}

#[test]
fn dry_world_has_no_water_plane() {
    let cfg = WorldGenConfig {
        half: 3,
        ..Default::default()
    };
    let t = Terrain::from_heights(&cfg, |_, _| 4);
    assert!(build_terrain_meshes(&t).water.is_none());
}

fn arb_blocks() -> impl Strategy<Value = Vec<BlockPos>> {
    proptest::collection::vec((-3i32..3, -3i32..3, -3i32..3), 1..60)
        .prop_map(|v| v.into_iter().map(BlockPos::from).collect())
}

proptest! {
    // No quad is ever emitted between two occupied cells
    #[test]
    fn no_face_between_occupied_cells(blocks in arb_blocks()) {
        let occ = occ_of(&blocks);
        let mut expected = 0usize;
        for &p in &blocks {
            let faces: Vec<Face> = exposed_faces(p, &occ).collect();
            prop_assert!(faces.len() <= 6);
            for f in Face::ALL {
                let hidden = occ.contains(f.neighbor(p));
                prop_assert_eq!(faces.contains(&f), !hidden);
            }
            expected += faces.len();
        }
        let got = build_surface_mesh(&blocks, &occ).map_or(0, |m| m.quad_count());
        prop_assert_eq!(got, expected);
    }
}
