use criterion::{Criterion, black_box, criterion_group, criterion_main};
use std::time::Duration;

use isle_mesh::{build_surface_mesh, build_terrain_meshes};
use isle_world::{Material, Terrain, WorldGenConfig};

fn bench_terrain_meshes(c: &mut Criterion) {
    let mut group = c.benchmark_group("terrain_meshes");
    let cfg = WorldGenConfig::default();
    let terrain = Terrain::build(1337, &cfg);
    group.bench_function("island_64x64", |b| {
        b.iter(|| {
            let out = build_terrain_meshes(black_box(&terrain));
            black_box(out);
        })
    });
    group.finish();
}

fn bench_stone_only(c: &mut Criterion) {
    let mut group = c.benchmark_group("stone_surface");
    let terrain = Terrain::build(0xC0FFEE, &WorldGenConfig::default());
    group.bench_function("stone_64x64", |b| {
        b.iter(|| {
            let out = build_surface_mesh(terrain.blocks(Material::Stone), terrain.occupancy());
            black_box(out);
        })
    });
    group.finish();
}

fn bench_world_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("world_build");
    let cfg = WorldGenConfig::default();
    group.bench_function("terrain_64x64", |b| {
        b.iter(|| black_box(Terrain::build(7, &cfg)))
    });
    group.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .sample_size(20)
        .measurement_time(Duration::from_secs(5));
    targets = bench_terrain_meshes, bench_stone_only, bench_world_build
}
criterion_main!(benches);
