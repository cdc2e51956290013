// Copyright 2025 the Replica Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use glam::{Mat4, Vec3};
use replica_mesh::Mesh;
use replica_pipeline::parallel::for_each_worker;
use replica_pipeline::{CenterFlags, MaterialBand, Scene, StageId, ThreadId};

fn grid<'m>(scene: &mut Scene<'m>, mesh: &'m Mesh, n: u32) -> StageId {
    let leaf = scene.set(mesh, Mat4::IDENTITY);
    let row = scene.multiply(leaf, n, Vec3::X, Vec3::ZERO).unwrap();
    scene.multiply(row, n, Vec3::Z, Vec3::ZERO).unwrap()
}

fn bench_matrices(c: &mut Criterion) {
    let mesh = Mesh::cube(0.5);
    let mut group = c.benchmark_group("matrices");
    for &n in &[8_u32, 32, 128] {
        let mut scene = Scene::new();
        let root = grid(&mut scene, &mesh, n);
        let mut cursor = scene.cursor(ThreadId::MAIN);
        group.throughput(Throughput::Elements(u64::from(n * n)));
        group.bench_function(format!("multiply_grid_n{n}"), |b| {
            b.iter(|| {
                let sum = scene
                    .matrices(root, &mut cursor)
                    .fold(Vec3::ZERO, |acc, m| acc + m.w_axis.truncate());
                black_box(sum);
            });
        });

        let mut scene = Scene::new();
        let inner = grid(&mut scene, &mesh, n);
        let root = scene.center(inner, CenterFlags::default()).unwrap();
        let mut cursor = scene.cursor(ThreadId::MAIN);
        group.bench_function(format!("centered_grid_n{n}"), |b| {
            b.iter(|| black_box(scene.matrices(root, &mut cursor).count()));
        });
    }
    group.finish();
}

fn bench_scatter(c: &mut Criterion) {
    let mesh = Mesh::cube(0.5);
    let mut group = c.benchmark_group("scatter");
    for &count in &[100_u32, 10_000] {
        let mut scene = Scene::new();
        let leaf = scene.set(&mesh, Mat4::IDENTITY);
        let root = scene.scatter(leaf, count, Vec3::splat(50.0)).unwrap();
        let mut cursor = scene.cursor(ThreadId::MAIN);
        group.throughput(Throughput::Elements(u64::from(count)));
        group.bench_function(format!("scatter_n{count}"), |b| {
            b.iter(|| black_box(scene.matrices(root, &mut cursor).count()));
        });
    }
    group.finish();
}

fn bench_instances(c: &mut Criterion) {
    let mesh = Mesh::cube(0.5);
    let mut group = c.benchmark_group("instances");
    let mut scene = Scene::new();
    let inner = grid(&mut scene, &mesh, 32);
    let band = MaterialBand::new(0, 7).unwrap();
    let root = scene.material(inner, band).unwrap();
    let mut cursor = scene.cursor(ThreadId::MAIN);
    let faces = 32 * 32 * mesh.faces().len() as u64;
    group.throughput(Throughput::Elements(faces));
    group.bench_function("banded_grid_n32", |b| {
        let mut buf = Vec::new();
        b.iter(|| {
            let mut it = scene.instances(root, &mut cursor);
            let mut total = 0_usize;
            while it.next_into(&mut buf).is_some() {
                total += buf.len();
            }
            black_box(total);
        });
    });
    group.finish();
}

fn bench_parallel(c: &mut Criterion) {
    let mesh = Mesh::cube(0.5);
    let mut group = c.benchmark_group("parallel");
    let mut scene = Scene::new();
    let inner = grid(&mut scene, &mesh, 64);
    let root = scene.center(inner, CenterFlags::default()).unwrap();
    for &threads in &[1_usize, 4, 16] {
        let mut slots = scene.thread_slots(threads).unwrap();
        group.bench_function(format!("centered_grid_n64_t{threads}"), |b| {
            b.iter(|| {
                let counts = for_each_worker(&scene, &mut slots, |scene, cursor| {
                    scene.matrices(root, cursor).count()
                });
                black_box(counts);
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_matrices,
    bench_scatter,
    bench_instances,
    bench_parallel
);
criterion_main!(benches);
