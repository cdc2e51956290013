// Copyright 2025 the Replica Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scatter field resting on the floor.
//!
//! Scatter copies inside a box, rest the whole group on `y = 0`, and report the
//! aggregate bounds. Run it twice: the field is the same every time.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p replica_demos --example scatter_field`

use glam::{Mat4, Vec3};
use replica_mesh::{Aabb3, Mesh};
use replica_pipeline::{CenterFlags, Scene, ThreadId};

fn main() {
    env_logger::init();

    let mesh = Mesh::cube(0.25);
    let mut scene = Scene::new();
    let leaf = scene.set(&mesh, Mat4::IDENTITY);
    let extent = Vec3::new(20.0, 2.0, 20.0);
    let field = scene.scatter(leaf, 200, extent).unwrap();
    let flags = CenterFlags::X | CenterFlags::Z | CenterFlags::FLOOR_Y;
    let root = scene.center(field, flags).unwrap();

    let mut cursor = scene.cursor(ThreadId::MAIN);
    let bounds = scene
        .matrices(root, &mut cursor)
        .flat_map(|m| mesh.corners().map(|c| m.transform_point3(c)))
        .fold(Aabb3::EMPTY, Aabb3::union_point);
    println!("field bounds: {} .. {}", bounds.min, bounds.max);
    assert!(bounds.min.y.abs() < 1e-4, "field should rest on the floor");

    let first = scene.matrices(root, &mut cursor).next();
    log::info!("first copy at {:?}", first.map(|m| m.w_axis.truncate()));
}
