// Copyright 2025 the Replica Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Row of copies, centered.
//!
//! Replicate a cube three times along +x, center the row on x, and print where each
//! copy lands along with its material.
//!
//! Run:
//! - `cargo run -p replica_demos --example row_centered`

use glam::{Mat4, Vec3};
use replica_mesh::Mesh;
use replica_pipeline::{CenterFlags, MaterialBand, Scene, ThreadId};

fn main() {
    env_logger::init();

    let mesh = Mesh::cube(0.5);
    let mut scene = Scene::new();
    let leaf = scene.set(&mesh, Mat4::IDENTITY);
    let row = scene.multiply(leaf, 3, Vec3::X, Vec3::ZERO).unwrap();
    let centered = scene.center(row, CenterFlags::X).unwrap();
    let band = MaterialBand::new(1, 2).unwrap();
    let root = scene.material(centered, band).unwrap();
    println!("{scene:?}");

    let mut cursor = scene.cursor(ThreadId::MAIN);
    for (i, instance) in scene.instances(root, &mut cursor).enumerate() {
        let at = instance.transform.transform_point3(Vec3::ZERO);
        println!(
            "copy {i}: at {at}, {} faces, material {}",
            instance.faces.len(),
            instance.faces[0].material
        );
    }
}
