// Copyright 2025 the Replica Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One chain, many workers.
//!
//! Load a chain from JSON, then let every worker thread traverse it with its own
//! cursor. Each worker counts the faces it would rasterize.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p replica_demos --example parallel_workers`

use replica_mesh::Mesh;
use replica_pipeline::parallel::for_each_worker;
use replica_pipeline::{ChainDesc, MAX_THREADS, Scene};

const CHAIN: &str = r#"{
    "origin": [0.0, 0.0, 0.0],
    "stages": [
        {
            "op": "multiply_compound",
            "count": 24,
            "translate": [0.0, 0.3, 2.0],
            "rotate": [0.0, 15.0, 0.0]
        },
        { "op": "scatter", "count": 8, "extent": [4.0, 0.0, 4.0] },
        { "op": "center", "x": true, "z": true, "floor": true },
        { "op": "material", "band": [0, 5] },
        { "op": "shadows" }
    ]
}"#;

fn main() {
    env_logger::init();

    let desc: ChainDesc = serde_json::from_str(CHAIN).unwrap();
    let mesh = Mesh::cube(0.5);
    let mut scene = Scene::new();
    let root = scene.build_chain(&mesh, &desc).unwrap();
    println!("casts shadows: {}", scene.supports_shadows(root));

    let mut slots = scene.thread_slots(MAX_THREADS).unwrap();
    let faces = for_each_worker(&scene, &mut slots, |scene, cursor| {
        let mut buf = Vec::new();
        let mut it = scene.instances(root, cursor);
        let mut total = 0_usize;
        while it.next_into(&mut buf).is_some() {
            total += buf.len();
        }
        total
    });
    for (thread, n) in faces.iter().enumerate() {
        println!("worker {thread}: {n} faces");
    }
    assert!(faces.iter().all(|n| *n == faces[0]));
}
