// Copyright 2025 the Replica Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Replica Pipeline: lazy, composable instance generation for software renderers.
//!
//! A chain of stages describes how copies of a mesh are placed, without ever building a
//! list of instances. The leaf stage emits one placement and the mesh's faces; each
//! decorator wraps exactly one inner stage and transforms its stream of placements, its
//! stream of faces, or both.
//!
//! - Replicate along a line ([`Multiply`](stages::Multiply)) or a compounding spiral
//!   ([`MultiplyCompound`](stages::MultiplyCompound)).
//! - Scatter copies at seeded pseudo-random offsets ([`Scatter`](stages::Scatter)).
//! - Center or floor a whole group by its aggregate bounds ([`Center`](stages::Center)).
//! - Cycle a material band across replicas ([`Material`](stages::Material)).
//! - Mark a subgraph as shadow-casting ([`Shadows`](stages::Shadows)).
//!
//! ## Streams
//!
//! Every stage implements the [`Stage`] contract, a pull protocol with two passes:
//! - matrix pass: `begin`, then `next` until it returns `None`;
//! - face pass: `fbegin`, then `fnext` until it returns `None`.
//!
//! The [`Scene`] dispatches both passes and also offers them as iterators
//! ([`Scene::matrices`], [`Scene::faces`], [`Scene::instances`]).
//!
//! ## Threads
//!
//! A scene is immutable once built and is shared by up to [`MAX_THREADS`] workers.
//! Iteration state lives in one [`Cursor`] per worker, which holds a slot per stage;
//! handing each worker its own `&mut Cursor` (see [`ThreadSlots`]) is what makes
//! concurrent traversal lock-free. With the `std` feature, [`parallel::for_each_worker`]
//! runs the workers on scoped threads.
//!
//! ## Arena
//!
//! A [`Scene`] owns its stages and hands out [`StageId`]s. Stages are never freed one
//! by one: [`Scene::clear`] resets the whole arena for the next scene or frame.
//!
//! # Example
//!
//! ```rust
//! use replica_mesh::Mesh;
//! use replica_pipeline::{CenterFlags, Scene, ThreadId};
//! use glam::{Mat4, Vec3};
//!
//! let mesh = Mesh::cube(0.5);
//! let mut scene = Scene::new();
//!
//! // Three copies along +x, then center the row on x.
//! let leaf = scene.set(&mesh, Mat4::IDENTITY);
//! let row = scene.multiply(leaf, 3, Vec3::X, Vec3::ZERO).unwrap();
//! let root = scene.center(row, CenterFlags::X).unwrap();
//!
//! let mut cursor = scene.cursor(ThreadId::MAIN);
//! let xs: Vec<f32> = scene
//!     .matrices(root, &mut cursor)
//!     .map(|m| m.transform_point3(Vec3::ZERO).x)
//!     .collect();
//! assert_eq!(xs, [-1.0, 0.0, 1.0]);
//! ```
//!
//! ### Float semantics
//!
//! This crate assumes finite transforms and mesh coordinates (no NaNs).
//!
//! This crate is `no_std` and uses `alloc`. The `std` feature adds [`parallel`]; the
//! `serde` feature makes the [`desc`] types (de)serializable.

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod cursor;
pub mod desc;
pub mod drive;
pub mod error;
#[cfg(feature = "std")]
pub mod parallel;
pub mod scene;
pub mod stage;
pub mod stages;
pub mod types;

pub use cursor::{Cursor, Slot, ThreadSlots};
pub use desc::{ChainDesc, StageDesc};
pub use drive::{Faces, Instance, Instances, Matrices};
pub use error::BuildError;
pub use scene::Scene;
pub use stage::{Cx, Stage};
pub use types::{CenterFlags, MAX_THREADS, MaterialBand, StageId, ThreadId};
