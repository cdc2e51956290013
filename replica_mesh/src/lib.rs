// Copyright 2025 the Replica Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Replica Mesh: read-only triangle storage for instancing pipelines.
//!
//! A [`Mesh`] is an ordered list of [`Face`]s over a vertex array, plus 8 object-space
//! bounding corners. Instancing stages read faces in storage order and transform the
//! corners to compute aggregate bounds; nothing downstream ever mutates a mesh, so one
//! mesh can be shared by reference across every worker thread.
//!
//! [`Aabb3`] is the 3D axis-aligned box used for those aggregate bounds.
//!
//! # Example
//!
//! ```rust
//! use replica_mesh::{Aabb3, Mesh};
//! use glam::{Mat4, Vec3};
//!
//! let cube = Mesh::cube(0.5);
//! assert_eq!(cube.faces().len(), 12);
//!
//! // Bounds of the cube after moving it two units along +x.
//! let moved = Mat4::from_translation(Vec3::new(2.0, 0.0, 0.0));
//! let b = Aabb3::from_points(cube.corners().iter().map(|&c| moved.transform_point3(c)));
//! assert_eq!(b.center(), Vec3::new(2.0, 0.0, 0.0));
//! ```
//!
//! ### Float semantics
//!
//! This crate assumes no NaNs in vertex positions.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod mesh;
pub mod types;

pub use mesh::{Face, Mesh};
pub use types::Aabb3;
