// Copyright 2025 the Replica Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Triangle storage: faces, vertices, and object-space bounding corners.

use alloc::vec::Vec;
use glam::Vec3;

use crate::types::Aabb3;

/// A triangle referencing three vertices of its [`Mesh`].
///
/// Faces are small values. Instancing stages copy them as they stream by and may
/// overwrite [`Face::material`] on the copy; the mesh itself is never touched.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Face {
    /// Vertex indices, counter-clockwise.
    pub indices: [u32; 3],
    /// Material index used for shading.
    pub material: u32,
}

impl Face {
    /// A face with material `0`.
    pub const fn new(a: u32, b: u32, c: u32) -> Self {
        Self {
            indices: [a, b, c],
            material: 0,
        }
    }

    /// Same face with a different material.
    #[must_use]
    pub const fn with_material(mut self, material: u32) -> Self {
        self.material = material;
        self
    }
}

/// Immutable triangle mesh.
///
/// Meshes are built once and then shared by reference. The 8 `corners` describe an
/// object-space bounding volume; they default to the vertex AABB but may be any
/// conservative hull (for example a padded or oriented box).
#[derive(Clone, Debug, PartialEq)]
pub struct Mesh {
    vertices: Vec<Vec3>,
    faces: Vec<Face>,
    corners: [Vec3; 8],
}

impl Mesh {
    /// Build a mesh whose corners are the AABB of `vertices`.
    ///
    /// A mesh without vertices gets all corners at the origin.
    pub fn new(vertices: Vec<Vec3>, faces: Vec<Face>) -> Self {
        let bounds = Aabb3::from_points(vertices.iter().copied());
        let corners = if bounds.is_empty() {
            [Vec3::ZERO; 8]
        } else {
            bounds.corners()
        };
        Self {
            vertices,
            faces,
            corners,
        }
    }

    /// Build a mesh with explicit bounding corners.
    pub fn with_corners(vertices: Vec<Vec3>, faces: Vec<Face>, corners: [Vec3; 8]) -> Self {
        Self {
            vertices,
            faces,
            corners,
        }
    }

    /// Axis-aligned box centered on the origin, two triangles per side.
    pub fn cube(half_extent: f32) -> Self {
        let h = half_extent;
        let vertices = Vec::from(Aabb3::new(Vec3::splat(-h), Vec3::splat(h)).corners());
        // Corner bit layout: bit 0 = +x, bit 1 = +y, bit 2 = +z.
        let faces = Vec::from([
            Face::new(0, 2, 3), // -z
            Face::new(0, 3, 1),
            Face::new(4, 5, 7), // +z
            Face::new(4, 7, 6),
            Face::new(0, 4, 6), // -x
            Face::new(0, 6, 2),
            Face::new(1, 3, 7), // +x
            Face::new(1, 7, 5),
            Face::new(0, 1, 5), // -y
            Face::new(0, 5, 4),
            Face::new(2, 6, 7), // +y
            Face::new(2, 7, 3),
        ]);
        Self::new(vertices, faces)
    }

    /// Faces in storage order.
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Vertex positions in object space.
    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    /// The 8 object-space bounding corners.
    pub fn corners(&self) -> &[Vec3; 8] {
        &self.corners
    }

    /// Axis-aligned box of the bounding corners.
    pub fn bounds(&self) -> Aabb3 {
        Aabb3::from_points(self.corners)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_has_twelve_faces_and_tight_corners() {
        let m = Mesh::cube(0.5);
        assert_eq!(m.faces().len(), 12);
        assert_eq!(m.vertices().len(), 8);
        assert_eq!(m.bounds(), Aabb3::new(Vec3::splat(-0.5), Vec3::splat(0.5)));
        let in_range = |i: &u32| (*i as usize) < m.vertices().len();
        assert!(
            m.faces().iter().all(|f| f.indices.iter().all(in_range)),
            "every face index must reference a vertex"
        );
    }

    #[test]
    fn corners_follow_vertex_extent() {
        let vertices = Vec::from([
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(2.0, 1.0, 0.0),
            Vec3::new(0.0, 3.0, 4.0),
        ]);
        let m = Mesh::new(vertices, Vec::from([Face::new(0, 1, 2)]));
        assert_eq!(m.bounds().min, Vec3::ZERO);
        assert_eq!(m.bounds().max, Vec3::new(2.0, 3.0, 4.0));
    }

    #[test]
    fn empty_mesh_collapses_to_origin() {
        let m = Mesh::new(Vec::new(), Vec::new());
        assert_eq!(m.corners(), &[Vec3::ZERO; 8]);
        assert!(m.faces().is_empty());
    }

    #[test]
    fn explicit_corners_are_kept() {
        let corners = Aabb3::new(Vec3::splat(-2.0), Vec3::splat(2.0)).corners();
        let m = Mesh::with_corners(Vec::from([Vec3::ZERO]), Vec::new(), corners);
        assert_eq!(m.bounds().size(), Vec3::splat(4.0));
    }

    #[test]
    fn with_material_only_touches_material() {
        let f = Face::new(1, 2, 3).with_material(7);
        assert_eq!(f.indices, [1, 2, 3]);
        assert_eq!(f.material, 7);
    }
}
