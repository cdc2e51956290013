// Copyright 2025 the Replica Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recentering of a whole instanced group.

use glam::{Mat4, Vec3};
use replica_mesh::Aabb3;

use crate::stage::{Cx, Stage};
use crate::types::CenterFlags;

/// Moves everything inside it so the aggregate box is centered (or floored).
///
/// `begin` drives the inner stream twice. The first pass transforms the mesh's 8
/// bounding corners by every inner instance and folds them into one box covering the
/// whole group. The offset derived from that box is cached per thread, and the second
/// `begin` rewinds the inner stream for emission.
///
/// Per axis the offset is:
/// - `-(min + (max - min) / 2)` when the axis is flagged for centering,
/// - `-min.y` on y when [`CenterFlags::FLOOR_Y`] is set (overrides [`CenterFlags::Y`]),
/// - zero otherwise, and on every axis when the inner stream is empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Center {
    flags: CenterFlags,
}

impl Center {
    /// Decorator recentering the axes selected by `flags`.
    pub const fn new(flags: CenterFlags) -> Self {
        Self { flags }
    }

    /// Axes this stage recenters.
    pub const fn flags(&self) -> CenterFlags {
        self.flags
    }

    /// Offset that moves `bounds` as configured.
    pub fn offset(&self, bounds: &Aabb3) -> Vec3 {
        if bounds.is_empty() {
            return Vec3::ZERO;
        }
        let mid = bounds.center();
        let pick = |flag: CenterFlags, v: f32| if self.flags.contains(flag) { -v } else { 0.0 };
        let y = if self.flags.contains(CenterFlags::FLOOR_Y) {
            -bounds.min.y
        } else {
            pick(CenterFlags::Y, mid.y)
        };
        Vec3::new(pick(CenterFlags::X, mid.x), y, pick(CenterFlags::Z, mid.z))
    }
}

impl Stage for Center {
    fn begin(&self, cx: &mut Cx<'_, '_>) {
        let corners = cx.mesh().corners();
        let mut bounds = Aabb3::EMPTY;
        cx.inner_begin();
        while let Some(m) = cx.inner_next() {
            for &c in corners {
                bounds = bounds.union_point(m.transform_point3(c));
            }
        }
        let offset = self.offset(&bounds);
        log::trace!(
            "center {:?} on {:?}: aggregate {bounds:?}, offset {offset}",
            cx.stage(),
            cx.thread()
        );
        cx.slot().xform = Mat4::from_translation(offset);
        cx.inner_begin();
    }

    fn next(&self, cx: &mut Cx<'_, '_>) -> Option<Mat4> {
        let inner = cx.inner_next()?;
        Some(cx.slot().xform * inner)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;
    use replica_mesh::Mesh;

    use crate::{Scene, ThreadId};

    use super::*;

    fn aggregate(scene: &Scene<'_>, root: crate::StageId, mesh: &Mesh) -> Aabb3 {
        let mut cursor = scene.cursor(ThreadId::MAIN);
        scene
            .matrices(root, &mut cursor)
            .flat_map(|m| mesh.corners().map(|c| m.transform_point3(c)))
            .fold(Aabb3::EMPTY, Aabb3::union_point)
    }

    #[test]
    fn all_axes_center_the_group_on_the_origin() {
        let mesh = Mesh::cube(0.5);
        let mut scene = Scene::new();
        let start = Mat4::from_translation(Vec3::new(3.0, 7.0, -2.0));
        let leaf = scene.set(&mesh, start);
        let step = Vec3::new(1.5, 0.25, 0.0);
        let row = scene.multiply(leaf, 4, step, Vec3::X * 0.1).unwrap();
        let flags = CenterFlags::X | CenterFlags::Y | CenterFlags::Z;
        let root = scene.center(row, flags).unwrap();
        let c = aggregate(&scene, root, &mesh).center();
        assert!(c.abs_diff_eq(Vec3::ZERO, 1e-5), "center {c}");
    }

    #[test]
    fn floor_rests_the_lowest_point_on_zero() {
        let mesh = Mesh::cube(0.5);
        let mut scene = Scene::new();
        let leaf = scene.set(&mesh, Mat4::from_translation(Vec3::NEG_Y * 4.0));
        let stack = scene.multiply(leaf, 3, Vec3::Y, Vec3::ZERO).unwrap();
        let flags = CenterFlags::Y | CenterFlags::FLOOR_Y;
        let root = scene.center(stack, flags).unwrap();
        let b = aggregate(&scene, root, &mesh);
        assert!(b.min.y.abs() < 1e-5, "min y {}", b.min.y);
        assert!((b.max.y - 3.0).abs() < 1e-5, "max y {}", b.max.y);
    }

    #[test]
    fn unflagged_axes_stay_put() {
        let mesh = Mesh::cube(0.5);
        let mut scene = Scene::new();
        let leaf = scene.set(&mesh, Mat4::from_translation(Vec3::new(5.0, 6.0, 7.0)));
        let root = scene.center(leaf, CenterFlags::X).unwrap();
        let mut cursor = scene.cursor(ThreadId::MAIN);
        let all: Vec<Mat4> = scene.matrices(root, &mut cursor).collect();
        assert_eq!(all.len(), 1);
        let p = all[0].transform_point3(Vec3::ZERO);
        assert!(p.abs_diff_eq(Vec3::new(0.0, 6.0, 7.0), 1e-5), "{p}");
    }

    #[test]
    fn row_of_three_becomes_symmetric() {
        let mesh = Mesh::cube(0.5);
        let mut scene = Scene::new();
        let leaf = scene.set(&mesh, Mat4::IDENTITY);
        let row = scene.multiply(leaf, 3, Vec3::X, Vec3::ZERO).unwrap();
        let root = scene.center(row, CenterFlags::X).unwrap();
        let mut cursor = scene.cursor(ThreadId::MAIN);
        let xs: Vec<f32> = scene
            .matrices(root, &mut cursor)
            .map(|m| m.transform_point3(Vec3::ZERO).x)
            .collect();
        assert_eq!(xs, [-1.0, 0.0, 1.0]);
    }

    #[test]
    fn empty_group_gets_no_offset() {
        let c = Center::new(CenterFlags::all());
        assert_eq!(c.offset(&Aabb3::EMPTY), Vec3::ZERO);
    }

    #[test]
    fn nested_centers_restart_their_inner_chains() {
        let mesh = Mesh::cube(0.5);
        let mut scene = Scene::new();
        let leaf = scene.set(&mesh, Mat4::IDENTITY);
        let row = scene.multiply(leaf, 2, Vec3::X, Vec3::ZERO).unwrap();
        let inner = scene.center(row, CenterFlags::X).unwrap();
        let grid = scene.multiply(inner, 2, Vec3::Z, Vec3::ZERO).unwrap();
        let root = scene.center(grid, CenterFlags::default()).unwrap();
        let mut cursor = scene.cursor(ThreadId::MAIN);
        let pts: Vec<Vec3> = scene
            .matrices(root, &mut cursor)
            .map(|m| m.transform_point3(Vec3::ZERO))
            .collect();
        let expected = [
            Vec3::new(-0.5, 0.0, -0.5),
            Vec3::new(0.5, 0.0, -0.5),
            Vec3::new(-0.5, 0.0, 0.5),
            Vec3::new(0.5, 0.0, 0.5),
        ];
        assert_eq!(pts.len(), expected.len());
        for (p, e) in pts.iter().zip(expected) {
            assert!(p.abs_diff_eq(e, 1e-5), "{p} != {e}");
        }
    }
}
