// Copyright 2025 the Replica Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Linear replication.

use glam::{Mat4, Vec3};

use crate::stage::{Cx, Stage};
use crate::stages::{begin_replicas, next_replica};

/// Replicates the inner stream `count` times along an arithmetic progression.
///
/// Replica `i` is placed by `T(i * translate) * S(1 + i * scale)`, computed from `i`
/// alone, so the spacing between replicas is constant. Compare
/// [`MultiplyCompound`](crate::stages::MultiplyCompound), which accumulates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Multiply {
    count: u32,
    translate: Vec3,
    scale: Vec3,
}

impl Multiply {
    /// `count` replicas, each `translate` further along and `scale` larger than the previous.
    ///
    /// A `count` of zero produces no instances.
    pub const fn new(count: u32, translate: Vec3, scale: Vec3) -> Self {
        Self {
            count,
            translate,
            scale,
        }
    }

    /// Number of replicas.
    pub const fn count(&self) -> u32 {
        self.count
    }

    /// Absolute transform of replica `index`.
    pub fn replica(&self, index: u32) -> Mat4 {
        #[allow(
            clippy::cast_precision_loss,
            reason = "Replica counts are far below f32's exact integer range."
        )]
        let i = index as f32;
        Mat4::from_translation(self.translate * i) * Mat4::from_scale(Vec3::ONE + self.scale * i)
    }
}

impl Stage for Multiply {
    fn begin(&self, cx: &mut Cx<'_, '_>) {
        begin_replicas(cx, self.count, |_| self.replica(0));
    }

    fn next(&self, cx: &mut Cx<'_, '_>) -> Option<Mat4> {
        next_replica(cx, self.count, |s| s.xform = self.replica(s.index))
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;
    use replica_mesh::Mesh;

    use crate::{Scene, ThreadId};

    use super::*;

    fn origin(m: &Mat4) -> Vec3 {
        m.transform_point3(Vec3::ZERO)
    }

    #[test]
    fn yields_count_times_inner() {
        let mesh = Mesh::cube(0.5);
        let mut scene = Scene::new();
        let leaf = scene.set(&mesh, Mat4::IDENTITY);
        let pair = scene.multiply(leaf, 2, Vec3::Z, Vec3::ZERO).unwrap();
        let outer = scene.multiply(pair, 3, Vec3::X, Vec3::ZERO).unwrap();
        let mut cursor = scene.cursor(ThreadId::MAIN);
        let all: Vec<Mat4> = scene.matrices(outer, &mut cursor).collect();
        assert_eq!(all.len(), 6);
        // Blocks of the inner pair, one block per outer replica.
        let expected = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 1.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 1.0),
        ];
        for (m, e) in all.iter().zip(expected) {
            assert!(origin(m).abs_diff_eq(e, 1e-6), "{} != {e}", origin(m));
        }
    }

    #[test]
    fn replicas_are_absolute_not_accumulated() {
        let step = Multiply::new(4, Vec3::new(1.0, 2.0, 0.0), Vec3::splat(0.5));
        let mesh = Mesh::cube(0.5);
        let mut scene = Scene::new();
        let leaf = scene.set(&mesh, Mat4::IDENTITY);
        let outer = scene.insert(leaf, step).unwrap();
        let mut cursor = scene.cursor(ThreadId::MAIN);
        let all: Vec<Mat4> = scene.matrices(outer, &mut cursor).collect();
        assert_eq!(all.len(), 4);
        for (i, m) in (0_u32..).zip(&all) {
            let f = i as f32;
            let expected = Mat4::from_translation(Vec3::new(f, 2.0 * f, 0.0))
                * Mat4::from_scale(Vec3::splat(1.0 + 0.5 * f));
            assert!(
                m.abs_diff_eq(expected, 1e-5),
                "replica {i}: {m} != {expected}"
            );
        }
    }

    #[test]
    fn zero_count_is_empty() {
        let mesh = Mesh::cube(0.5);
        let mut scene = Scene::new();
        let leaf = scene.set(&mesh, Mat4::IDENTITY);
        let none = scene.multiply(leaf, 0, Vec3::X, Vec3::ZERO).unwrap();
        let mut cursor = scene.cursor(ThreadId::MAIN);
        assert_eq!(scene.matrices(none, &mut cursor).count(), 0);
    }

    #[test]
    fn empty_inner_emits_nothing() {
        let mesh = Mesh::cube(0.5);
        let mut scene = Scene::new();
        let leaf = scene.set(&mesh, Mat4::IDENTITY);
        let none = scene.multiply(leaf, 0, Vec3::X, Vec3::ZERO).unwrap();
        let outer = scene.multiply(none, 5, Vec3::Y, Vec3::ZERO).unwrap();
        let mut cursor = scene.cursor(ThreadId::MAIN);
        scene.begin(outer, &mut cursor);
        assert_eq!(scene.next(outer, &mut cursor), None);
        assert_eq!(scene.next(outer, &mut cursor), None);
    }

    #[test]
    fn empty_inner_ends_without_visiting_every_replica() {
        let mesh = Mesh::cube(0.5);
        let mut scene = Scene::new();
        let leaf = scene.set(&mesh, Mat4::IDENTITY);
        let none = scene.multiply(leaf, 0, Vec3::X, Vec3::ZERO).unwrap();
        let many = u32::MAX;
        let huge = scene.multiply(none, many, Vec3::Y, Vec3::ZERO).unwrap();
        let root = scene.center(huge, crate::CenterFlags::default()).unwrap();
        let mut cursor = scene.cursor(ThreadId::MAIN);
        assert_eq!(scene.matrices(root, &mut cursor).count(), 0);
        assert_eq!(cursor.slot_mut(huge).index, u32::MAX);
    }

    #[test]
    fn restart_mid_stream() {
        let mesh = Mesh::cube(0.5);
        let mut scene = Scene::new();
        let leaf = scene.set(&mesh, Mat4::IDENTITY);
        let outer = scene.multiply(leaf, 3, Vec3::X, Vec3::ZERO).unwrap();
        let mut cursor = scene.cursor(ThreadId::MAIN);
        scene.begin(outer, &mut cursor);
        let _ = scene.next(outer, &mut cursor);
        let _ = scene.next(outer, &mut cursor);
        let again: Vec<Mat4> = scene.matrices(outer, &mut cursor).collect();
        assert_eq!(again.len(), 3);
        assert_eq!(again[0], Mat4::IDENTITY);
    }
}
