// Copyright 2025 the Replica Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Accumulating replication.

use glam::{Mat4, Vec3};

use crate::stage::{Cx, Stage};
use crate::stages::{begin_replicas, next_replica};

/// Replicates the inner stream `count` times, each replica one step further than the last.
///
/// The step is `T(translate) * Rz * Ry * Rx` with angles in radians: applied to a point
/// it rotates about x first, then y, then z, and translates last. Replica 0 sits at the
/// identity and replica `i` at `step^i`, so a step that both moves and turns traces a
/// spiral rather than a line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MultiplyCompound {
    count: u32,
    step: Mat4,
}

impl MultiplyCompound {
    /// `count` replicas compounding a translation and x/y/z rotations (radians).
    pub fn new(count: u32, translate: Vec3, rotate: Vec3) -> Self {
        let step = Mat4::from_translation(translate)
            * Mat4::from_rotation_z(rotate.z)
            * Mat4::from_rotation_y(rotate.y)
            * Mat4::from_rotation_x(rotate.x);
        Self { count, step }
    }

    /// Number of replicas.
    pub const fn count(&self) -> u32 {
        self.count
    }

    /// Per-replica step transform.
    pub const fn step(&self) -> Mat4 {
        self.step
    }
}

impl Stage for MultiplyCompound {
    fn begin(&self, cx: &mut Cx<'_, '_>) {
        begin_replicas(cx, self.count, |_| Mat4::IDENTITY);
    }

    fn next(&self, cx: &mut Cx<'_, '_>) -> Option<Mat4> {
        next_replica(cx, self.count, |slot| slot.xform *= self.step)
    }
}
