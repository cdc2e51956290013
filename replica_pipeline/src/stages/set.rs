// Copyright 2025 the Replica Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Leaf stage: one fixed placement and the mesh's faces.

use glam::Mat4;
use replica_mesh::Face;

use crate::stage::{Cx, Stage};

/// Leaf of every chain.
///
/// Emits its transform exactly once per `begin`, and the faces of its mesh in storage
/// order. This is the only stage faces originate from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Set {
    transform: Mat4,
}

impl Set {
    /// Leaf placing the mesh at `transform`.
    pub const fn new(transform: Mat4) -> Self {
        Self { transform }
    }
}

impl Stage for Set {
    fn begin(&self, cx: &mut Cx<'_, '_>) {
        cx.slot().index = 0;
    }

    fn next(&self, cx: &mut Cx<'_, '_>) -> Option<Mat4> {
        let slot = cx.slot();
        if slot.index == 0 {
            slot.index = 1;
            Some(self.transform)
        } else {
            None
        }
    }

    fn fbegin(&self, cx: &mut Cx<'_, '_>) {
        cx.slot().face = 0;
    }

    fn fnext(&self, cx: &mut Cx<'_, '_>) -> Option<Face> {
        let faces = cx.mesh().faces();
        let slot = cx.slot();
        let face = faces.get(slot.face).copied()?;
        slot.face += 1;
        Some(face)
    }
}
