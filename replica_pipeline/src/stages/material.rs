// Copyright 2025 the Replica Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Material banding across replicas.

use glam::Mat4;
use replica_mesh::Face;

use crate::stage::{Cx, Stage};
use crate::types::MaterialBand;

/// Assigns one material per replica, cycling through a [`MaterialBand`].
///
/// The matrix stream passes through unchanged while the stage counts emitted
/// transforms. `fbegin` captures the band entry for the most recently emitted replica
/// (replica 0 if none has been emitted yet) and `fnext` stamps it on every face, so a
/// renderer that runs one face pass after each `next` sees
/// `low, low + 1, ..., high, low, ...` across replicas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Material {
    band: MaterialBand,
}

impl Material {
    /// Decorator cycling `band`.
    pub const fn new(band: MaterialBand) -> Self {
        Self { band }
    }

    /// The band being cycled.
    pub const fn band(&self) -> MaterialBand {
        self.band
    }
}

impl Stage for Material {
    fn begin(&self, cx: &mut Cx<'_, '_>) {
        cx.slot().index = 0;
        cx.inner_begin();
    }

    fn next(&self, cx: &mut Cx<'_, '_>) -> Option<Mat4> {
        let inner = cx.inner_next()?;
        cx.slot().index += 1;
        Some(inner)
    }

    fn fbegin(&self, cx: &mut Cx<'_, '_>) {
        let slot = cx.slot();
        slot.material = self.band.pick(slot.index.saturating_sub(1));
        cx.inner_fbegin();
    }

    fn fnext(&self, cx: &mut Cx<'_, '_>) -> Option<Face> {
        let face = cx.inner_fnext()?;
        Some(face.with_material(cx.slot().material))
    }
}
