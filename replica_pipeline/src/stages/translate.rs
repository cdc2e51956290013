// Copyright 2025 the Replica Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Constant transform on top of an inner stream.

use glam::Mat4;

use crate::stage::{Cx, Stage};

/// Left-multiplies a constant transform onto every inner transform.
///
/// The instance count and the faces are those of the inner stage.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Translate {
    transform: Mat4,
}

impl Translate {
    /// Decorator applying `transform` after the inner placement.
    pub const fn new(transform: Mat4) -> Self {
        Self { transform }
    }
}

impl Stage for Translate {
    fn begin(&self, cx: &mut Cx<'_, '_>) {
        cx.inner_begin();
    }

    fn next(&self, cx: &mut Cx<'_, '_>) -> Option<Mat4> {
        cx.inner_next().map(|inner| self.transform * inner)
    }
}
