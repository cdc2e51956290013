// Copyright 2025 the Replica Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shadow-casting marker.

use glam::Mat4;

use crate::stage::{Cx, Stage};

/// Marks its subgraph as casting shadows. Both streams pass through untouched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Shadows;

impl Stage for Shadows {
    fn begin(&self, cx: &mut Cx<'_, '_>) {
        cx.inner_begin();
    }

    fn next(&self, cx: &mut Cx<'_, '_>) -> Option<Mat4> {
        cx.inner_next()
    }

    fn supports_shadows(&self) -> bool {
        true
    }
}
