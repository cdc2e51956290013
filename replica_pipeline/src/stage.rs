// Copyright 2025 the Replica Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The stage contract shared by every node of an instancing chain.

use core::fmt::Debug;

use glam::Mat4;
use replica_mesh::{Face, Mesh};

use crate::cursor::{Cursor, Slot};
use crate::scene::Scene;
use crate::types::{StageId, ThreadId};

/// A node of an instancing chain.
///
/// A stage produces two lazy streams per thread: placement transforms (`begin`/`next`)
/// and faces (`fbegin`/`fnext`). Decorator stages wrap exactly one inner stage and reach
/// it through the [`Cx`]; leaf stages read their mesh directly.
///
/// ## Restartability
///
/// `begin` must restore the stage, and everything it wraps, to the start of its matrix
/// stream, no matter how often it is called or where the previous traversal stopped.
/// Aggregate stages such as [`Center`](crate::stages::Center) rely on this to drive their
/// inner chain several times per `begin`.
///
/// After `next` has returned `None`, further calls keep returning `None` until the next
/// `begin`.
pub trait Stage: Debug + Send + Sync {
    /// Reset the matrix stream for the calling thread.
    fn begin(&self, cx: &mut Cx<'_, '_>);

    /// Next placement transform, or `None` when the stream is exhausted.
    fn next(&self, cx: &mut Cx<'_, '_>) -> Option<Mat4>;

    /// Reset the face stream for the calling thread.
    fn fbegin(&self, cx: &mut Cx<'_, '_>) {
        cx.inner_fbegin();
    }

    /// Next face, or `None` when the face stream is exhausted.
    fn fnext(&self, cx: &mut Cx<'_, '_>) -> Option<Face> {
        cx.inner_fnext()
    }

    /// Whether this stage marks its subgraph as casting shadows.
    fn supports_shadows(&self) -> bool {
        false
    }
}

/// Stage context: what a stage sees while serving one call for one thread.
///
/// Gives access to the stage's own [`Slot`], the mesh the chain is built on, and the
/// inner stage's streams.
#[derive(Debug)]
pub struct Cx<'a, 'm> {
    scene: &'a Scene<'m>,
    cursor: &'a mut Cursor,
    id: StageId,
}

impl<'a, 'm> Cx<'a, 'm> {
    pub(crate) fn new(scene: &'a Scene<'m>, cursor: &'a mut Cursor, id: StageId) -> Self {
        Self { scene, cursor, id }
    }

    /// The stage being served.
    pub fn stage(&self) -> StageId {
        self.id
    }

    /// The calling thread.
    pub fn thread(&self) -> ThreadId {
        self.cursor.thread()
    }

    /// The mesh at the bottom of this stage's chain.
    pub fn mesh(&self) -> &'m Mesh {
        self.scene.mesh(self.id)
    }

    /// This stage's state for the calling thread.
    pub fn slot(&mut self) -> &mut Slot {
        self.cursor.slot_mut(self.id)
    }

    /// Restart the inner matrix stream. No-op for leaves.
    pub fn inner_begin(&mut self) {
        if let Some(inner) = self.scene.inner(self.id) {
            self.scene.begin(inner, self.cursor);
        }
    }

    /// Pull the next inner transform. Always `None` for leaves.
    pub fn inner_next(&mut self) -> Option<Mat4> {
        let inner = self.scene.inner(self.id)?;
        self.scene.next(inner, self.cursor)
    }

    /// Restart the inner face stream. No-op for leaves.
    pub fn inner_fbegin(&mut self) {
        if let Some(inner) = self.scene.inner(self.id) {
            self.scene.fbegin(inner, self.cursor);
        }
    }

    /// Pull the next inner face. Always `None` for leaves.
    pub fn inner_fnext(&mut self) -> Option<Face> {
        let inner = self.scene.inner(self.id)?;
        self.scene.fnext(inner, self.cursor)
    }
}
