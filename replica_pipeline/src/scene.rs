// Copyright 2025 the Replica Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene arena: stage storage, chain assembly, and stream dispatch.

use alloc::boxed::Box;
use alloc::vec::Vec;
use glam::{Mat4, Vec3};
use replica_mesh::{Face, Mesh};

use crate::cursor::{Cursor, ThreadSlots};
use crate::error::BuildError;
use crate::stage::{Cx, Stage};
use crate::stages::{
    Center, Material, Multiply, MultiplyCompound, Scatter, Set, Shadows, Translate,
};
use crate::types::{CenterFlags, MaterialBand, StageId, ThreadId};

#[derive(Debug)]
struct StageNode<'m> {
    stage: Box<dyn Stage>,
    inner: Option<StageId>,
    mesh: &'m Mesh,
}

/// Arena owning every stage of one or more instancing chains.
///
/// Stages are appended with the builder methods and refer to their inner stage by
/// [`StageId`], so a chain is always built leaf first and can never contain a cycle.
/// Stages are never freed individually: [`Scene::clear`] drops them all at once and
/// keeps the allocation for the next scene or frame.
///
/// Once built, a scene is shared immutably (`&Scene`) by every worker; per-thread
/// iteration state lives in each worker's [`Cursor`].
pub struct Scene<'m> {
    nodes: Vec<StageNode<'m>>,
}

impl Default for Scene<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for Scene<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let leaves = self.nodes.iter().filter(|n| n.inner.is_none()).count();
        f.debug_struct("Scene")
            .field("stages", &self.nodes.len())
            .field("leaves", &leaves)
            .finish_non_exhaustive()
    }
}

impl<'m> Scene<'m> {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Create an empty scene with room for `stages` stages.
    pub fn with_capacity(stages: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(stages),
        }
    }

    /// Number of stages.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if the scene has no stages.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Drop every stage, keeping the allocation. All previously returned ids become invalid.
    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    // --- building ---

    /// Add a leaf emitting `transform` once and the faces of `mesh`.
    pub fn set(&mut self, mesh: &'m Mesh, transform: Mat4) -> StageId {
        self.push(Box::new(Set::new(transform)), None, mesh)
    }

    /// Add a custom leaf stage reading `mesh`.
    pub fn insert_leaf(&mut self, mesh: &'m Mesh, stage: impl Stage + 'static) -> StageId {
        self.push(Box::new(stage), None, mesh)
    }

    /// Wrap `inner` in a custom decorator stage.
    pub fn insert(
        &mut self,
        inner: StageId,
        stage: impl Stage + 'static,
    ) -> Result<StageId, BuildError> {
        let mesh = self
            .nodes
            .get(inner.idx())
            .ok_or(BuildError::UnknownStage(inner))?
            .mesh;
        Ok(self.push(Box::new(stage), Some(inner), mesh))
    }

    /// Wrap `inner` in a [`Translate`] applying `transform`.
    pub fn translate(&mut self, inner: StageId, transform: Mat4) -> Result<StageId, BuildError> {
        self.insert(inner, Translate::new(transform))
    }

    /// Wrap `inner` in a [`Multiply`].
    pub fn multiply(
        &mut self,
        inner: StageId,
        count: u32,
        translate: Vec3,
        scale: Vec3,
    ) -> Result<StageId, BuildError> {
        self.insert(inner, Multiply::new(count, translate, scale))
    }

    /// Wrap `inner` in a [`MultiplyCompound`]. `rotate` holds x/y/z angles in radians.
    pub fn multiply_compound(
        &mut self,
        inner: StageId,
        count: u32,
        translate: Vec3,
        rotate: Vec3,
    ) -> Result<StageId, BuildError> {
        self.insert(inner, MultiplyCompound::new(count, translate, rotate))
    }

    /// Wrap `inner` in a [`Center`].
    pub fn center(&mut self, inner: StageId, flags: CenterFlags) -> Result<StageId, BuildError> {
        self.insert(inner, Center::new(flags))
    }

    /// Wrap `inner` in a [`Scatter`] with the default seed.
    pub fn scatter(
        &mut self,
        inner: StageId,
        count: u32,
        extent: Vec3,
    ) -> Result<StageId, BuildError> {
        self.insert(inner, Scatter::new(count, extent))
    }

    /// Wrap `inner` in a [`Material`] cycling `band`.
    pub fn material(&mut self, inner: StageId, band: MaterialBand) -> Result<StageId, BuildError> {
        self.insert(inner, Material::new(band))
    }

    /// Wrap `inner` in a [`Shadows`] marker.
    pub fn shadows(&mut self, inner: StageId) -> Result<StageId, BuildError> {
        self.insert(inner, Shadows)
    }

    fn push(&mut self, stage: Box<dyn Stage>, inner: Option<StageId>, mesh: &'m Mesh) -> StageId {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "StageId holds 32-bit indices."
        )]
        let id = StageId::new(self.nodes.len() as u32);
        log::debug!("stage {id:?} = {stage:?} wrapping {inner:?}");
        self.nodes.push(StageNode { stage, inner, mesh });
        id
    }

    // --- inspection ---

    /// The stage stored under `id`.
    ///
    /// Panics if `id` was not produced by this scene.
    pub fn stage(&self, id: StageId) -> &dyn Stage {
        &*self.nodes[id.idx()].stage
    }

    /// The stage wrapped by `id`, or `None` for leaves.
    ///
    /// Panics if `id` was not produced by this scene.
    pub fn inner(&self, id: StageId) -> Option<StageId> {
        self.nodes[id.idx()].inner
    }

    /// The mesh at the bottom of the chain under `id`.
    ///
    /// Panics if `id` was not produced by this scene.
    pub fn mesh(&self, id: StageId) -> &'m Mesh {
        self.nodes[id.idx()].mesh
    }

    /// True if any stage on the chain from `id` down to its leaf casts shadows.
    pub fn supports_shadows(&self, id: StageId) -> bool {
        let mut at = Some(id);
        while let Some(id) = at {
            let node = &self.nodes[id.idx()];
            if node.stage.supports_shadows() {
                return true;
            }
            at = node.inner;
        }
        false
    }

    // --- streams ---

    /// Cursor for `thread`, presized for this scene.
    pub fn cursor(&self, thread: ThreadId) -> Cursor {
        Cursor::with_capacity(thread, self.len())
    }

    /// Cursors for `threads` workers, presized for this scene.
    pub fn thread_slots(&self, threads: usize) -> Result<ThreadSlots, BuildError> {
        ThreadSlots::new(threads, self.len())
    }

    /// Reset the matrix stream of `id` for the cursor's thread.
    pub fn begin(&self, id: StageId, cursor: &mut Cursor) {
        self.stage(id).begin(&mut Cx::new(self, cursor, id));
    }

    /// Next placement transform of `id`, or `None` once exhausted.
    pub fn next(&self, id: StageId, cursor: &mut Cursor) -> Option<Mat4> {
        self.stage(id).next(&mut Cx::new(self, cursor, id))
    }

    /// Reset the face stream of `id` for the cursor's thread.
    pub fn fbegin(&self, id: StageId, cursor: &mut Cursor) {
        self.stage(id).fbegin(&mut Cx::new(self, cursor, id));
    }

    /// Next face of `id`, or `None` once exhausted.
    pub fn fnext(&self, id: StageId, cursor: &mut Cursor) -> Option<Face> {
        self.stage(id).fnext(&mut Cx::new(self, cursor, id))
    }
}
