// Copyright 2025 the Replica Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Iterator drivers for the two stream passes.
//!
//! A renderer consumes a chain in two passes per thread: the matrix pass (`begin`, then
//! `next` until exhaustion) and the face pass (`fbegin`, then `fnext` until
//! exhaustion). These adapters run the passes as ordinary iterators. [`Instances`]
//! interleaves them, running one face pass after each transform, which is the order
//! material banding is defined for.

use alloc::vec::Vec;
use core::iter::FusedIterator;

use glam::Mat4;
use replica_mesh::Face;

use crate::cursor::Cursor;
use crate::scene::Scene;
use crate::types::StageId;

/// One emitted placement and the faces drawn with it.
#[derive(Clone, Debug, PartialEq)]
pub struct Instance {
    /// Object-to-world transform.
    pub transform: Mat4,
    /// Faces with materials assigned.
    pub faces: Vec<Face>,
}

/// Matrix pass over a chain. Created by [`Scene::matrices`].
#[derive(Debug)]
pub struct Matrices<'a, 'm> {
    scene: &'a Scene<'m>,
    root: StageId,
    cursor: &'a mut Cursor,
    done: bool,
}

impl Iterator for Matrices<'_, '_> {
    type Item = Mat4;

    fn next(&mut self) -> Option<Mat4> {
        if self.done {
            return None;
        }
        let m = self.scene.next(self.root, self.cursor);
        self.done = m.is_none();
        m
    }
}

impl FusedIterator for Matrices<'_, '_> {}

/// Face pass over a chain. Created by [`Scene::faces`].
#[derive(Debug)]
pub struct Faces<'a, 'm> {
    scene: &'a Scene<'m>,
    root: StageId,
    cursor: &'a mut Cursor,
    done: bool,
}

impl Iterator for Faces<'_, '_> {
    type Item = Face;

    fn next(&mut self) -> Option<Face> {
        if self.done {
            return None;
        }
        let f = self.scene.fnext(self.root, self.cursor);
        self.done = f.is_none();
        f
    }
}

impl FusedIterator for Faces<'_, '_> {}

/// Interleaved passes: each transform followed by its faces. Created by [`Scene::instances`].
#[derive(Debug)]
pub struct Instances<'a, 'm> {
    scene: &'a Scene<'m>,
    root: StageId,
    cursor: &'a mut Cursor,
    done: bool,
}

impl Instances<'_, '_> {
    /// Advance to the next instance, writing its faces into `faces` (cleared first).
    ///
    /// Lets a renderer reuse one face buffer for the whole traversal.
    pub fn next_into(&mut self, faces: &mut Vec<Face>) -> Option<Mat4> {
        faces.clear();
        if self.done {
            return None;
        }
        let Some(transform) = self.scene.next(self.root, self.cursor) else {
            self.done = true;
            return None;
        };
        self.scene.fbegin(self.root, self.cursor);
        while let Some(f) = self.scene.fnext(self.root, self.cursor) {
            faces.push(f);
        }
        Some(transform)
    }
}

impl Iterator for Instances<'_, '_> {
    type Item = Instance;

    fn next(&mut self) -> Option<Instance> {
        let mut faces = Vec::new();
        let transform = self.next_into(&mut faces)?;
        Some(Instance { transform, faces })
    }
}

impl FusedIterator for Instances<'_, '_> {}

impl<'m> Scene<'m> {
    /// Begin the matrix pass of `root` and iterate its transforms.
    pub fn matrices<'a>(&'a self, root: StageId, cursor: &'a mut Cursor) -> Matrices<'a, 'm> {
        self.begin(root, cursor);
        Matrices {
            scene: self,
            root,
            cursor,
            done: false,
        }
    }

    /// Begin the face pass of `root` and iterate its faces.
    pub fn faces<'a>(&'a self, root: StageId, cursor: &'a mut Cursor) -> Faces<'a, 'm> {
        self.fbegin(root, cursor);
        Faces {
            scene: self,
            root,
            cursor,
            done: false,
        }
    }

    /// Begin the matrix pass of `root` and iterate instances with their faces.
    pub fn instances<'a>(&'a self, root: StageId, cursor: &'a mut Cursor) -> Instances<'a, 'm> {
        self.begin(root, cursor);
        Instances {
            scene: self,
            root,
            cursor,
            done: false,
        }
    }
}
