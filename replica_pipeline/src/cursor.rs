// Copyright 2025 the Replica Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-thread iteration state.
//!
//! A [`Scene`](crate::Scene) is immutable while it is being traversed. All mutable
//! iteration state (replica counters, face cursors, cached transforms, generators) lives
//! in a [`Cursor`], one per worker thread, holding one [`Slot`] per stage. Workers borrow
//! their cursor mutably, so two workers can never share state and no locking is needed.

use alloc::vec::Vec;
use glam::Mat4;
use rand::rngs::StdRng;

use crate::error::BuildError;
use crate::types::{MAX_THREADS, StageId, ThreadId};

/// Iteration state of one stage for one thread.
///
/// Stages use whichever fields they need; the meaning of each field is up to the stage.
#[derive(Clone, Debug)]
pub struct Slot {
    /// Replica or emission counter of the matrix stream.
    pub index: u32,
    /// Whether the matrix stream has emitted since the last `begin`.
    pub emitted: bool,
    /// Face cursor of the face stream.
    pub face: usize,
    /// Transform cached for the current replica.
    pub xform: Mat4,
    /// Material captured for the current face pass.
    pub material: u32,
    /// Seeded generator, created on first use.
    pub rng: Option<StdRng>,
}

impl Default for Slot {
    fn default() -> Self {
        Self {
            index: 0,
            emitted: false,
            face: 0,
            xform: Mat4::IDENTITY,
            material: 0,
            rng: None,
        }
    }
}

/// All stage slots of one worker thread.
#[derive(Clone, Debug)]
pub struct Cursor {
    thread: ThreadId,
    slots: Vec<Slot>,
}

impl Cursor {
    /// Create an empty cursor for `thread`. Slots are allocated on demand.
    pub fn new(thread: ThreadId) -> Self {
        Self {
            thread,
            slots: Vec::new(),
        }
    }

    /// Create a cursor with slots preallocated for `stages` stages.
    pub fn with_capacity(thread: ThreadId, stages: usize) -> Self {
        let mut slots = Vec::with_capacity(stages);
        slots.resize_with(stages, Slot::default);
        Self { thread, slots }
    }

    /// Thread slot this cursor belongs to.
    pub fn thread(&self) -> ThreadId {
        self.thread
    }

    /// Mutable slot of `stage`, growing the cursor if the scene grew since it was made.
    pub fn slot_mut(&mut self, stage: StageId) -> &mut Slot {
        let idx = stage.idx();
        if idx >= self.slots.len() {
            self.slots.resize_with(idx + 1, Slot::default);
        }
        &mut self.slots[idx]
    }

    /// Drop all slot state, keeping the allocation.
    pub fn reset(&mut self) {
        self.slots.iter_mut().for_each(|s| *s = Slot::default());
    }
}

/// One [`Cursor`] per worker thread, indexed by [`ThreadId`].
#[derive(Clone, Debug)]
pub struct ThreadSlots {
    cursors: Vec<Cursor>,
}

impl ThreadSlots {
    /// Cursors for threads `0..threads`, each sized for `stages` stages.
    pub fn new(threads: usize, stages: usize) -> Result<Self, BuildError> {
        if threads > MAX_THREADS {
            return Err(BuildError::TooManyThreads(threads));
        }
        let cursors = ThreadId::first(threads)
            .map(|t| Cursor::with_capacity(t, stages))
            .collect();
        Ok(Self { cursors })
    }

    /// Number of worker cursors.
    pub fn len(&self) -> usize {
        self.cursors.len()
    }

    /// True if there are no cursors.
    pub fn is_empty(&self) -> bool {
        self.cursors.is_empty()
    }

    /// Cursor for `thread`, if that thread has one.
    pub fn get_mut(&mut self, thread: ThreadId) -> Option<&mut Cursor> {
        self.cursors.get_mut(thread.index())
    }

    /// Disjoint mutable access to every cursor, in thread order.
    pub fn iter_mut(&mut self) -> core::slice::IterMut<'_, Cursor> {
        self.cursors.iter_mut()
    }
}
