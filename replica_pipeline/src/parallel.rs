// Copyright 2025 the Replica Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scoped worker threads driving one scene.
//!
//! Each worker gets its own [`Cursor`] out of a [`ThreadSlots`], so workers share the
//! scene and its meshes read-only and never touch each other's iteration state.

use alloc::vec::Vec;
use std::{panic, thread};

use crate::cursor::{Cursor, ThreadSlots};
use crate::scene::Scene;

/// Run `work` once per cursor in `slots`, each on its own scoped thread.
///
/// Returns the workers' results in thread order. A panicking worker re-raises its panic
/// on the calling thread after all workers have stopped.
pub fn for_each_worker<'m, R, F>(scene: &Scene<'m>, slots: &mut ThreadSlots, work: F) -> Vec<R>
where
    R: Send,
    F: Fn(&Scene<'m>, &mut Cursor) -> R + Sync,
{
    let work = &work;
    thread::scope(|s| {
        let handles: Vec<_> = slots
            .iter_mut()
            .map(|cursor| {
                s.spawn(move || {
                    let thread = cursor.thread();
                    log::debug!("worker {thread:?} started");
                    let out = work(scene, cursor);
                    log::debug!("worker {thread:?} finished");
                    out
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().unwrap_or_else(|e| panic::resume_unwind(e)))
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use glam::{Mat4, Vec3};
    use replica_mesh::Mesh;

    use crate::CenterFlags;

    use super::*;

    #[test]
    fn workers_see_identical_deterministic_streams() {
        let mesh = Mesh::cube(0.5);
        let mut scene = Scene::new();
        let leaf = scene.set(&mesh, Mat4::IDENTITY);
        let extent = Vec3::new(20.0, 0.0, 20.0);
        let scattered = scene.scatter(leaf, 50, extent).unwrap();
        let root = scene.center(scattered, CenterFlags::default()).unwrap();
        let mut slots = scene.thread_slots(4).unwrap();
        let streams = for_each_worker(&scene, &mut slots, |scene, cursor| {
            scene.matrices(root, cursor).collect::<Vec<_>>()
        });
        assert_eq!(streams.len(), 4);
        assert_eq!(streams[0].len(), 50);
        assert!(streams.iter().all(|s| *s == streams[0]));
    }

    #[test]
    fn results_come_back_in_thread_order() {
        let mesh = Mesh::cube(0.5);
        let mut scene = Scene::new();
        let _ = scene.set(&mesh, Mat4::IDENTITY);
        let mut slots = scene.thread_slots(3).unwrap();
        let ids = for_each_worker(&scene, &mut slots, |_, cursor| cursor.thread().index());
        assert_eq!(ids, [0, 1, 2]);
    }
}
