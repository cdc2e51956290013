// Copyright 2025 the Replica Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Seeded random replication.

use glam::{Mat4, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::stage::{Cx, Stage};
use crate::stages::{begin_replicas, next_replica};

/// Replicates the inner stream `count` times at pseudo-random offsets.
///
/// Each replica is translated by `(u * 2 - 1) * extent` per axis, with `u` uniform in
/// `[0, 1)`, so replicas land inside the box `[-extent, extent]`. Offsets are drawn
/// x, then y, then z, once per replica: every inner transform of a replica shares the
/// same offset, and the generator does not advance between them.
///
/// Every thread owns its generator and `begin` reseeds it, so each traversal on a
/// thread reproduces the exact same pattern.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scatter {
    count: u32,
    extent: Vec3,
    seed: u64,
}

impl Scatter {
    /// Seed used unless overridden with [`Scatter::with_seed`].
    pub const DEFAULT_SEED: u64 = 345_894;

    /// `count` replicas scattered within `[-extent, extent]`.
    pub const fn new(count: u32, extent: Vec3) -> Self {
        Self {
            count,
            extent,
            seed: Self::DEFAULT_SEED,
        }
    }

    /// Same stage with a different seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Number of replicas.
    pub const fn count(&self) -> u32 {
        self.count
    }

    /// Seed the generator is reset to on `begin`.
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    fn draw(&self, rng: &mut StdRng) -> Mat4 {
        let mut unit = || 2.0 * rng.random::<f32>() - 1.0;
        let x = unit();
        let y = unit();
        let z = unit();
        Mat4::from_translation(Vec3::new(x, y, z) * self.extent)
    }
}

impl Stage for Scatter {
    fn begin(&self, cx: &mut Cx<'_, '_>) {
        begin_replicas(cx, self.count, |slot| {
            let rng = slot.rng.insert(StdRng::seed_from_u64(self.seed));
            self.draw(rng)
        });
    }

    fn next(&self, cx: &mut Cx<'_, '_>) -> Option<Mat4> {
        next_replica(cx, self.count, |slot| {
            let rng = slot
                .rng
                .get_or_insert_with(|| StdRng::seed_from_u64(self.seed));
            slot.xform = self.draw(rng);
        })
    }
}
