// Copyright 2025 the Replica Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Built-in stages.
//!
//! - [`Set`]: the leaf. Emits one fixed transform and the mesh's faces.
//! - [`Translate`]: applies a constant transform on top of its inner stream.
//! - [`Multiply`]: `count` replicas on an arithmetic progression of translation and scale.
//! - [`MultiplyCompound`]: `count` replicas, each one step further than the previous.
//! - [`Center`]: recenters (or floors) the aggregate box of everything inside it.
//! - [`Scatter`]: `count` replicas at seeded pseudo-random offsets.
//! - [`Material`]: cycles a material band across replicas.
//! - [`Shadows`]: marks its subgraph as casting shadows.
//!
//! Replicating stages drain their inner stream once per replica: every inner transform
//! of replica `i` is emitted before any transform of replica `i + 1`.

use glam::Mat4;

use crate::cursor::Slot;
use crate::stage::Cx;

pub mod center;
pub mod compound;
pub mod material;
pub mod multiply;
pub mod scatter;
pub mod set;
pub mod shadows;
pub mod translate;

pub use center::Center;
pub use compound::MultiplyCompound;
pub use material::Material;
pub use multiply::Multiply;
pub use scatter::Scatter;
pub use set::Set;
pub use shadows::Shadows;
pub use translate::Translate;

/// Restart a replicating stage at replica 0.
///
/// `first` computes the placement of replica 0 and is skipped, together with the inner
/// restart, when `count` is zero.
pub(crate) fn begin_replicas(
    cx: &mut Cx<'_, '_>,
    count: u32,
    first: impl FnOnce(&mut Slot) -> Mat4,
) {
    let slot = cx.slot();
    slot.index = 0;
    slot.emitted = false;
    if count == 0 {
        return;
    }
    let xform = first(slot);
    slot.xform = xform;
    cx.inner_begin();
}

/// Pull the next transform of a replicating stage.
///
/// The current replica's transform is `slot.xform`, left-multiplied onto each inner
/// transform. When the inner stream runs dry the replica index advances, `advance`
/// prepares `slot.xform` for the new index, and the inner stream restarts.
///
/// Inner streams are restartable, so an inner stream that is empty for replica 0 is
/// empty for every replica. That case ends the stream at once instead of stepping
/// through `count` empty replicas.
pub(crate) fn next_replica(
    cx: &mut Cx<'_, '_>,
    count: u32,
    mut advance: impl FnMut(&mut Slot),
) -> Option<Mat4> {
    loop {
        if cx.slot().index >= count {
            return None;
        }
        if let Some(inner) = cx.inner_next() {
            let slot = cx.slot();
            slot.emitted = true;
            return Some(slot.xform * inner);
        }
        let slot = cx.slot();
        if !slot.emitted {
            slot.index = count;
            return None;
        }
        slot.index += 1;
        if slot.index >= count {
            return None;
        }
        advance(slot);
        cx.inner_begin();
    }
}
