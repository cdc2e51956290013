// Copyright 2025 the Replica Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the pipeline: stage and thread identifiers, flags, and bands.

use crate::error::BuildError;

/// Maximum number of worker threads that may drive one scene concurrently.
pub const MAX_THREADS: usize = 16;

/// Identifier for a stage in a [`Scene`](crate::Scene).
///
/// A small, copyable handle returned by the scene's builder methods. It is only
/// meaningful for the scene that produced it; builder methods reject identifiers they
/// did not hand out with [`BuildError::UnknownStage`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct StageId(pub(crate) u32);

impl StageId {
    pub(crate) const fn new(idx: u32) -> Self {
        Self(idx)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Identifier of a worker thread slot, always below [`MAX_THREADS`].
///
/// Every stage keeps one slot of iteration state per thread id. Holding a `ThreadId`
/// proves the id is in range; the [`Cursor`](crate::Cursor) it labels proves exclusive
/// access to the slot.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ThreadId(u8);

impl ThreadId {
    /// The first thread slot.
    pub const MAIN: Self = Self(0);

    /// Returns `None` when `index >= MAX_THREADS`.
    pub const fn new(index: usize) -> Option<Self> {
        if index < MAX_THREADS {
            #[allow(
                clippy::cast_possible_truncation,
                reason = "MAX_THREADS fits in a u8."
            )]
            let slot = index as u8;
            Some(Self(slot))
        } else {
            None
        }
    }

    /// Slot index in `0..MAX_THREADS`.
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The first `count` thread ids, clamped to [`MAX_THREADS`].
    pub fn first(count: usize) -> impl Iterator<Item = Self> {
        (0..count.min(MAX_THREADS)).filter_map(Self::new)
    }
}

bitflags::bitflags! {
    /// Axes a [`Center`](crate::stages::Center) stage recenters.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct CenterFlags: u8 {
        /// Center the aggregate box on x.
        const X       = 0b0000_0001;
        /// Center the aggregate box on y.
        const Y       = 0b0000_0010;
        /// Center the aggregate box on z.
        const Z       = 0b0000_0100;
        /// Rest the aggregate box on `y = 0`. Takes precedence over [`CenterFlags::Y`].
        const FLOOR_Y = 0b0000_1000;
    }
}

impl Default for CenterFlags {
    fn default() -> Self {
        Self::X | Self::Y | Self::Z
    }
}

/// Inclusive range of material indices cycled across replicas.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "(u32, u32)"))]
#[cfg_attr(feature = "serde", serde(into = "(u32, u32)"))]
pub struct MaterialBand {
    low: u32,
    high: u32,
}

impl MaterialBand {
    /// Band `[low, high]`. Fails when `high < low`.
    pub const fn new(low: u32, high: u32) -> Result<Self, BuildError> {
        if high < low {
            Err(BuildError::InvertedBand { low, high })
        } else {
            Ok(Self { low, high })
        }
    }

    /// Band holding a single material.
    pub const fn single(material: u32) -> Self {
        Self {
            low: material,
            high: material,
        }
    }

    /// Lowest material in the band.
    pub const fn low(self) -> u32 {
        self.low
    }

    /// Highest material in the band.
    pub const fn high(self) -> u32 {
        self.high
    }

    /// Material for the `replica`-th replica: `low + replica mod (high - low + 1)`.
    pub fn pick(self, replica: u32) -> u32 {
        let span = u64::from(self.high - self.low) + 1;
        #[allow(
            clippy::cast_possible_truncation,
            reason = "The remainder is at most high - low, which fits in u32."
        )]
        let offset = (u64::from(replica) % span) as u32;
        self.low + offset
    }
}

impl TryFrom<(u32, u32)> for MaterialBand {
    type Error = BuildError;

    fn try_from((low, high): (u32, u32)) -> Result<Self, Self::Error> {
        Self::new(low, high)
    }
}

impl From<MaterialBand> for (u32, u32) {
    fn from(band: MaterialBand) -> Self {
        (band.low, band.high)
    }
}
