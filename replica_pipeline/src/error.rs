// Copyright 2025 the Replica Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported while assembling a scene.
//!
//! Traversal itself never fails; everything that can go wrong is caught here, when
//! stages are added or worker slots are allocated.

use thiserror::Error;

use crate::types::{MAX_THREADS, StageId};

/// Construction-time error.
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuildError {
    /// The inner stage id was not produced by this scene.
    #[error("stage {0:?} does not belong to this scene")]
    UnknownStage(StageId),
    /// A material band with `high < low`.
    #[error("material band is inverted: low {low} > high {high}")]
    InvertedBand {
        /// Requested lower bound.
        low: u32,
        /// Requested upper bound.
        high: u32,
    },
    /// More worker slots requested than the pipeline supports.
    #[error("{0} worker threads requested, limit is {max}", max = MAX_THREADS)]
    TooManyThreads(usize),
}
