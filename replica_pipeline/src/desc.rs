// Copyright 2025 the Replica Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Declarative chain descriptions.
//!
//! Authoring tools describe a chain as data: a leaf placement and a list of stages,
//! innermost first. [`Scene::build_chain`] compiles a description into stages.
//!
//! With the `serde` feature the descriptions (de)serialize as tagged maps, for
//! example in JSON:
//!
//! ```json
//! {
//!   "origin": [0.0, 0.0, 0.0],
//!   "stages": [
//!     { "op": "multiply", "count": 3, "translate": [1.0, 0.0, 0.0] },
//!     { "op": "center", "x": true },
//!     { "op": "material", "band": [1, 3] },
//!     { "op": "shadows" }
//!   ]
//! }
//! ```

use alloc::vec::Vec;
use glam::{Mat4, Vec3};
use replica_mesh::Mesh;

use crate::error::BuildError;
use crate::scene::Scene;
use crate::stages::{Multiply, MultiplyCompound, Scatter};
use crate::types::{CenterFlags, MaterialBand, StageId};

/// One stage of a [`ChainDesc`]. Angles are in degrees.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "op", rename_all = "snake_case"))]
pub enum StageDesc {
    /// [`Translate`](crate::stages::Translate) by `T(offset) * Rz * Ry * Rx * S(scale)`.
    Translate {
        /// Translation.
        #[cfg_attr(feature = "serde", serde(default))]
        offset: Vec3,
        /// Rotation about x, then y, then z, in degrees.
        #[cfg_attr(feature = "serde", serde(default))]
        rotate: Vec3,
        /// Scale, one by default.
        #[cfg_attr(feature = "serde", serde(default = "unit_scale"))]
        scale: Vec3,
    },
    /// [`Multiply`].
    Multiply {
        /// Number of replicas.
        count: u32,
        /// Per-replica translation step.
        #[cfg_attr(feature = "serde", serde(default))]
        translate: Vec3,
        /// Per-replica scale step.
        #[cfg_attr(feature = "serde", serde(default))]
        scale: Vec3,
    },
    /// [`MultiplyCompound`].
    MultiplyCompound {
        /// Number of replicas.
        count: u32,
        /// Translation of one step.
        #[cfg_attr(feature = "serde", serde(default))]
        translate: Vec3,
        /// Rotation of one step about x, then y, then z, in degrees.
        #[cfg_attr(feature = "serde", serde(default))]
        rotate: Vec3,
    },
    /// [`Center`](crate::stages::Center).
    Center {
        /// Center on x.
        #[cfg_attr(feature = "serde", serde(default))]
        x: bool,
        /// Center on y.
        #[cfg_attr(feature = "serde", serde(default))]
        y: bool,
        /// Center on z.
        #[cfg_attr(feature = "serde", serde(default))]
        z: bool,
        /// Rest the group on `y = 0` instead of centering y.
        #[cfg_attr(feature = "serde", serde(default))]
        floor: bool,
    },
    /// [`Scatter`].
    Scatter {
        /// Number of replicas.
        count: u32,
        /// Half-size of the scatter box.
        extent: Vec3,
        /// Generator seed.
        #[cfg_attr(feature = "serde", serde(default = "default_seed"))]
        seed: u64,
    },
    /// [`Material`](crate::stages::Material) cycling a band.
    ///
    /// Serialized as `[low, high]`; an inverted band fails to deserialize.
    Material {
        /// Materials to cycle.
        band: MaterialBand,
    },
    /// [`Shadows`](crate::stages::Shadows).
    Shadows,
}

#[cfg(feature = "serde")]
fn unit_scale() -> Vec3 {
    Vec3::ONE
}

#[cfg(feature = "serde")]
fn default_seed() -> u64 {
    Scatter::DEFAULT_SEED
}

fn radians(degrees: Vec3) -> Vec3 {
    Vec3::from_array(degrees.to_array().map(f32::to_radians))
}

fn euler(r: Vec3) -> Mat4 {
    Mat4::from_rotation_z(r.z) * Mat4::from_rotation_y(r.y) * Mat4::from_rotation_x(r.x)
}

impl StageDesc {
    /// Add this stage around `inner`.
    pub fn apply(&self, scene: &mut Scene<'_>, inner: StageId) -> Result<StageId, BuildError> {
        match *self {
            Self::Translate {
                offset,
                rotate,
                scale,
            } => {
                let rotation = euler(radians(rotate));
                let m = Mat4::from_translation(offset) * rotation * Mat4::from_scale(scale);
                scene.translate(inner, m)
            }
            Self::Multiply {
                count,
                translate,
                scale,
            } => scene.insert(inner, Multiply::new(count, translate, scale)),
            Self::MultiplyCompound {
                count,
                translate,
                rotate,
            } => {
                let stage = MultiplyCompound::new(count, translate, radians(rotate));
                scene.insert(inner, stage)
            }
            Self::Center { x, y, z, floor } => {
                let mut flags = CenterFlags::empty();
                flags.set(CenterFlags::X, x);
                flags.set(CenterFlags::Y, y);
                flags.set(CenterFlags::Z, z);
                flags.set(CenterFlags::FLOOR_Y, floor);
                scene.center(inner, flags)
            }
            Self::Scatter {
                count,
                extent,
                seed,
            } => scene.insert(inner, Scatter::new(count, extent).with_seed(seed)),
            Self::Material { band } => scene.material(inner, band),
            Self::Shadows => scene.shadows(inner),
        }
    }
}

/// A whole chain: a leaf at `origin` wrapped by `stages`, innermost first.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChainDesc {
    /// Translation of the leaf placement.
    #[cfg_attr(feature = "serde", serde(default))]
    pub origin: Vec3,
    /// Decorators, innermost first.
    #[cfg_attr(feature = "serde", serde(default))]
    pub stages: Vec<StageDesc>,
}

impl<'m> Scene<'m> {
    /// Compile `desc` over `mesh` and return the outermost stage.
    pub fn build_chain(&mut self, mesh: &'m Mesh, desc: &ChainDesc) -> Result<StageId, BuildError> {
        let mut id = self.set(mesh, Mat4::from_translation(desc.origin));
        for stage in &desc.stages {
            id = stage.apply(self, id)?;
        }
        let stages = desc.stages.len() + 1;
        log::debug!("compiled chain of {stages} stages into {id:?}");
        Ok(id)
    }
}
