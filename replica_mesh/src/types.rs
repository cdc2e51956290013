// Copyright 2025 the Replica Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive geometry types and helpers.

use glam::Vec3;

/// Axis-aligned bounding box in 3D.
///
/// The empty box uses inverted infinite bounds, so folding points into
/// [`Aabb3::EMPTY`] with [`Aabb3::union_point`] yields the tight box of those points.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb3 {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Default for Aabb3 {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Aabb3 {
    /// The empty box: `min` is `+inf` and `max` is `-inf` on every axis.
    pub const EMPTY: Self = Self {
        min: Vec3::INFINITY,
        max: Vec3::NEG_INFINITY,
    };

    /// Create a new AABB from min/max corners.
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Tight box around a set of points. Returns [`Aabb3::EMPTY`] for no points.
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Self {
        points
            .into_iter()
            .fold(Self::EMPTY, |acc, p| acc.union_point(p))
    }

    /// Grow the box to include `p`.
    #[must_use]
    pub fn union_point(self, p: Vec3) -> Self {
        Self {
            min: self.min.min(p),
            max: self.max.max(p),
        }
    }

    /// The smallest box containing both boxes.
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Return true if the box is inverted on any axis. Assumes no NaN.
    pub fn is_empty(&self) -> bool {
        self.max.cmplt(self.min).any()
    }

    /// Midpoint of the box, computed as `min + (max - min) / 2`.
    pub fn center(&self) -> Vec3 {
        self.min + (self.max - self.min) / 2.0
    }

    /// Extent of the box on each axis.
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// The 8 corners. Bit 0 of the corner index selects `max.x`, bit 1 `max.y`, bit 2 `max.z`.
    pub fn corners(&self) -> [Vec3; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            Vec3::new(lo.x, lo.y, lo.z),
            Vec3::new(hi.x, lo.y, lo.z),
            Vec3::new(lo.x, hi.y, lo.z),
            Vec3::new(hi.x, hi.y, lo.z),
            Vec3::new(lo.x, lo.y, hi.z),
            Vec3::new(hi.x, lo.y, hi.z),
            Vec3::new(lo.x, hi.y, hi.z),
            Vec3::new(hi.x, hi.y, hi.z),
        ]
    }
}
