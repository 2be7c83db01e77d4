use std::ops::Range;

use itertools::iproduct;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::data::voxel_grid::voxel_position;

/// Euclidean ball in physical space.
///
/// Membership is decided on physical positions (`index * calibration`), so an
/// anisotropic calibration gives an ellipsoid in index space.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub center: [f64; 3],
    pub radius: f64,
}

impl Ball {
    pub fn new(center: [f64; 3], radius: f64) -> Self {
        Ball { center, radius }
    }

    /// A ball with a non-positive or non-finite radius, or a non-finite
    /// center, contains no point.
    pub fn is_degenerate(&self) -> bool {
        !(self.radius.is_finite() && self.radius > 0.0) || self.center.iter().any(|c| !c.is_finite())
    }

    #[inline]
    pub fn contains(&self, position: [f64; 3]) -> bool {
        if self.is_degenerate() {
            return false;
        }
        let dx = position[0] - self.center[0];
        let dy = position[1] - self.center[1];
        let dz = position[2] - self.center[2];
        dx * dx + dy * dy + dz * dz <= self.radius * self.radius
    }

    /// Voxel indices along one axis that may lie inside the ball, clipped to `[0, n)`.
    ///
    /// Padded by one voxel on each side; `contains` makes the final call.
    pub fn axis_range(&self, axis: usize, n: usize, spacing: f64) -> Range<usize> {
        if self.is_degenerate() {
            return 0..0;
        }
        let first = ((self.center[axis] - self.radius) / spacing).floor() - 1.0;
        let last = ((self.center[axis] + self.radius) / spacing).ceil() + 1.0;
        let start = first.max(0.0);
        let end = (last + 1.0).min(n as f64);
        let range = if start >= end { 0..0 } else { start as usize..end as usize };
        if first < 0.0 || last + 1.0 > n as f64 {
            debug!(
                "Ball at {:?} (r = {}) clipped along axis {} to {:?}",
                self.center, self.radius, axis, range
            );
        }
        range
    }

    /// Per-axis index ranges `[x, y, z]` of the clipped bounding box.
    pub fn bounding_box(&self, dims: [usize; 3], calibration: [f64; 3]) -> [Range<usize>; 3] {
        [
            self.axis_range(0, dims[0], calibration[0]),
            self.axis_range(1, dims[1], calibration[1]),
            self.axis_range(2, dims[2], calibration[2]),
        ]
    }

    /// Every in-grid voxel whose physical position lies inside the ball,
    /// in storage order.
    pub fn voxels(&self, dims: [usize; 3], calibration: [f64; 3]) -> impl Iterator<Item = [usize; 3]> {
        let ball = *self;
        let [xr, yr, zr] = self.bounding_box(dims, calibration);
        iproduct!(zr, yr, xr)
            .map(|(z, y, x)| [x, y, z])
            .filter(move |&voxel| ball.contains(voxel_position(voxel, calibration)))
    }
}
