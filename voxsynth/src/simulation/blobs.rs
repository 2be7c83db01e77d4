use std::ops::Range;

use log::debug;
use rand::distributions::{Distribution, Uniform};
use rand::Rng;
use statrs::distribution::Normal;

use crate::data::blob::{Blob, BlobSet};
use crate::error::{SynthError, AXIS_NAMES};

/// Draw `count` random blobs inside the physical box `[0, w) x [0, h) x [0, d)`.
///
/// Per blob, in this order:
/// * radius = `mean_radius + N(0, 1)`. Not clamped: with a small mean radius
///   it can come out zero or negative, and such a blob paints nothing.
/// * center = independent uniform draws along x, y, z.
/// * intensity = uniform integer in `intensity_range`.
///
/// The generator is passed in so runs can be reproduced from a seed.
pub fn generate_random_blobs<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    bounds: [f64; 3],
    mean_radius: f64,
    intensity_range: Range<u16>,
) -> Result<BlobSet, SynthError> {
    for axis in 0..3 {
        let extent = bounds[axis];
        if !(extent.is_finite() && extent > 0.0) {
            return Err(SynthError::InvalidExtent { axis: AXIS_NAMES[axis], value: extent });
        }
    }
    if !mean_radius.is_finite() {
        return Err(SynthError::InvalidRadius(mean_radius));
    }
    if intensity_range.start >= intensity_range.end || intensity_range.end > 256 {
        return Err(SynthError::InvalidIntensityRange {
            lo: intensity_range.start,
            hi: intensity_range.end,
        });
    }

    let noise = Normal::standard();
    let x_dist = Uniform::new(0.0, bounds[0]);
    let y_dist = Uniform::new(0.0, bounds[1]);
    let z_dist = Uniform::new(0.0, bounds[2]);
    let intensity_dist = Uniform::new(intensity_range.start, intensity_range.end);

    let mut blobs = BlobSet::with_capacity(count);
    for _ in 0..count {
        let radius = mean_radius + noise.sample(rng);
        let center = [x_dist.sample(rng), y_dist.sample(rng), z_dist.sample(rng)];
        // end <= 256, so every draw fits in a byte
        let intensity = intensity_dist.sample(rng) as u8;
        if radius <= 0.0 {
            debug!("Generated blob at {:?} with non-positive radius {}", center, radius);
        }
        blobs.push(Blob::new(center, radius, intensity));
    }
    Ok(blobs)
}
