use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::error::{SynthError, AXIS_NAMES};

/// Parameters of a synthetic blob volume.
///
/// Lengths are physical units (µm in the defaults). Missing fields take their
/// default when deserialized.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisConfig {
    /// Number of blobs to draw (default: 20)
    pub n_blobs: usize,
    /// Mean blob radius before Gaussian noise (default: 5.0)
    pub mean_radius: f64,
    /// Physical size of the volume [width, height, depth] (default: [100, 100, 50])
    pub extent: [f64; 3],
    /// Physical voxel size per axis (default: [0.5, 0.5, 1.0])
    pub calibration: [f64; 3],
    /// Half-open blob intensity range [lo, hi) (default: [0, 200])
    pub intensity_range: [u16; 2],
    /// Grid name (default: "test")
    pub name: String,
    /// Display title (default: "3D blobs")
    pub title: String,
    /// Generator seed; entropy when absent
    pub seed: Option<u64>,
    /// Paint z-slices concurrently (default: false)
    pub parallel: bool,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        SynthesisConfig {
            n_blobs: 20,
            mean_radius: 5.0,
            extent: [100.0, 100.0, 50.0],
            calibration: [0.5, 0.5, 1.0],
            intensity_range: [0, 200],
            name: String::from("test"),
            title: String::from("3D blobs"),
            seed: None,
            parallel: false,
        }
    }
}

impl SynthesisConfig {
    /// A small seeded volume that paints in a few milliseconds.
    pub fn small() -> Self {
        SynthesisConfig {
            n_blobs: 5,
            mean_radius: 2.0,
            extent: [20.0, 20.0, 10.0],
            calibration: [0.5, 0.5, 1.0],
            seed: Some(17),
            ..Default::default()
        }
    }

    pub fn intensity_range(&self) -> Range<u16> {
        self.intensity_range[0]..self.intensity_range[1]
    }

    /// Grid size per axis, `extent / calibration` truncated toward zero.
    ///
    /// The result may be zero or negative; `create_volume` rejects it.
    pub fn grid_dimensions(&self) -> Result<[i64; 3], SynthError> {
        let mut dims = [0i64; 3];
        for axis in 0..3 {
            let extent = self.extent[axis];
            if !extent.is_finite() {
                return Err(SynthError::InvalidExtent { axis: AXIS_NAMES[axis], value: extent });
            }
            let spacing = self.calibration[axis];
            if !(spacing.is_finite() && spacing > 0.0) {
                return Err(SynthError::InvalidCalibration { axis: AXIS_NAMES[axis], value: spacing });
            }
            dims[axis] = (extent / spacing).trunc() as i64;
        }
        Ok(dims)
    }
}
