use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{SynthError, AXIS_NAMES};

/// Physical axis carried by one grid dimension.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisType {
    X,
    Y,
    Z,
}

/// Axis order of every grid built by this crate.
pub const XYZ: [AxisType; 3] = [AxisType::X, AxisType::Y, AxisType::Z];

/// Dense 3-D volume of 8-bit intensities with a physical calibration.
///
/// Voxels are stored x-fastest, then y, then z:
/// `index = x + y * nx + z * nx * ny`.
/// The physical position of voxel `(x, y, z)` is `(x * sx, y * sy, z * sz)`.
#[derive(Clone, Debug, PartialEq)]
pub struct VoxelGrid {
    name: String,
    title: String,
    dims: [usize; 3],
    calibration: [f64; 3],
    axes: [AxisType; 3],
    data: Vec<u8>,
}

impl VoxelGrid {
    /// Allocate a zero-filled grid.
    ///
    /// Fails if a dimension is zero, a calibration component is not a
    /// positive finite number, or the voxel count overflows `usize`.
    /// Nothing is allocated on failure.
    pub fn new(dims: [usize; 3], calibration: [f64; 3]) -> Result<Self, SynthError> {
        for axis in 0..3 {
            if dims[axis] == 0 {
                return Err(SynthError::InvalidDimension { axis: AXIS_NAMES[axis], value: 0 });
            }
            let spacing = calibration[axis];
            if !(spacing.is_finite() && spacing > 0.0) {
                return Err(SynthError::InvalidCalibration { axis: AXIS_NAMES[axis], value: spacing });
            }
        }

        let len = dims[0]
            .checked_mul(dims[1])
            .and_then(|n| n.checked_mul(dims[2]))
            .filter(|&n| n <= isize::MAX as usize)
            .ok_or(SynthError::VolumeTooLarge(dims))?;

        let mut data = Vec::new();
        data.try_reserve_exact(len).map_err(|_| SynthError::VolumeTooLarge(dims))?;
        data.resize(len, 0);

        info!("Creating {}x{}x{} grid, calibration {:?}", dims[0], dims[1], dims[2], calibration);

        Ok(VoxelGrid {
            name: String::from("volume"),
            title: String::from("volume"),
            dims,
            calibration,
            axes: XYZ,
            data,
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Title shown by display collaborators.
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn dims(&self) -> [usize; 3] {
        self.dims
    }

    pub fn calibration(&self) -> [f64; 3] {
        self.calibration
    }

    pub fn axes(&self) -> [AxisType; 3] {
        self.axes
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false for a constructed grid; kept alongside `len`.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of voxels in one z-slice.
    pub fn plane_len(&self) -> usize {
        self.dims[0] * self.dims[1]
    }

    /// Linear index of `(x, y, z)`, or `None` outside the grid.
    #[inline]
    pub fn index(&self, x: usize, y: usize, z: usize) -> Option<usize> {
        let [nx, ny, nz] = self.dims;
        if x < nx && y < ny && z < nz {
            Some(x + y * nx + z * nx * ny)
        } else {
            None
        }
    }

    pub fn get(&self, x: usize, y: usize, z: usize) -> Option<u8> {
        self.index(x, y, z).map(|i| self.data[i])
    }

    /// Write one voxel. Returns false, leaving the grid untouched, outside the grid.
    pub fn set(&mut self, x: usize, y: usize, z: usize, value: u8) -> bool {
        match self.index(x, y, z) {
            Some(i) => {
                self.data[i] = value;
                true
            }
            None => false,
        }
    }

    /// Physical position of a voxel index.
    #[inline]
    pub fn position(&self, voxel: [usize; 3]) -> [f64; 3] {
        voxel_position(voxel, self.calibration)
    }

    /// Physical size of the whole grid.
    pub fn extent(&self) -> [f64; 3] {
        [
            self.dims[0] as f64 * self.calibration[0],
            self.dims[1] as f64 * self.calibration[1],
            self.dims[2] as f64 * self.calibration[2],
        ]
    }

    pub fn count_nonzero(&self) -> usize {
        self.data.iter().filter(|&&v| v != 0).count()
    }

    pub fn histogram(&self) -> [usize; 256] {
        let mut counts = [0usize; 256];
        for &v in &self.data {
            counts[v as usize] += 1;
        }
        counts
    }

    /// Iterate `(voxel index, value)` in storage order.
    pub fn voxels(&self) -> impl Iterator<Item = ([usize; 3], u8)> + '_ {
        let [nx, ny, _] = self.dims;
        self.data.iter().enumerate().map(move |(i, &v)| {
            let x = i % nx;
            let y = (i / nx) % ny;
            let z = i / (nx * ny);
            ([x, y, z], v)
        })
    }
}

#[inline]
pub fn voxel_position(voxel: [usize; 3], calibration: [f64; 3]) -> [f64; 3] {
    [
        voxel[0] as f64 * calibration[0],
        voxel[1] as f64 * calibration[1],
        voxel[2] as f64 * calibration[2],
    ]
}
