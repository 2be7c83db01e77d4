use thiserror::Error;

/// Validation failures raised while building a synthetic volume.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SynthError {
    #[error("Invalid dimension along {axis}: {value} (must be > 0)")]
    InvalidDimension { axis: char, value: i64 },
    #[error("Invalid calibration along {axis}: {value} (must be finite and > 0)")]
    InvalidCalibration { axis: char, value: f64 },
    #[error("Volume of {0:?} voxels does not fit in memory addressing")]
    VolumeTooLarge([usize; 3]),
    #[error("Invalid physical extent along {axis}: {value} (must be finite and > 0)")]
    InvalidExtent { axis: char, value: f64 },
    #[error("Invalid intensity range [{lo}, {hi}): need lo < hi <= 256")]
    InvalidIntensityRange { lo: u16, hi: u16 },
    #[error("Invalid mean radius: {0}")]
    InvalidRadius(f64),
}

pub(crate) const AXIS_NAMES: [char; 3] = ['x', 'y', 'z'];
