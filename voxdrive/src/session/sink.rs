use log::info;
use serde::Serialize;
use voxsynth::data::spot::SpotCollection;
use voxsynth::data::voxel_grid::{AxisType, VoxelGrid};

use crate::error::DriveError;

/// Presentation side of the drive: receives the finished volume and its spots.
pub trait VolumeSink {
    fn present(&mut self, grid: &VoxelGrid, spots: &SpotCollection) -> Result<(), DriveError>;
}

/// What a viewer needs to know about a volume before showing it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VolumeSummary {
    pub title: String,
    pub dims: [usize; 3],
    pub calibration: [f64; 3],
    pub axes: [AxisType; 3],
    pub painted_voxels: usize,
    pub max_intensity: u8,
    pub n_spots: usize,
}

impl VolumeSummary {
    pub fn new(grid: &VoxelGrid, spots: &SpotCollection) -> Self {
        VolumeSummary {
            title: grid.title().to_string(),
            dims: grid.dims(),
            calibration: grid.calibration(),
            axes: grid.axes(),
            painted_voxels: grid.count_nonzero(),
            max_intensity: grid.data().iter().copied().max().unwrap_or(0),
            n_spots: spots.n_spots(),
        }
    }
}

/// Writes the volume summary and every spot to the log.
#[derive(Debug, Default)]
pub struct LogSink {
    last: Option<VolumeSummary>,
    spots_logged: usize,
}

impl LogSink {
    pub fn new() -> Self {
        LogSink::default()
    }

    /// Spots written by the most recent `present`.
    pub fn spots_logged(&self) -> usize {
        self.spots_logged
    }

    /// Summary of the most recently presented volume.
    pub fn last_summary(&self) -> Option<&VolumeSummary> {
        self.last.as_ref()
    }
}

impl VolumeSink for LogSink {
    fn present(&mut self, grid: &VoxelGrid, spots: &SpotCollection) -> Result<(), DriveError> {
        let summary = VolumeSummary::new(grid, spots);
        info!(
            "'{}': {}x{}x{} voxels, calibration {:?}, axes {:?}",
            summary.title, summary.dims[0], summary.dims[1], summary.dims[2], summary.calibration, summary.axes
        );
        info!(
            "{} voxels painted, max intensity {}, {} spots",
            summary.painted_voxels, summary.max_intensity, summary.n_spots
        );
        self.spots_logged = 0;
        for spot in spots.iter() {
            info!("{}", spot);
            self.spots_logged += 1;
        }
        self.last = Some(summary);
        Ok(())
    }
}
