use std::ops::Range;

use itertools::iproduct;
use log::{debug, info};
use rayon::prelude::*;

use crate::algorithm::ball::Ball;
use crate::data::blob::{Blob, BlobSet};
use crate::data::voxel_grid::{voxel_position, VoxelGrid};

/// Paint one blob into the grid, overwriting whatever was there.
///
/// Only the blob's bounding box, clipped to the grid, is visited.
/// Returns the number of voxels written.
pub fn paint_blob(grid: &mut VoxelGrid, blob: &Blob) -> usize {
    let ball = blob.ball();
    if ball.is_degenerate() {
        debug!("Skipping blob at {:?}: radius {} paints nothing", blob.center, blob.radius);
        return 0;
    }

    let [nx, ny, _] = grid.dims();
    let voxels = ball.voxels(grid.dims(), grid.calibration());
    let data = grid.data_mut();

    let mut written = 0;
    for [x, y, z] in voxels {
        data[x + y * nx + z * nx * ny] = blob.intensity;
        written += 1;
    }
    written
}

/// Paint blobs in order. Later blobs win where balls overlap.
///
/// Returns the total number of voxel writes, overwrites included.
pub fn paint_blobs(grid: &mut VoxelGrid, blobs: &BlobSet) -> usize {
    let written: usize = blobs.iter().map(|blob| paint_blob(grid, blob)).sum();
    info!("Painted {} blobs ({} voxel writes)", blobs.len(), written);
    written
}

/// Same result as [`paint_blobs`], with z-slices painted concurrently.
///
/// Every slice applies the blobs in list order, so overlaps resolve exactly as
/// in the serial painter.
pub fn paint_blobs_par(grid: &mut VoxelGrid, blobs: &BlobSet) -> usize {
    let dims = grid.dims();
    let calibration = grid.calibration();
    let nx = dims[0];
    let plane = grid.plane_len();

    let regions: Vec<(Ball, [Range<usize>; 3], u8)> = blobs
        .iter()
        .filter_map(|blob| {
            let ball = blob.ball();
            if ball.is_degenerate() {
                debug!("Skipping blob at {:?}: radius {} paints nothing", blob.center, blob.radius);
                None
            } else {
                Some((ball, ball.bounding_box(dims, calibration), blob.intensity))
            }
        })
        .collect();

    let written: usize = grid
        .data_mut()
        .par_chunks_mut(plane)
        .enumerate()
        .map(|(z, slice)| {
            let mut written = 0;
            for (ball, [xr, yr, zr], intensity) in &regions {
                if !zr.contains(&z) {
                    continue;
                }
                for (y, x) in iproduct!(yr.clone(), xr.clone()) {
                    if ball.contains(voxel_position([x, y, z], calibration)) {
                        slice[x + y * nx] = *intensity;
                        written += 1;
                    }
                }
            }
            written
        })
        .sum();

    info!("Painted {} blobs in parallel ({} voxel writes)", blobs.len(), written);
    written
}
