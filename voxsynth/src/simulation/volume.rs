use log::info;
use rand::Rng;

use crate::algorithm::paint::{paint_blobs, paint_blobs_par};
use crate::data::blob::BlobSet;
use crate::data::voxel_grid::VoxelGrid;
use crate::error::{SynthError, AXIS_NAMES};
use crate::simulation::blobs::generate_random_blobs;
use crate::simulation::config::SynthesisConfig;

/// Allocate a zero-filled grid from signed dimensions.
///
/// Any dimension `<= 0` fails with `InvalidDimension` before anything is allocated.
pub fn create_volume(dims: [i64; 3], calibration: [f64; 3]) -> Result<VoxelGrid, SynthError> {
    let mut size = [0usize; 3];
    for axis in 0..3 {
        if dims[axis] <= 0 {
            return Err(SynthError::InvalidDimension { axis: AXIS_NAMES[axis], value: dims[axis] });
        }
        size[axis] = usize::try_from(dims[axis]).map_err(|_| SynthError::VolumeTooLarge([usize::MAX; 3]))?;
    }
    VoxelGrid::new(size, calibration)
}

/// Build the volume described by `config`: allocate, draw blobs, paint.
///
/// Blobs are drawn over the configured physical extent. Returns the painted
/// grid together with the blobs in paint order.
pub fn synthesize<R: Rng + ?Sized>(
    config: &SynthesisConfig,
    rng: &mut R,
) -> Result<(VoxelGrid, BlobSet), SynthError> {
    let dims = config.grid_dimensions()?;
    let mut grid = create_volume(dims, config.calibration)?
        .with_name(config.name.as_str())
        .with_title(config.title.as_str());

    let blobs = generate_random_blobs(
        rng,
        config.n_blobs,
        config.extent,
        config.mean_radius,
        config.intensity_range(),
    )?;

    if config.parallel {
        paint_blobs_par(&mut grid, &blobs);
    } else {
        paint_blobs(&mut grid, &blobs);
    }

    info!(
        "Synthesized '{}': {} blobs, {} of {} voxels painted",
        grid.name(),
        blobs.len(),
        grid.count_nonzero(),
        grid.len()
    );
    Ok((grid, blobs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_create_volume_example() {
        let grid = create_volume([10, 10, 10], [1.0, 1.0, 1.0]).unwrap();
        assert_eq!(grid.len(), 1000);
        assert_eq!(grid.count_nonzero(), 0);
    }

    #[test]
    fn test_create_volume_rejects_non_positive() {
        assert_eq!(
            create_volume([10, 0, 10], [1.0; 3]).unwrap_err(),
            SynthError::InvalidDimension { axis: 'y', value: 0 }
        );
        assert_eq!(
            create_volume([10, 10, -4], [1.0; 3]).unwrap_err(),
            SynthError::InvalidDimension { axis: 'z', value: -4 }
        );
    }

    #[test]
    fn test_synthesize_small_volume() {
        let config = SynthesisConfig::small();
        let mut rng = StdRng::seed_from_u64(config.seed.unwrap());
        let (grid, blobs) = synthesize(&config, &mut rng).unwrap();

        assert_eq!(grid.dims(), [40, 40, 10]);
        assert_eq!(grid.name(), "test");
        assert_eq!(grid.title(), "3D blobs");
        assert_eq!(blobs.len(), 5);
        let max = blobs.iter().map(|b| b.intensity).max().unwrap();
        assert!(grid.data().iter().all(|&v| v <= max));
    }

    #[test]
    fn test_synthesize_parallel_matches_serial() {
        let serial = SynthesisConfig::small();
        let parallel = SynthesisConfig { parallel: true, ..SynthesisConfig::small() };

        let (a, blobs_a) = synthesize(&serial, &mut StdRng::seed_from_u64(11)).unwrap();
        let (b, blobs_b) = synthesize(&parallel, &mut StdRng::seed_from_u64(11)).unwrap();
        assert_eq!(blobs_a, blobs_b);
        assert_eq!(a, b);
    }

    #[test]
    fn test_synthesize_rejects_huge_grid() {
        let config = SynthesisConfig {
            extent: [1.0e10, 1.0e9, 1.0],
            calibration: [1.0; 3],
            n_blobs: 0,
            ..Default::default()
        };
        assert!(matches!(
            synthesize(&config, &mut StdRng::seed_from_u64(0)),
            Err(SynthError::VolumeTooLarge(_))
        ));
    }

    #[test]
    fn test_synthesize_rejects_empty_grid() {
        let config = SynthesisConfig { extent: [0.2, 10.0, 10.0], ..SynthesisConfig::small() };
        assert_eq!(
            synthesize(&config, &mut StdRng::seed_from_u64(0)).unwrap_err(),
            SynthError::InvalidDimension { axis: 'x', value: 0 }
        );
    }
}
