use std::cell::RefCell;
use std::rc::Rc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use voxdrive::error::DriveError;
use voxdrive::session::analyzer::SpotAnalyzer;
use voxdrive::session::drive::{TestDrive, SPOT_FRAME};
use voxdrive::session::sink::{LogSink, VolumeSink};
use voxsynth::data::spot::{Spot, SpotCollection, QUALITY, RADIUS};
use voxsynth::data::voxel_grid::VoxelGrid;
use voxsynth::simulation::config::SynthesisConfig;

const MEAN_INTENSITY: &str = "MEAN_INTENSITY";

/// Mean voxel value inside each spot's ball.
struct MeanIntensity;

impl SpotAnalyzer for MeanIntensity {
    fn name(&self) -> &str {
        "mean intensity"
    }

    fn features(&self) -> &[&'static str] {
        &[MEAN_INTENSITY]
    }

    fn process(&self, grid: &VoxelGrid, spots: &mut [Spot]) -> Result<(), String> {
        for spot in spots.iter_mut() {
            let ball = spot.ball().ok_or_else(|| format!("{} has no radius", spot.name))?;
            let values: Vec<f64> = ball
                .voxels(grid.dims(), grid.calibration())
                .filter_map(|[x, y, z]| grid.get(x, y, z))
                .map(f64::from)
                .collect();
            let mean = if values.is_empty() { 0.0 } else { values.iter().sum::<f64>() / values.len() as f64 };
            spot.put_feature(MEAN_INTENSITY, mean);
        }
        Ok(())
    }
}

struct FailingAnalyzer;

impl SpotAnalyzer for FailingAnalyzer {
    fn name(&self) -> &str {
        "broken"
    }

    fn features(&self) -> &[&'static str] {
        &[]
    }

    fn process(&self, _grid: &VoxelGrid, _spots: &mut [Spot]) -> Result<(), String> {
        Err("no target".to_string())
    }
}

/// Records what it was shown.
#[derive(Clone, Default)]
struct RecordingSink {
    seen: Rc<RefCell<Vec<(String, SpotCollection)>>>,
}

impl VolumeSink for RecordingSink {
    fn present(&mut self, grid: &VoxelGrid, spots: &SpotCollection) -> Result<(), DriveError> {
        self.seen.borrow_mut().push((grid.title().to_string(), spots.clone()));
        Ok(())
    }
}

#[test_log::test]
fn test_drive_builds_one_spot_per_blob() {
    let mut drive = TestDrive::new(SynthesisConfig::small()).with_sink(LogSink::new());
    let outcome = drive.run().unwrap();

    assert_eq!(outcome.blobs.len(), 5);
    let frame = outcome.spots.get(SPOT_FRAME).unwrap();
    assert_eq!(frame.len(), outcome.blobs.len());
    assert_eq!(outcome.spots.frames().collect::<Vec<_>>(), vec![SPOT_FRAME]);
    for (spot, blob) in frame.iter().zip(outcome.blobs.iter()) {
        assert_eq!(spot.center(), blob.center);
        assert_eq!(spot.feature(RADIUS), Some(2.0));
        assert_eq!(spot.feature(QUALITY), Some(2.0));
    }
}

#[test_log::test]
fn test_seeded_drive_is_reproducible() {
    let a = TestDrive::new(SynthesisConfig::small()).run().unwrap();
    let b = TestDrive::new(SynthesisConfig::small()).run().unwrap();
    assert_eq!(a.blobs, b.blobs);
    assert_eq!(a.grid, b.grid);
}

#[test_log::test]
fn test_analyzers_run_before_sinks() {
    let sink = RecordingSink::default();
    let mut drive = TestDrive::new(SynthesisConfig::small())
        .with_analyzer(MeanIntensity)
        .with_sink(sink.clone());
    let outcome = drive.run_with(&mut StdRng::seed_from_u64(99)).unwrap();

    let seen = sink.seen.borrow();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].0, "3D blobs");
    assert_eq!(seen[0].1, outcome.spots);
    assert!(seen[0].1.iter().all(|s| s.feature(MEAN_INTENSITY).is_some()));

    let means = outcome.spots.feature_values(&[MEAN_INTENSITY]);
    assert_eq!(means[MEAN_INTENSITY].len(), 5);
    assert!(means[MEAN_INTENSITY].iter().all(|&m| (0.0..=255.0).contains(&m)));
}

#[test_log::test]
fn test_feature_keys_include_analyzer_features() {
    let drive = TestDrive::new(SynthesisConfig::small()).with_analyzer(MeanIntensity);
    let keys = drive.feature_keys();
    assert_eq!(keys.last(), Some(&MEAN_INTENSITY));
    assert!(keys.contains(&RADIUS));
}

#[test_log::test]
fn test_failing_analyzer_stops_before_sinks() {
    let sink = RecordingSink::default();
    let mut drive = TestDrive::new(SynthesisConfig::small())
        .with_analyzer(FailingAnalyzer)
        .with_sink(sink.clone());

    let err = drive.run().unwrap_err();
    assert!(matches!(err, DriveError::Analyzer { ref name, .. } if name == "broken"));
    assert!(sink.seen.borrow().is_empty());
}

#[test_log::test]
fn test_invalid_config_surfaces_synth_error() {
    let config = SynthesisConfig { calibration: [0.5, 0.0, 1.0], ..SynthesisConfig::small() };
    let err = TestDrive::new(config).run().unwrap_err();
    assert!(matches!(err, DriveError::Synth(_)));
}
