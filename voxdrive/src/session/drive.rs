use std::time::Instant;

use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use voxsynth::data::blob::BlobSet;
use voxsynth::data::spot::{SpotCollection, POSITION_T, POSITION_X, POSITION_Y, POSITION_Z, QUALITY, RADIUS};
use voxsynth::data::voxel_grid::VoxelGrid;
use voxsynth::simulation::config::SynthesisConfig;
use voxsynth::simulation::volume::synthesize;

use crate::error::DriveError;
use crate::session::analyzer::SpotAnalyzer;
use crate::session::sink::VolumeSink;

/// Frame that holds the synthesized spots.
pub const SPOT_FRAME: usize = 0;

/// Everything a run produced, handed back to the caller.
#[derive(Debug)]
pub struct DriveOutcome {
    pub grid: VoxelGrid,
    pub blobs: BlobSet,
    pub spots: SpotCollection,
}

/// One-shot test drive: synthesize a volume, describe its blobs as spots,
/// run the analyzers over them, then hand the result to every sink.
pub struct TestDrive {
    config: SynthesisConfig,
    analyzers: Vec<Box<dyn SpotAnalyzer>>,
    sinks: Vec<Box<dyn VolumeSink>>,
}

impl TestDrive {
    pub fn new(config: SynthesisConfig) -> Self {
        TestDrive { config, analyzers: Vec::new(), sinks: Vec::new() }
    }

    pub fn config(&self) -> &SynthesisConfig {
        &self.config
    }

    pub fn with_analyzer(mut self, analyzer: impl SpotAnalyzer + 'static) -> Self {
        self.analyzers.push(Box::new(analyzer));
        self
    }

    pub fn with_sink(mut self, sink: impl VolumeSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    /// Keys every spot will carry after a run: the ones set when spots are
    /// built, followed by those of each analyzer in registration order.
    pub fn feature_keys(&self) -> Vec<&'static str> {
        let mut keys = vec![POSITION_X, POSITION_Y, POSITION_Z, POSITION_T, RADIUS, QUALITY];
        for analyzer in &self.analyzers {
            for &key in analyzer.features() {
                if !keys.contains(&key) {
                    keys.push(key);
                }
            }
        }
        keys
    }

    /// Run with a generator seeded from the config, or from entropy when no
    /// seed is set.
    pub fn run(&mut self) -> Result<DriveOutcome, DriveError> {
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.run_with(&mut rng)
    }

    pub fn run_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<DriveOutcome, DriveError> {
        let start = Instant::now();

        info!("Creating image...");
        let (grid, blobs) = synthesize(&self.config, rng)?;

        let mut frame = blobs.to_spots(self.config.mean_radius);
        for analyzer in &self.analyzers {
            info!("Grabbing features with {}...", analyzer.name());
            analyzer.process(&grid, &mut frame).map_err(|reason| DriveError::Analyzer {
                name: analyzer.name().to_string(),
                reason,
            })?;
        }

        let mut spots = SpotCollection::new();
        spots.put(SPOT_FRAME, frame);

        for sink in self.sinks.iter_mut() {
            sink.present(&grid, &spots)?;
        }

        info!("Test drive finished in {:.2}ms", start.elapsed().as_secs_f64() * 1000.0);
        Ok(DriveOutcome { grid, blobs, spots })
    }
}
