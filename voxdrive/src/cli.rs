use std::path::PathBuf;

use clap::Parser;
use voxsynth::simulation::config::SynthesisConfig;

use crate::config::load_config;
use crate::error::DriveError;

/// Synthesize a random blob volume and report what was painted.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "voxdrive", version, about)]
pub struct Args {
    /// JSON synthesis configuration; defaults are used when absent
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Generator seed, overrides the configuration
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of blobs, overrides the configuration
    #[arg(long)]
    pub blobs: Option<usize>,

    /// Paint z-slices concurrently
    #[arg(long)]
    pub parallel: bool,

    /// Print the volume summary as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

impl Args {
    /// Apply the command-line overrides on top of `config`.
    ///
    /// Flags that were not given leave the configured value alone.
    pub fn apply(&self, config: &mut SynthesisConfig) {
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(n_blobs) = self.blobs {
            config.n_blobs = n_blobs;
        }
        config.parallel |= self.parallel;
    }

    /// Load `--config` (or the defaults) and apply the overrides.
    pub fn resolve_config(&self) -> Result<SynthesisConfig, DriveError> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => SynthesisConfig::default(),
        };
        self.apply(&mut config);
        Ok(config)
    }
}
