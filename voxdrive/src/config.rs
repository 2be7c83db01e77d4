use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use log::info;
use voxsynth::simulation::config::SynthesisConfig;

use crate::error::DriveError;

/// Read a `SynthesisConfig` from a JSON file. Absent fields keep their defaults.
pub fn load_config(path: impl AsRef<Path>) -> Result<SynthesisConfig, DriveError> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);
    let config: SynthesisConfig = serde_json::from_reader(reader)?;
    info!("Loaded configuration from {}", path.display());
    Ok(config)
}
