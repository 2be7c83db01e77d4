use thiserror::Error;
use voxsynth::SynthError;

#[derive(Error, Debug)]
pub enum DriveError {
    #[error("Synthesis failed: {0}")]
    Synth(#[from] SynthError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
    #[error("Analyzer '{name}' failed: {reason}")]
    Analyzer { name: String, reason: String },
}
