pub mod error;

// data module
pub mod data {
    pub mod voxel_grid;
    pub mod blob;
    pub mod spot;
}

// algorithm module
pub mod algorithm {
    pub mod ball;
    pub mod paint;
}

// simulation module
pub mod simulation {
    pub mod blobs;
    pub mod config;
    pub mod volume;
}

pub use error::SynthError;
