use serde::{Deserialize, Serialize};

use crate::algorithm::ball::Ball;
use crate::data::spot::Spot;

/// A synthetic sphere of uniform intensity, in physical units.
///
/// The radius may be zero or negative (see `generate_random_blobs`); such a
/// blob paints nothing.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Blob {
    pub center: [f64; 3],
    pub radius: f64,
    pub intensity: u8,
}

impl Blob {
    pub fn new(center: [f64; 3], radius: f64, intensity: u8) -> Self {
        Blob { center, radius, intensity }
    }

    pub fn ball(&self) -> Ball {
        Ball::new(self.center, self.radius)
    }

    pub fn is_degenerate(&self) -> bool {
        self.ball().is_degenerate()
    }
}

/// Ordered blobs. Position in the set is paint order: later blobs win on overlap.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlobSet {
    blobs: Vec<Blob>,
}

impl BlobSet {
    pub fn new() -> Self {
        BlobSet { blobs: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        BlobSet { blobs: Vec::with_capacity(capacity) }
    }

    pub fn push(&mut self, blob: Blob) {
        self.blobs.push(blob);
    }

    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Blob> {
        self.blobs.iter()
    }

    pub fn as_slice(&self) -> &[Blob] {
        &self.blobs
    }

    /// One spot per blob, in paint order, tagged with the nominal radius.
    pub fn to_spots(&self, nominal_radius: f64) -> Vec<Spot> {
        self.blobs
            .iter()
            .enumerate()
            .map(|(id, blob)| Spot::from_blob(id, blob, nominal_radius))
            .collect()
    }
}

impl From<Vec<Blob>> for BlobSet {
    fn from(blobs: Vec<Blob>) -> Self {
        BlobSet { blobs }
    }
}

impl FromIterator<Blob> for BlobSet {
    fn from_iter<I: IntoIterator<Item = Blob>>(iter: I) -> Self {
        BlobSet { blobs: iter.into_iter().collect() }
    }
}

impl<'a> IntoIterator for &'a BlobSet {
    type Item = &'a Blob;
    type IntoIter = std::slice::Iter<'a, Blob>;

    fn into_iter(self) -> Self::IntoIter {
        self.blobs.iter()
    }
}
