use std::collections::BTreeMap;
use std::fmt;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::algorithm::ball::Ball;
use crate::data::blob::Blob;

// well-known feature keys
pub const POSITION_X: &str = "POSITION_X";
pub const POSITION_Y: &str = "POSITION_Y";
pub const POSITION_Z: &str = "POSITION_Z";
pub const POSITION_T: &str = "POSITION_T";
pub const RADIUS: &str = "RADIUS";
pub const QUALITY: &str = "QUALITY";

/// Detection-side descriptor: a named point with a feature map.
///
/// The position lives in the feature map under `POSITION_X/Y/Z`, so analyzers
/// see it like any other feature. `Spot::new` always sets all three.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Spot {
    pub id: usize,
    pub name: String,
    features: BTreeMap<String, f64>,
}

impl Spot {
    pub fn new(id: usize, name: impl Into<String>, center: [f64; 3]) -> Self {
        let mut features = BTreeMap::new();
        features.insert(POSITION_X.to_string(), center[0]);
        features.insert(POSITION_Y.to_string(), center[1]);
        features.insert(POSITION_Z.to_string(), center[2]);
        Spot { id, name: name.into(), features }
    }

    /// Spot placed on a blob the way the test drive does it: frame 0, radius
    /// and quality set to the nominal (mean) radius rather than the blob's
    /// own noisy radius.
    pub fn from_blob(id: usize, blob: &Blob, nominal_radius: f64) -> Self {
        let mut spot = Spot::new(id, format!("Spot {}", id), blob.center);
        spot.put_feature(POSITION_T, 0.0);
        spot.put_feature(RADIUS, nominal_radius);
        spot.put_feature(QUALITY, nominal_radius);
        spot
    }

    pub fn put_feature(&mut self, key: impl Into<String>, value: f64) {
        self.features.insert(key.into(), value);
    }

    pub fn feature(&self, key: &str) -> Option<f64> {
        self.features.get(key).copied()
    }

    pub fn features(&self) -> &BTreeMap<String, f64> {
        &self.features
    }

    pub fn center(&self) -> [f64; 3] {
        [
            self.feature(POSITION_X).unwrap_or_default(),
            self.feature(POSITION_Y).unwrap_or_default(),
            self.feature(POSITION_Z).unwrap_or_default(),
        ]
    }

    pub fn radius(&self) -> Option<f64> {
        self.feature(RADIUS)
    }

    /// Region covered by the spot, with the same membership test as blob painting.
    pub fn ball(&self) -> Option<Ball> {
        self.radius().map(|r| Ball::new(self.center(), r))
    }
}

/// `name` followed by `key=value` pairs in key order.
impl fmt::Display for Spot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        for (key, value) in &self.features {
            write!(f, " {}={:.3}", key, value)?;
        }
        Ok(())
    }
}

/// Spots grouped by frame index, frames kept in ascending order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SpotCollection {
    frames: BTreeMap<usize, Vec<Spot>>,
}

impl SpotCollection {
    pub fn new() -> Self {
        SpotCollection { frames: BTreeMap::new() }
    }

    /// Replace the spots of `frame`.
    pub fn put(&mut self, frame: usize, spots: Vec<Spot>) {
        self.frames.insert(frame, spots);
    }

    pub fn get(&self, frame: usize) -> Option<&[Spot]> {
        self.frames.get(&frame).map(|s| s.as_slice())
    }

    pub fn frames(&self) -> impl Iterator<Item = usize> + '_ {
        self.frames.keys().copied()
    }

    pub fn n_spots(&self) -> usize {
        self.frames.values().map(|s| s.len()).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Spot> {
        self.frames.values().flatten()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Spot> {
        self.frames.values_mut().flatten()
    }

    /// Values of each requested feature across all spots, in frame then spot order.
    ///
    /// Spots lacking a feature are skipped for that feature, with a warning.
    pub fn feature_values(&self, keys: &[&str]) -> BTreeMap<String, Vec<f64>> {
        let mut values = BTreeMap::new();
        for &key in keys {
            let mut column = Vec::with_capacity(self.n_spots());
            for spot in self.iter() {
                match spot.feature(key) {
                    Some(v) => column.push(v),
                    None => warn!("{} has no value for feature {}", spot.name, key),
                }
            }
            values.insert(key.to_string(), column);
        }
        values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_spot_carries_position() {
        let spot = Spot::new(3, "a", [1.0, 2.0, 3.0]);
        assert_eq!(spot.center(), [1.0, 2.0, 3.0]);
        assert_eq!(spot.feature(POSITION_Y), Some(2.0));
        assert_eq!(spot.radius(), None);
        assert_eq!(spot.ball(), None);
    }

    #[test]
    fn test_from_blob_matches_harness_features() {
        let blob = Blob::new([10.0, 20.0, 30.0], 4.3, 77);
        let spot = Spot::from_blob(7, &blob, 5.0);
        assert_eq!(spot.name, "Spot 7");
        assert_eq!(spot.feature(POSITION_T), Some(0.0));
        assert_eq!(spot.feature(RADIUS), Some(5.0));
        assert_eq!(spot.feature(QUALITY), Some(5.0));
        assert_eq!(spot.ball(), Some(Ball::new([10.0, 20.0, 30.0], 5.0)));
    }

    #[test]
    fn test_display_lists_sorted_features() {
        let mut spot = Spot::new(0, "Spot 0", [1.0, 2.0, 3.0]);
        spot.put_feature("MEAN_INTENSITY", 12.5);
        assert_eq!(
            spot.to_string(),
            "Spot 0 MEAN_INTENSITY=12.500 POSITION_X=1.000 POSITION_Y=2.000 POSITION_Z=3.000"
        );
    }

    #[test]
    fn test_collection_counts_and_orders_frames() {
        let mut spots = SpotCollection::new();
        spots.put(2, vec![Spot::new(0, "c", [0.0; 3])]);
        spots.put(0, vec![Spot::new(1, "a", [0.0; 3]), Spot::new(2, "b", [0.0; 3])]);
        assert_eq!(spots.n_spots(), 3);
        assert_eq!(spots.frames().collect::<Vec<_>>(), vec![0, 2]);
        let names: Vec<_> = spots.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert!(spots.get(1).is_none());
    }

    #[test]
    fn test_feature_values_skips_missing() {
        let mut a = Spot::new(0, "a", [1.0, 0.0, 0.0]);
        a.put_feature(QUALITY, 3.0);
        let b = Spot::new(1, "b", [2.0, 0.0, 0.0]);
        let mut spots = SpotCollection::new();
        spots.put(0, vec![a, b]);

        let values = spots.feature_values(&[POSITION_X, QUALITY]);
        assert_eq!(values[POSITION_X], vec![1.0, 2.0]);
        assert_eq!(values[QUALITY], vec![3.0]);
    }

    #[test]
    fn test_iter_mut_updates_features() {
        let mut spots = SpotCollection::new();
        spots.put(0, vec![Spot::new(0, "a", [0.0; 3])]);
        for spot in spots.iter_mut() {
            spot.put_feature("MEAN_INTENSITY", 1.0);
        }
        assert_eq!(spots.get(0).unwrap()[0].feature("MEAN_INTENSITY"), Some(1.0));
    }
}
