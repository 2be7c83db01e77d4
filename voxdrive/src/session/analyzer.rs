use voxsynth::data::spot::Spot;
use voxsynth::data::voxel_grid::VoxelGrid;

/// Feature computation that lives outside this crate.
///
/// An analyzer reads the volume inside each spot's ball (see `Spot::ball`) and
/// writes its feature values into the spot. The drive treats it as a black
/// box and only checks that it reports success.
pub trait SpotAnalyzer {
    fn name(&self) -> &str;

    /// Feature keys written by `process`.
    fn features(&self) -> &[&'static str];

    fn process(&self, grid: &VoxelGrid, spots: &mut [Spot]) -> Result<(), String>;
}
