pub mod distance;
pub mod io;
pub mod test_utils;

pub trait DistanceCalculator {
    fn calculate(a: &[f32], b: &[f32]) -> f32;
}

/// Trait for calculating the squared distance between two vectors. An optimization for when the true
/// L2 distance is not needed.
pub trait CalculateSquared {
    fn calculate_squared(a: &[f32], b: &[f32]) -> f32;
}
