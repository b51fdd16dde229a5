use strum::EnumIter;

use crate::{CalculateSquared, DistanceCalculator};

// Vectors shorter than this go through the scalar loop.
const LANE_THRESHOLD: usize = 32;

#[derive(Debug, EnumIter, PartialEq, Clone, Copy)]
pub enum L2DistanceCalculatorImpl {
    Scalar,
    Lanes,
}

pub struct L2DistanceCalculator {}

impl L2DistanceCalculator {
    pub fn calculate_scalar(a: &[f32], b: &[f32]) -> f32 {
        Self::calculate_squared_scalar(a, b).sqrt()
    }

    pub fn calculate_squared_scalar(a: &[f32], b: &[f32]) -> f32 {
        a.iter()
            .zip(b.iter())
            .map(|(&x, &y)| (x - y).powi(2))
            .sum::<f32>()
    }

    /// Squared distance accumulated in f64, so finite inputs never overflow to `inf` or lose
    /// tiny differences to underflow.
    pub fn calculate_squared_f64(a: &[f32], b: &[f32]) -> f64 {
        a.iter()
            .zip(b.iter())
            .map(|(&x, &y)| (x as f64 - y as f64).powi(2))
            .sum::<f64>()
    }

    /// Accumulates squared differences into LANES independent partial sums, then reduces them.
    /// The tail that doesn't fill a full lane is added one element at a time.
    pub fn calculate_squared_lanes<const LANES: usize>(a: &[f32], b: &[f32]) -> f32 {
        let mut lanes = [0.0f32; LANES];
        let a_chunks = a.chunks_exact(LANES);
        let b_chunks = b.chunks_exact(LANES);
        let a_rem = a_chunks.remainder();
        let b_rem = b_chunks.remainder();
        for (a_chunk, b_chunk) in a_chunks.zip(b_chunks) {
            for i in 0..LANES {
                let diff = a_chunk[i] - b_chunk[i];
                lanes[i] += diff * diff;
            }
        }
        lanes.iter().sum::<f32>() + Self::calculate_squared_scalar(a_rem, b_rem)
    }

    pub fn calculate_with(implem: L2DistanceCalculatorImpl, a: &[f32], b: &[f32]) -> f32 {
        match implem {
            L2DistanceCalculatorImpl::Scalar => Self::calculate_scalar(a, b),
            L2DistanceCalculatorImpl::Lanes => Self::calculate_squared_lanes::<8>(a, b).sqrt(),
        }
    }
}

impl DistanceCalculator for L2DistanceCalculator {
    /// Compute L2 distance between two vectors
    fn calculate(a: &[f32], b: &[f32]) -> f32 {
        Self::calculate_squared(a, b).sqrt()
    }
}

impl CalculateSquared for L2DistanceCalculator {
    fn calculate_squared(a: &[f32], b: &[f32]) -> f32 {
        if a.len() < LANE_THRESHOLD {
            Self::calculate_squared_scalar(a, b)
        } else {
            Self::calculate_squared_lanes::<8>(a, b)
        }
    }
}
