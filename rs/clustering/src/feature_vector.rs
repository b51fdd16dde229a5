use utils::distance::l2::L2DistanceCalculator;
use utils::{CalculateSquared, DistanceCalculator};

use crate::error::{ClusteringError, Result};

/// Fixed-dimension numeric record. All components are finite.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    values: Vec<f32>,
}

impl FeatureVector {
    pub fn new(values: Vec<f32>) -> Result<Self> {
        if values.is_empty() {
            return Err(ClusteringError::InvalidArgument(
                "feature vector must have at least one component".to_string(),
            ));
        }
        if let Some(position) = values.iter().position(|v| !v.is_finite()) {
            return Err(ClusteringError::InvalidArgument(format!(
                "component {} is not finite: {}",
                position, values[position]
            )));
        }
        Ok(Self { values })
    }

    pub fn dimension(&self) -> usize {
        self.values.len()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    pub fn into_inner(self) -> Vec<f32> {
        self.values
    }

    /// Euclidean distance to `other`.
    pub fn distance(&self, other: &FeatureVector) -> Result<f32> {
        self.check_dimension(other.dimension())?;
        Ok(L2DistanceCalculator::calculate(&self.values, &other.values))
    }

    pub fn squared_distance(&self, other: &FeatureVector) -> Result<f32> {
        self.check_dimension(other.dimension())?;
        Ok(L2DistanceCalculator::calculate_squared(
            &self.values,
            &other.values,
        ))
    }

    fn check_dimension(&self, actual: usize) -> Result<()> {
        if actual != self.dimension() {
            return Err(ClusteringError::DimensionMismatch {
                expected: self.dimension(),
                actual,
            });
        }
        Ok(())
    }
}

impl TryFrom<Vec<f32>> for FeatureVector {
    type Error = ClusteringError;

    fn try_from(values: Vec<f32>) -> Result<Self> {
        Self::new(values)
    }
}

impl AsRef<[f32]> for FeatureVector {
    fn as_ref(&self) -> &[f32] {
        &self.values
    }
}

/// One iris flower measurement, in centimeters. Field order is the column order of `iris.data`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IrisFeatures {
    pub sepal_length: f32,
    pub sepal_width: f32,
    pub petal_length: f32,
    pub petal_width: f32,
}

impl IrisFeatures {
    pub const DIMENSION: usize = 4;
}

impl TryFrom<IrisFeatures> for FeatureVector {
    type Error = ClusteringError;

    fn try_from(iris: IrisFeatures) -> Result<Self> {
        Self::new(vec![
            iris.sepal_length,
            iris.sepal_width,
            iris.petal_length,
            iris.petal_width,
        ])
    }
}
