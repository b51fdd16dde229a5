use std::collections::HashSet;

use crate::error::{ClusteringError, Result};
use crate::feature_vector::FeatureVector;

/// Non-empty, immutable table of feature vectors sharing one dimensionality.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    dimension: usize,
    vectors: Vec<FeatureVector>,
}

impl Dataset {
    pub fn new(vectors: Vec<FeatureVector>) -> Result<Self> {
        let dimension = match vectors.first() {
            Some(first) => first.dimension(),
            None => {
                return Err(ClusteringError::InvalidArgument(
                    "dataset is empty".to_string(),
                ))
            }
        };
        for vector in vectors.iter() {
            if vector.dimension() != dimension {
                return Err(ClusteringError::DimensionMismatch {
                    expected: dimension,
                    actual: vector.dimension(),
                });
            }
        }
        Ok(Self { dimension, vectors })
    }

    pub fn from_rows(rows: Vec<Vec<f32>>) -> Result<Self> {
        let vectors = rows
            .into_iter()
            .map(FeatureVector::new)
            .collect::<Result<Vec<_>>>()?;
        Self::new(vectors)
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn get(&self, index: usize) -> Option<&FeatureVector> {
        self.vectors.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FeatureVector> {
        self.vectors.iter()
    }

    pub fn vectors(&self) -> &[FeatureVector] {
        &self.vectors
    }

    /// Number of distinct points. `0.0` and `-0.0` count as the same value.
    pub fn num_distinct(&self) -> usize {
        self.vectors
            .iter()
            .map(|vector| {
                vector
                    .as_slice()
                    .iter()
                    .map(|&v| if v == 0.0 { 0u32 } else { v.to_bits() })
                    .collect::<Vec<u32>>()
            })
            .collect::<HashSet<_>>()
            .len()
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a FeatureVector;
    type IntoIter = std::slice::Iter<'a, FeatureVector>;

    fn into_iter(self) -> Self::IntoIter {
        self.vectors.iter()
    }
}
