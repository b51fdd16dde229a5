use crate::dataset::Dataset;
use crate::error::{ClusteringError, Result};
use crate::feature_vector::FeatureVector;

/// Trained k-means model: K centroids of a common dimensionality. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterModel {
    dimension: usize,
    centroids: Vec<FeatureVector>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClusterPrediction {
    /// Index of the nearest centroid.
    pub cluster_id: usize,

    /// Euclidean distance to every centroid, in centroid order.
    pub distances: Vec<f32>,
}

impl ClusterModel {
    pub fn new(centroids: Vec<FeatureVector>) -> Result<Self> {
        let dimension = match centroids.first() {
            Some(first) => first.dimension(),
            None => {
                return Err(ClusteringError::InvalidArgument(
                    "model needs at least one centroid".to_string(),
                ))
            }
        };
        for centroid in centroids.iter() {
            if centroid.dimension() != dimension {
                return Err(ClusteringError::DimensionMismatch {
                    expected: dimension,
                    actual: centroid.dimension(),
                });
            }
        }
        Ok(Self {
            dimension,
            centroids,
        })
    }

    /// Build from centroid-major flattened values, `dimension` values per centroid.
    pub fn from_flattened(dimension: usize, flattened_centroids: Vec<f32>) -> Result<Self> {
        if dimension == 0 || flattened_centroids.len() % dimension != 0 {
            return Err(ClusteringError::InvalidArgument(format!(
                "{} values cannot be split into centroids of dimension {}",
                flattened_centroids.len(),
                dimension
            )));
        }
        let centroids = flattened_centroids
            .chunks_exact(dimension)
            .map(|centroid| FeatureVector::new(centroid.to_vec()))
            .collect::<Result<Vec<_>>>()?;
        Self::new(centroids)
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn num_clusters(&self) -> usize {
        self.centroids.len()
    }

    pub fn centroids(&self) -> &[FeatureVector] {
        &self.centroids
    }

    pub fn centroid(&self, cluster_id: usize) -> Option<&FeatureVector> {
        self.centroids.get(cluster_id)
    }

    pub fn predict(&self, vector: &FeatureVector) -> Result<ClusterPrediction> {
        if vector.dimension() != self.dimension {
            return Err(ClusteringError::DimensionMismatch {
                expected: self.dimension,
                actual: vector.dimension(),
            });
        }

        let distances = self
            .centroids
            .iter()
            .map(|centroid| centroid.distance(vector))
            .collect::<Result<Vec<f32>>>()?;

        // Strict comparison keeps the lowest index on ties.
        let mut cluster_id = 0;
        for (idx, &distance) in distances.iter().enumerate() {
            if distance < distances[cluster_id] {
                cluster_id = idx;
            }
        }

        Ok(ClusterPrediction {
            cluster_id,
            distances,
        })
    }

    pub fn predict_batch(&self, dataset: &Dataset) -> Result<Vec<ClusterPrediction>> {
        dataset.iter().map(|vector| self.predict(vector)).collect()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn two_cluster_model() -> ClusterModel {
        ClusterModel::from_flattened(2, vec![1.0, 1.5, 9.0, 8.5]).unwrap()
    }

    #[test]
    fn test_model_construction() {
        let model = two_cluster_model();
        assert_eq!(model.dimension(), 2);
        assert_eq!(model.num_clusters(), 2);
        assert_eq!(model.centroid(1).unwrap().as_slice(), &[9.0, 8.5]);
        assert!(model.centroid(2).is_none());

        assert!(matches!(
            ClusterModel::new(vec![]),
            Err(ClusteringError::InvalidArgument(_))
        ));
        assert!(ClusterModel::from_flattened(2, vec![1.0, 2.0, 3.0]).is_err());
        assert!(ClusterModel::from_flattened(0, vec![]).is_err());

        let mixed = vec![
            FeatureVector::new(vec![1.0]).unwrap(),
            FeatureVector::new(vec![1.0, 2.0]).unwrap(),
        ];
        assert!(matches!(
            ClusterModel::new(mixed),
            Err(ClusteringError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_predict() {
        let model = two_cluster_model();
        let prediction = model
            .predict(&FeatureVector::new(vec![1.0, 1.0]).unwrap())
            .unwrap();
        assert_eq!(prediction.cluster_id, 0);
        assert_eq!(prediction.distances.len(), 2);
        assert_abs_diff_eq!(prediction.distances[0], 0.5, epsilon = 1e-6);
        assert_abs_diff_eq!(prediction.distances[1], 120.25f32.sqrt(), epsilon = 1e-5);

        let prediction = model
            .predict(&FeatureVector::new(vec![8.0, 8.0]).unwrap())
            .unwrap();
        assert_eq!(prediction.cluster_id, 1);
    }

    #[test]
    fn test_predict_ties_go_to_lowest_index() {
        let model = ClusterModel::from_flattened(1, vec![2.0, 0.0, 2.0]).unwrap();
        let prediction = model
            .predict(&FeatureVector::new(vec![1.0]).unwrap())
            .unwrap();
        assert_eq!(prediction.distances, vec![1.0, 1.0, 1.0]);
        assert_eq!(prediction.cluster_id, 0);
    }

    #[test]
    fn test_predict_is_idempotent() {
        let model = two_cluster_model();
        let vector = FeatureVector::new(vec![4.2, 3.3]).unwrap();
        let first = model.predict(&vector).unwrap();
        let second = model.predict(&vector).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_predict_dimension_mismatch() {
        let model = two_cluster_model();
        let result = model.predict(&FeatureVector::new(vec![1.0, 1.0, 1.0]).unwrap());
        assert!(matches!(
            result,
            Err(ClusteringError::DimensionMismatch {
                expected: 2,
                actual: 3
            })
        ));
    }

    #[test]
    fn test_predict_batch() {
        let model = two_cluster_model();
        let dataset =
            Dataset::from_rows(vec![vec![0.0, 0.0], vec![10.0, 10.0], vec![2.0, 1.0]]).unwrap();
        let predictions = model.predict_batch(&dataset).unwrap();
        let ids: Vec<usize> = predictions.iter().map(|p| p.cluster_id).collect();
        assert_eq!(ids, vec![0, 1, 0]);
    }
}
