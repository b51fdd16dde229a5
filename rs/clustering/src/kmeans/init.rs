use rand::distributions::{Distribution, WeightedError, WeightedIndex};
use rand::seq::SliceRandom;
use rand::Rng;
use utils::distance::l2::L2DistanceCalculator;

use crate::error::{ClusteringError, Result};

/// k-means++ seeding. Returns `num_clusters` flattened centroids, each a copy of a data point.
pub(crate) fn kmeans_plus_plus<R: Rng>(
    data_points: &[&[f32]],
    num_clusters: usize,
    dimension: usize,
    rng: &mut R,
) -> Result<Vec<f32>> {
    let mut centroids = Vec::with_capacity(num_clusters * dimension);

    let first = data_points[rng.gen_range(0..data_points.len())];
    centroids.extend_from_slice(first);

    // Squared distance from each point to its closest chosen centroid. Kept in f64 so that the
    // weights stay finite for large components and non-zero for nearly equal ones.
    let mut min_distances = data_points
        .iter()
        .map(|point| L2DistanceCalculator::calculate_squared_f64(point, first))
        .collect::<Vec<f64>>();

    for _ in 1..num_clusters {
        let sampler = WeightedIndex::new(&min_distances).map_err(|e| match e {
            // Every remaining point coincides with a chosen centroid
            WeightedError::AllWeightsZero => ClusteringError::InvalidArgument(format!(
                "only {} distinct points available for {} clusters",
                centroids.len() / dimension,
                num_clusters
            )),
            other => ClusteringError::InvalidArgument(format!(
                "cannot sample next centroid: {}",
                other
            )),
        })?;
        let next = data_points[sampler.sample(rng)];
        centroids.extend_from_slice(next);

        for (min_distance, point) in min_distances.iter_mut().zip(data_points) {
            let distance = L2DistanceCalculator::calculate_squared_f64(point, next);
            if distance < *min_distance {
                *min_distance = distance;
            }
        }
    }
    Ok(centroids)
}

/// Picks `num_clusters` pairwise-distinct data points uniformly at random.
pub(crate) fn random_sample<R: Rng>(
    data_points: &[&[f32]],
    num_clusters: usize,
    dimension: usize,
    rng: &mut R,
) -> Result<Vec<f32>> {
    let mut indices = (0..data_points.len()).collect::<Vec<usize>>();
    indices.shuffle(rng);

    let mut chosen: Vec<&[f32]> = Vec::with_capacity(num_clusters);
    for idx in indices {
        if chosen.len() == num_clusters {
            break;
        }
        let point = data_points[idx];
        if !chosen.iter().any(|c| *c == point) {
            chosen.push(point);
        }
    }

    if chosen.len() < num_clusters {
        return Err(ClusteringError::InvalidArgument(format!(
            "only {} distinct points available for {} clusters",
            chosen.len(),
            num_clusters
        )));
    }

    let mut centroids = Vec::with_capacity(num_clusters * dimension);
    for point in chosen {
        centroids.extend_from_slice(point);
    }
    Ok(centroids)
}
