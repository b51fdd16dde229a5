use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use utils::distance::l2::L2DistanceCalculator;

use crate::config::{InitMethod, KMeansConfig};
use crate::dataset::Dataset;
use crate::error::{ClusteringError, Result};
use crate::kmeans::init;
use crate::model::ClusterModel;

pub struct KMeansResult {
    pub model: ClusterModel,

    // Index of the assigned centroid for every data point, in dataset order.
    pub assignments: Vec<usize>,

    pub iterations: usize,
    pub converged: bool,

    // Sum of squared distances from each point to its assigned centroid.
    pub inertia: f64,
}

/// Lloyd's k-means over a `Dataset`.
pub struct KMeansBuilder {
    config: KMeansConfig,
}

impl KMeansBuilder {
    pub fn new(config: KMeansConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &KMeansConfig {
        &self.config
    }

    pub fn train(&self, dataset: &Dataset) -> Result<ClusterModel> {
        Ok(self.fit(dataset)?.model)
    }

    pub fn fit(&self, dataset: &Dataset) -> Result<KMeansResult> {
        self.config.validate()?;
        let num_distinct = dataset.num_distinct();
        if self.config.num_clusters > num_distinct {
            return Err(ClusteringError::InvalidArgument(format!(
                "num_clusters {} exceeds the number of distinct points {}",
                self.config.num_clusters, num_distinct
            )));
        }

        let data_points = dataset
            .iter()
            .map(|vector| vector.as_slice())
            .collect::<Vec<&[f32]>>();
        let dimension = dataset.dimension();
        let num_clusters = self.config.num_clusters;
        let mut rng = StdRng::seed_from_u64(self.config.seed);
        let centroids = match self.config.init_method {
            InitMethod::KMeansPlusPlus => {
                init::kmeans_plus_plus(&data_points, num_clusters, dimension, &mut rng)?
            }
            InitMethod::RandomSample => {
                init::random_sample(&data_points, num_clusters, dimension, &mut rng)?
            }
        };
        debug!("Initialization completed.");

        self.run_lloyd(&data_points, centroids, dimension)
    }

    /// Lloyd iterations from the given flattened initial centroids.
    fn run_lloyd(
        &self,
        data_points: &[&[f32]],
        mut centroids: Vec<f32>,
        dimension: usize,
    ) -> Result<KMeansResult> {
        let num_clusters = centroids.len() / dimension;
        let mut cluster_labels = assign(data_points, &centroids, dimension);
        let mut iterations = 0;
        let mut converged = false;

        while iterations < self.config.max_iterations {
            iterations += 1;

            let new_centroids =
                update_centroids(data_points, &cluster_labels, num_clusters, dimension);
            let max_shift = max_centroid_shift(&centroids, &new_centroids, dimension);
            centroids = new_centroids;

            let new_labels = assign(data_points, &centroids, dimension);
            let num_changed = new_labels
                .iter()
                .zip(cluster_labels.iter())
                .filter(|(a, b)| a != b)
                .count();
            cluster_labels = new_labels;

            debug!(
                "Iteration {} - reassigned {} points | max centroid shift {:.6}",
                iterations, num_changed, max_shift
            );

            if num_changed == 0 || max_shift < self.config.tolerance as f64 {
                converged = true;
                break;
            }
        }

        if !converged {
            warn!(
                "K-means stopped at the iteration cap ({}) before converging",
                self.config.max_iterations
            );
        }

        let inertia = data_points
            .iter()
            .zip(cluster_labels.iter())
            .map(|(point, &label)| {
                L2DistanceCalculator::calculate_squared_f64(
                    point,
                    &centroids[label * dimension..(label + 1) * dimension],
                )
            })
            .sum::<f64>();
        info!(
            "Trained {} clusters on {} points in {} iterations (inertia {:.4})",
            num_clusters,
            data_points.len(),
            iterations,
            inertia
        );

        Ok(KMeansResult {
            model: ClusterModel::from_flattened(dimension, centroids)?,
            assignments: cluster_labels,
            iterations,
            converged,
            inertia,
        })
    }
}

/// Index and squared distance of the closest centroid. Ties go to the lowest index.
fn nearest_centroid(point: &[f32], centroids: &[f32], dimension: usize) -> (usize, f64) {
    let mut min_distance = f64::INFINITY;
    let mut label = 0;
    for (centroid_id, centroid) in centroids.chunks_exact(dimension).enumerate() {
        let distance = L2DistanceCalculator::calculate_squared_f64(point, centroid);
        if distance < min_distance {
            min_distance = distance;
            label = centroid_id;
        }
    }
    (label, min_distance)
}

// Centroids are only read here, so points are assigned in parallel.
fn assign(data_points: &[&[f32]], centroids: &[f32], dimension: usize) -> Vec<usize> {
    data_points
        .par_iter()
        .map(|point| nearest_centroid(point, centroids, dimension).0)
        .collect()
}

/// Recompute each centroid as the mean of its points. A cluster left with no points is moved to
/// the data point farthest from its nearest live centroid.
pub(crate) fn update_centroids(
    data_points: &[&[f32]],
    cluster_labels: &[usize],
    num_clusters: usize,
    dimension: usize,
) -> Vec<f32> {
    let mut cluster_sizes = vec![0usize; num_clusters];
    // Summed in f64: a mean of finite f32 values is finite, their f32 sum may not be.
    let mut sums = vec![0.0f64; num_clusters * dimension];
    for (point, &label) in data_points.iter().zip(cluster_labels.iter()) {
        cluster_sizes[label] += 1;
        let sum = &mut sums[label * dimension..(label + 1) * dimension];
        for (s, &x) in sum.iter_mut().zip(point.iter()) {
            *s += x as f64;
        }
    }
    let mut centroids = vec![0.0f32; num_clusters * dimension];
    for ((centroid, sum), &size) in centroids
        .chunks_exact_mut(dimension)
        .zip(sums.chunks_exact(dimension))
        .zip(cluster_sizes.iter())
    {
        if size > 0 {
            for (c, &s) in centroid.iter_mut().zip(sum.iter()) {
                *c = (s / size as f64) as f32;
            }
        }
    }

    let mut live = cluster_sizes.iter().map(|&s| s > 0).collect::<Vec<bool>>();
    for cluster_id in 0..num_clusters {
        if live[cluster_id] {
            continue;
        }
        let farthest = farthest_point(data_points, &centroids, &live, dimension);
        warn!(
            "Cluster {} is empty, re-seeding it with data point {}",
            cluster_id, farthest
        );
        centroids[cluster_id * dimension..(cluster_id + 1) * dimension]
            .copy_from_slice(data_points[farthest]);
        live[cluster_id] = true;
    }
    centroids
}

/// Index of the point whose nearest live centroid is farthest away. Ties go to the lowest index.
fn farthest_point(
    data_points: &[&[f32]],
    centroids: &[f32],
    live: &[bool],
    dimension: usize,
) -> usize {
    let mut farthest = 0;
    let mut max_distance = f64::NEG_INFINITY;
    for (idx, point) in data_points.iter().enumerate() {
        let nearest = centroids
            .chunks_exact(dimension)
            .zip(live.iter())
            .filter(|(_, is_live)| **is_live)
            .map(|(centroid, _)| L2DistanceCalculator::calculate_squared_f64(point, centroid))
            .fold(f64::INFINITY, f64::min);
        if nearest > max_distance {
            max_distance = nearest;
            farthest = idx;
        }
    }
    farthest
}

fn max_centroid_shift(old_centroids: &[f32], new_centroids: &[f32], dimension: usize) -> f64 {
    old_centroids
        .chunks_exact(dimension)
        .zip(new_centroids.chunks_exact(dimension))
        .map(|(old, new)| L2DistanceCalculator::calculate_squared_f64(old, new).sqrt())
        .fold(0.0, f64::max)
}
