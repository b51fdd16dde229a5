//! k-means clustering of fixed-width numeric records.
//!
//! Records are loaded from delimited text by [`DatasetLoader`], clustered by [`KMeansBuilder`]
//! (k-means++ seeding followed by Lloyd iterations) into a [`ClusterModel`], persisted with
//! [`ModelWriter`] / [`ModelReader`], and queried with [`ClusterModel::predict`].

pub mod config;
pub mod dataset;
pub mod error;
pub mod feature_vector;
pub mod input;
pub mod kmeans;
pub mod model;
pub mod store;

use std::path::Path;

pub use crate::config::{InitMethod, KMeansConfig, LoaderConfig};
pub use crate::dataset::Dataset;
pub use crate::error::{ClusteringError, Result};
pub use crate::feature_vector::{FeatureVector, IrisFeatures};
pub use crate::input::DatasetLoader;
pub use crate::kmeans::{KMeansBuilder, KMeansResult};
pub use crate::model::{ClusterModel, ClusterPrediction};
pub use crate::store::{ModelReader, ModelWriter};

/// Train `k` clusters with k-means++ seeding from `seed` and default convergence settings.
pub fn train(dataset: &Dataset, k: usize, seed: u64) -> Result<ClusterModel> {
    let config = KMeansConfig {
        num_clusters: k,
        seed,
        ..KMeansConfig::default()
    };
    KMeansBuilder::new(config).train(dataset)
}

pub fn save<P: AsRef<Path>>(model: &ClusterModel, path: P) -> Result<()> {
    ModelWriter::new(path.as_ref()).write(model)?;
    Ok(())
}

pub fn load<P: AsRef<Path>>(path: P) -> Result<ClusterModel> {
    ModelReader::new(path.as_ref()).read()
}

pub fn predict(model: &ClusterModel, vector: &FeatureVector) -> Result<ClusterPrediction> {
    model.predict(vector)
}
