use std::path::Path;

use serde::{Deserialize, Serialize};
use strum::EnumIter;

use crate::error::{ClusteringError, Result};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, EnumIter)]
pub enum InitMethod {
    /// First centroid uniformly at random, then each next one sampled proportionally to its
    /// squared distance from the closest centroid chosen so far.
    #[default]
    KMeansPlusPlus,

    /// K distinct data points picked uniformly at random.
    RandomSample,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KMeansConfig {
    pub num_clusters: usize,
    pub max_iterations: usize,

    // Training stops once no centroid moves more than this between two iterations.
    pub tolerance: f32,

    pub seed: u64,
    pub init_method: InitMethod,
}

impl Default for KMeansConfig {
    fn default() -> Self {
        Self {
            num_clusters: 3,
            max_iterations: 100,
            tolerance: 1e-4,
            seed: 0,
            init_method: InitMethod::KMeansPlusPlus,
        }
    }
}

impl KMeansConfig {
    pub fn validate(&self) -> Result<()> {
        if self.num_clusters < 1 {
            return Err(ClusteringError::InvalidArgument(
                "num_clusters must be at least 1".to_string(),
            ));
        }
        if self.max_iterations < 1 {
            return Err(ClusteringError::InvalidArgument(
                "max_iterations must be at least 1".to_string(),
            ));
        }
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(ClusteringError::InvalidArgument(format!(
                "tolerance must be a finite non-negative number, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: KMeansConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let buffer = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&buffer)
    }

    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    pub separator: char,

    // Number of leading fields parsed per record. Fields past this are ignored.
    pub dimension: usize,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            separator: ',',
            dimension: 4,
        }
    }
}

impl LoaderConfig {
    pub fn validate(&self) -> Result<()> {
        if self.dimension < 1 {
            return Err(ClusteringError::InvalidArgument(
                "dimension must be at least 1".to_string(),
            ));
        }
        if self.separator.is_ascii_digit() || matches!(self.separator, '.' | '-' | '+') {
            return Err(ClusteringError::InvalidArgument(format!(
                "separator {:?} would split numbers apart",
                self.separator
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = KMeansConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.num_clusters, 3);
        assert_eq!(config.max_iterations, 100);
        assert_eq!(config.init_method, InitMethod::KMeansPlusPlus);
        assert!(LoaderConfig::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_configs() {
        let mut config = KMeansConfig::default();
        config.num_clusters = 0;
        assert!(matches!(
            config.validate(),
            Err(ClusteringError::InvalidArgument(_))
        ));

        let mut config = KMeansConfig::default();
        config.max_iterations = 0;
        assert!(config.validate().is_err());

        let mut config = KMeansConfig::default();
        config.tolerance = -1.0;
        assert!(config.validate().is_err());
        config.tolerance = f32::NAN;
        assert!(config.validate().is_err());

        let loader_config = LoaderConfig {
            separator: '.',
            dimension: 4,
        };
        assert!(loader_config.validate().is_err());
        let loader_config = LoaderConfig {
            separator: ',',
            dimension: 0,
        };
        assert!(loader_config.validate().is_err());
    }

    #[test]
    fn test_yaml_round_trip() {
        let config = KMeansConfig {
            num_clusters: 5,
            max_iterations: 20,
            tolerance: 0.5,
            seed: 42,
            init_method: InitMethod::RandomSample,
        };
        let yaml = config.to_yaml_string().unwrap();
        let parsed = KMeansConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_yaml_partial_uses_defaults() {
        let config = KMeansConfig::from_yaml_str("num_clusters: 7\nseed: 9\n").unwrap();
        assert_eq!(config.num_clusters, 7);
        assert_eq!(config.seed, 9);
        assert_eq!(config.max_iterations, 100);
        assert_eq!(config.init_method, InitMethod::KMeansPlusPlus);
    }

    #[test]
    fn test_yaml_errors() {
        assert!(matches!(
            KMeansConfig::from_yaml_str("num_clusters: three\n"),
            Err(ClusteringError::Config(_))
        ));
        assert!(matches!(
            KMeansConfig::from_yaml_str("num_clusters: 0\n"),
            Err(ClusteringError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_config_file() {
        let temp_dir = tempdir::TempDir::new("kmeans_config_test")
            .expect("Failed to create temporary directory");
        let path = temp_dir.path().join("kmeans.yaml");
        std::fs::write(&path, "num_clusters: 2\ninit_method: RandomSample\n").unwrap();

        let config = KMeansConfig::from_yaml_file(&path).unwrap();
        assert_eq!(config.num_clusters, 2);
        assert_eq!(config.init_method, InitMethod::RandomSample);

        let missing = temp_dir.path().join("missing.yaml");
        assert!(matches!(
            KMeansConfig::from_yaml_file(&missing),
            Err(ClusteringError::Io(_))
        ));
    }
}
