use std::fs::File;
use std::io::{BufReader, Cursor, Read};
use std::path::PathBuf;

use byteorder::{LittleEndian, ReadBytesExt};
use log::debug;

use crate::error::{ClusteringError, Result};
use crate::feature_vector::FeatureVector;
use crate::model::ClusterModel;
use crate::store::{Header, Version, MAGIC};

pub struct ModelReader {
    path: PathBuf,
}

fn truncated(section: &str) -> ClusteringError {
    ClusteringError::CorruptModel(format!("truncated {}", section))
}

impl ModelReader {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn read(&self) -> Result<ClusterModel> {
        let file = File::open(&self.path)?;
        let model = Self::read_from(BufReader::new(file))?;
        debug!(
            "Read model with {} clusters of dimension {} from {}",
            model.num_clusters(),
            model.dimension(),
            self.path.display()
        );
        Ok(model)
    }

    pub fn read_from<R: Read>(mut reader: R) -> Result<ClusterModel> {
        let mut buffer = vec![];
        reader.read_to_end(&mut buffer)?;
        Self::decode(&buffer)
    }

    /// Decode a complete model file. Anything other than exactly one well-formed model is
    /// rejected as corrupt.
    pub fn decode(buffer: &[u8]) -> Result<ClusterModel> {
        let mut cursor = Cursor::new(buffer);
        let header = Self::read_header(&mut cursor)?;

        let centroids_len = header.centroids_len().ok_or_else(|| {
            ClusteringError::CorruptModel(format!(
                "centroid section size overflows: {} clusters of dimension {}",
                header.num_clusters, header.dimension
            ))
        })?;
        let remaining = buffer.len() - cursor.position() as usize;
        if remaining < centroids_len {
            return Err(truncated("centroids"));
        }
        if remaining > centroids_len {
            return Err(ClusteringError::CorruptModel(format!(
                "{} unexpected trailing bytes",
                remaining - centroids_len
            )));
        }

        let dimension = header.dimension as usize;
        let mut centroids = Vec::with_capacity(header.num_clusters as usize);
        for cluster_id in 0..header.num_clusters {
            let mut values = vec![0.0f32; dimension];
            cursor
                .read_f32_into::<LittleEndian>(&mut values)
                .map_err(|_| truncated("centroids"))?;
            if values.iter().any(|v| !v.is_finite()) {
                return Err(ClusteringError::CorruptModel(format!(
                    "centroid {} has a non-finite component",
                    cluster_id
                )));
            }
            let centroid = FeatureVector::new(values)
                .map_err(|e| ClusteringError::CorruptModel(e.to_string()))?;
            centroids.push(centroid);
        }
        ClusterModel::new(centroids).map_err(|e| ClusteringError::CorruptModel(e.to_string()))
    }

    pub fn read_header(cursor: &mut Cursor<&[u8]>) -> Result<Header> {
        let mut magic = [0u8; 4];
        cursor
            .read_exact(&mut magic)
            .map_err(|_| truncated("header"))?;
        if magic != MAGIC {
            return Err(ClusteringError::CorruptModel(format!(
                "bad magic bytes {:?}",
                magic
            )));
        }

        let version = match cursor.read_u8().map_err(|_| truncated("header"))? {
            0 => Version::V0,
            unknown => {
                return Err(ClusteringError::CorruptModel(format!(
                    "Unknown version: {}",
                    unknown
                )))
            }
        };
        let dimension = cursor
            .read_u32::<LittleEndian>()
            .map_err(|_| truncated("header"))?;
        let num_clusters = cursor
            .read_u32::<LittleEndian>()
            .map_err(|_| truncated("header"))?;

        if dimension == 0 {
            return Err(ClusteringError::CorruptModel(
                "dimension is zero".to_string(),
            ));
        }
        if num_clusters == 0 {
            return Err(ClusteringError::CorruptModel(
                "model has no clusters".to_string(),
            ));
        }

        Ok(Header {
            version,
            dimension,
            num_clusters,
        })
    }
}
