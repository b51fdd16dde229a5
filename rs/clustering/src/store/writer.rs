use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use log::debug;
use utils::io::wrap_write;

use crate::error::{ClusteringError, Result};
use crate::model::ClusterModel;
use crate::store::{Header, Version, MAGIC};

pub struct ModelWriter {
    path: PathBuf,
}

impl ModelWriter {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Write the model to the file, replacing it if it exists. Returns the number of bytes written.
    pub fn write(&self, model: &ClusterModel) -> Result<usize> {
        let file = File::create(&self.path)?;
        let mut writer = BufWriter::new(file);
        let written = Self::write_to(model, &mut writer)?;
        writer.flush()?;
        debug!(
            "Wrote model with {} clusters to {} ({} bytes)",
            model.num_clusters(),
            self.path.display(),
            written
        );
        Ok(written)
    }

    pub fn write_to<W: Write>(model: &ClusterModel, writer: &mut W) -> Result<usize> {
        let header = Header {
            version: Version::V0,
            dimension: header_field("dimension", model.dimension())?,
            num_clusters: header_field("num_clusters", model.num_clusters())?,
        };
        let mut written = Self::write_header(&header, writer)?;
        for centroid in model.centroids() {
            for value in centroid.as_slice() {
                written += wrap_write(writer, &value.to_le_bytes())?;
            }
        }
        Ok(written)
    }

    fn write_header<W: Write>(header: &Header, writer: &mut W) -> Result<usize> {
        let version_value: u8 = match header.version {
            Version::V0 => 0,
        };
        let mut written = 0;
        written += wrap_write(writer, &MAGIC)?;
        written += wrap_write(writer, &version_value.to_le_bytes())?;
        written += wrap_write(writer, &header.dimension.to_le_bytes())?;
        written += wrap_write(writer, &header.num_clusters.to_le_bytes())?;
        Ok(written)
    }
}

fn header_field(name: &str, value: usize) -> Result<u32> {
    u32::try_from(value).map_err(|_| {
        ClusteringError::InvalidArgument(format!(
            "{} {} does not fit the model header",
            name, value
        ))
    })
}
