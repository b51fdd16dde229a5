pub mod reader;
pub mod writer;

pub use reader::ModelReader;
pub use writer::ModelWriter;

/// First bytes of every model file.
pub const MAGIC: [u8; 4] = *b"KMCM";

#[derive(PartialEq, Debug, Clone, Copy)]
pub enum Version {
    V0,
}

/// Model file layout, all integers and floats little-endian:
///
/// | magic (4) | version (u8) | dimension (u32) | num_clusters (u32) | centroids (f32 x K x D) |
///
/// Centroids are stored centroid-major.
#[derive(Debug, PartialEq)]
pub struct Header {
    pub version: Version,
    pub dimension: u32,
    pub num_clusters: u32,
}

impl Header {
    pub const SIZE: usize = MAGIC.len() + 1 + 4 + 4;

    /// Length in bytes of the centroid section described by this header.
    pub fn centroids_len(&self) -> Option<usize> {
        (self.dimension as usize)
            .checked_mul(self.num_clusters as usize)?
            .checked_mul(std::mem::size_of::<f32>())
    }
}
