pub mod builder;
mod init;

pub use builder::{KMeansBuilder, KMeansResult};
