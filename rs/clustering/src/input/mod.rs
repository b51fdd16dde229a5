pub mod delimited;

pub use delimited::DatasetLoader;
