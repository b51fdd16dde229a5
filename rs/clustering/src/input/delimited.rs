use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::debug;

use crate::config::LoaderConfig;
use crate::dataset::Dataset;
use crate::error::{ClusteringError, Result};
use crate::feature_vector::FeatureVector;

/// Reads one feature vector per line from separator-delimited text.
///
/// The first `dimension` fields of each line are parsed positionally; trailing fields (such as
/// the species label in `iris.data`) are ignored. Blank lines are skipped.
pub struct DatasetLoader {
    config: LoaderConfig,
}

impl DatasetLoader {
    pub fn new(config: LoaderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<Dataset> {
        let file = File::open(path.as_ref())?;
        debug!("Loading dataset from {}", path.as_ref().display());
        self.load_from_reader(BufReader::new(file))
    }

    pub fn load_from_reader<R: BufRead>(&self, mut reader: R) -> Result<Dataset> {
        self.config.validate()?;

        let mut vectors = vec![];
        let mut num_blank_lines = 0;
        let mut line_number = 0;
        let mut buffer = vec![];
        loop {
            buffer.clear();
            if reader.read_until(b'\n', &mut buffer)? == 0 {
                break;
            }
            line_number += 1;

            // Undecodable bytes are a bad record, not a failed read.
            let line = std::str::from_utf8(&buffer).map_err(|e| ClusteringError::Format {
                line: line_number,
                reason: format!("record is not valid UTF-8: {}", e),
            })?;
            let line = line.trim_end_matches(['\n', '\r']);
            if line.trim().is_empty() {
                num_blank_lines += 1;
                continue;
            }
            vectors.push(self.parse_line(line, line_number)?);
        }

        if num_blank_lines > 0 {
            debug!("Skipped {} blank lines", num_blank_lines);
        }
        if vectors.is_empty() {
            return Err(ClusteringError::InvalidArgument(
                "dataset is empty: input has no records".to_string(),
            ));
        }
        debug!(
            "Loaded {} records of dimension {}",
            vectors.len(),
            self.config.dimension
        );
        Dataset::new(vectors)
    }

    fn parse_line(&self, line: &str, line_number: usize) -> Result<FeatureVector> {
        let dimension = self.config.dimension;
        let mut fields = line.split(self.config.separator);
        let mut values = Vec::with_capacity(dimension);
        for column in 0..dimension {
            let field = match fields.next() {
                Some(field) => field.trim(),
                None => {
                    return Err(ClusteringError::Format {
                        line: line_number,
                        reason: format!(
                            "expected at least {} fields, found {}",
                            dimension, column
                        ),
                    })
                }
            };
            let value = field
                .parse::<f32>()
                .map_err(|e| ClusteringError::Format {
                    line: line_number,
                    reason: format!("field {} ({:?}) is not a number: {}", column, field, e),
                })?;
            if !value.is_finite() {
                return Err(ClusteringError::Format {
                    line: line_number,
                    reason: format!("field {} ({:?}) is not finite", column, field),
                });
            }
            values.push(value);
        }
        FeatureVector::new(values)
    }
}

impl Default for DatasetLoader {
    fn default() -> Self {
        Self::new(LoaderConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn load_str(loader: &DatasetLoader, text: &str) -> Result<Dataset> {
        loader.load_from_reader(Cursor::new(text.as_bytes()))
    }

    #[test]
    fn test_load_iris_records() {
        let text = "5.1,3.5,1.4,0.2,Iris-setosa\n\
                    7.0,3.2,4.7,1.4,Iris-versicolor\n\
                    \n\
                    6.3,3.3,6.0,2.5,Iris-virginica\n\
                    \n";
        let dataset = load_str(&DatasetLoader::default(), text).unwrap();
        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.dimension(), 4);
        assert_eq!(dataset.get(0).unwrap().as_slice(), &[5.1, 3.5, 1.4, 0.2]);
        assert_eq!(dataset.get(2).unwrap().as_slice(), &[6.3, 3.3, 6.0, 2.5]);
    }

    #[test]
    fn test_custom_separator_and_dimension() {
        let loader = DatasetLoader::new(LoaderConfig {
            separator: ';',
            dimension: 2,
        });
        let dataset = load_str(&loader, " 1 ; 2 \r\n3;4\r\n").unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.get(0).unwrap().as_slice(), &[1.0, 2.0]);
        assert_eq!(dataset.get(1).unwrap().as_slice(), &[3.0, 4.0]);
    }

    #[test]
    fn test_non_numeric_field() {
        let text = "5.1,3.5,1.4,0.2\n4.9,abc,1.4,0.2\n";
        match load_str(&DatasetLoader::default(), text) {
            Err(ClusteringError::Format { line, reason }) => {
                assert_eq!(line, 2);
                assert!(reason.contains("abc"));
            }
            other => panic!("expected format error, got {:?}", other),
        }
    }

    #[test]
    fn test_too_few_fields() {
        let text = "\n5.1,3.5,1.4\n";
        match load_str(&DatasetLoader::default(), text) {
            Err(ClusteringError::Format { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected format error, got {:?}", other),
        }
    }

    #[test]
    fn test_non_finite_field() {
        let text = "5.1,NaN,1.4,0.2\n";
        assert!(matches!(
            load_str(&DatasetLoader::default(), text),
            Err(ClusteringError::Format { line: 1, .. })
        ));
        let text = "5.1,inf,1.4,0.2\n";
        assert!(load_str(&DatasetLoader::default(), text).is_err());
    }

    #[test]
    fn test_invalid_utf8_record() {
        let bytes: &[u8] = b"5.1,3.5,1.4,0.2\n5.\xff,3.5,1.4,0.2\n";
        match DatasetLoader::default().load_from_reader(Cursor::new(bytes)) {
            Err(ClusteringError::Format { line, reason }) => {
                assert_eq!(line, 2);
                assert!(reason.contains("UTF-8"));
            }
            other => panic!("expected format error, got {:?}", other),
        }
    }

    #[test]
    fn test_last_line_without_newline() {
        let dataset = load_str(&DatasetLoader::default(), "1,2,3,4\n5,6,7,8").unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.get(1).unwrap().as_slice(), &[5.0, 6.0, 7.0, 8.0]);
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(
            load_str(&DatasetLoader::default(), "\n  \n\n"),
            Err(ClusteringError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let temp_dir = tempdir::TempDir::new("dataset_loader_test")
            .expect("Failed to create temporary directory");
        let result = DatasetLoader::default().load(temp_dir.path().join("missing.data"));
        assert!(matches!(result, Err(ClusteringError::Io(_))));
    }

    #[test]
    fn test_load_file() {
        let temp_dir = tempdir::TempDir::new("dataset_loader_test")
            .expect("Failed to create temporary directory");
        let path = temp_dir.path().join("points.data");
        std::fs::write(&path, "1,1,0,0\n1,2,0,0\n").unwrap();

        let dataset = DatasetLoader::default().load(&path).unwrap();
        assert_eq!(dataset.len(), 2);
    }
}
