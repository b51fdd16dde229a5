use anyhow::{Context, Result};
use clap::Parser;
use clustering::{
    DatasetLoader, FeatureVector, IrisFeatures, KMeansBuilder, KMeansConfig, LoaderConfig,
    ModelReader, ModelWriter,
};
use log::{info, LevelFilter};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Delimited text file with one flower per line
    #[arg(long, default_value = "rs/clustering/resources/iris.data")]
    data_path: String,

    #[arg(long, default_value = "iris_clustering_model.bin")]
    model_path: String,

    // Overrides the value from --config
    #[arg(long)]
    num_clusters: Option<usize>,

    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, default_value_t = ',')]
    separator: char,

    /// YAML file with k-means settings
    #[arg(long)]
    config: Option<String>,
}

const SETOSA: IrisFeatures = IrisFeatures {
    sepal_length: 5.1,
    sepal_width: 3.5,
    petal_length: 1.4,
    petal_width: 0.2,
};

fn kmeans_config(arg: &Args) -> Result<KMeansConfig> {
    let mut config = match &arg.config {
        Some(path) => KMeansConfig::from_yaml_file(path)
            .with_context(|| format!("Failed to read config file {}", path))?,
        None => KMeansConfig::default(),
    };
    if let Some(num_clusters) = arg.num_clusters {
        config.num_clusters = num_clusters;
    }
    if let Some(seed) = arg.seed {
        config.seed = seed;
    }
    Ok(config)
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .format_timestamp_millis()
        .init();

    let arg = Args::parse();
    let config = kmeans_config(&arg)?;

    let loader = DatasetLoader::new(LoaderConfig {
        separator: arg.separator,
        dimension: IrisFeatures::DIMENSION,
    });
    let dataset = loader
        .load(&arg.data_path)
        .with_context(|| format!("Failed to load dataset from {}", arg.data_path))?;
    info!("Loaded {} records from {}", dataset.len(), arg.data_path);

    let model = KMeansBuilder::new(config)
        .train(&dataset)
        .context("Failed to train model")?;

    ModelWriter::new(&arg.model_path)
        .write(&model)
        .with_context(|| format!("Failed to write model to {}", arg.model_path))?;
    let model = ModelReader::new(&arg.model_path)
        .read()
        .with_context(|| format!("Failed to read model from {}", arg.model_path))?;

    let sample = FeatureVector::try_from(SETOSA).context("Invalid sample")?;
    let prediction = model.predict(&sample).context("Failed to predict")?;

    println!("Cluster: {}", prediction.cluster_id);
    let distances: Vec<String> = prediction.distances.iter().map(|d| d.to_string()).collect();
    println!("Distances: {}", distances.join(" "));
    Ok(())
}
