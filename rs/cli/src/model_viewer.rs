use anyhow::{Context, Result};
use clap::Parser;
use clustering::ModelReader;
use log::LevelFilter;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    // Model path
    #[arg(short, long)]
    model_path: String,
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .format_timestamp_millis()
        .init();

    let arg = Args::parse();
    println!("Model path: {}", arg.model_path);

    let model = ModelReader::new(&arg.model_path)
        .read()
        .with_context(|| format!("Failed to read model from {}", arg.model_path))?;

    println!("Dimension: {}", model.dimension());
    println!("Clusters: {}", model.num_clusters());
    for (cluster_id, centroid) in model.centroids().iter().enumerate() {
        println!("======= Cluster: {} =======", cluster_id);
        println!("{:?}", centroid.as_slice());
    }
    Ok(())
}
