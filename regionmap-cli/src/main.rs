//! regionmap CLI - render a city's region map to an image file.
//!
//! Loads a region database (JSON object mapping `"<City>#<Index>"` names to
//! records with a `region_coords` pair), selects one city's regions by name
//! prefix and writes the rendered map next to the current directory.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use regionmap::{search_by_city, GeneratorConfig, RegionMapGenerator, RegionSet};

#[derive(Parser)]
#[command(name = "regionmap", version, about = "Render a city's region map from OpenStreetMap tiles")]
struct Cli {
    /// Path to the region database JSON file.
    #[arg(short, long)]
    database: PathBuf,

    /// City to render; matches region names of the form "<City>#<n>".
    city: String,

    /// Region name to highlight, e.g. "Akita#7".
    #[arg(long)]
    highlight: Option<String>,

    /// Output file. Defaults to "<city>-regions.png" or ".jpg" depending on
    /// the chosen render mode.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Per-tile request timeout in seconds.
    #[arg(long, default_value_t = 10)]
    timeout: u64,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let file = File::open(&cli.database)?;
    let database: RegionSet = serde_json::from_reader(BufReader::new(file))?;

    let regions = search_by_city(&database, &cli.city);
    if regions.is_empty() {
        return Err(format!("no regions found for city {:?}", cli.city).into());
    }
    info!(city = %cli.city, regions = regions.len(), "rendering region map");

    let config =
        GeneratorConfig::default().with_request_timeout(Duration::from_secs(cli.timeout));
    let generator = RegionMapGenerator::new(config)?;
    let bytes = generator.generate_map_blocking(&cli.city, &regions, cli.highlight.as_deref())?;

    let path = cli
        .output
        .unwrap_or_else(|| default_output(&cli.city, &bytes));
    std::fs::write(&path, &bytes)?;
    info!(path = %path.display(), bytes = bytes.len(), "map written");

    Ok(())
}

/// Pick a file name matching the encoding actually produced.
fn default_output(city: &str, bytes: &[u8]) -> PathBuf {
    let extension = if bytes.starts_with(&[0x89, b'P', b'N', b'G']) {
        "png"
    } else {
        "jpg"
    };
    PathBuf::from(format!("{city}-regions.{extension}"))
}
