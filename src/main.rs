use anyhow::Context;
use clap::Parser;
use polyline_gps::{
    sdk::config::GeocoderConfig,
    sdk::export::OutputFormat,
    sdk::geocoding::{AddressCache, NominatimGeocoder},
    sdk::pipeline::{self, RunOptions},
    sdk::util::{log::init_logging, rate_limit},
};
use std::path::PathBuf;

/// Decode encoded polylines into geocoded spreadsheets and HTML or KML maps
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// File with one encoded polyline per line
    #[arg(short, long)]
    file: PathBuf,

    /// Type of map to generate for every polyline
    #[arg(short = 't', long = "type", value_enum)]
    map_type: OutputFormat,

    /// Directory where spreadsheets and maps are written
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// SQLite file holding previously geocoded addresses
    #[arg(long, env = "POLYLINE_CACHE_DB", default_value = "coordinates.db")]
    cache_db: PathBuf,
}

fn main() -> anyhow::Result<()> {
    // load .env first so a RUST_LOG set there reaches the logger
    dotenvy::dotenv().ok();
    init_logging();

    let cli = Cli::parse();

    // --- 1. Dependency initialization ---
    let config = GeocoderConfig::from_env()?;
    let geocoder = NominatimGeocoder::new(&config).context("Failed to build geocoding client")?;
    log::info!("Reverse geocoding through {}", config.base_url);

    log::info!("Opening address cache: {}", cli.cache_db.display());
    let cache = AddressCache::open(&cli.cache_db)?;

    // --- 2. Run the pipeline; the cache handle is dropped on every path out ---
    let options = RunOptions {
        input: cli.file,
        format: cli.map_type,
        output_dir: cli.output_dir,
    };
    let summary = pipeline::run(&options, &cache, &geocoder, &rate_limit::line_limiter())?;

    log::info!(
        "✅ Decoded all polylines: {} file(s) written to {}",
        summary.files.len(),
        options.output_dir.display()
    );
    Ok(())
}
