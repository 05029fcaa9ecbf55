//! Runs every encoded polyline of an input file through decode, enrichment
//! and export, one line at a time.

use crate::sdk::export::{self, build_kml, render_html, write_spreadsheet, OutputFormat};
use crate::sdk::geocoding::{enrich_route, AddressCache, EnrichStats, ReverseGeocoder};
use crate::sdk::route::{decode_route, markers, thin};
use crate::sdk::util::rate_limit::{self, Limiter};
use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};

pub const SPREADSHEET_STEM: &str = "coordinates";
pub const MAP_STEM: &str = "Garmin_Polyline_Map";

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub input: PathBuf,
    pub format: OutputFormat,
    pub output_dir: PathBuf,
}

/// Files produced for one polyline line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub spreadsheet: PathBuf,
    pub map: PathBuf,
}

impl OutputPaths {
    pub fn for_line(dir: &Path, index: usize, format: OutputFormat) -> Self {
        Self {
            spreadsheet: dir.join(format!("{SPREADSHEET_STEM}{index}.xlsx")),
            map: dir.join(format!("{MAP_STEM}{index}.{}", format.extension())),
        }
    }
}

#[derive(Debug, Default)]
pub struct RunSummary {
    pub lines: usize,
    pub points: usize,
    pub files: Vec<PathBuf>,
    pub stats: EnrichStats,
}

/// Processes the whole input file.
///
/// A line that fails to decode aborts the run; files already written for
/// earlier lines are left in place. Blank lines are skipped and do not use
/// up an output index. `throttle` gates the start of every line.
pub fn run<G>(
    options: &RunOptions,
    cache: &AddressCache,
    geocoder: &G,
    throttle: &Limiter,
) -> Result<RunSummary>
where
    G: ReverseGeocoder + ?Sized,
{
    log::info!("Reading file: {}", options.input.display());
    let text = fs::read_to_string(&options.input)
        .with_context(|| format!("Failed to read input file {}", options.input.display()))?;

    fs::create_dir_all(&options.output_dir).with_context(|| {
        format!(
            "Failed to create output directory {}",
            options.output_dir.display()
        )
    })?;

    let mut summary = RunSummary::default();
    for (line_number, line) in text.lines().enumerate() {
        let encoded = line.trim();
        if encoded.is_empty() {
            log::warn!("Skipping blank line {}", line_number + 1);
            continue;
        }

        rate_limit::wait(throttle);
        let paths = OutputPaths::for_line(&options.output_dir, summary.lines, options.format);
        let outcome = process_line(encoded, &paths, options.format, cache, geocoder)
            .with_context(|| format!("Failed to process line {}", line_number + 1))?;

        summary.lines += 1;
        summary.points += outcome.points;
        summary.stats += outcome.stats;
        summary.files.push(paths.spreadsheet);
        summary.files.push(paths.map);
    }

    log::info!(
        "Processed {} polyline(s), {} point(s): {} cache hit(s), {} geocoded, {} stored, {} incomplete, {} not found, {} failed",
        summary.lines,
        summary.points,
        summary.stats.cache_hits,
        summary.stats.geocoded,
        summary.stats.stored,
        summary.stats.incomplete,
        summary.stats.not_found,
        summary.stats.failed,
    );
    Ok(summary)
}

#[derive(Debug, Clone, Copy)]
pub struct LineOutcome {
    pub points: usize,
    pub stats: EnrichStats,
}

/// Decode, enrich, write the spreadsheet, then the map artifact.
pub fn process_line<G>(
    encoded: &str,
    paths: &OutputPaths,
    format: OutputFormat,
    cache: &AddressCache,
    geocoder: &G,
) -> Result<LineOutcome>
where
    G: ReverseGeocoder + ?Sized,
{
    log::info!("Decoding polyline: {}", encoded);
    let route = decode_route(encoded)?;
    log::info!("Decoded {} point(s)", route.len());

    let enrichment = enrich_route(&route, cache, geocoder)?;
    write_spreadsheet(&enrichment.rows, &paths.spreadsheet)?;
    log::info!("Created spreadsheet {}", paths.spreadsheet.display());

    let map = match format {
        OutputFormat::Html => {
            let kept = thin(route.points());
            log::debug!("Thinned {} point(s) to {} for the map", route.len(), kept.len());
            render_html(&route, &markers(&kept))?
        }
        OutputFormat::Kml => build_kml(&route),
    };
    export::write_text(&paths.map, &map)?;
    log::info!("✅ Generated {} file {}", format, paths.map.display());

    Ok(LineOutcome {
        points: route.len(),
        stats: enrichment.stats,
    })
}
