use polyline_gps::sdk::geocoding::{AddressCache, GeocodeError, RawAddress, ReverseGeocoder};
use polyline_gps::sdk::route::{encode_route, Coordinate, Route};
use polyline_gps::sdk::util::rate_limit;
use polyline_gps::{run, OutputFormat, RunOptions};
use std::cell::Cell;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

// (38.5, -120.2), (40.7, -120.95), (43.252, -126.453)
const SAMPLE: &str = "_p~iF~ps|U_ulLnnqC_mqNvxq`@";

struct StubGeocoder {
    calls: Cell<usize>,
}

impl StubGeocoder {
    fn new() -> Self {
        Self { calls: Cell::new(0) }
    }
}

impl ReverseGeocoder for StubGeocoder {
    fn reverse_geocode(&self, _: Coordinate) -> Result<Option<RawAddress>, GeocodeError> {
        self.calls.set(self.calls.get() + 1);
        Ok(Some(RawAddress {
            road: Some("Main Street".to_string()),
            city: Some("Springfield".to_string()),
            postcode: Some("12345".to_string()),
            country: Some("Nowhere".to_string()),
            ..RawAddress::default()
        }))
    }
}

fn write_input(dir: &Path, lines: &[&str]) -> PathBuf {
    let path = dir.join("polylines.txt");
    fs::write(&path, lines.join("\n")).unwrap();
    path
}

fn files_with_extension(dir: &Path, extension: &str) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .filter(|path| path.extension().is_some_and(|e| e == extension))
        .collect();
    files.sort();
    files
}

fn options(input: PathBuf, format: OutputFormat, output_dir: &Path) -> RunOptions {
    RunOptions {
        input,
        format,
        output_dir: output_dir.to_path_buf(),
    }
}

#[test]
fn kml_run_writes_one_overlay_per_line() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let out = dir.path().join("out");
    let input = write_input(dir.path(), &[SAMPLE]);
    let cache = AddressCache::open_in_memory()?;
    let geocoder = StubGeocoder::new();

    let summary = run(
        &options(input, OutputFormat::Kml, &out),
        &cache,
        &geocoder,
        &rate_limit::line_limiter(),
    )?;

    assert_eq!(summary.lines, 1);
    assert_eq!(summary.points, 3);

    let kml_files = files_with_extension(&out, "kml");
    assert_eq!(kml_files, vec![out.join("Garmin_Polyline_Map0.kml")]);
    assert_eq!(files_with_extension(&out, "xlsx"), vec![out.join("coordinates0.xlsx")]);
    assert!(files_with_extension(&out, "html").is_empty());

    let kml = fs::read_to_string(&kml_files[0])?;
    let coordinate_lines: Vec<&str> = kml.lines().filter(|l| l.ends_with(",0 ")).collect();
    assert_eq!(
        coordinate_lines,
        ["-120.2,38.5,0 ", "-120.95,40.7,0 ", "-126.453,43.252,0 "]
    );
    Ok(())
}

#[test]
fn html_run_marks_start_and_end_of_a_stationary_track() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    // the two middle points sit within the thinning tolerance of the first
    let route: Route = [
        (38.7223, -9.1393),
        (38.72231, -9.13931),
        (38.72233, -9.13932),
        (38.73, -9.15),
    ]
    .into_iter()
    .map(|(lat, lon)| Coordinate::new(lat, lon))
    .collect();
    let encoded = encode_route(&route)?;
    let input = write_input(dir.path(), &[encoded.as_str()]);
    let cache = AddressCache::open_in_memory()?;

    run(
        &options(input, OutputFormat::Html, dir.path()),
        &cache,
        &StubGeocoder::new(),
        &rate_limit::line_limiter(),
    )?;

    let html_files = files_with_extension(dir.path(), "html");
    assert_eq!(html_files.len(), 1);
    assert!(files_with_extension(dir.path(), "kml").is_empty());

    let html = fs::read_to_string(&html_files[0])?;
    assert_eq!(html.matches("L.polyline(").count(), 1);
    assert_eq!(html.matches("L.marker(").count(), 2);
    assert!(html.contains("Start Location"));
    assert!(html.contains("End Location"));
    Ok(())
}

#[test]
fn second_run_is_served_from_the_cache() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let input = write_input(dir.path(), &[SAMPLE]);
    let cache = AddressCache::open(dir.path().join("coordinates.db"))?;
    let throttle = rate_limit::line_limiter();

    let first = StubGeocoder::new();
    run(&options(input.clone(), OutputFormat::Kml, dir.path()), &cache, &first, &throttle)?;
    assert_eq!(first.calls.get(), 3);
    assert_eq!(cache.len()?, 3);

    let second = StubGeocoder::new();
    let summary = run(&options(input, OutputFormat::Kml, dir.path()), &cache, &second, &throttle)?;
    assert_eq!(second.calls.get(), 0);
    assert_eq!(summary.stats.cache_hits, 3);
    assert_eq!(cache.len()?, 3);
    Ok(())
}

#[test]
fn blank_lines_are_skipped_and_indexes_stay_dense() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let input = write_input(dir.path(), &["", SAMPLE, "   ", SAMPLE]);
    let cache = AddressCache::open_in_memory()?;

    let started = Instant::now();
    let summary = run(
        &options(input, OutputFormat::Kml, dir.path()),
        &cache,
        &StubGeocoder::new(),
        &rate_limit::line_limiter(),
    )?;

    // the second line waits for the one-per-second throttle
    assert!(started.elapsed() >= Duration::from_millis(900));
    assert_eq!(summary.lines, 2);
    assert_eq!(
        files_with_extension(dir.path(), "kml"),
        vec![
            dir.path().join("Garmin_Polyline_Map0.kml"),
            dir.path().join("Garmin_Polyline_Map1.kml"),
        ]
    );
    Ok(())
}

#[test]
fn malformed_line_aborts_the_run() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let input = write_input(dir.path(), &[SAMPLE, "not a polyline!"]);
    let cache = AddressCache::open_in_memory()?;

    let err = run(
        &options(input, OutputFormat::Kml, dir.path()),
        &cache,
        &StubGeocoder::new(),
        &rate_limit::line_limiter(),
    )
    .unwrap_err();

    assert!(format!("{err:#}").contains("Error decoding polyline"));
    // the first line was already exported
    assert_eq!(files_with_extension(dir.path(), "kml").len(), 1);
    Ok(())
}

#[test]
fn out_of_range_point_aborts_the_run() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    // latitude 95.0
    let input = write_input(dir.path(), &["_uybQ?"]);
    let cache = AddressCache::open_in_memory()?;
    let geocoder = StubGeocoder::new();

    let err = run(
        &options(input, OutputFormat::Kml, dir.path()),
        &cache,
        &geocoder,
        &rate_limit::line_limiter(),
    )
    .unwrap_err();

    assert!(format!("{err:#}").contains("latitude 95 out of range"));
    assert_eq!(geocoder.calls.get(), 0);
    assert!(files_with_extension(dir.path(), "xlsx").is_empty());
    Ok(())
}

#[test]
fn missing_input_file_is_an_error() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let cache = AddressCache::open_in_memory()?;

    let err = run(
        &options(dir.path().join("absent.txt"), OutputFormat::Html, dir.path()),
        &cache,
        &StubGeocoder::new(),
        &rate_limit::line_limiter(),
    )
    .unwrap_err();

    assert!(err.to_string().contains("Failed to read input file"));
    assert!(files_with_extension(dir.path(), "html").is_empty());
    Ok(())
}
