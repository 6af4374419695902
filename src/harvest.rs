use crate::config::Config;
use anyhow::{anyhow, Context, Result};
use dph_core::{
    entities::Location,
    usecases::{self, FetchReport, FetchRequest, LocationFilter, MergeDefaults, MergeReport, Preview},
};
use dph_gateways::{
    json_file::{read_raw_capture, LocationFile, RawCaptureDir},
    overpass::OverpassApi,
};
use std::{fs, path::Path, thread};
use time::{OffsetDateTime, PrimitiveDateTime};

/// The current local time, or UTC if the local offset is unknown.
pub fn now() -> PrimitiveDateTime {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    PrimitiveDateTime::new(now.date(), now.time())
}

/// Names the capture of a query file after its file stem,
/// e.g. `berlin-cinemas` for `harvest/queries/berlin-cinemas.overpassql`.
pub fn query_name(query_file: &Path) -> Result<String> {
    query_file
        .file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .map(ToOwned::to_owned)
        .ok_or_else(|| anyhow!("Invalid query file name: {}", query_file.display()))
}

pub fn fetch(cfg: &Config, query_file: &Path, now: PrimitiveDateTime) -> Result<FetchReport> {
    let query = fs::read_to_string(query_file)
        .with_context(|| format!("Unable to read query file {}", query_file.display()))?;
    let query_name = query_name(query_file)?;
    let gateway = OverpassApi::new(&cfg.overpass.endpoint, &cfg.overpass.user_agent);
    let captures = RawCaptureDir::new(&cfg.storage.raw_dir, &cfg.storage.source);
    log::info!("Querying {} with {}", gateway.endpoint(), query_file.display());
    let request = FetchRequest {
        query_name: &query_name,
        query: &query,
        date: now.date(),
    };
    let report = usecases::fetch_raw_capture(&gateway, &captures, &cfg.retry, thread::sleep, &request)?;
    Ok(report)
}

pub fn preview(cfg: &Config, raw_capture: &Path) -> Result<Preview> {
    let elements = read_raw_capture(raw_capture)?;
    Ok(usecases::preview_locations(
        &elements,
        &cfg.transform,
        usecases::PREVIEW_SAMPLE_SIZE,
    ))
}

pub fn write_from_raw(
    cfg: &Config,
    raw_capture: &Path,
    defaults: &MergeDefaults,
    now: PrimitiveDateTime,
) -> Result<MergeReport> {
    let elements = read_raw_capture(raw_capture)?;
    let repo = LocationFile::new(&cfg.storage.locations_file);
    let report = usecases::merge_locations(&repo, &elements, defaults, &cfg.transform, now)?;
    Ok(report)
}

pub fn list(cfg: &Config, filter: &LocationFilter) -> Result<Vec<Location>> {
    let repo = LocationFile::new(&cfg.storage.locations_file);
    let locations = usecases::list_locations(&repo, filter)?;
    Ok(locations)
}

pub fn to_pretty_json(locations: &[Location]) -> Result<String> {
    let locations: Vec<dph_boundary::Location> = locations
        .iter()
        .cloned()
        .map(dph_boundary::Location::from)
        .collect();
    Ok(serde_json::to_string_pretty(&locations)?)
}
