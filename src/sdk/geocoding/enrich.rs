use super::cache::{AddressCache, AddressRecord};
use super::error::CacheError;
use super::service::{RawAddress, ReverseGeocoder};
use crate::sdk::route::{Coordinate, Route};
use std::ops::AddAssign;

/// Placeholder for an address component the geocoder did not supply.
pub const NOT_PRESENT: &str = "Not Present";

/// One spreadsheet row: the rounded coordinate and its address, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedRow {
    pub coordinate: Coordinate,
    pub address: Option<AddressRecord>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EnrichStats {
    pub cache_hits: usize,
    pub geocoded: usize,
    pub stored: usize,
    pub incomplete: usize,
    pub not_found: usize,
    pub failed: usize,
}

impl AddAssign for EnrichStats {
    fn add_assign(&mut self, other: Self) {
        self.cache_hits += other.cache_hits;
        self.geocoded += other.geocoded;
        self.stored += other.stored;
        self.incomplete += other.incomplete;
        self.not_found += other.not_found;
        self.failed += other.failed;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Enrichment {
    pub rows: Vec<EnrichedRow>,
    pub stats: EnrichStats,
}

/// A normalized address and whether it is complete enough to cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    pub record: AddressRecord,
    pub complete: bool,
}

/// Applies the field fallbacks: road, then hamlet; city, then town.
///
/// Only a missing road or city makes the record incomplete.
pub fn normalize(raw: RawAddress) -> Normalized {
    let road = raw.road.or(raw.hamlet);
    let city = raw.city.or(raw.town);
    let complete = road.is_some() && city.is_some();

    let or_sentinel = |field: Option<String>| field.unwrap_or_else(|| NOT_PRESENT.to_string());
    Normalized {
        record: AddressRecord {
            road: or_sentinel(road),
            city: or_sentinel(city),
            postcode: or_sentinel(raw.postcode),
            country: or_sentinel(raw.country),
        },
        complete,
    }
}

/// Resolves an address for every point of the route, in order.
///
/// Cache hits never reach the geocoder. Geocoder failures leave the row's
/// address blank and do not stop the pass; cache failures do.
pub fn enrich_route<G>(
    route: &Route,
    cache: &AddressCache,
    geocoder: &G,
) -> Result<Enrichment, CacheError>
where
    G: ReverseGeocoder + ?Sized,
{
    let mut stats = EnrichStats::default();
    let mut rows = Vec::with_capacity(route.len());

    for &point in route.points() {
        let address = match cache.lookup(point)? {
            Some(record) => {
                log::debug!("[CACHE HIT] {}", point.rounded());
                stats.cache_hits += 1;
                Some(record)
            }
            None => resolve(point, cache, geocoder, &mut stats)?,
        };
        rows.push(EnrichedRow {
            coordinate: point.rounded(),
            address,
        });
    }

    Ok(Enrichment { rows, stats })
}

fn resolve<G>(
    point: Coordinate,
    cache: &AddressCache,
    geocoder: &G,
    stats: &mut EnrichStats,
) -> Result<Option<AddressRecord>, CacheError>
where
    G: ReverseGeocoder + ?Sized,
{
    log::info!("Location {} not found in cache, querying geocoder", point.rounded());

    match geocoder.reverse_geocode(point) {
        Ok(Some(raw)) => {
            stats.geocoded += 1;
            let Normalized { record, complete } = normalize(raw);
            if complete {
                if cache.store(point, &record)? {
                    stats.stored += 1;
                }
            } else {
                // incomplete answers are fetched again next time
                log::debug!("Not caching incomplete address for {}: {:?}", point, record);
                stats.incomplete += 1;
            }
            Ok(Some(record))
        }
        Ok(None) => {
            log::warn!("Location not found for {}", point);
            stats.not_found += 1;
            Ok(None)
        }
        Err(err) => {
            log::error!("Reverse geocoding failed for {}: {}", point, err);
            stats.failed += 1;
            Ok(None)
        }
    }
}
