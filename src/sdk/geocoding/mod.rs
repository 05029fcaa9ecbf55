pub mod cache;
pub mod enrich;
pub mod error;
pub mod provider;
pub mod service;

pub use cache::{AddressCache, AddressRecord, CacheEntry, CacheKey};
pub use enrich::{enrich_route, normalize, EnrichStats, EnrichedRow, Enrichment, NOT_PRESENT};
pub use error::{CacheError, GeocodeError};
pub use provider::NominatimGeocoder;
pub use service::{RawAddress, ReverseGeocoder};
