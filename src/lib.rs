pub mod sdk;

pub use sdk::config::GeocoderConfig;
pub use sdk::export::OutputFormat;
pub use sdk::geocoding::{AddressCache, AddressRecord, NominatimGeocoder, ReverseGeocoder};
pub use sdk::pipeline::{run, RunOptions, RunSummary};
pub use sdk::route::{decode_route, Coordinate, Route};
