use super::error::GeocodeError;
use crate::sdk::route::Coordinate;
use serde::Deserialize;

/// Address components returned by a reverse lookup, before normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawAddress {
    pub road: Option<String>,
    pub hamlet: Option<String>,
    pub city: Option<String>,
    pub town: Option<String>,
    pub postcode: Option<String>,
    pub country: Option<String>,
}

pub trait ReverseGeocoder {
    /// Resolves a coordinate to its address components.
    ///
    /// `Ok(None)` means the service answered but has no location for the point.
    fn reverse_geocode(&self, coordinate: Coordinate) -> Result<Option<RawAddress>, GeocodeError>;
}
