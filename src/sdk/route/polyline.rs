use super::{Coordinate, Route};
use ::polyline::errors::PolylineError as CodecError;
use geo_types::Coord;
use thiserror::Error;

/// Precision used by Google-style encoded polylines.
pub const PRECISION: u32 = 5;

/// Offset added to every 5-bit chunk before it is written as a character.
const CHUNK_OFFSET: u8 = 63;

/// Set on every chunk except the last one of a value.
const CONTINUATION_BIT: u8 = 0x20;

#[derive(Error, Debug)]
pub enum PolylineError {
    #[error("Error decoding polyline: {0}")]
    Decode(String),

    /// The polyline decodes, but a point lies outside ±90 latitude or
    /// ±180 longitude.
    #[error("Error decoding polyline: {axis} {value} out of range at position {position}")]
    OutOfRange {
        axis: &'static str,
        value: f64,
        position: usize,
    },

    #[error("Error encoding route: {0}")]
    Encode(String),
}

/// Decodes one encoded polyline into a route of `(lat, lon)` points.
///
/// Input whose last value is cut off mid-chunk is rejected rather than
/// decoded from its partial bits.
pub fn decode_route(encoded: &str) -> Result<Route, PolylineError> {
    if let Some(&last) = encoded.as_bytes().last() {
        if last >= CONTINUATION_BIT + CHUNK_OFFSET {
            return Err(PolylineError::Decode(format!(
                "truncated value at index {}",
                encoded.len() - 1
            )));
        }
    }

    let line = ::polyline::decode_polyline(encoded, PRECISION).map_err(|e| match e {
        CodecError::LatitudeCoordError { coord, idx } => PolylineError::OutOfRange {
            axis: "latitude",
            value: coord,
            position: idx,
        },
        CodecError::LongitudeCoordError { coord, idx } => PolylineError::OutOfRange {
            axis: "longitude",
            value: coord,
            position: idx,
        },
        other => PolylineError::Decode(other.to_string()),
    })?;

    // geo-types stores longitude as x and latitude as y
    Ok(line.into_iter().map(|c| Coordinate::new(c.y, c.x)).collect())
}

pub fn encode_route(route: &Route) -> Result<String, PolylineError> {
    let coords = route.points().iter().map(|p| Coord { x: p.lon, y: p.lat });
    ::polyline::encode_coordinates(coords, PRECISION).map_err(|e| PolylineError::Encode(e.to_string()))
}
