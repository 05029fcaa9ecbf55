pub mod polyline;
pub mod thin;

use std::fmt;

pub use self::polyline::{decode_route, encode_route, PolylineError};
pub use self::thin::{markers, thin, Marker, MarkerKind};

/// Number of decimal places kept in a cache key (roughly 111 m at the equator).
pub const KEY_DECIMALS: usize = 3;

/// A point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Both axes rounded to [`KEY_DECIMALS`] places.
    pub fn rounded(self) -> Self {
        Self {
            lat: round_degrees(self.lat),
            lon: round_degrees(self.lon),
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", format_degrees(self.lat), format_degrees(self.lon))
    }
}

/// An ordered sequence of coordinates decoded from one polyline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Route {
    points: Vec<Coordinate>,
}

impl Route {
    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<Coordinate> {
        self.points.first().copied()
    }
}

impl From<Vec<Coordinate>> for Route {
    fn from(points: Vec<Coordinate>) -> Self {
        Self { points }
    }
}

impl FromIterator<Coordinate> for Route {
    fn from_iter<I: IntoIterator<Item = Coordinate>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

/// Rounds to [`KEY_DECIMALS`] places through decimal formatting, so ties are
/// resolved on the exact binary value rather than on a scaled product.
pub fn round_degrees(value: f64) -> f64 {
    format!("{:.*}", KEY_DECIMALS, value).parse().unwrap_or(value)
}

/// Canonical text for a degree value: shortest round-trip digits, always with
/// a fractional part, exponent form below 1e-4 and from 1e16 upwards.
///
/// Cache keys and KML coordinates are written with this form, which matches
/// what older tooling stored in the same database.
pub fn format_degrees(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let magnitude = value.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        let formatted = format!("{value:e}");
        let (mantissa, exponent) = formatted.split_once('e').unwrap_or((&formatted, "0"));
        let exponent: i32 = exponent.parse().unwrap_or(0);
        let sign = if exponent < 0 { '-' } else { '+' };
        return format!("{mantissa}e{sign}{:02}", exponent.abs());
    }

    let text = value.to_string();
    if text.contains('.') {
        text
    } else {
        format!("{text}.0")
    }
}
