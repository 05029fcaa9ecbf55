use crate::sdk::geocoding::service::RawAddress;
use serde::Deserialize;

// Nominatim `/reverse` payload. A point with no match still answers 200,
// carrying `error` instead of `address`.
#[derive(Debug, Deserialize)]
pub struct ReverseResponse {
    pub display_name: Option<String>,
    pub address: Option<RawAddress>,
    pub error: Option<String>,
}
