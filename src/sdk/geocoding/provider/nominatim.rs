use super::types::ReverseResponse;
use crate::sdk::config::GeocoderConfig;
use crate::sdk::geocoding::error::GeocodeError;
use crate::sdk::geocoding::service::{RawAddress, ReverseGeocoder};
use crate::sdk::route::Coordinate;
use crate::sdk::util::rate_limit::{self, Limiter};
use reqwest::blocking::Client;

pub struct NominatimGeocoder {
    client: Client,
    base_url: String,
    limiter: Limiter,
}

impl NominatimGeocoder {
    pub fn new(config: &GeocoderConfig) -> Result<Self, GeocodeError> {
        Ok(Self {
            client: Client::builder()
                .timeout(config.timeout)
                .user_agent(config.user_agent.as_str())
                .build()?,
            base_url: config.base_url.clone(),
            limiter: rate_limit::per_second(config.requests_per_second),
        })
    }

    fn reverse_url(&self) -> String {
        format!("{}/reverse", self.base_url)
    }
}

impl ReverseGeocoder for NominatimGeocoder {
    fn reverse_geocode(&self, coordinate: Coordinate) -> Result<Option<RawAddress>, GeocodeError> {
        rate_limit::wait(&self.limiter);
        let url = self.reverse_url();
        log::debug!("[PROVIDER] Calling reverse geocode for {}", coordinate);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("format", "json".to_string()),
                ("lat", coordinate.lat.to_string()),
                ("lon", coordinate.lon.to_string()),
                ("addressdetails", "1".to_string()),
            ])
            .send()?;
        let status = response.status();
        let text = response.text()?;

        if !status.is_success() {
            log::error!(
                "Geocoder returned non-success status: {}. Body: {}",
                status,
                text
            );
            return Err(GeocodeError::StatusError {
                status: status.as_u16(),
                body: text,
            });
        }

        let body: ReverseResponse = serde_json::from_str(&text).map_err(|e| {
            log::error!(
                "Failed to parse ReverseResponse. URL: {}\nError: {}. Body: {}",
                url,
                e,
                text
            );
            e
        })?;

        if let Some(reason) = body.error {
            log::debug!("[PROVIDER] No location for {}: {}", coordinate, reason);
            return Ok(None);
        }
        if let Some(name) = &body.display_name {
            log::debug!("[PROVIDER] {} -> {}", coordinate, name);
        }
        Ok(body.address)
    }
}
