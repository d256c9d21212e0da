//! Location resolution: a position from the host, or the fallback city.

use async_trait::async_trait;
use std::fmt::Debug;
use tracing::{debug, info};

use crate::{error::LocationError, model::Coordinates};

/// Host capability that yields the current position.
#[async_trait]
pub trait LocationService: Send + Sync + Debug {
    /// `false` when the host has no location capability at all.
    fn is_available(&self) -> bool {
        true
    }

    /// Single one-shot position request; no retry, no tracking.
    async fn current_position(&self) -> Result<Coordinates, LocationError>;
}

/// A position configured up front, e.g. from the config file or CLI flags.
#[derive(Debug, Clone, Copy)]
pub struct FixedPosition(pub Coordinates);

#[async_trait]
impl LocationService for FixedPosition {
    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        Ok(self.0)
    }
}

/// Host without any location capability.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLocationService;

#[async_trait]
impl LocationService for NoLocationService {
    fn is_available(&self) -> bool {
        false
    }

    async fn current_position(&self) -> Result<Coordinates, LocationError> {
        Err(LocationError::PositionUnavailable)
    }
}

/// Where the first weather fetch of a session starts from.
#[derive(Debug, Clone, PartialEq)]
pub enum Origin {
    Coordinates(Coordinates),
    Fallback(String),
}

/// Ask the service for a position once, falling back to `default_city`.
///
/// Failures are never surfaced; they only select the fallback.
pub async fn resolve_origin(service: &dyn LocationService, default_city: &str) -> Origin {
    if !service.is_available() {
        info!(city = default_city, "Location service unavailable, using fallback city");
        return Origin::Fallback(default_city.to_string());
    }

    match service.current_position().await {
        Ok(coords) => {
            debug!(lat = coords.latitude, lon = coords.longitude, "Resolved position");
            Origin::Coordinates(coords)
        }
        Err(err) => {
            info!(error = %err, city = default_city, "Location failed, using fallback city");
            Origin::Fallback(default_city.to_string())
        }
    }
}
