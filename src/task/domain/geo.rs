//! GPS fixes recorded at worker-initiated transitions.

use super::TaskDomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One GPS fix: where and when a worker checked in or out.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoFix {
    latitude: f64,
    longitude: f64,
    recorded_at: DateTime<Utc>,
}

impl GeoFix {
    /// Creates a validated GPS fix.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidCoordinates`] when the latitude is
    /// outside -90..=90 or the longitude outside -180..=180.
    pub fn new(
        latitude: f64,
        longitude: f64,
        recorded_at: DateTime<Utc>,
    ) -> Result<Self, TaskDomainError> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(TaskDomainError::InvalidCoordinates {
                latitude,
                longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
            recorded_at,
        })
    }

    /// Returns the latitude in degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Returns the longitude in degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Returns when the fix was recorded.
    #[must_use]
    pub const fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }
}
