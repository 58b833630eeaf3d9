use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::predict::GeoPosition;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, utoipa::ToSchema)]
pub struct Sample {
    pub timestamp: DateTime<Utc>,
    pub longitude_deg: f64,
    pub latitude_deg: f64,
    pub altitude_km: f64,
}

impl Sample {
    pub fn new(timestamp: DateTime<Utc>, position: GeoPosition) -> Self {
        Self {
            timestamp,
            longitude_deg: position.longitude_deg,
            latitude_deg: position.latitude_deg,
            altitude_km: position.altitude_km,
        }
    }

    pub fn position(&self) -> GeoPosition {
        GeoPosition {
            longitude_deg: self.longitude_deg,
            latitude_deg: self.latitude_deg,
            altitude_km: self.altitude_km,
        }
    }
}

/// Samples ordered most recent first.
#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
pub struct TimeSeries {
    pub samples: Vec<Sample>,
}

impl TimeSeries {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn latest(&self) -> Option<&Sample> {
        self.samples.first()
    }

    pub fn timestamps(&self) -> Vec<DateTime<Utc>> {
        self.samples.iter().map(|s| s.timestamp).collect()
    }

    pub fn altitudes(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.altitude_km).collect()
    }
}
