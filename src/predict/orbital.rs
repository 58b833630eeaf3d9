use chrono::{DateTime, Utc};
use sgp4::{Constants, Elements};

use crate::predict::error::PredictError;
use crate::predict::propagation::propagate_position;
use crate::predict::types::{GeoPosition, SatelliteInfo};

/// Something that can answer "where is the satellite at this instant".
pub trait PositionModel {
    fn position(&self, at: DateTime<Utc>) -> Result<GeoPosition, PredictError>;
}

/// Produces a fresh position model handle, once per tick.
pub trait ModelSource: Send + Sync {
    fn open(&self) -> Result<Box<dyn PositionModel>, PredictError>;

    /// Human readable name of the tracked object.
    fn describe(&self) -> String;
}

/// SGP4 propagator for a single satellite
pub struct Orbital {
    info: SatelliteInfo,
    elements: Elements,
    constants: Constants,
}

impl Orbital {
    pub fn new(info: SatelliteInfo, elements: Elements) -> Result<Self, PredictError> {
        let constants =
            Constants::from_elements(&elements).map_err(|e| PredictError::InvalidTle {
                file: info.tle_source.clone(),
                message: e.to_string(),
            })?;
        Ok(Self {
            info,
            elements,
            constants,
        })
    }
}

impl PositionModel for Orbital {
    fn position(&self, at: DateTime<Utc>) -> Result<GeoPosition, PredictError> {
        propagate_position(&self.elements, &self.constants, at).map_err(|e| match e {
            PredictError::Propagation(msg) => {
                PredictError::Propagation(format!("{}: {}", self.info.name, msg))
            }
            other => other,
        })
    }
}
