//! Synthetic position models for unit tests.

use std::cell::Cell;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};

use crate::predict::{GeoPosition, ModelSource, PositionModel, PredictError};

fn at_altitude(altitude_km: f64) -> GeoPosition {
    GeoPosition {
        longitude_deg: 12.5,
        latitude_deg: -45.25,
        altitude_km,
    }
}

/// Altitude equals signed seconds elapsed since `origin`.
pub struct LinearAltitude {
    origin: DateTime<Utc>,
}

impl LinearAltitude {
    pub fn new(origin: DateTime<Utc>) -> Self {
        Self { origin }
    }
}

impl PositionModel for LinearAltitude {
    fn position(&self, at: DateTime<Utc>) -> Result<GeoPosition, PredictError> {
        Ok(at_altitude((at - self.origin).num_seconds() as f64))
    }
}

#[derive(Clone, Copy)]
pub struct ConstantAltitude(pub f64);

impl PositionModel for ConstantAltitude {
    fn position(&self, _at: DateTime<Utc>) -> Result<GeoPosition, PredictError> {
        Ok(at_altitude(self.0))
    }
}

/// Succeeds for the first `remaining` queries, then fails.
pub struct FailingAfter {
    remaining: Cell<usize>,
}

impl FailingAfter {
    pub fn new(remaining: usize) -> Self {
        Self {
            remaining: Cell::new(remaining),
        }
    }
}

impl PositionModel for FailingAfter {
    fn position(&self, _at: DateTime<Utc>) -> Result<GeoPosition, PredictError> {
        match self.remaining.get() {
            0 => Err(PredictError::Propagation("synthetic failure".into())),
            n => {
                self.remaining.set(n - 1);
                Ok(at_altitude(700.0))
            }
        }
    }
}

/// Opens a `ConstantAltitude` model, or fails while `broken` is set.
pub struct SwitchableSource {
    altitude_km: f64,
    broken: AtomicBool,
}

impl SwitchableSource {
    pub fn new(altitude_km: f64) -> Self {
        Self {
            altitude_km,
            broken: AtomicBool::new(false),
        }
    }

    pub fn set_broken(&self, broken: bool) {
        self.broken.store(broken, Ordering::SeqCst);
    }
}

impl ModelSource for SwitchableSource {
    fn open(&self) -> Result<Box<dyn PositionModel>, PredictError> {
        if self.broken.load(Ordering::SeqCst) {
            return Err(PredictError::UnknownSatellite("SYNTHETIC".into()));
        }
        Ok(Box::new(ConstantAltitude(self.altitude_km)))
    }

    fn describe(&self) -> String {
        "SYNTHETIC".into()
    }
}
