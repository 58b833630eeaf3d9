use chrono::{DateTime, Utc};
use sgp4::{Constants, Elements};

use crate::predict::error::PredictError;
use crate::predict::types::GeoPosition;

// WGS-84
const EQUATORIAL_RADIUS_KM: f64 = 6378.137;
const POLAR_RADIUS_KM: f64 = 6356.752_314_245;
const ECCENTRICITY_SQ: f64 = 0.006_694_379_990_14;
const GEODETIC_ITERATIONS: usize = 8;

/// Propagate elements to `timestamp` and return the sub-satellite point.
pub fn propagate_position(
    elements: &Elements,
    constants: &Constants,
    timestamp: DateTime<Utc>,
) -> Result<GeoPosition, PredictError> {
    let minutes = elements
        .datetime_to_minutes_since_epoch(&timestamp.naive_utc())
        .map_err(|e| PredictError::Propagation(e.to_string()))?;

    let prediction = constants.propagate(minutes)?;

    let sidereal =
        sgp4::iau_epoch_to_sidereal_time(sgp4::julian_years_since_j2000(&timestamp.naive_utc()));

    let ecef = teme_to_ecef_position(prediction.position, sidereal);
    Ok(ecef_to_geodetic(ecef))
}

pub fn teme_to_ecef_position(pos_teme: [f64; 3], gmst: f64) -> [f64; 3] {
    let cos_gmst = gmst.cos();
    let sin_gmst = gmst.sin();
    [
        pos_teme[0] * cos_gmst + pos_teme[1] * sin_gmst,
        -pos_teme[0] * sin_gmst + pos_teme[1] * cos_gmst,
        pos_teme[2],
    ]
}

/// Iterative ECEF (km) to geodetic conversion. Longitude is in (-180, 180].
pub fn ecef_to_geodetic(ecef: [f64; 3]) -> GeoPosition {
    let [x, y, z] = ecef;
    let p = (x * x + y * y).sqrt();
    let longitude = y.atan2(x);

    let mut latitude = z.atan2(p * (1.0 - ECCENTRICITY_SQ));
    let mut altitude = 0.0;
    for _ in 0..GEODETIC_ITERATIONS {
        let sin_lat = latitude.sin();
        let n = EQUATORIAL_RADIUS_KM / (1.0 - ECCENTRICITY_SQ * sin_lat * sin_lat).sqrt();
        let cos_lat = latitude.cos();
        altitude = if cos_lat.abs() > 1e-10 {
            p / cos_lat - n
        } else {
            z.abs() - POLAR_RADIUS_KM
        };
        latitude = z.atan2(p * (1.0 - ECCENTRICITY_SQ * n / (n + altitude)));
    }

    GeoPosition {
        longitude_deg: longitude.to_degrees(),
        latitude_deg: latitude.to_degrees(),
        altitude_km: altitude,
    }
}
