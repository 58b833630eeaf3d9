use crate::predict::GeoPosition;
use crate::spectrum::{Peak, PeakPair};

pub const EMPTY_SLOT: &str = "—";

pub fn position_lines(position: Option<&GeoPosition>) -> Vec<String> {
    let field = |label: &str, value: Option<f64>| match value {
        Some(v) => format!("{}: {:.2}", label, v),
        None => format!("{}: {}", label, EMPTY_SLOT),
    };
    vec![
        field("Longitude", position.map(|p| p.longitude_deg)),
        field("Latitude", position.map(|p| p.latitude_deg)),
        field("Altitude", position.map(|p| p.altitude_km)),
    ]
}

pub fn peak_lines(pair: &PeakPair) -> Vec<String> {
    let slot = |label: &str, peak: Option<Peak>| match peak {
        Some(p) => format!("{}: {:.2}", label, p.frequency),
        None => format!("{}: {}", label, EMPTY_SLOT),
    };
    vec![
        slot("First Frequency", pair.first),
        slot("Second Frequency", pair.second),
    ]
}
