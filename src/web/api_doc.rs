use utoipa::OpenApi;

use super::api::dashboard::PositionResponse;
use super::api::error::ErrorResponse;
use crate::pipeline::{TickReport, TickerStatus};
use crate::predict::GeoPosition;
use crate::presenter::Snapshot;
use crate::sampler::{Sample, TimeSeries};
use crate::spectrum::{MagnitudeMode, Peak, PeakPair, Spectrum};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::api::dashboard::dashboard,
        super::api::dashboard::position,
        super::api::dashboard::status,
    ),
    components(
        schemas(
            Snapshot,
            PositionResponse,
            ErrorResponse,
            GeoPosition,
            TickerStatus,
            TickReport,
            Sample,
            TimeSeries,
            Spectrum,
            Peak,
            PeakPair,
            MagnitudeMode,
        )
    ),
    info(
        title = "Terra Watch API",
        description = "Live ground track and altitude spectrum of a single satellite",
        version = "0.1.0"
    ),
    tags(
        (name = "dashboard", description = "Latest tick, live position and ticker status")
    )
)]
pub struct ApiDoc;
