mod chart;
mod config;
mod text;

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::pipeline::TickReport;
use crate::predict::GeoPosition;
use crate::spectrum::{Peak, PeakPair};

pub use chart::build_figure;
pub use config::{PresenterConfig, Theme};
pub use text::{peak_lines, position_lines};

/// A tick report rendered for the dashboard.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Snapshot {
    pub tick: u64,
    pub generated_at: DateTime<Utc>,
    pub satellite: String,
    /// Plotly figure (`data` and `layout`)
    #[schema(value_type = Object)]
    pub figure: serde_json::Value,
    pub position: Option<GeoPosition>,
    pub position_text: Vec<String>,
    pub peaks: PeakPair,
    pub peaks_text: Vec<String>,
    /// Every peak above the height threshold, not only the displayed two
    pub all_peaks: Vec<Peak>,
}

impl Snapshot {
    pub fn render(report: &TickReport, satellite: &str, config: &PresenterConfig) -> Self {
        let position = report.series.latest().map(|s| s.position());
        Self {
            tick: report.tick,
            generated_at: report.reference,
            satellite: satellite.to_string(),
            figure: build_figure(report, config),
            position,
            position_text: position_lines(position.as_ref()),
            peaks: report.pair,
            peaks_text: peak_lines(&report.pair),
            all_peaks: report.peaks.clone(),
        }
    }
}
