use axum::{extract::State, response::IntoResponse};

use crate::presenter::{peak_lines, position_lines, Snapshot};
use crate::spectrum::PeakPair;
use crate::web::state::AppState;

use super::templates::DashboardTemplate;

/// Page shell; the chart itself is filled in by the page script from `/api/dashboard`.
pub async fn dashboard(State(state): State<AppState>) -> impl IntoResponse {
    let latest = state.ticker.lock().await.latest();
    let satellite = state.source.describe();
    let presenter = &state.config.presenter;

    let (position_text, peaks_text) = match latest {
        Some(report) => {
            let snapshot = Snapshot::render(&report, &satellite, presenter);
            (snapshot.position_text, snapshot.peaks_text)
        }
        None => (position_lines(None), peak_lines(&PeakPair::default())),
    };

    DashboardTemplate {
        title: presenter.title.clone(),
        satellite,
        theme: presenter.theme.to_string(),
        interval_ms: state.config.pipeline.interval.as_millis(),
        position_text,
        peaks_text,
    }
}
