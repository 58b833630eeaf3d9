use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::pipeline::TickerStatus;
use crate::predict::GeoPosition;
use crate::presenter::{position_lines, Snapshot};
use crate::web::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::web::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct PositionResponse {
    pub satellite: String,
    pub timestamp: DateTime<Utc>,
    pub position: GeoPosition,
    pub text: Vec<String>,
}

#[utoipa::path(
    get,
    path = "/api/dashboard",
    responses(
        (status = 200, description = "Chart and text of the latest tick", body = Snapshot),
        (status = 503, description = "No tick has completed yet", body = ErrorResponse)
    ),
    tag = "dashboard"
)]
pub async fn dashboard(State(state): State<AppState>) -> ApiResult<Json<Snapshot>> {
    let report = state
        .ticker
        .lock()
        .await
        .latest()
        .ok_or(ApiError::NotReady)?;

    Ok(Json(Snapshot::render(
        &report,
        &state.source.describe(),
        &state.config.presenter,
    )))
}

#[utoipa::path(
    get,
    path = "/api/position",
    responses(
        (status = 200, description = "Position at the current instant", body = PositionResponse),
        (status = 502, description = "Position model failed", body = ErrorResponse)
    ),
    tag = "dashboard"
)]
pub async fn position(State(state): State<AppState>) -> ApiResult<Json<PositionResponse>> {
    let timestamp = Utc::now();
    let model = state.source.open()?;
    let position = model.position(timestamp)?;

    Ok(Json(PositionResponse {
        satellite: state.source.describe(),
        timestamp,
        position,
        text: position_lines(Some(&position)),
    }))
}

#[utoipa::path(
    get,
    path = "/api/status",
    responses(
        (status = 200, description = "Ticker status", body = TickerStatus)
    ),
    tag = "dashboard"
)]
pub async fn status(State(state): State<AppState>) -> Json<TickerStatus> {
    Json(state.ticker.lock().await.status())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{PipelineConfig, Ticker};
    use crate::predict::ModelSource;
    use crate::testing::SwitchableSource;
    use crate::web::config::Config;
    use axum::response::IntoResponse;
    use axum::http::StatusCode;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::Mutex;

    fn state(source: Arc<SwitchableSource>) -> AppState {
        let config = Config::from_yaml("satellite: SYNTHETIC\ntle_folder: tle\n").unwrap();
        let source: Arc<dyn ModelSource> = source;
        AppState {
            config: Arc::new(config),
            source,
            ticker: Arc::new(Mutex::new(Ticker::new())),
        }
    }

    #[tokio::test]
    async fn dashboard_not_ready_before_first_tick() {
        let state = state(Arc::new(SwitchableSource::new(700.0)));
        let response = dashboard(State(state)).await.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn dashboard_renders_latest_tick() {
        let state = state(Arc::new(SwitchableSource::new(700.0)));
        let config = PipelineConfig {
            sample_count: 64,
            interval: Duration::from_millis(10),
            ..Default::default()
        };
        state
            .ticker
            .lock()
            .await
            .start(state.source.clone(), config)
            .unwrap();

        let mut snapshot = None;
        for _ in 0..200 {
            if let Ok(Json(s)) = dashboard(State(state.clone())).await {
                snapshot = Some(s);
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        state.ticker.lock().await.stop().await;

        let snapshot = snapshot.expect("no snapshot rendered");
        assert_eq!(snapshot.satellite, "SYNTHETIC");
        assert_eq!(snapshot.position_text[2], "Altitude: 700.00");
        assert_eq!(snapshot.figure["data"][0]["y"].as_array().unwrap().len(), 64);
    }

    #[tokio::test]
    async fn position_reports_model_failure() {
        let source = Arc::new(SwitchableSource::new(700.0));
        source.set_broken(true);
        let response = position(State(state(source))).await.into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn position_formats_text() {
        let Json(body) = position(State(state(Arc::new(SwitchableSource::new(705.5)))))
            .await
            .ok()
            .unwrap();
        assert_eq!(body.text[0], "Longitude: 12.50");
        assert_eq!(body.text[1], "Latitude: -45.25");
        assert_eq!(body.text[2], "Altitude: 705.50");
    }

    #[tokio::test]
    async fn status_reflects_idle_ticker() {
        let state = state(Arc::new(SwitchableSource::new(700.0)));
        let Json(status) = status(State(state)).await;
        assert!(!status.running);
        assert_eq!(status.ticks, 0);
    }
}
