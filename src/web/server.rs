use axum::{routing::get, Router};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::pipeline::Ticker;
use crate::predict::{ModelSource, TleCatalog};

use super::api::dashboard as dashboard_handlers;
use super::api_doc::ApiDoc;
use super::config::Config;
use super::state::AppState;
use super::ui::handlers as ui_handlers;

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let static_dir = state.config.web.static_dir.clone();

    Router::new()
        // UI routes
        .route("/", get(ui_handlers::dashboard))
        // Dashboard API endpoints
        .route("/api/dashboard", get(dashboard_handlers::dashboard))
        .route("/api/position", get(dashboard_handlers::position))
        .route("/api/status", get(dashboard_handlers::status))
        // Static files
        .nest_service("/static", ServeDir::new(static_dir))
        // OpenAPI / Swagger
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_server(config: Config) -> std::io::Result<()> {
    let bind_addr = config.web.bind.clone();
    let source: Arc<dyn ModelSource> = Arc::new(TleCatalog::new(
        config.tle_folder.clone(),
        config.satellite.clone(),
    ));

    let mut ticker = Ticker::new();
    if let Err(e) = ticker.start(source.clone(), config.pipeline.clone()) {
        log::error!("Failed to start ticker: {}", e);
    }

    let state = AppState {
        config: Arc::new(config),
        source,
        ticker: Arc::new(Mutex::new(ticker)),
    };

    log::info!("Starting server on {}", bind_addr);

    let listener = TcpListener::bind(&bind_addr).await?;
    serve_until(listener, state, shutdown_signal()).await
}

/// Serve until `shutdown` resolves, then stop the ticker.
pub async fn serve_until<F>(
    listener: TcpListener,
    state: AppState,
    shutdown: F,
) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let ticker = state.ticker.clone();
    let app = build_router(state);

    let result = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await;

    ticker.lock().await.stop().await;
    log::info!("Ticker stopped, server shut down");
    result
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                log::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    log::info!("Shutdown signal received");
}
