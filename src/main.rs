mod config;
mod error;
mod handlers;
mod models;
mod pages;
mod services;
mod widgets;

use axum::{
    Router,
    handler::Handler,
    routing::{MethodRouter, get, post},
};
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::Config;
use crate::models::CalendarEvent;
use crate::services::llm::GeminiClient;

#[derive(Clone)]
pub struct AppState {
    pub gemini: Arc<GeminiClient>,
    pub schedule: Arc<Vec<CalendarEvent>>,
}

#[cfg(test)]
impl AppState {
    fn for_tests(api_base: &str, api_key: Option<&str>) -> Self {
        AppState {
            gemini: Arc::new(GeminiClient::new(
                api_base,
                services::llm::ApiKeySource::Fixed(api_key.map(str::to_string)),
            )),
            schedule: Arc::new(widgets::calendar::default_events()),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    let config = Config::from_env()?;
    let schedule = config.load_schedule()?;

    if std::env::var(&config.api_key_var).is_err() {
        tracing::warn!(
            var = %config.api_key_var,
            "Generation API key is not set; generation endpoints will answer 500 until it is"
        );
    }

    let app_state = AppState {
        gemini: Arc::new(GeminiClient::from_config(&config)),
        schedule: Arc::new(schedule),
    };

    let app = app(app_state, &config.static_dir);

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}

/// POST-only JSON route: bare 200 for OPTIONS, JSON 405 for anything else.
fn api_route<H, T>(handler: H) -> MethodRouter<AppState>
where
    H: Handler<T, AppState>,
    T: 'static,
{
    post(handler)
        .options(handlers::preflight)
        .fallback(handlers::method_not_allowed)
}

fn app(state: AppState, static_dir: &Path) -> Router {
    Router::new()
        .route("/", get(pages::index))
        .route("/schedule", get(pages::schedule))
        .route("/health", get(handlers::health_check))
        .route("/api/analyze", api_route(handlers::analyze_website))
        .route("/api/analyze-photoshoot", api_route(handlers::analyze_photoshoot))
        .route("/api/analyze-ebook", api_route(handlers::analyze_ebook))
        .route("/api/generate-cover-image", api_route(handlers::generate_cover_image))
        .route("/api/generate-ebook-pdf", api_route(handlers::generate_ebook_draft))
        .route("/api/export-ebook-epub", api_route(handlers::export_ebook_epub))
        .fallback_service(ServeDir::new(static_dir))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::AllowMethods::any())
                .allow_headers(tower_http::cors::AllowHeaders::any()),
        )
}
