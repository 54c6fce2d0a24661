mod engine;
mod error;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::extract::{Path as UrlPath, State};
use axum::http::HeaderValue;
use axum::{response::Html, routing::get, Json, Router};
use civic_shared::models::City;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tracing_subscriber::EnvFilter;

use engine::CivicEngine;
use error::ApiError;

const REGION_NAME: &str = "Vale do Paraíba";

async fn api_root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Civic Auditor Lite API is running",
        "region": REGION_NAME,
    }))
}

async fn list_cities(State(engine): State<Arc<CivicEngine>>) -> Result<Json<Vec<City>>, ApiError> {
    let cities = engine.regional_cities().await?;
    Ok(Json(cities))
}

async fn get_city(
    State(engine): State<Arc<CivicEngine>>,
    UrlPath(slug): UrlPath<String>,
) -> Result<Json<City>, ApiError> {
    engine
        .find_city(&slug)
        .await?
        .map(Json)
        .ok_or(ApiError::CityNotFound)
}

/// JSON API routes, separated so tests can run them without static files.
fn api_router(engine: Arc<CivicEngine>) -> Router {
    Router::new()
        .route("/api", get(api_root))
        .route("/api/cities", get(list_cities))
        .route("/api/city/{slug}", get(get_city))
        .with_state(engine)
}

/// Build a cache-controlled static file router.
///
/// Separated so tests can exercise the caching layer with arbitrary directories.
fn cached_static_router(dir: &Path, cache_header: &'static str) -> Router {
    let layer = SetResponseHeaderLayer::overriding(
        axum::http::header::CACHE_CONTROL,
        HeaderValue::from_static(cache_header),
    );
    Router::new()
        .fallback_service(ServeDir::new(dir))
        .layer(layer)
}

const CACHE_1DAY: &str = "public, max-age=86400, must-revalidate";
const CACHE_IMMUTABLE: &str = "public, max-age=31536000, immutable";

/// Build the full application router.
fn build_app(engine: Arc<CivicEngine>, assets_dir: &Path) -> Router {
    let static_files = Router::new()
        .nest("/static", cached_static_router(assets_dir, CACHE_1DAY))
        .nest(
            "/dist",
            cached_static_router(Path::new("dist"), CACHE_IMMUTABLE),
        )
        .nest(
            "/assets",
            cached_static_router(Path::new("dist/assets"), CACHE_IMMUTABLE),
        );

    api_router(engine)
        .route("/", get(serve_index))
        .route("/city/{slug}", get(serve_index))
        .merge(static_files)
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let assets_dir = PathBuf::from(env_or("ASSETS_DIR", "assets"));
    let ibge_base_url = env_or("IBGE_BASE_URL", engine::DEFAULT_IBGE_BASE_URL);

    let engine = Arc::new(CivicEngine::new(ibge_base_url).expect("Failed to build HTTP client"));
    tracing::info!(upstream = engine.base_url(), "Using municipality registry");

    let app = build_app(engine, &assets_dir);

    let port = env_or("PORT", "8000");
    let addr = format!("0.0.0.0:{}", port);
    tracing::info!("Server running at http://localhost:{}", port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| panic!("Failed to bind {}: {}", addr, e));
    axum::serve(listener, app).await.expect("Server error");
}

async fn serve_index() -> Html<String> {
    // Try to serve the built frontend, fall back to a simple message
    match tokio::fs::read_to_string("dist/index.html").await {
        Ok(html) => Html(html),
        Err(_) => Html(
            r#"<!DOCTYPE html>
<html>
<head><title>Civic Auditor Lite</title></head>
<body>
<h1>Civic Auditor Lite</h1>
<p>Frontend not built yet. The city dataset is available at <a href="/api/cities">/api/cities</a>.</p>
</body>
</html>"#
                .to_string(),
        ),
    }
}
