mod config;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use axum::http::HeaderValue;
use axum::{extract::State, response::Html, routing::get, Json, Router};
use cropmap_shared::models::ClientConfig;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use config::Config;

#[derive(Clone)]
struct AppState {
    client: Arc<ClientConfig>,
    dist_dir: Arc<PathBuf>,
}

async fn client_config(State(state): State<AppState>) -> Json<ClientConfig> {
    Json(state.client.as_ref().clone())
}

/// Serve the SPA shell for every client-side route.
async fn serve_index(State(state): State<AppState>) -> Html<String> {
    // Try to serve the built frontend, fall back to a simple message
    match tokio::fs::read_to_string(state.dist_dir.join("index.html")).await {
        Ok(html) => Html(html),
        Err(e) => {
            tracing::debug!(error = %e, dir = %state.dist_dir.display(), "index.html not available");
            Html(
                r#"<!DOCTYPE html>
<html>
<head><title>Crop Map</title></head>
<body>
<h1>Crop Map</h1>
<p>Frontend not built yet. Client settings are served at <a href="/api/config">/api/config</a>.</p>
</body>
</html>"#
                    .to_string(),
            )
        }
    }
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
fn build_app(config: &Config) -> Router {
    let state = AppState {
        client: Arc::new(config.client.clone()),
        dist_dir: Arc::new(config.dist_dir.clone()),
    };

    // Static file routers are stateless, merge them before adding app state
    let static_files = Router::new()
        .nest(
            "/static",
            cached_static_router(&config.assets_dir, CACHE_1DAY),
        )
        .nest(
            "/assets",
            cached_static_router(&config.dist_dir.join("assets"), CACHE_IMMUTABLE),
        );

    Router::new()
        .route("/api/config", get(client_config))
        .route("/", get(serve_index))
        .route("/map", get(serve_index))
        .fallback(serve_index)
        .with_state(state)
        .merge(static_files)
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env().context("reading configuration from environment")?;
    if config.client.weather_api_key.is_empty() {
        tracing::warn!("OPENWEATHER_API_KEY is not set, the weather card will stay empty");
    }
    tracing::info!(
        dist = %config.dist_dir.display(),
        assets = %config.assets_dir.display(),
        recommend_url = %config.client.recommend_url,
        "Loaded configuration"
    );

    let app = build_app(&config);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!("Server running at http://localhost:{}", config.port);

    axum::serve(listener, app).await.context("serving http")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    struct Dirs {
        assets: tempfile::TempDir,
        dist: tempfile::TempDir,
    }

    /// Assets dir with `logo.svg`, dist dir with `index.html` and `assets/app.js`.
    fn dirs() -> Dirs {
        let assets = tempfile::tempdir().unwrap();
        std::fs::write(assets.path().join("logo.svg"), "<svg/>").unwrap();
        let dist = tempfile::tempdir().unwrap();
        std::fs::write(dist.path().join("index.html"), "<html>crop map shell</html>").unwrap();
        std::fs::create_dir(dist.path().join("assets")).unwrap();
        std::fs::write(dist.path().join("assets").join("app-abc123.js"), "bundle()").unwrap();
        Dirs { assets, dist }
    }

    fn test_config(dirs: &Dirs) -> Config {
        let mut cfg = Config::from_lookup(|_| None).unwrap();
        cfg.assets_dir = dirs.assets.path().to_path_buf();
        cfg.dist_dir = dirs.dist.path().to_path_buf();
        cfg
    }

    async fn get_path(app: Router, uri: &str) -> axum::response::Response {
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn body_string(resp: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_static_assets_have_1day_cache() {
        let dirs = dirs();
        let app = build_app(&test_config(&dirs));

        let resp = get_path(app, "/static/logo.svg").await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get("cache-control").unwrap(),
            "public, max-age=86400, must-revalidate"
        );
    }

    #[tokio::test]
    async fn test_dist_assets_have_immutable_cache() {
        let dirs = dirs();
        let app = build_app(&test_config(&dirs));

        let resp = get_path(app, "/assets/app-abc123.js").await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get("cache-control").unwrap(),
            "public, max-age=31536000, immutable"
        );
    }

    #[tokio::test]
    async fn test_missing_static_file_returns_404() {
        let dirs = dirs();
        let app = build_app(&test_config(&dirs));

        let resp = get_path(app, "/static/nonexistent.txt").await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_client_routes_serve_index() {
        let dirs = dirs();
        let app = build_app(&test_config(&dirs));

        for uri in ["/", "/map", "/about", "/auth/login"] {
            let resp = get_path(app.clone(), uri).await;
            assert_eq!(resp.status(), StatusCode::OK, "{uri}");
            assert_eq!(body_string(resp).await, "<html>crop map shell</html>", "{uri}");
        }
    }

    #[tokio::test]
    async fn test_index_placeholder_when_frontend_not_built() {
        let dirs = dirs();
        let mut cfg = test_config(&dirs);
        cfg.dist_dir = dirs.dist.path().join("missing");
        let app = build_app(&cfg);

        let resp = get_path(app, "/map").await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert!(body_string(resp).await.contains("Frontend not built yet"));
    }

    #[tokio::test]
    async fn test_config_endpoint_returns_client_settings() {
        let dirs = dirs();
        let mut cfg = test_config(&dirs);
        cfg.client.weather_api_key = "k-123".to_string();
        cfg.client.marker_radius_m = 750.0;
        let app = build_app(&cfg);

        let resp = get_path(app, "/api/config").await;

        assert_eq!(resp.status(), StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body_string(resp).await).unwrap();
        assert_eq!(json["weatherApiKey"], "k-123");
        assert_eq!(json["markerRadiusM"], 750.0);
        assert_eq!(json["recommendUrl"], "http://127.0.0.1:8000/recommend_crop/");

        let parsed: ClientConfig = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, cfg.client);
    }

    #[tokio::test]
    async fn test_static_and_dist_have_different_cache_policies() {
        let dirs = dirs();
        let app = build_app(&test_config(&dirs));

        let static_resp = get_path(app.clone(), "/static/logo.svg").await;
        let dist_resp = get_path(app, "/assets/app-abc123.js").await;

        let static_cc = static_resp
            .headers()
            .get("cache-control")
            .unwrap()
            .to_str()
            .unwrap();
        let dist_cc = dist_resp
            .headers()
            .get("cache-control")
            .unwrap()
            .to_str()
            .unwrap();

        assert_ne!(static_cc, dist_cc);
        assert!(static_cc.contains("max-age=86400"));
        assert!(dist_cc.contains("max-age=31536000"));
    }
}
