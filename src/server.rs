//! HTTP surface: every `GET` path goes through the content resolver.

use crate::config::Config;
use crate::resolver::ContentResolver;
use anyhow::{Context, Result};
use axum::extract::{Request, State};
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceExt;
use tower_http::services::ServeFile;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, warn};

/// Build the router. There are no fixed routes: the SPA owns the URL space.
pub fn router(resolver: ContentResolver) -> Router {
    Router::new()
        .fallback(serve_content)
        .with_state(Arc::new(resolver))
        .layer(TraceLayer::new_for_http())
}

/// Bind to the configured address and serve until the process exits.
pub async fn serve(config: &Config) -> Result<()> {
    let resolver = ContentResolver::from_config(config);

    if !resolver.root().is_dir() {
        warn!(
            "Static root {} does not exist; every request will be 404",
            resolver.root().display()
        );
    }

    let addr = config.socket_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Server running at http://{}", addr);
    info!("Serving from: {}", resolver.root().display());
    info!("Default locale: {}", resolver.default_locale());

    axum::serve(listener, router(resolver))
        .await
        .context("Server error")?;

    Ok(())
}

async fn serve_content(State(resolver): State<Arc<ContentResolver>>, request: Request) -> Response {
    if !matches!(*request.method(), Method::GET | Method::HEAD) {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }

    let path = request.uri().path().to_string();
    let lookup = Arc::clone(&resolver);
    let resolved = tokio::task::spawn_blocking(move || lookup.resolve(&path)).await;

    let resolution = match resolved {
        Ok(Ok(resolution)) => resolution,
        Ok(Err(e)) => {
            warn!("{}", e);
            return (StatusCode::NOT_FOUND, "Not found").into_response();
        }
        Err(e) => {
            error!("Resolver task failed: {}", e);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    debug!("Serving {}", resolution.path.display());

    // ServeFile infers the content type from the extension
    match ServeFile::new(&resolution.path).oneshot(request).await {
        Ok(response) => response.into_response(),
        Err(infallible) => match infallible {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Language;
    use axum::body::Body;
    use std::fs;
    use tempfile::TempDir;

    fn create_static_root() -> TempDir {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        fs::create_dir_all(temp_dir.path().join("es")).unwrap();
        fs::write(temp_dir.path().join("es").join("index.html"), "<p>es</p>").unwrap();
        fs::write(temp_dir.path().join("styles.css"), "body{}").unwrap();
        temp_dir
    }

    async fn send(app: Router, method: Method, uri: &str) -> Response {
        let request = axum::http::Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        app.oneshot(request).await.unwrap()
    }

    fn content_type(response: &Response) -> &str {
        response.headers()["content-type"].to_str().unwrap()
    }

    #[tokio::test]
    async fn test_css_content_type() {
        let temp_dir = create_static_root();
        let app = router(ContentResolver::new(temp_dir.path(), Language::SPANISH));

        let response = send(app, Method::GET, "/styles.css").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(content_type(&response).starts_with("text/css"));
    }

    #[tokio::test]
    async fn test_head_has_headers_without_body() {
        let temp_dir = create_static_root();
        let app = router(ContentResolver::new(temp_dir.path(), Language::SPANISH));

        let response = send(app, Method::HEAD, "/styles.css").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(content_type(&response).starts_with("text/css"));
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_fallback_is_html() {
        let temp_dir = create_static_root();
        let app = router(ContentResolver::new(temp_dir.path(), Language::SPANISH));

        let response = send(app, Method::GET, "/about").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(content_type(&response).starts_with("text/html"));
    }

    #[tokio::test]
    async fn test_post_not_allowed() {
        let temp_dir = create_static_root();
        let app = router(ContentResolver::new(temp_dir.path(), Language::SPANISH));

        let response = send(app, Method::POST, "/about").await;

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_missing_index_is_404() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let app = router(ContentResolver::new(temp_dir.path(), Language::SPANISH));

        let response = send(app, Method::GET, "/en/about").await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
