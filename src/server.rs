//! Preview Server
//!
//! Serves a site directory the way static hosting does, mounted under the
//! deployment base path:
//!
//! - `<base>views/*` and `<base>assets/*`: files, 404 when missing
//! - anything else under `<base>`: the file if present, else `index.html`
//!   so path-based addresses (`/OK-DEVS/projects.html`) reach the router
//! - `GET /_health`: liveness

use axum::{routing::get, Json, Router};
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tower_http::{
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::router::BasePath;

/// Preview server errors
#[derive(Error, Debug)]
pub enum ServeError {
    #[error("Site directory {0:?} does not exist")]
    MissingRoot(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone)]
pub struct PreviewConfig {
    pub root: PathBuf,
    pub base_path: BasePath,
    pub host: String,
    pub port: u16,
}

impl PreviewConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Serialize)]
struct Health {
    status: &'static str,
    base_path: String,
}

/// Build the preview router for a site directory
pub fn build_router(root: &Path, base: &BasePath) -> Router {
    let index = ServeFile::new(root.join("index.html"));
    let site = Router::new()
        .nest_service("/views", ServeDir::new(root.join("views")))
        .nest_service("/assets", ServeDir::new(root.join("assets")))
        .fallback_service(ServeDir::new(root).fallback(index));

    let base_path = base.to_string();
    let app = Router::new().route(
        "/_health",
        get(move || {
            let base_path = base_path.clone();
            async move {
                Json(Health {
                    status: "ok",
                    base_path,
                })
            }
        }),
    );

    let app = if base.is_root() {
        app.merge(site)
    } else {
        app.nest_service(base.as_str().trim_end_matches('/'), site)
    };

    app.layer(TraceLayer::new_for_http())
}

/// Serve the site until Ctrl+C
pub async fn serve(config: &PreviewConfig) -> Result<(), ServeError> {
    if !config.root.is_dir() {
        return Err(ServeError::MissingRoot(config.root.clone()));
    }

    let router = build_router(&config.root, &config.base_path);
    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(
        "OK Devs preview of {:?} at http://{}{}",
        config.root,
        addr,
        config.base_path
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Preview server shut down");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
