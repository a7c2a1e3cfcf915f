//! Web server for imgshelf.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;

use crate::config::{Config, WebConfig};
use crate::file::ImageStore;
use crate::{Result, ShelfError};

use super::handlers::AppState;
use super::router::{
    create_health_router, create_router, create_static_router, create_swagger_router,
};

/// Web server for the API and the browser UI.
pub struct WebServer {
    /// Server address.
    addr: SocketAddr,
    /// Application state.
    app_state: Arc<AppState>,
    /// Web configuration.
    web_config: WebConfig,
}

impl WebServer {
    /// Create a new web server.
    ///
    /// Opens the storage root, creating it if needed.
    pub fn new(config: &Config) -> Result<Self> {
        let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
            .parse()
            .map_err(|e| ShelfError::Config(format!("invalid server address: {e}")))?;

        let store = ImageStore::new(&config.storage.root)?;
        tracing::info!("Image storage initialized at: {}", config.storage.root);

        let app_state = AppState::new(store)
            .with_max_upload_size(config.storage.max_upload_bytes())
            .with_image_cache_max_age(config.web.image_cache_max_age_secs);

        Ok(Self {
            addr,
            app_state: Arc::new(app_state),
            web_config: config.web.clone(),
        })
    }

    /// Get the server address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    fn build_router(&self) -> Router {
        let mut router = create_router(self.app_state.clone(), &self.web_config.cors_origins)
            .merge(create_health_router())
            .merge(create_swagger_router());

        if self.web_config.serve_static {
            if let Some(static_router) = create_static_router(&self.web_config.static_path) {
                router = router.merge(static_router);
            }
        }

        router.layer(CompressionLayer::new())
    }

    /// Run the web server.
    pub async fn run(self) -> std::result::Result<(), std::io::Error> {
        let router = self.build_router();

        let listener = TcpListener::bind(self.addr).await?;
        tracing::info!("Web server listening on http://{}", listener.local_addr()?);

        axum::serve(listener, router).await
    }

    /// Run the server in the background and return the actual bound address.
    ///
    /// This is useful for testing when binding to port 0.
    pub async fn run_with_addr(self) -> std::result::Result<SocketAddr, std::io::Error> {
        let router = self.build_router();

        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!("Web server listening on http://{}", local_addr);

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                tracing::error!("Web server error: {}", e);
            }
        });

        Ok(local_addr)
    }
}
