//! Application startup and lifecycle management.

use crate::api::{cors_layer, router, AppState, SignalSource};
use crate::assistant::{OfflineReplyProvider, ReplyProvider};
use crate::config::ServiceConfig;
use anyhow::{anyhow, Context};
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;

/// Build the reply provider named by `assistant.model`
pub fn reply_provider(config: &ServiceConfig) -> anyhow::Result<Arc<dyn ReplyProvider>> {
    match config.assistant.model.as_str() {
        "offline" => Ok(Arc::new(OfflineReplyProvider::new(
            config.assistant.canned_reply.clone(),
        ))),
        other => Err(anyhow!(
            "Unsupported assistant model '{}'; only 'offline' is available",
            other
        )),
    }
}

/// Build the router and state described by `config`
pub fn build_router(config: &ServiceConfig) -> anyhow::Result<Router> {
    let state = AppState::new(
        SignalSource::from_seed(config.generator.seed),
        reply_provider(config)?,
    );
    let cors = cors_layer(&config.cors.allowed_origins).context("Invalid CORS origin")?;

    Ok(router(state, cors))
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: ServiceConfig) -> anyhow::Result<Self> {
        let router = build_router(&config)?;

        // Port 0 binds a random port for testing
        let addr = config.bind_addr().context("Invalid server host")?;
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            e
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!(
            port,
            seeded = config.generator.seed.is_some(),
            assistant = %config.assistant.model,
            "LifeGuard signals service ready"
        );

        Ok(Self {
            port,
            listener,
            router,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until a shutdown signal arrives.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_assistant_model_is_rejected() {
        let mut config = ServiceConfig::default();
        config.assistant.model = "gemini-3-flash-preview".to_string();
        assert!(reply_provider(&config).is_err());
    }

    #[tokio::test]
    async fn test_build_binds_random_port() {
        let mut config = ServiceConfig::default();
        config.server.host = "127.0.0.1".to_string();
        config.server.port = 0;

        let app = Application::build(config).await.unwrap();
        assert_ne!(app.port(), 0);
    }
}
