//! Standalone REST server binary.
//!
//! The workspace's main `catalog-run` binary runs both REST and gRPC concurrently; this one is
//! for running REST on its own.

use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::AppState;
use api_shared::CatalogService;
use catalog_core::config::content_dir_from_env_value;
use catalog_core::constants::DEFAULT_REST_ADDR;
use catalog_core::{CoreConfig, Library};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?)
                .add_directive("catalog_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr: SocketAddr = std::env::var("CATALOG_REST_ADDR")
        .unwrap_or_else(|_| DEFAULT_REST_ADDR.into())
        .parse()?;

    let cfg = CoreConfig::new(content_dir_from_env_value(
        std::env::var("CATALOG_CONTENT_DIR").ok(),
    ))?;
    let library = Arc::new(Library::load(&cfg)?);

    let app = api_rest::router(AppState {
        catalog: CatalogService::new(library),
    });

    tracing::info!("-- Starting catalog REST API on {}", addr);
    tracing::info!("-- Swagger UI available at http://{}/swagger-ui/", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
