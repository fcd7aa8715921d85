//! Standalone gRPC server binary.
//!
//! The workspace's main `catalog-run` binary runs both gRPC and REST concurrently; this one is
//! for running gRPC on its own.

use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_shared::{ApiKeyValidator, CatalogService};
use catalog_core::config::{content_dir_from_env_value, flag_from_env_value};
use catalog_core::constants::DEFAULT_GRPC_ADDR;
use catalog_core::{CoreConfig, Library};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_grpc=info".parse()?)
                .add_directive("catalog_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr: SocketAddr = std::env::var("CATALOG_GRPC_ADDR")
        .unwrap_or_else(|_| DEFAULT_GRPC_ADDR.into())
        .parse()?;

    let cfg = CoreConfig::new(content_dir_from_env_value(
        std::env::var("CATALOG_CONTENT_DIR").ok(),
    ))?;
    let library = Arc::new(Library::load(&cfg)?);

    let validator = ApiKeyValidator::new(std::env::var("API_KEY").ok());
    let enable_reflection = flag_from_env_value(std::env::var("CATALOG_ENABLE_REFLECTION").ok());

    tracing::info!("-- Starting catalog gRPC on {}", addr);

    api_grpc::router(CatalogService::new(library), validator, enable_reflection)?
        .serve(addr)
        .await?;

    Ok(())
}
