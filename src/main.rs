use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::AppState;
use api_shared::{ApiKeyValidator, CatalogService};
use catalog_core::config::{content_dir_from_env_value, flag_from_env_value};
use catalog_core::constants::{DEFAULT_GRPC_ADDR, DEFAULT_REST_ADDR};
use catalog_core::{CoreConfig, Library};

/// Main entry point for the catalog application
///
/// Starts both gRPC and REST servers concurrently over one shared library:
/// - gRPC server on port 50051 (configurable via CATALOG_GRPC_ADDR)
/// - REST server on port 3000 (configurable via CATALOG_REST_ADDR)
///
/// The gRPC server requires authentication via x-api-key header.
/// The REST server provides open, read-only access.
///
/// # Environment Variables
/// - `CATALOG_GRPC_ADDR`: gRPC server address (default: "0.0.0.0:50051")
/// - `CATALOG_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `CATALOG_CONTENT_DIR`: Directory of YAML content to load instead of the built-in content
/// - `API_KEY`: API key for gRPC authentication
/// - `CATALOG_ENABLE_REFLECTION`: Enable gRPC server reflection ("true" or "1")
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("catalog=info".parse()?)
                .add_directive("api_grpc=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let grpc_addr: SocketAddr = std::env::var("CATALOG_GRPC_ADDR")
        .unwrap_or_else(|_| DEFAULT_GRPC_ADDR.into())
        .parse()?;
    let rest_addr: SocketAddr = std::env::var("CATALOG_REST_ADDR")
        .unwrap_or_else(|_| DEFAULT_REST_ADDR.into())
        .parse()?;

    let cfg = CoreConfig::new(content_dir_from_env_value(
        std::env::var("CATALOG_CONTENT_DIR").ok(),
    ))?;
    let library = Arc::new(Library::load(&cfg)?);
    let catalog = CatalogService::new(library);

    let validator = ApiKeyValidator::new(std::env::var("API_KEY").ok());
    let enable_reflection = flag_from_env_value(std::env::var("CATALOG_ENABLE_REFLECTION").ok());

    tracing::info!("++ Starting catalog gRPC on {}", grpc_addr);
    tracing::info!("++ Starting catalog REST on {}", rest_addr);

    // Start REST server
    let rest_app = api_rest::router(AppState {
        catalog: catalog.clone(),
    });
    let rest_server = tokio::spawn(async move {
        let listener = tokio::net::TcpListener::bind(rest_addr).await?;
        axum::serve(listener, rest_app).await?;
        Ok::<(), anyhow::Error>(())
    });

    // Start gRPC server
    let grpc_server = api_grpc::router(catalog, validator, enable_reflection)?.serve(grpc_addr);

    // Run both
    let (rest_result, grpc_result) = tokio::join!(rest_server, grpc_server);
    rest_result??;
    grpc_result?;

    Ok(())
}
