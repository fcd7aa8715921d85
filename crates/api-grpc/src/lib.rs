//! # API gRPC
//!
//! gRPC server implementation for the catalog.
//!
//! Handles:
//! - gRPC service setup and authentication
//! - Service implementations delegating to `CatalogService` for data operations
//! - gRPC-specific concerns (interceptors, reflection, tonic integration)
//!
//! Uses `api-shared` for common types and utilities.

#![warn(rust_2018_idioms)]

pub use service::{auth_interceptor, pb, CatalogGrpcService};

pub mod service;

use api_shared::pb::catalog_server::CatalogServer;
use api_shared::{ApiKeyValidator, CatalogService, FILE_DESCRIPTOR_SET};
use tonic::transport::server::Router;
use tonic::transport::Server;

/// Assemble the gRPC server: the catalog service behind the API-key interceptor, plus
/// reflection when enabled.
pub fn router(
    catalog: CatalogService,
    validator: ApiKeyValidator,
    enable_reflection: bool,
) -> anyhow::Result<Router> {
    if !validator.is_configured() {
        tracing::warn!("API_KEY is not set; every gRPC request will be rejected");
    }

    let mut router = Server::builder().add_service(CatalogServer::with_interceptor(
        CatalogGrpcService::new(catalog),
        auth_interceptor(validator),
    ));

    if enable_reflection {
        let reflection_service = tonic_reflection::server::Builder::configure()
            .register_encoded_file_descriptor_set(FILE_DESCRIPTOR_SET)
            .build_v1()?;
        router = router.add_service(reflection_service);
        tracing::info!("gRPC server reflection enabled");
    } else {
        tracing::info!("gRPC server reflection disabled");
    }

    Ok(router)
}
